//! # Syringe Macros
//!
//! 这个 crate 提供了为自动注册产生类型描述符的派生宏。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use syringe::Injectable;
//!
//! trait Mailer {}
//!
//! #[derive(Injectable)]
//! #[injectable(singleton, interfaces(Mailer))]
//! pub struct SmtpMailer;
//!
//! impl Mailer for SmtpMailer {}
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod component;
mod utils;

/// 可注入类型派生宏
///
/// 为类型实现 `Injectable`，非泛型类型同时登记到编译期类型目录。
///
/// # 参数
///
/// - `singleton` / `scoped` / `transient` - 声明生命周期（缺省时按约定推断）
/// - `interfaces(TraitA, TraitB)` - 类型实现的服务接口，非泛型类型在编译期检查确实实现
/// - `assembly = "name"` - 覆盖所属程序集（默认取 crate 名）
/// - `name = "Name"` - 覆盖用于约定匹配和覆盖表的简短名称
/// - `skip` - 不参与自动注册
/// - `abstract_type` - 标记为抽象类型
/// - `crate = "path"` - 生成代码使用的根路径（默认 `::syringe`）
///
/// 泛型类型被视为开放泛型，永远不会被注册。
#[proc_macro_derive(Injectable, attributes(injectable))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    component::derive_injectable_impl(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
