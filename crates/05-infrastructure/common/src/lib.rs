//! # Syringe Common
//!
//! 这个 crate 提供了 Syringe 自动注册体系的公共类型、约定和错误定义。
//!
//! ## 核心类型
//!
//! - [`Lifetime`] - 服务生命周期
//! - [`TypeDescriptor`] - 候选类型描述符（替代运行时反射）
//! - [`RegistrationDecision`] - 单个候选类型的注册决策
//! - [`RegistrationSettings`] - 显式传递的注册默认设置
//! - [`Optional`] - 可选依赖包装器
//! - [`Injectable`] - 提供类型描述符的 trait
//!
//! ## 设计原则
//!
//! - 描述符在编译期或加载期产生，匹配逻辑只读取描述符
//! - 约定优于配置，配置可覆盖约定
//! - 无进程级可变全局状态

pub mod component;
pub mod configuration;
pub mod conventions;
pub mod errors;
pub mod lifecycle;
pub mod metadata;
pub mod optional;

pub use component::*;
pub use configuration::*;
pub use conventions::*;
pub use errors::*;
pub use lifecycle::*;
pub use metadata::*;
pub use optional::*;

// 派生宏生成的代码通过此路径提交类型描述符
#[doc(hidden)]
pub mod __private {
    pub use inventory;
}
