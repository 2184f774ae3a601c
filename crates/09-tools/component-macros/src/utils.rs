//! 宏工具函数

use syn::{Expr, Generics, Lit, Meta, Path, Result};

/// 把路径还原为源码中的写法，例如 `mail::Mailer`
pub fn path_to_string(path: &Path) -> String {
    let segments: Vec<String> = path
        .segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect();
    let joined = segments.join("::");
    if path.leading_colon.is_some() {
        format!("::{}", joined)
    } else {
        joined
    }
}

/// 读取 `key = "value"` 形式的字符串值
pub fn string_value(meta: &Meta) -> Result<String> {
    let name_value = meta.require_name_value()?;
    match &name_value.value {
        Expr::Lit(expr_lit) => match &expr_lit.lit {
            Lit::Str(lit_str) => Ok(lit_str.value()),
            other => Err(syn::Error::new_spanned(other, "期望字符串字面量")),
        },
        other => Err(syn::Error::new_spanned(other, "期望字符串字面量")),
    }
}

/// 检查类型是否带有类型参数或常量参数
pub fn is_open_generic(generics: &Generics) -> bool {
    generics.type_params().next().is_some() || generics.const_params().next().is_some()
}

/// 为所有类型参数追加 `'static` 约束
pub fn with_static_bounds(generics: &Generics) -> Generics {
    let mut generics = generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(syn::parse_quote!('static));
    }
    generics
}
