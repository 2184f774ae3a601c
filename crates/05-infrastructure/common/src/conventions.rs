//! 约定规范定义
//!
//! 提供命名约定规则与框架接口清单

use crate::lifecycle::Lifetime;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 默认的框架接口清单
///
/// 这些 trait 由标准库或派生宏提供，从不作为服务契约。
pub const DEFAULT_FRAMEWORK_INTERFACES: &[&str] = &[
    "Any",
    "AsRef",
    "Borrow",
    "Clone",
    "Copy",
    "Debug",
    "Default",
    "Deserialize",
    "Display",
    "Drop",
    "Eq",
    "Error",
    "From",
    "Hash",
    "Injectable",
    "Into",
    "Ord",
    "PartialEq",
    "PartialOrd",
    "Send",
    "Serialize",
    "Sized",
    "Sync",
    "ToString",
    "Unpin",
];

static DEFAULT_FRAMEWORK_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| DEFAULT_FRAMEWORK_INTERFACES.iter().copied().collect());

/// 命名约定规则
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingRule {
    /// 名称模式，支持单个 `*` 通配符
    pub pattern: String,
    /// 匹配后的生命周期
    pub lifetime: Lifetime,
}

impl NamingRule {
    /// 创建新的命名规则
    pub fn new(pattern: impl Into<String>, lifetime: Lifetime) -> Self {
        Self {
            pattern: pattern.into(),
            lifetime,
        }
    }

    /// 以后缀创建规则
    pub fn suffix(suffix: &str, lifetime: Lifetime) -> Self {
        Self::new(format!("*{}", suffix), lifetime)
    }

    /// 检查简短类型名称是否匹配此规则
    pub fn matches(&self, name: &str) -> bool {
        if self.pattern.contains('*') {
            let pattern_parts: Vec<&str> = self.pattern.split('*').collect();

            if pattern_parts.len() == 2 {
                let prefix = pattern_parts[0];
                let suffix = pattern_parts[1];

                name.len() >= prefix.len() + suffix.len()
                    && name.starts_with(prefix)
                    && name.ends_with(suffix)
            } else {
                false
            }
        } else {
            name == self.pattern
        }
    }
}

/// 默认命名约定：以生命周期标记结尾
pub fn default_naming_rules() -> Vec<NamingRule> {
    vec![
        NamingRule::suffix("Singleton", Lifetime::Singleton),
        NamingRule::suffix("Scoped", Lifetime::Scoped),
        NamingRule::suffix("Transient", Lifetime::Transient),
    ]
}

/// 默认框架接口清单（拥有所有权的副本）
pub fn default_framework_interfaces() -> Vec<String> {
    DEFAULT_FRAMEWORK_INTERFACES
        .iter()
        .map(|name| name.to_string())
        .collect()
}

/// 命名约定规范
#[derive(Debug)]
pub struct NamingConventions;

impl NamingConventions {
    /// 拆分完整类型路径为 (程序集, 简短名称)
    ///
    /// 泛型参数会先被剥离，`app::Repo<app::User>` 得到 `("app", "Repo")`。
    pub fn split_type_path(full_name: &str) -> (String, String) {
        let path = Self::strip_generics(full_name).trim();
        let mut segments = path.split("::").filter(|segment| !segment.is_empty());
        let first = segments.next().unwrap_or_default();
        let last = path
            .rsplit("::")
            .find(|segment| !segment.is_empty())
            .unwrap_or(first);
        (first.to_string(), last.to_string())
    }

    /// 获取接口或类型的简短名称
    pub fn short_name(name: &str) -> &str {
        let path = Self::strip_generics(name).trim();
        path.rsplit("::").next().unwrap_or(path)
    }

    /// 检查接口是否属于默认框架接口
    pub fn is_default_framework_interface(name: &str) -> bool {
        DEFAULT_FRAMEWORK_SET.contains(Self::short_name(name))
    }

    fn strip_generics(name: &str) -> &str {
        name.split('<').next().unwrap_or(name)
    }
}
