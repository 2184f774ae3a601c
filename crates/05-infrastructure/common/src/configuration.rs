//! 注册设置
//!
//! 进程级默认设置被改写为显式传递的值：匹配器与注册引擎在调用时接收
//! [`RegistrationSettings`]，构造后即不可变。

use crate::conventions::{default_framework_interfaces, default_naming_rules, NamingConventions, NamingRule};
use crate::lifecycle::Lifetime;
use serde::{Deserialize, Serialize};

/// 注册设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationSettings {
    /// 未匹配任何约定时使用的生命周期
    pub default_lifetime: Lifetime,
    /// 为 true 时，即使类型只实现一个接口也以自身注册
    pub register_as_type_when_type_has_interfaces: bool,
    /// 不作为服务契约的框架接口
    pub framework_interfaces: Vec<String>,
    /// 命名约定规则
    pub naming_rules: Vec<NamingRule>,
}

impl Default for RegistrationSettings {
    fn default() -> Self {
        Self {
            default_lifetime: Lifetime::Transient,
            register_as_type_when_type_has_interfaces: false,
            framework_interfaces: default_framework_interfaces(),
            naming_rules: default_naming_rules(),
        }
    }
}

impl RegistrationSettings {
    /// 创建默认设置
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置默认生命周期
    pub fn with_default_lifetime(mut self, lifetime: Lifetime) -> Self {
        self.default_lifetime = lifetime;
        self
    }

    /// 设置是否始终以类型自身注册
    pub fn register_as_type_when_type_has_interfaces(mut self, enabled: bool) -> Self {
        self.register_as_type_when_type_has_interfaces = enabled;
        self
    }

    /// 添加命名规则
    pub fn with_naming_rule(mut self, rule: NamingRule) -> Self {
        self.naming_rules.push(rule);
        self
    }

    /// 清空命名规则
    pub fn without_naming_rules(mut self) -> Self {
        self.naming_rules.clear();
        self
    }

    /// 追加框架接口
    pub fn with_framework_interface(mut self, name: impl Into<String>) -> Self {
        self.framework_interfaces.push(name.into());
        self
    }

    /// 检查接口是否为框架接口（按简短名称比较）
    pub fn is_framework_interface(&self, name: &str) -> bool {
        let short = NamingConventions::short_name(name);
        self.framework_interfaces
            .iter()
            .any(|framework| NamingConventions::short_name(framework) == short)
    }

    /// 查找匹配类型名称的全部命名规则
    pub fn matching_rules(&self, name: &str) -> Vec<&NamingRule> {
        self.naming_rules
            .iter()
            .filter(|rule| rule.matches(name))
            .collect()
    }
}
