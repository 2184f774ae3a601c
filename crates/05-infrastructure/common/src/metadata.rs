//! 元数据定义
//!
//! 提供候选类型描述符、服务契约与注册决策

use crate::conventions::NamingConventions;
use crate::lifecycle::Lifetime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 候选类型描述符
///
/// 替代运行时反射：由 `#[derive(Injectable)]` 或调用方显式构造，
/// 约定匹配器只读取这里的字段。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// 简短类型名称（不包含模块路径与泛型参数）
    pub name: String,
    /// 完整类型路径，作为类型标识
    pub full_name: String,
    /// 所属程序集（声明该类型的 crate）
    pub assembly: String,
    /// 直接与间接实现的接口名称
    pub interfaces: Vec<String>,
    /// 是否为抽象类型
    pub is_abstract: bool,
    /// 是否为开放泛型定义
    pub is_open_generic: bool,
    /// 是否参与自动注册
    pub participates: bool,
    /// 类型上声明的生命周期
    pub declared_lifetime: Option<Lifetime>,
}

impl TypeDescriptor {
    /// 从完整类型路径创建描述符
    ///
    /// 程序集取路径的第一段，简短名称取最后一段。
    pub fn new(full_name: impl Into<String>) -> Self {
        let full_name = full_name.into();
        let (assembly, name) = NamingConventions::split_type_path(&full_name);
        Self {
            name,
            assembly,
            full_name,
            interfaces: Vec::new(),
            is_abstract: false,
            is_open_generic: false,
            participates: true,
            declared_lifetime: None,
        }
    }

    /// 从类型获取描述符
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::new(std::any::type_name::<T>())
    }

    /// 设置程序集
    pub fn with_assembly(mut self, assembly: impl Into<String>) -> Self {
        self.assembly = assembly.into();
        self
    }

    /// 设置简短名称
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// 添加实现的接口
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        let interface = interface.into();
        if !self.interfaces.contains(&interface) {
            self.interfaces.push(interface);
        }
        self
    }

    /// 批量添加实现的接口
    pub fn with_interfaces<I, S>(self, interfaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        interfaces
            .into_iter()
            .fold(self, |descriptor, interface| descriptor.with_interface(interface))
    }

    /// 标记为抽象类型
    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// 标记为开放泛型定义
    pub fn open_generic(mut self) -> Self {
        self.is_open_generic = true;
        self
    }

    /// 标记为不参与自动注册
    pub fn skip(mut self) -> Self {
        self.participates = false;
        self
    }

    /// 声明生命周期
    pub fn with_lifetime(mut self, lifetime: Lifetime) -> Self {
        self.declared_lifetime = Some(lifetime);
        self
    }

    /// 类型标识是否有效
    pub fn has_identity(&self) -> bool {
        !self.full_name.trim().is_empty() && !self.name.trim().is_empty()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name)
    }
}

/// 服务契约：消费者向容器请求的类型标识
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ServiceContract {
    /// 具体类型本身
    Concrete(String),
    /// 类型实现的某个接口
    Interface(String),
}

impl ServiceContract {
    /// 以具体类型作为契约
    pub fn concrete<T: ?Sized + 'static>() -> Self {
        Self::Concrete(std::any::type_name::<T>().to_string())
    }

    /// 契约名称
    pub fn name(&self) -> &str {
        match self {
            Self::Concrete(name) | Self::Interface(name) => name,
        }
    }

    /// 是否为接口契约
    pub fn is_interface(&self) -> bool {
        matches!(self, Self::Interface(_))
    }
}

impl fmt::Display for ServiceContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Concrete(name) => write!(f, "类型 {}", name),
            Self::Interface(name) => write!(f, "接口 {}", name),
        }
    }
}

/// 生命周期的决策来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionOrigin {
    /// 配置覆盖表
    Override,
    /// 类型上声明的生命周期
    Declared,
    /// 命名约定
    Convention,
    /// 默认设置
    Default,
}

/// 注册决策
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistrationDecision {
    /// 实现类型的完整路径
    pub implementation: String,
    /// 实现类型所属程序集
    pub assembly: String,
    /// 暴露的契约
    pub contract: ServiceContract,
    /// 生命周期
    pub lifetime: Lifetime,
    /// 生命周期来源
    pub origin: DecisionOrigin,
}

impl RegistrationDecision {
    /// 使用新的生命周期与来源创建决策副本
    pub fn with_lifetime(&self, lifetime: Lifetime, origin: DecisionOrigin) -> Self {
        Self {
            lifetime,
            origin,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_splits_path() {
        let descriptor = TypeDescriptor::new("my_app::services::FooService");
        assert_eq!(descriptor.name, "FooService");
        assert_eq!(descriptor.assembly, "my_app");
        assert!(descriptor.participates);
        assert!(descriptor.has_identity());
    }

    #[test]
    fn test_descriptor_of_type() {
        struct LocalWidget;
        let descriptor = TypeDescriptor::of::<LocalWidget>();
        assert_eq!(descriptor.name, "LocalWidget");
        assert_eq!(descriptor.assembly, "syringe_common");
    }

    #[test]
    fn test_interfaces_deduplicated() {
        let descriptor = TypeDescriptor::new("app::Foo")
            .with_interfaces(["IFoo", "IBar"])
            .with_interface("IFoo");
        assert_eq!(descriptor.interfaces, vec!["IFoo", "IBar"]);
    }

    #[test]
    fn test_empty_identity_detected() {
        assert!(!TypeDescriptor::new("").has_identity());
        assert!(!TypeDescriptor::new("   ").has_identity());
    }
}
