//! 服务注册抽象接口

use serde::{Deserialize, Serialize};
use syringe_common::{Lifetime, ServiceDescriptor};

/// 服务集合 trait
///
/// 注册引擎只通过 [`ServiceCollection::add`] 追加条目，从不读取或构建集合。
/// 同一集合不得被并发注册调用共享，`&mut self` 保证这一点。
pub trait ServiceCollection {
    /// 追加服务条目
    fn add(&mut self, descriptor: ServiceDescriptor);
}

impl ServiceCollection for Vec<ServiceDescriptor> {
    fn add(&mut self, descriptor: ServiceDescriptor) {
        self.push(descriptor);
    }
}

/// 生命周期覆盖来源 trait
///
/// 按 (程序集简短名称, 类型简短名称) 强制指定生命周期。
pub trait OverrideSource {
    /// 查找覆盖的生命周期，未配置时返回 `None`
    fn lookup(&self, assembly: &str, type_name: &str) -> Option<Lifetime>;

    /// 覆盖来源名称
    fn source_name(&self) -> &str {
        "overrides"
    }
}

/// 注册模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RegistrationMode {
    /// 约定注册，覆盖表只调整生命周期
    #[default]
    Convention,
    /// 仅注册覆盖表中列出的类型
    ConfigurationOnly,
}
