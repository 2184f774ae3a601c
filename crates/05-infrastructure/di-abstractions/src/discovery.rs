//! 类型发现与约定匹配抽象接口

use syringe_common::{RegistrationDecision, RegistrationResult, ServiceContract, TypeDescriptor};

/// 类型目录 trait
///
/// 替代程序集反射：按程序集名称列出其中声明的类型描述符。
pub trait TypeCatalog {
    /// 获取程序集中的类型，程序集未知时返回 `None`
    fn types_in(&self, assembly: &str) -> Option<Vec<TypeDescriptor>>;

    /// 获取目录中已知的全部程序集
    fn assemblies(&self) -> Vec<String>;

    /// 获取目录名称
    fn name(&self) -> &str;
}

/// 约定匹配器 trait
///
/// 纯函数：相同描述符与相同设置总是得到相同结果。
pub trait ConventionMatcher {
    /// 对候选类型分类，不是注册候选时返回 `Ok(None)`
    fn classify(&self, descriptor: &TypeDescriptor) -> RegistrationResult<Option<RegistrationDecision>>;

    /// 检查类型是否可以作为注册候选
    fn is_candidate(&self, descriptor: &TypeDescriptor) -> bool;

    /// 计算类型暴露的契约
    fn contract_for(&self, descriptor: &TypeDescriptor) -> ServiceContract;
}

impl<T: TypeCatalog + ?Sized> TypeCatalog for &T {
    fn types_in(&self, assembly: &str) -> Option<Vec<TypeDescriptor>> {
        (**self).types_in(assembly)
    }

    fn assemblies(&self) -> Vec<String> {
        (**self).assemblies()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
