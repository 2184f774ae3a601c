//! 可注入组件接口定义
//!
//! 提供类型描述符来源与服务集合条目

use crate::lifecycle::Lifetime;
use crate::metadata::{ServiceContract, TypeDescriptor};
use serde::{Deserialize, Serialize};

/// 可注入组件 trait
///
/// 由 `#[derive(Injectable)]` 实现，返回类型在编译期声明的描述符。
pub trait Injectable: 'static {
    /// 获取类型描述符
    fn type_descriptor() -> TypeDescriptor;
}

/// 编译期提交的类型登记项
///
/// 派生宏为每个非泛型类型提交一项，扫描器通过 `inventory` 枚举。
#[derive(Debug, Clone, Copy)]
pub struct TypeRegistration {
    descriptor: fn() -> TypeDescriptor,
}

impl TypeRegistration {
    /// 创建登记项
    pub const fn new(descriptor: fn() -> TypeDescriptor) -> Self {
        Self { descriptor }
    }

    /// 构造描述符
    pub fn descriptor(&self) -> TypeDescriptor {
        (self.descriptor)()
    }
}

inventory::collect!(TypeRegistration);

/// 枚举链接进当前二进制的全部已登记类型
pub fn registered_types() -> impl Iterator<Item = TypeDescriptor> {
    inventory::iter::<TypeRegistration>
        .into_iter()
        .map(TypeRegistration::descriptor)
}

/// 服务集合条目
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    /// 暴露的契约
    pub contract: ServiceContract,
    /// 实现类型的完整路径
    pub implementation: String,
    /// 生命周期
    pub lifetime: Lifetime,
}

impl ServiceDescriptor {
    /// 创建新的服务条目
    pub fn new(contract: ServiceContract, implementation: impl Into<String>, lifetime: Lifetime) -> Self {
        Self {
            contract,
            implementation: implementation.into(),
            lifetime,
        }
    }

    /// 以具体类型自身为契约的条目
    pub fn for_type<T: 'static>(lifetime: Lifetime) -> Self {
        Self::new(
            ServiceContract::concrete::<T>(),
            std::any::type_name::<T>(),
            lifetime,
        )
    }
}
