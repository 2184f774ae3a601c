//! 服务解析抽象接口
//!
//! 容器构建属于外部协作方，这里只定义可选依赖语义需要的最小解析面。

use std::sync::Arc;
use syringe_common::{DependencyResult, Optional, ServiceContract};

/// 服务解析器 trait
pub trait ServiceResolver {
    /// 按契约解析服务，并转换为实现类型 `T`
    fn resolve_contract<T>(&self, contract: &ServiceContract) -> DependencyResult<Arc<T>>
    where
        T: Send + Sync + 'static;

    /// 检查契约是否已注册
    fn can_resolve(&self, contract: &ServiceContract) -> bool;

    /// 以具体类型自身为契约解析
    fn resolve<T>(&self) -> DependencyResult<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        self.resolve_contract(&ServiceContract::concrete::<T>())
    }

    /// 解析可选依赖：未注册时返回 [`Optional::Empty`]
    ///
    /// 已注册但创建失败仍然返回错误。
    fn resolve_optional<T>(&self) -> DependencyResult<Optional<Arc<T>>>
    where
        T: Send + Sync + 'static,
    {
        self.resolve_optional_contract(&ServiceContract::concrete::<T>())
    }

    /// 按契约解析可选依赖
    fn resolve_optional_contract<T>(&self, contract: &ServiceContract) -> DependencyResult<Optional<Arc<T>>>
    where
        T: Send + Sync + 'static,
    {
        if !self.can_resolve(contract) {
            return Ok(Optional::Empty);
        }
        self.resolve_contract(contract).map(Optional::Present)
    }
}
