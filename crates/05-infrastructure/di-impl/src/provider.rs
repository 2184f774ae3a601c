//! 参考服务提供者
//!
//! 容器构建属于外部协作方；这里提供一个最小实现，让可选依赖的解析语义
//! 可以端到端观察。单例会被缓存，作用域与瞬时服务每次解析都新建实例。

use crate::collection::ServiceCollectionImpl;
use parking_lot::Mutex;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use syringe_abstractions::ServiceResolver;
use syringe_common::{DependencyError, DependencyResult, Lifetime, ServiceContract, ServiceDescriptor};
use tracing::{debug, info};

type AnyInstance = Arc<dyn Any + Send + Sync>;

/// 服务工厂函数类型
pub type ServiceFactoryFn = Arc<dyn Fn(&ServiceProvider) -> DependencyResult<AnyInstance> + Send + Sync>;

/// 工厂注册表：实现类型完整路径 → 工厂函数
#[derive(Clone, Default)]
pub struct FactoryRegistry {
    factories: HashMap<String, ServiceFactoryFn>,
}

impl fmt::Debug for FactoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryRegistry")
            .field("implementations", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl FactoryRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册实现类型的工厂
    pub fn register<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Send + Sync + 'static,
        F: Fn(&ServiceProvider) -> DependencyResult<T> + Send + Sync + 'static,
    {
        let wrapped: ServiceFactoryFn =
            Arc::new(move |provider| factory(provider).map(|instance| Arc::new(instance) as AnyInstance));
        self.factories
            .insert(std::any::type_name::<T>().to_string(), wrapped);
        self
    }

    /// 注册共享的现成实例
    pub fn register_instance<T>(&mut self, instance: T) -> &mut Self
    where
        T: Send + Sync + 'static,
    {
        let shared: AnyInstance = Arc::new(instance);
        self.factories.insert(
            std::any::type_name::<T>().to_string(),
            Arc::new(move |_| Ok(shared.clone())),
        );
        self
    }

    /// 检查实现类型是否有工厂
    pub fn contains(&self, implementation: &str) -> bool {
        self.factories.contains_key(implementation)
    }

    /// 工厂数量
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

/// 参考服务提供者
pub struct ServiceProvider {
    registrations: HashMap<ServiceContract, Vec<ServiceDescriptor>>,
    factories: FactoryRegistry,
    singletons: Mutex<HashMap<String, AnyInstance>>,
}

impl fmt::Debug for ServiceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceProvider")
            .field("contracts", &self.registrations.len())
            .field("factories", &self.factories)
            .finish()
    }
}

impl ServiceProvider {
    /// 从服务集合构建提供者
    ///
    /// 每个注册的实现类型都必须有对应工厂。
    pub fn build(services: &ServiceCollectionImpl, factories: FactoryRegistry) -> DependencyResult<Self> {
        let mut registrations: HashMap<ServiceContract, Vec<ServiceDescriptor>> = HashMap::new();
        for descriptor in services {
            if !factories.contains(&descriptor.implementation) {
                return Err(DependencyError::FactoryNotFound {
                    implementation: descriptor.implementation.clone(),
                });
            }
            registrations
                .entry(descriptor.contract.clone())
                .or_default()
                .push(descriptor.clone());
        }

        info!("构建服务提供者完成，注册了 {} 个契约", registrations.len());
        Ok(Self {
            registrations,
            factories,
            singletons: Mutex::new(HashMap::new()),
        })
    }

    /// 检查类型 `T` 是否以自身为契约注册
    pub fn is_registered<T: 'static>(&self) -> bool {
        self.can_resolve(&ServiceContract::concrete::<T>())
    }

    /// 已注册的契约
    pub fn contracts(&self) -> Vec<&ServiceContract> {
        self.registrations.keys().collect()
    }

    /// 解析契约下的全部实现
    pub fn resolve_all<T>(&self, contract: &ServiceContract) -> DependencyResult<Vec<Arc<T>>>
    where
        T: Send + Sync + 'static,
    {
        self.registrations
            .get(contract)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|descriptor| self.instantiate(descriptor).and_then(|instance| downcast(instance, descriptor)))
            .collect()
    }

    fn instantiate(&self, descriptor: &ServiceDescriptor) -> DependencyResult<AnyInstance> {
        if descriptor.lifetime == Lifetime::Singleton {
            if let Some(instance) = self.singletons.lock().get(&descriptor.implementation) {
                return Ok(instance.clone());
            }
        }

        let factory = self
            .factories
            .factories
            .get(&descriptor.implementation)
            .ok_or_else(|| DependencyError::FactoryNotFound {
                implementation: descriptor.implementation.clone(),
            })?;

        // 锁不跨越工厂调用，工厂内部可以继续解析依赖
        let instance = factory(self)?;
        debug!("创建实例: {} ({})", descriptor.implementation, descriptor.lifetime);

        if descriptor.lifetime == Lifetime::Singleton {
            let mut singletons = self.singletons.lock();
            return Ok(singletons
                .entry(descriptor.implementation.clone())
                .or_insert(instance)
                .clone());
        }
        Ok(instance)
    }
}

fn downcast<T>(instance: AnyInstance, descriptor: &ServiceDescriptor) -> DependencyResult<Arc<T>>
where
    T: Send + Sync + 'static,
{
    instance
        .downcast::<T>()
        .map_err(|_| DependencyError::TypeMismatch {
            expected: std::any::type_name::<T>().to_string(),
            implementation: descriptor.implementation.clone(),
        })
}

impl ServiceResolver for ServiceProvider {
    fn resolve_contract<T>(&self, contract: &ServiceContract) -> DependencyResult<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        // 同一契约有多个实现时，最后注册的胜出
        let descriptor = self
            .registrations
            .get(contract)
            .and_then(|descriptors| descriptors.last())
            .ok_or_else(|| DependencyError::ComponentNotRegistered {
                type_name: contract.name().to_string(),
            })?;

        let instance = self.instantiate(descriptor)?;
        downcast(instance, descriptor)
    }

    fn can_resolve(&self, contract: &ServiceContract) -> bool {
        self.registrations.contains_key(contract)
    }
}
