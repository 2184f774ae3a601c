//! 服务集合实现

use syringe_abstractions::ServiceCollection;
use syringe_common::{Lifetime, ServiceContract, ServiceDescriptor};

/// 有序、只追加的服务集合
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceCollectionImpl {
    descriptors: Vec<ServiceDescriptor>,
}

impl ServiceCollectionImpl {
    /// 创建空集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 条目数量
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// 按追加顺序遍历
    pub fn iter(&self) -> std::slice::Iter<'_, ServiceDescriptor> {
        self.descriptors.iter()
    }

    /// 获取指定契约的全部条目
    pub fn descriptors_for(&self, contract: &ServiceContract) -> Vec<&ServiceDescriptor> {
        self.descriptors
            .iter()
            .filter(|descriptor| &descriptor.contract == contract)
            .collect()
    }

    /// 检查是否存在完全相同的条目
    pub fn contains(&self, contract: &ServiceContract, implementation: &str, lifetime: Lifetime) -> bool {
        self.descriptors.iter().any(|descriptor| {
            &descriptor.contract == contract
                && descriptor.implementation == implementation
                && descriptor.lifetime == lifetime
        })
    }

    /// 手动追加以具体类型自身为契约的条目
    pub fn add_type<T: 'static>(&mut self, lifetime: Lifetime) -> &mut Self {
        self.add(ServiceDescriptor::for_type::<T>(lifetime));
        self
    }
}

impl ServiceCollection for ServiceCollectionImpl {
    fn add(&mut self, descriptor: ServiceDescriptor) {
        self.descriptors.push(descriptor);
    }
}

impl<'a> IntoIterator for &'a ServiceCollectionImpl {
    type Item = &'a ServiceDescriptor;
    type IntoIter = std::slice::Iter<'a, ServiceDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.iter()
    }
}
