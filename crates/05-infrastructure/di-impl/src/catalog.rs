//! 类型目录实现

use std::collections::BTreeMap;
use syringe_abstractions::TypeCatalog;
use syringe_common::{registered_types, TypeDescriptor};

/// 显式的内存类型目录
///
/// 由调用方在构建期或加载期填充，适用于未使用派生宏的类型。
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    name: String,
    assemblies: BTreeMap<String, Vec<TypeDescriptor>>,
}

impl StaticCatalog {
    /// 创建新的目录
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            assemblies: BTreeMap::new(),
        }
    }

    /// 从描述符集合创建目录
    pub fn from_descriptors<I>(name: impl Into<String>, descriptors: I) -> Self
    where
        I: IntoIterator<Item = TypeDescriptor>,
    {
        let mut catalog = Self::new(name);
        for descriptor in descriptors {
            catalog.add_type(descriptor);
        }
        catalog
    }

    /// 声明程序集（允许没有任何类型）
    pub fn with_assembly(mut self, assembly: impl Into<String>) -> Self {
        self.assemblies.entry(assembly.into()).or_default();
        self
    }

    /// 添加类型
    pub fn with_type(mut self, descriptor: TypeDescriptor) -> Self {
        self.add_type(descriptor);
        self
    }

    /// 添加类型到其所属程序集
    pub fn add_type(&mut self, descriptor: TypeDescriptor) {
        self.assemblies
            .entry(descriptor.assembly.clone())
            .or_default()
            .push(descriptor);
    }

    /// 类型总数
    pub fn len(&self) -> usize {
        self.assemblies.values().map(Vec::len).sum()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TypeCatalog for StaticCatalog {
    fn types_in(&self, assembly: &str) -> Option<Vec<TypeDescriptor>> {
        self.assemblies.get(assembly).cloned()
    }

    fn assemblies(&self) -> Vec<String> {
        self.assemblies.keys().cloned().collect()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// 编译期类型目录
///
/// 枚举当前二进制中所有通过 `#[derive(Injectable)]` 登记的非泛型类型。
/// 程序集只要登记过至少一个类型即视为可加载。
#[derive(Debug, Clone, Copy, Default)]
pub struct InventoryCatalog;

impl InventoryCatalog {
    /// 创建编译期类型目录
    pub fn new() -> Self {
        Self
    }
}

impl TypeCatalog for InventoryCatalog {
    fn types_in(&self, assembly: &str) -> Option<Vec<TypeDescriptor>> {
        let types: Vec<TypeDescriptor> = registered_types()
            .filter(|descriptor| descriptor.assembly == assembly)
            .collect();
        (!types.is_empty()).then_some(types)
    }

    fn assemblies(&self) -> Vec<String> {
        let mut assemblies: Vec<String> = registered_types().map(|descriptor| descriptor.assembly).collect();
        assemblies.sort();
        assemblies.dedup();
        assemblies
    }

    fn name(&self) -> &str {
        "inventory"
    }
}
