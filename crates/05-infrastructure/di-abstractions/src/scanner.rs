//! 类型扫描器抽象接口
//!
//! 提供从程序集或显式类型列表枚举候选类型的能力

use std::collections::BTreeMap;
use syringe_common::{ScanResult, TypeDescriptor};

/// 类型扫描器 trait
pub trait TypeScanner {
    /// 扫描给定来源，任何一个来源失败都会中止整次扫描
    fn scan(&self, sources: &[ScanSource]) -> ScanResult<CandidateSet>;

    /// 获取扫描器名称
    fn name(&self) -> &str;
}

/// 扫描来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanSource {
    /// 扫描指定程序集
    Assembly(String),
    /// 扫描包含指定类型的程序集
    AssemblyOf(TypeDescriptor),
    /// 单个类型
    Type(TypeDescriptor),
    /// 显式类型列表
    Types(Vec<TypeDescriptor>),
}

impl ScanSource {
    /// 扫描指定程序集
    pub fn assembly(name: impl Into<String>) -> Self {
        Self::Assembly(name.into())
    }

    /// 获取扫描来源的字符串表示
    pub fn describe(&self) -> String {
        match self {
            ScanSource::Assembly(name) => format!("assembly:{}", name),
            ScanSource::AssemblyOf(descriptor) => format!("assembly-of:{}", descriptor.full_name),
            ScanSource::Type(descriptor) => format!("type:{}", descriptor.full_name),
            ScanSource::Types(descriptors) => format!("types:{}", descriptors.len()),
        }
    }
}

/// 扫描选项
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// 包含的类型模式（glob，匹配完整类型路径）；为空时包含全部
    pub include_patterns: Vec<String>,
    /// 排除的类型模式（glob，匹配完整类型路径）
    pub exclude_patterns: Vec<String>,
    /// 是否保留声明为不参与自动注册的类型
    pub include_non_participating: bool,
}

impl ScanOptions {
    /// 添加包含模式
    pub fn include<S: Into<String>>(mut self, pattern: S) -> Self {
        self.include_patterns.push(pattern.into());
        self
    }

    /// 添加排除模式
    pub fn exclude<S: Into<String>>(mut self, pattern: S) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// 设置是否保留不参与自动注册的类型
    pub fn include_non_participating(mut self, enabled: bool) -> Self {
        self.include_non_participating = enabled;
        self
    }
}

/// 扫描结果：按完整类型路径去重并排序的候选类型集合
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    candidates: BTreeMap<String, TypeDescriptor>,
}

impl CandidateSet {
    /// 创建空集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入候选类型，已存在相同标识时保留先出现的描述符
    pub fn insert(&mut self, descriptor: TypeDescriptor) -> bool {
        if self.candidates.contains_key(&descriptor.full_name) {
            return false;
        }
        self.candidates.insert(descriptor.full_name.clone(), descriptor);
        true
    }

    /// 候选数量
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// 检查是否包含指定类型
    pub fn contains(&self, full_name: &str) -> bool {
        self.candidates.contains_key(full_name)
    }

    /// 按完整类型路径顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.candidates.values()
    }

    /// 候选类型的完整路径
    pub fn names(&self) -> Vec<&str> {
        self.candidates.keys().map(String::as_str).collect()
    }
}

impl IntoIterator for CandidateSet {
    type Item = TypeDescriptor;
    type IntoIter = std::collections::btree_map::IntoValues<String, TypeDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.into_values()
    }
}

impl FromIterator<TypeDescriptor> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = TypeDescriptor>>(iter: I) -> Self {
        let mut set = Self::new();
        for descriptor in iter {
            set.insert(descriptor);
        }
        set
    }
}
