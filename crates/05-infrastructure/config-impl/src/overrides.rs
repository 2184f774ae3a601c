//! 配置驱动的生命周期覆盖表
//!
//! 文档结构：
//!
//! ```json
//! { "Assembly": { "my_app": { "Type": { "FooService": "Singleton" } } } }
//! ```
//!
//! 覆盖表在加载时校验全部条目，加载后只读。

use crate::providers::{read_document, ConfigFormat};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use syringe_abstractions::OverrideSource;
use syringe_common::{ConfigError, ConfigResult, Lifetime};
use tracing::{debug, info};

/// 根节点下的程序集键
pub const ASSEMBLY_KEY: &str = "Assembly";
/// 程序集节点下的类型键
pub const TYPE_KEY: &str = "Type";

/// 生命周期覆盖表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideTable {
    source: String,
    entries: BTreeMap<String, BTreeMap<String, Lifetime>>,
}

impl OverrideTable {
    /// 创建空覆盖表
    pub fn new() -> Self {
        Self {
            source: "inline".to_string(),
            entries: BTreeMap::new(),
        }
    }

    /// 从结构化配置加载
    ///
    /// 没有 `Assembly` 节点的文档得到空表；任一条目无效则整体失败。
    pub fn load(document: &Value) -> ConfigResult<Self> {
        let mut table = Self::new();

        let root = document
            .as_object()
            .ok_or_else(|| ConfigError::invalid_structure("配置根节点必须是对象"))?;
        let Some(assemblies) = root.get(ASSEMBLY_KEY) else {
            debug!("配置中没有 {} 节点", ASSEMBLY_KEY);
            return Ok(table);
        };
        let assemblies = assemblies
            .as_object()
            .ok_or_else(|| ConfigError::invalid_structure(format!("{} 节点必须是对象", ASSEMBLY_KEY)))?;

        for (assembly, section) in assemblies {
            let types = match section.get(TYPE_KEY) {
                Some(Value::Object(types)) => types,
                Some(_) => {
                    return Err(ConfigError::invalid_structure(format!(
                        "{}.{}.{} 节点必须是对象",
                        ASSEMBLY_KEY, assembly, TYPE_KEY
                    )))
                }
                None if section.is_object() => continue,
                None => {
                    return Err(ConfigError::invalid_structure(format!(
                        "{}.{} 节点必须是对象",
                        ASSEMBLY_KEY, assembly
                    )))
                }
            };

            for (type_name, value) in types {
                let lifetime = parse_entry(assembly, type_name, value)?;
                table.insert(assembly.clone(), type_name.clone(), lifetime);
            }
        }

        info!("覆盖表加载完成: {} 个条目", table.len());
        Ok(table)
    }

    /// 从 JSON 文本加载
    pub fn from_str_json(content: &str) -> ConfigResult<Self> {
        Self::load(&ConfigFormat::Json.parse(content)?)
    }

    /// 从文件加载，格式按扩展名识别
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let mut table = Self::load(&read_document(path)?)?;
        table.source = path.display().to_string();
        Ok(table)
    }

    /// 查询覆盖条目，名称区分大小写
    pub fn lookup(&self, assembly: &str, type_name: &str) -> Option<Lifetime> {
        self.entries.get(assembly)?.get(type_name).copied()
    }

    /// 检查是否存在覆盖条目
    pub fn contains(&self, assembly: &str, type_name: &str) -> bool {
        self.lookup(assembly, type_name).is_some()
    }

    /// 合并另一张表，键相同时后加载的胜出
    pub fn merge(&mut self, other: OverrideTable) {
        for (assembly, types) in other.entries {
            for (type_name, lifetime) in types {
                self.insert(assembly.clone(), type_name, lifetime);
            }
        }
        self.source = format!("{}+{}", self.source, other.source);
    }

    /// 条目总数
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 按 (程序集, 类型) 排序遍历全部条目
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, Lifetime)> + '_ {
        self.entries.iter().flat_map(|(assembly, types)| {
            types
                .iter()
                .map(move |(type_name, lifetime)| (assembly.as_str(), type_name.as_str(), *lifetime))
        })
    }

    /// 覆盖表来源
    pub fn source(&self) -> &str {
        &self.source
    }

    fn insert(&mut self, assembly: String, type_name: String, lifetime: Lifetime) {
        if let Some(previous) = self
            .entries
            .entry(assembly.clone())
            .or_default()
            .insert(type_name.clone(), lifetime)
        {
            if previous != lifetime {
                debug!("覆盖条目被替换: {}.{} {} -> {}", assembly, type_name, previous, lifetime);
            }
        }
    }
}

fn parse_entry(assembly: &str, type_name: &str, value: &Value) -> ConfigResult<Lifetime> {
    let invalid = || ConfigError::InvalidOverride {
        assembly: assembly.to_string(),
        type_name: type_name.to_string(),
        value: value.to_string(),
    };
    value
        .as_str()
        .ok_or_else(invalid)?
        .parse::<Lifetime>()
        .map_err(|_| invalid())
}

impl OverrideSource for OverrideTable {
    fn lookup(&self, assembly: &str, type_name: &str) -> Option<Lifetime> {
        OverrideTable::lookup(self, assembly, type_name)
    }

    fn source_name(&self) -> &str {
        &self.source
    }
}
