//! 结构化配置文档读取
//!
//! 覆盖表文件可以是 JSON、TOML 或 YAML，统一读取为 [`serde_json::Value`]。

use serde_json::Value;
use std::fmt;
use std::path::Path;
use syringe_common::{ConfigError, ConfigResult};
use tracing::debug;

/// 配置文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// 根据文件扩展名识别格式
    pub fn from_path<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match extension.as_str() {
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(ConfigError::UnsupportedFormat { extension }),
        }
    }

    /// 把文本解析为 JSON 值
    pub fn parse(self, content: &str) -> ConfigResult<Value> {
        match self {
            Self::Json => serde_json::from_str(content).map_err(ConfigError::parse),
            Self::Toml => {
                let value: toml::Value = toml::from_str(content).map_err(ConfigError::parse)?;
                Ok(toml_to_json(&value))
            }
            Self::Yaml => serde_yaml::from_str(content).map_err(ConfigError::parse),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Json => "JSON",
            Self::Toml => "TOML",
            Self::Yaml => "YAML",
        };
        f.write_str(name)
    }
}

/// 读取配置文件为 JSON 值
pub fn read_document<P: AsRef<Path>>(path: P) -> ConfigResult<Value> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let format = ConfigFormat::from_path(path)?;
    debug!("加载 {} 配置文件: {}", format, path.display());

    let content = std::fs::read_to_string(path)?;
    let document = format.parse(&content)?;

    debug!("{} 配置文件加载完成", format);
    Ok(document)
}

/// 将 TOML 值转换为 JSON 值
fn toml_to_json(value: &toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s.clone()),
        toml::Value::Integer(i) => Value::Number(serde_json::Number::from(*i)),
        toml::Value::Float(f) => serde_json::Number::from_f64(*f).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(b) => Value::Bool(*b),
        toml::Value::Array(arr) => Value::Array(arr.iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .iter()
                .map(|(k, v)| (k.clone(), toml_to_json(v)))
                .collect(),
        ),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
    }
}
