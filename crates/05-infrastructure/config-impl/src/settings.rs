//! 注册设置加载器
//!
//! 分层顺序（后者覆盖前者）：内置默认值 → 配置文件 → 环境变量 → 显式覆盖。

use config::{Config, Environment, File};
use std::path::PathBuf;
use syringe_common::{ConfigError, ConfigResult, RegistrationSettings};
use tracing::{debug, error};

/// 默认环境变量前缀，例如 `SYRINGE_DEFAULT_LIFETIME=Scoped`
pub const DEFAULT_ENV_PREFIX: &str = "SYRINGE";

/// 注册设置加载器
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    file: Option<PathBuf>,
    env_prefix: Option<String>,
    overrides: Vec<(String, config::Value)>,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsLoader {
    /// 创建使用默认环境变量前缀的加载器
    pub fn new() -> Self {
        Self {
            file: None,
            env_prefix: Some(DEFAULT_ENV_PREFIX.to_string()),
            overrides: Vec::new(),
        }
    }

    /// 指定配置文件（必须存在）
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// 修改环境变量前缀
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// 不读取环境变量
    pub fn without_environment(mut self) -> Self {
        self.env_prefix = None;
        self
    }

    /// 显式覆盖单个键，优先级最高
    pub fn set_override(mut self, key: impl Into<String>, value: impl Into<config::Value>) -> Self {
        self.overrides.push((key.into(), value.into()));
        self
    }

    /// 加载注册设置
    pub fn load(&self) -> ConfigResult<RegistrationSettings> {
        let mut builder = Config::builder();

        if let Some(path) = &self.file {
            if !path.exists() {
                return Err(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                });
            }
            debug!("加载设置文件: {}", path.display());
            builder = builder.add_source(File::from(path.as_path()).required(true));
        }

        if let Some(prefix) = &self.env_prefix {
            builder = builder.add_source(Environment::with_prefix(prefix).try_parsing(true));
        }

        for (key, value) in &self.overrides {
            builder = builder
                .set_override(key.as_str(), value.clone())
                .map_err(ConfigError::parse)?;
        }

        let settings: RegistrationSettings = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| {
                error!("注册设置加载失败: {}", e);
                ConfigError::parse(e)
            })?;

        debug!(
            "注册设置加载完成: 默认生命周期 {}, {} 条命名规则",
            settings.default_lifetime,
            settings.naming_rules.len()
        );
        Ok(settings)
    }
}
