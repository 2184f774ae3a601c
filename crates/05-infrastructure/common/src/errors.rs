//! 错误类型定义

use crate::lifecycle::Lifetime;
use crate::metadata::ServiceContract;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// 扫描错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("程序集不存在或无法加载: {assembly}")]
    AssemblyNotFound { assembly: String },

    #[error("无效的类型引用: {message}")]
    InvalidTypeReference { message: String },

    #[error("无效的过滤模式: {pattern}, 原因: {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl ScanError {
    /// 创建无效类型引用错误
    pub fn invalid_type_reference(message: impl Into<String>) -> Self {
        Self::InvalidTypeReference {
            message: message.into(),
        }
    }
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置文件读取失败: {source}")]
    FileReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置序列化失败: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },

    #[error("无效的生命周期: {value}, 只接受 Singleton | Scoped | Transient")]
    InvalidLifetime { value: String },

    #[error("覆盖表条目无效: {assembly}.{type_name} = {value}, 只接受 Singleton | Scoped | Transient")]
    InvalidOverride {
        assembly: String,
        type_name: String,
        value: String,
    },

    #[error("配置结构无效: {message}")]
    InvalidStructure { message: String },

    #[error("不支持的配置文件格式: {extension}")]
    UnsupportedFormat { extension: String },
}

impl ConfigError {
    /// 创建配置结构错误
    pub fn invalid_structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }

    /// 包装解析错误
    pub fn parse<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ParseError {
            source: Box::new(error),
        }
    }
}

/// 两个候选类型对同一契约声明了不同生命周期
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationConflict {
    /// 冲突的契约
    pub contract: ServiceContract,
    /// 先出现的实现类型
    pub first: String,
    /// 先出现的生命周期
    pub first_lifetime: Lifetime,
    /// 后出现的实现类型
    pub second: String,
    /// 后出现的生命周期
    pub second_lifetime: Lifetime,
}

impl fmt::Display for RegistrationConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({}) 与 {} ({})",
            self.contract, self.first, self.first_lifetime, self.second, self.second_lifetime
        )
    }
}

fn join_conflicts(conflicts: &[RegistrationConflict]) -> String {
    conflicts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// 注册错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("检测到冲突的服务注册: {}", join_conflicts(.conflicts))]
    ConflictingRegistration { conflicts: Vec<RegistrationConflict> },

    #[error("类型 {type_name} 同时匹配多个生命周期不同的命名约定: {}", .rules.join(", "))]
    AmbiguousConvention { type_name: String, rules: Vec<String> },
}

impl RegistrationError {
    /// 获取冲突列表（非冲突错误返回空切片）
    pub fn conflicts(&self) -> &[RegistrationConflict] {
        match self {
            Self::ConflictingRegistration { conflicts } => conflicts,
            Self::AmbiguousConvention { .. } => &[],
        }
    }
}

/// 依赖解析错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("组件未注册: {type_name}")]
    ComponentNotRegistered { type_name: String },

    #[error("组件创建失败: {type_name}, 原因: {source}")]
    ComponentCreationFailed {
        type_name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("实现类型缺少工厂: {implementation}")]
    FactoryNotFound { implementation: String },

    #[error("类型转换失败: 期望 {expected}, 实际实现 {implementation}")]
    TypeMismatch {
        expected: String,
        implementation: String,
    },
}

/// Syringe 顶层错误类型
#[derive(Error, Debug)]
pub enum SyringeError {
    #[error("扫描错误: {source}")]
    Scan {
        #[from]
        source: ScanError,
    },

    #[error("配置错误: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("注册错误: {source}")]
    Registration {
        #[from]
        source: RegistrationError,
    },

    #[error("依赖注入错误: {source}")]
    Dependency {
        #[from]
        source: DependencyError,
    },
}

/// 结果类型别名
pub type ScanResult<T> = Result<T, ScanError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type RegistrationResult<T> = Result<T, RegistrationError>;
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type SyringeResult<T> = Result<T, SyringeError>;
