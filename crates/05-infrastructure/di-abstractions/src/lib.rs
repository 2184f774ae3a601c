//! # Dependency Injection Abstractions
//!
//! 自动注册抽象层，定义类型发现、约定匹配和服务注册的核心接口。
//!
//! ## 核心接口
//!
//! - [`ServiceCollection`] - 服务集合接口（只追加）
//! - [`TypeCatalog`] - 类型目录接口
//! - [`TypeScanner`] - 类型扫描器接口
//! - [`ConventionMatcher`] - 约定匹配器接口
//! - [`OverrideSource`] - 生命周期覆盖来源接口
//! - [`ServiceResolver`] - 服务解析接口

pub mod discovery;
pub mod registry;
pub mod resolver;
pub mod scanner;

pub use discovery::*;
pub use registry::*;
pub use resolver::*;
pub use scanner::*;
