//! # 自动注册具体实现
//!
//! 提供约定匹配器、类型目录与扫描器、注册引擎、服务集合，
//! 以及一个用于观察可选依赖语义的参考服务提供者。
//!
//! 数据流：扫描器枚举候选类型 → 匹配器分类 → 注册引擎对照覆盖表
//! → 追加到服务集合 → 调用方构建容器。

pub mod catalog;
pub mod collection;
pub mod engine;
pub mod matcher;
pub mod provider;
pub mod scanner;

pub use catalog::{InventoryCatalog, StaticCatalog};
pub use collection::ServiceCollectionImpl;
pub use engine::{RegistrationEngine, RegistrationReport};
pub use matcher::DefaultConventionMatcher;
pub use provider::{FactoryRegistry, ServiceFactoryFn, ServiceProvider};
pub use scanner::AssemblyScanner;
