//! # Syringe
//!
//! 基于约定的服务自动注册：扫描程序集中的候选类型，按命名约定与类型声明推断
//! 生命周期和契约，再用配置文件中的覆盖表强制指定生命周期，最后把注册条目
//! 追加到服务集合。容器的构建与解析由调用方负责。
//!
//! ## 主要功能
//!
//! - **派生宏**: `#[derive(Injectable)]` 在编译期产生类型描述符
//! - **约定匹配**: `*Singleton` / `*Scoped` / `*Transient` 命名规则
//! - **覆盖表**: JSON / TOML / YAML 配置文件强制指定生命周期
//! - **冲突检测**: 同一契约出现不同生命周期时整体失败
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use syringe::{AutoRegistration, Injectable, ServiceCollectionImpl};
//!
//! #[derive(Injectable)]
//! struct ClockSingleton;
//!
//! fn main() -> Result<(), syringe::SyringeError> {
//!     let mut services = ServiceCollectionImpl::new();
//!     let report = AutoRegistration::new()
//!         .from_assembly_of::<ClockSingleton>()
//!         .with_override_file("overrides.yaml")?
//!         .register(&mut services)?;
//!
//!     println!("注册了 {} 个服务", report.registered);
//!     Ok(())
//! }
//! ```

// 派生宏生成的代码以 `::syringe` 为根路径，crate 内部同样适用
extern crate self as syringe;

pub mod builder;
pub mod logging;

pub use builder::AutoRegistration;
pub use logging::{init_logging, LoggingConfig};

// 重新导出公共类型
pub use syringe_abstractions::{
    CandidateSet, ConventionMatcher, OverrideSource, RegistrationMode, ScanOptions, ScanSource, ServiceCollection,
    ServiceResolver, TypeCatalog, TypeScanner,
};
pub use syringe_common::{
    ConfigError, DecisionOrigin, DependencyError, Injectable, Lifetime, NamingRule, Optional, RegistrationConflict,
    RegistrationDecision, RegistrationError, RegistrationSettings, ScanError, ServiceContract, ServiceDescriptor,
    SyringeError, SyringeResult, TypeDescriptor, TypeRegistration,
};
pub use syringe_config::{ConfigFormat, OverrideTable, SettingsLoader};
pub use syringe_di::{
    AssemblyScanner, DefaultConventionMatcher, FactoryRegistry, InventoryCatalog, RegistrationEngine,
    RegistrationReport, ServiceCollectionImpl, ServiceProvider, StaticCatalog,
};

// 派生宏
pub use syringe_macros::Injectable;

#[doc(hidden)]
pub mod __private {
    pub use syringe_common::__private::inventory;
}

#[cfg(test)]
mod tests;
