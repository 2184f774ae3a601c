//! # Syringe Configuration
//!
//! 配置驱动的生命周期覆盖表，以及注册设置的分层加载。
//!
//! ## 主要组件
//!
//! - [`OverrideTable`] - 程序集 → 类型 → 生命周期的覆盖表
//! - [`ConfigFormat`] - 按扩展名识别的配置文件格式
//! - [`SettingsLoader`] - 基于 `config` crate 的注册设置加载器

pub mod overrides;
pub mod providers;
pub mod settings;

pub use overrides::*;
pub use providers::*;
pub use settings::*;

#[cfg(test)]
mod tests;
