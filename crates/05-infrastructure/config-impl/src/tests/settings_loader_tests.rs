//! 注册设置加载测试

use crate::SettingsLoader;
use std::io::Write;
use syringe_common::{ConfigError, Lifetime, NamingRule, RegistrationSettings};
use tempfile::Builder;

/// 没有任何来源时得到默认设置
#[test]
fn test_defaults_without_sources() {
    let settings = SettingsLoader::new().without_environment().load().unwrap();
    assert_eq!(settings, RegistrationSettings::default());
}

/// 测试 TOML 设置文件
#[test]
fn test_load_settings_file() {
    let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
default_lifetime = "Scoped"
register_as_type_when_type_has_interfaces = true

[[naming_rules]]
pattern = "*Repository"
lifetime = "Singleton"
"#
    )
    .unwrap();

    let settings = SettingsLoader::new()
        .without_environment()
        .with_file(file.path())
        .load()
        .unwrap();

    assert_eq!(settings.default_lifetime, Lifetime::Scoped);
    assert!(settings.register_as_type_when_type_has_interfaces);
    assert_eq!(
        settings.naming_rules,
        vec![NamingRule::new("*Repository", Lifetime::Singleton)]
    );
    assert_eq!(
        settings.framework_interfaces,
        RegistrationSettings::default().framework_interfaces
    );
}

/// 环境变量覆盖文件，显式覆盖优先级最高
#[test]
fn test_environment_and_explicit_overrides() {
    std::env::set_var("SYRINGE_LOADER_TEST_DEFAULT_LIFETIME", "Singleton");
    std::env::set_var(
        "SYRINGE_LOADER_TEST_REGISTER_AS_TYPE_WHEN_TYPE_HAS_INTERFACES",
        "true",
    );

    let from_env = SettingsLoader::new()
        .with_env_prefix("SYRINGE_LOADER_TEST")
        .load()
        .unwrap();
    assert_eq!(from_env.default_lifetime, Lifetime::Singleton);
    assert!(from_env.register_as_type_when_type_has_interfaces);

    let explicit = SettingsLoader::new()
        .with_env_prefix("SYRINGE_LOADER_TEST")
        .set_override("default_lifetime", "Scoped")
        .load()
        .unwrap();
    assert_eq!(explicit.default_lifetime, Lifetime::Scoped);
}

/// 无效生命周期导致加载失败
#[test]
fn test_invalid_lifetime_fails() {
    let err = SettingsLoader::new()
        .without_environment()
        .set_override("default_lifetime", "Forever")
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

/// 指定的设置文件必须存在
#[test]
fn test_missing_settings_file() {
    let err = SettingsLoader::new()
        .without_environment()
        .with_file("/no/such/syringe.toml")
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}
