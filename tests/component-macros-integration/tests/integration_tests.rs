//! `#[derive(Injectable)]` 与编译期类型目录的集成测试

use std::fmt::Debug;
use std::io::Write;
use syringe::{
    AutoRegistration, DecisionOrigin, Injectable, InventoryCatalog, Lifetime, RegistrationError, ServiceCollectionImpl,
    ServiceContract, SyringeError, TypeCatalog,
};

pub trait Mailer {}
pub trait Clock {}

#[derive(Debug, Injectable)]
pub struct ClockSingleton;

impl Clock for ClockSingleton {}

#[derive(Debug, Injectable)]
#[injectable(interfaces(Mailer, Debug))]
pub struct SmtpMailer;

impl Mailer for SmtpMailer {}

#[derive(Debug, Injectable)]
#[injectable(scoped)]
pub struct RequestContext {
    pub id: u64,
}

#[derive(Debug, Injectable)]
pub struct FooService;

#[derive(Debug, Injectable)]
#[injectable(abstract_type)]
pub struct BaseHandler;

#[derive(Debug, Injectable)]
#[injectable(skip)]
pub struct InternalCache;

#[derive(Debug, Injectable)]
pub struct Repository<T> {
    pub items: Vec<T>,
}

mod plugins {
    use syringe::Injectable;

    #[derive(Debug, Injectable)]
    #[injectable(assembly = "plugins", singleton)]
    pub struct Exporter;
}

fn assembly() -> String {
    ClockSingleton::type_descriptor().assembly
}

fn names(services: &ServiceCollectionImpl) -> Vec<&str> {
    services.iter().map(|d| d.implementation.as_str()).collect()
}

/// 测试派生的描述符
#[test]
fn test_derived_descriptors() {
    let clock = ClockSingleton::type_descriptor();
    assert_eq!(clock.name, "ClockSingleton");
    assert_eq!(clock.full_name, std::any::type_name::<ClockSingleton>());
    assert_eq!(clock.declared_lifetime, None);
    assert!(clock.participates);

    let mailer = SmtpMailer::type_descriptor();
    assert_eq!(mailer.interfaces, vec!["Mailer", "Debug"]);

    let context = RequestContext::type_descriptor();
    assert_eq!(context.declared_lifetime, Some(Lifetime::Scoped));

    assert!(BaseHandler::type_descriptor().is_abstract);
    assert!(!InternalCache::type_descriptor().participates);
    assert!(Repository::<u32>::type_descriptor().is_open_generic);

    let exporter = plugins::Exporter::type_descriptor();
    assert_eq!(exporter.assembly, "plugins");
    assert_eq!(exporter.declared_lifetime, Some(Lifetime::Singleton));
}

/// 测试编译期目录按程序集列出类型
#[test]
fn test_inventory_catalog_lists_assembly() {
    let catalog = InventoryCatalog::new();
    let types = catalog.types_in(&assembly()).unwrap();
    let names: Vec<&str> = types.iter().map(|t| t.name.as_str()).collect();

    assert!(names.contains(&"ClockSingleton"));
    assert!(names.contains(&"InternalCache"));
    assert!(!names.contains(&"Repository"));
    assert!(!names.contains(&"Exporter"));

    assert!(catalog.assemblies().contains(&"plugins".to_string()));
    assert!(catalog.types_in("no_such_assembly").is_none());
}

/// 测试按约定自动注册整个程序集
#[test]
fn test_auto_register_assembly() {
    let mut services = ServiceCollectionImpl::new();
    let report = AutoRegistration::new()
        .from_assembly_of::<ClockSingleton>()
        .register(&mut services)
        .unwrap();

    assert_eq!(report.registered, 4);
    assert!(services.contains(
        &ServiceContract::concrete::<ClockSingleton>(),
        std::any::type_name::<ClockSingleton>(),
        Lifetime::Singleton
    ));
    assert!(services.contains(
        &ServiceContract::Interface("Mailer".to_string()),
        std::any::type_name::<SmtpMailer>(),
        Lifetime::Transient
    ));
    assert!(services.contains(
        &ServiceContract::concrete::<RequestContext>(),
        std::any::type_name::<RequestContext>(),
        Lifetime::Scoped
    ));

    let registered = names(&services);
    assert!(registered.iter().all(|name| !name.ends_with("BaseHandler")));
    assert!(registered.iter().all(|name| !name.ends_with("InternalCache")));
}

/// 测试覆盖表文件优先于约定
#[test]
fn test_override_file_wins() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"{{ "Assembly": {{ "{}": {{ "Type": {{ "FooService": "Singleton" }} }} }} }}"#,
        assembly()
    )
    .unwrap();

    let mut services = ServiceCollectionImpl::new();
    let report = AutoRegistration::new()
        .add_type::<FooService>()
        .with_override_file(file.path())
        .unwrap()
        .register(&mut services)
        .unwrap();

    assert_eq!(report.decisions.len(), 1);
    assert_eq!(report.decisions[0].lifetime, Lifetime::Singleton);
    assert_eq!(report.decisions[0].origin, DecisionOrigin::Override);
}

/// 测试仅配置模式
#[test]
fn test_configuration_only_registers_listed_types() {
    let overrides = syringe::OverrideTable::from_str_json(&format!(
        r#"{{ "Assembly": {{ "{}": {{ "Type": {{ "SmtpMailer": "Scoped" }} }} }} }}"#,
        assembly()
    ))
    .unwrap();

    let mut services = ServiceCollectionImpl::new();
    AutoRegistration::new()
        .from_assembly_of::<ClockSingleton>()
        .with_overrides(overrides)
        .configuration_only()
        .register(&mut services)
        .unwrap();

    assert_eq!(names(&services), vec![std::any::type_name::<SmtpMailer>()]);
    assert_eq!(services.iter().next().map(|d| d.lifetime), Some(Lifetime::Scoped));
}

/// 测试过滤模式与同一契约的生命周期冲突
#[test]
fn test_filters_and_conflicts() {
    let mut services = ServiceCollectionImpl::new();
    let report = AutoRegistration::new()
        .from_assembly_of::<ClockSingleton>()
        .include("*Service")
        .register(&mut services)
        .unwrap();
    assert_eq!(names(&services), vec![std::any::type_name::<FooService>()]);
    assert_eq!(report.registered, 1);

    let mut services = ServiceCollectionImpl::new();
    let err = AutoRegistration::new()
        .add_type::<SmtpMailer>()
        .add_descriptor(
            syringe::TypeDescriptor::new("mail::QueuedMailer")
                .with_interface("Mailer")
                .with_lifetime(Lifetime::Singleton),
        )
        .register(&mut services)
        .unwrap_err();
    assert!(matches!(
        err,
        SyringeError::Registration {
            source: RegistrationError::ConflictingRegistration { .. }
        }
    ));
    assert!(services.is_empty());
}
