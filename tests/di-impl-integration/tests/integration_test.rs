//! 自动注册行为的集中集成测试

use anyhow::Result;
use serde_json::json;
use std::sync::Arc;
use syringe_abstractions::{ConventionMatcher, ScanSource, ServiceResolver, TypeScanner};
use syringe_common::{
    Lifetime, Optional, RegistrationError, RegistrationSettings, ServiceContract, TypeDescriptor,
};
use syringe_config::OverrideTable;
use syringe_di::{
    AssemblyScanner, DefaultConventionMatcher, FactoryRegistry, RegistrationEngine, ServiceCollectionImpl,
    ServiceProvider, StaticCatalog,
};

fn matchers() -> [DefaultConventionMatcher; 2] {
    [
        DefaultConventionMatcher::default(),
        DefaultConventionMatcher::new(RegistrationSettings::default().register_as_type_when_type_has_interfaces(true)),
    ]
}

#[test]
fn test_zero_or_many_interfaces_expose_concrete_type() {
    let zero = TypeDescriptor::new("app::Plain").with_interface("Clone");
    let many = TypeDescriptor::new("app::Both").with_interfaces(["IReader", "IWriter"]);

    for matcher in matchers() {
        assert_eq!(matcher.contract_for(&zero), ServiceContract::Concrete("app::Plain".into()));
        assert_eq!(matcher.contract_for(&many), ServiceContract::Concrete("app::Both".into()));
    }
}

#[test]
fn test_single_interface_depends_on_flag() {
    let single = TypeDescriptor::new("app::SqlStore").with_interfaces(["IStore", "Debug"]);
    let [by_interface, by_type] = matchers();

    assert_eq!(by_interface.contract_for(&single), ServiceContract::Interface("IStore".into()));
    assert_eq!(by_type.contract_for(&single), ServiceContract::Concrete("app::SqlStore".into()));
}

#[test]
fn test_override_example_registers_singleton() -> Result<()> {
    let overrides = OverrideTable::load(&json!({
        "Assembly": { "MyApp": { "Type": { "FooService": "Singleton" } } }
    }))?;
    let candidate = TypeDescriptor::new("MyApp::FooService");

    let mut engine = RegistrationEngine::default();
    let mut services = ServiceCollectionImpl::new();
    engine.register(&mut services, [candidate], Some(&overrides))?;

    assert_eq!(services.len(), 1);
    assert!(services.contains(
        &ServiceContract::Concrete("MyApp::FooService".into()),
        "MyApp::FooService",
        Lifetime::Singleton
    ));
    Ok(())
}

#[test]
fn test_override_beats_naming_convention_and_declaration() -> Result<()> {
    let overrides = OverrideTable::from_str_json(
        r#"{"Assembly":{"MyApp":{"Type":{"CacheScoped":"Transient","Declared":"Scoped"}}}}"#,
    )?;
    let candidates = [
        TypeDescriptor::new("MyApp::CacheScoped"),
        TypeDescriptor::new("MyApp::Declared").with_lifetime(Lifetime::Singleton),
    ];

    let mut engine = RegistrationEngine::default();
    let mut services = ServiceCollectionImpl::new();
    let report = engine.register(&mut services, candidates, Some(&overrides))?;

    let lifetimes: Vec<Lifetime> = report.decisions.iter().map(|d| d.lifetime).collect();
    assert_eq!(lifetimes, vec![Lifetime::Transient, Lifetime::Scoped]);
    Ok(())
}

#[test]
fn test_scan_same_assemblies_twice_is_stable() -> Result<()> {
    let catalog = StaticCatalog::from_descriptors(
        "fixed",
        [
            TypeDescriptor::new("alpha::One"),
            TypeDescriptor::new("alpha::Two"),
            TypeDescriptor::new("beta::Three"),
        ],
    );
    let scanner = AssemblyScanner::new(catalog);
    let first = scanner.scan(&[ScanSource::assembly("alpha"), ScanSource::assembly("beta")])?;
    let second = scanner.scan(&[ScanSource::assembly("beta"), ScanSource::assembly("alpha")])?;

    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
    Ok(())
}

#[test]
fn test_identical_decision_registered_once() -> Result<()> {
    let candidate = TypeDescriptor::new("app::MailService").with_interface("IMailService");

    let mut engine = RegistrationEngine::default();
    let mut services = ServiceCollectionImpl::new();
    engine.register(&mut services, [candidate.clone(), candidate.clone()], None)?;
    engine.register(&mut services, [candidate], None)?;

    let contract = ServiceContract::Interface("IMailService".into());
    assert_eq!(services.descriptors_for(&contract).len(), 1);
    Ok(())
}

#[test]
fn test_conflict_names_both_candidates() {
    let candidates = [
        TypeDescriptor::new("app::FastCache")
            .with_interface("ICache")
            .with_lifetime(Lifetime::Singleton),
        TypeDescriptor::new("app::SlowCache")
            .with_interface("ICache")
            .with_lifetime(Lifetime::Scoped),
    ];

    let mut engine = RegistrationEngine::default();
    let mut services = ServiceCollectionImpl::new();
    let err = engine.register(&mut services, candidates, None).unwrap_err();

    let conflicts = err.conflicts();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].first, "app::FastCache");
    assert_eq!(conflicts[0].second, "app::SlowCache");
    let message = err.to_string();
    assert!(message.contains("app::FastCache") && message.contains("app::SlowCache"));
    assert!(matches!(err, RegistrationError::ConflictingRegistration { .. }));
}

#[test]
fn test_abstract_and_open_generic_never_candidates() -> Result<()> {
    let abstract_type = TypeDescriptor::new("app::BaseHandler").abstract_type();
    let open_generic = TypeDescriptor::new("app::Repository").open_generic();
    let matcher = DefaultConventionMatcher::default();

    assert!(matcher.classify(&abstract_type)?.is_none());
    assert!(matcher.classify(&open_generic)?.is_none());

    let overrides = OverrideTable::from_str_json(
        r#"{"Assembly":{"app":{"Type":{"BaseHandler":"Singleton","Repository":"Singleton"}}}}"#,
    )?;
    let mut engine = RegistrationEngine::default();
    let mut services = ServiceCollectionImpl::new();
    let report = engine.register(&mut services, [abstract_type, open_generic], Some(&overrides))?;

    assert!(services.is_empty());
    assert_eq!(report.skipped, 2);
    Ok(())
}

#[derive(Debug)]
struct Widget;

#[derive(Debug)]
struct Dashboard {
    widget: Optional<Arc<Widget>>,
}

#[test]
fn test_optional_widget_is_empty_when_unregistered() -> Result<()> {
    let mut engine = RegistrationEngine::default();
    let mut services = ServiceCollectionImpl::new();
    engine.register(&mut services, [TypeDescriptor::of::<Dashboard>()], None)?;

    let mut factories = FactoryRegistry::new();
    factories.register(|provider: &ServiceProvider| {
        Ok(Dashboard {
            widget: provider.resolve_optional::<Widget>()?,
        })
    });
    let provider = ServiceProvider::build(&services, factories)?;

    assert!(provider.resolve_optional::<Widget>()?.is_empty());
    assert!(provider.resolve::<Dashboard>()?.widget.is_empty());
    Ok(())
}
