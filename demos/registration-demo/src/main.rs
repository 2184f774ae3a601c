//! # 自动注册演示程序
//!
//! 扫描本程序中通过 `#[derive(Injectable)]` 登记的类型，按约定与覆盖表注册，
//! 然后用参考服务提供者解析服务。

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use syringe::{
    init_logging, AutoRegistration, FactoryRegistry, Injectable, Lifetime, LoggingConfig, Optional,
    ServiceCollectionImpl, ServiceContract, ServiceProvider, ServiceResolver, SettingsLoader,
};
use tracing::{info, warn};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "registration-demo")]
#[command(about = "Syringe 自动注册演示")]
struct Args {
    /// 覆盖表文件路径（JSON / TOML / YAML）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 注册设置文件路径
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// 即使只实现一个接口也以类型自身注册
    #[arg(long)]
    register_as_self: bool,

    /// 未匹配约定时的默认生命周期
    #[arg(long)]
    default_lifetime: Option<Lifetime>,

    /// 只注册覆盖表中列出的类型
    #[arg(long)]
    configuration_only: bool,

    /// 以 JSON 输出注册报告
    #[arg(long)]
    json: bool,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

trait Notifier {
    fn notify(&self, message: &str) -> String;
}

#[derive(Debug, Injectable)]
struct ClockSingleton;

#[derive(Debug, Injectable)]
#[injectable(interfaces(Notifier))]
struct EmailNotifier;

impl Notifier for EmailNotifier {
    fn notify(&self, message: &str) -> String {
        format!("email: {message}")
    }
}

#[derive(Debug, Injectable)]
#[injectable(scoped)]
struct OrderRepository;

#[derive(Debug)]
struct AuditTrail;

#[derive(Debug, Injectable)]
struct ReportService {
    clock: Arc<ClockSingleton>,
    audit: Optional<Arc<AuditTrail>>,
}

#[derive(Debug, Injectable)]
#[injectable(skip)]
struct DebugConsole;

fn main() -> Result<()> {
    let args = Args::parse();

    let logging = if args.verbose {
        LoggingConfig::development()
    } else {
        LoggingConfig::default()
    };
    init_logging(&logging).map_err(|e| anyhow::anyhow!("日志初始化失败: {e}"))?;

    info!("启动 Syringe 自动注册演示");

    let mut loader = SettingsLoader::new();
    if let Some(path) = &args.settings {
        loader = loader.with_file(path);
    }
    if args.register_as_self {
        loader = loader.set_override("register_as_type_when_type_has_interfaces", true);
    }
    if let Some(lifetime) = args.default_lifetime {
        loader = loader.set_override("default_lifetime", lifetime.as_str());
    }

    let mut registration = AutoRegistration::new()
        .with_settings_from(&loader)?
        .from_assembly_of::<ClockSingleton>();
    if let Some(path) = &args.config {
        registration = registration
            .with_override_file(path)
            .with_context(|| format!("无法加载覆盖表: {}", path.display()))?;
    }
    if args.configuration_only {
        registration = registration.configuration_only();
    }

    let mut services = ServiceCollectionImpl::new();
    let report = registration.register(&mut services)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("注册了 {} 个服务，跳过 {} 个类型", report.registered, report.skipped);
        for descriptor in &services {
            println!(
                "  {:<10} {} -> {}",
                descriptor.lifetime.as_str(),
                descriptor.implementation,
                descriptor.contract
            );
        }
    }

    demonstrate_resolution(&services)?;

    info!("演示结束");
    Ok(())
}

/// 用参考服务提供者解析已注册的服务
fn demonstrate_resolution(services: &ServiceCollectionImpl) -> Result<()> {
    let mut factories = FactoryRegistry::new();
    factories
        .register(|_| Ok(ClockSingleton))
        .register(|_| Ok(EmailNotifier))
        .register(|_| Ok(OrderRepository))
        .register_instance(DebugConsole)
        .register(|provider: &ServiceProvider| {
            Ok(ReportService {
                clock: provider.resolve::<ClockSingleton>()?,
                audit: provider.resolve_optional::<AuditTrail>()?,
            })
        });

    let provider = ServiceProvider::build(services, factories)?;

    if provider.can_resolve(&ServiceContract::concrete::<ReportService>()) {
        // 仅配置模式下依赖可能没有注册
        match provider.resolve::<ReportService>() {
            Ok(report) => info!(
                "ReportService 已解析: clock = {:?}, 审计可用 = {}",
                report.clock,
                report.audit.is_present()
            ),
            Err(e) => warn!("ReportService 解析失败: {}", e),
        }
    }

    let notifier = ServiceContract::Interface("Notifier".to_string());
    if provider.can_resolve(&notifier) {
        let notifier = provider.resolve_contract::<EmailNotifier>(&notifier)?;
        println!("{}", notifier.notify("订单已创建"));
    }

    Ok(())
}
