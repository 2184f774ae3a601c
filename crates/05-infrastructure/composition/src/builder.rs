//! 自动注册构建器
//!
//! 把扫描器、约定匹配器、覆盖表和注册引擎组合成一个调用入口。

use std::path::Path;
use syringe_abstractions::{
    CandidateSet, OverrideSource, RegistrationMode, ScanOptions, ScanSource, ServiceCollection, TypeCatalog,
    TypeScanner,
};
use syringe_common::{Injectable, RegistrationSettings, SyringeResult, TypeDescriptor};
use syringe_config::{OverrideTable, SettingsLoader};
use syringe_di::{AssemblyScanner, DefaultConventionMatcher, InventoryCatalog, RegistrationEngine, RegistrationReport};
use tracing::{debug, info};

/// 自动注册构建器
///
/// 默认从 [`InventoryCatalog`] 读取 `#[derive(Injectable)]` 登记的类型。
/// 构建器持有一个注册引擎，多次调用 [`register`](Self::register) 共享
/// 已发出的决策记录，因此跨调用的重复注册与生命周期冲突同样会被识别。
///
/// ```rust,ignore
/// let mut services = ServiceCollectionImpl::new();
/// let report = AutoRegistration::new()
///     .from_assembly("my_app")
///     .with_override_file("overrides.yaml")?
///     .register(&mut services)?;
/// ```
#[derive(Debug, Clone)]
pub struct AutoRegistration<C = InventoryCatalog> {
    /// 类型目录
    catalog: C,
    /// 扫描来源
    sources: Vec<ScanSource>,
    /// 扫描过滤选项
    options: ScanOptions,
    /// 生命周期覆盖表
    overrides: Option<OverrideTable>,
    /// 注册引擎，跨调用保留决策记录
    engine: RegistrationEngine,
}

impl AutoRegistration<InventoryCatalog> {
    /// 创建使用编译期类型目录的构建器
    pub fn new() -> Self {
        Self::with_catalog_only(InventoryCatalog::new())
    }
}

impl Default for AutoRegistration<InventoryCatalog> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: TypeCatalog> AutoRegistration<C> {
    fn with_catalog_only(catalog: C) -> Self {
        Self {
            catalog,
            sources: Vec::new(),
            options: ScanOptions::default(),
            overrides: None,
            engine: RegistrationEngine::default(),
        }
    }

    /// 替换类型目录，已配置的其他选项保持不变
    pub fn with_catalog<D: TypeCatalog>(self, catalog: D) -> AutoRegistration<D> {
        AutoRegistration {
            catalog,
            sources: self.sources,
            options: self.options,
            overrides: self.overrides,
            engine: self.engine,
        }
    }

    /// 设置注册设置
    pub fn with_settings(mut self, settings: RegistrationSettings) -> Self {
        self.engine = self.engine.with_matcher(DefaultConventionMatcher::new(settings));
        self
    }

    /// 通过设置加载器加载注册设置
    pub fn with_settings_from(self, loader: &SettingsLoader) -> SyringeResult<Self> {
        let settings = loader.load()?;
        Ok(self.with_settings(settings))
    }

    /// 当前注册设置
    pub fn settings(&self) -> &RegistrationSettings {
        self.engine.matcher().settings()
    }

    /// 扫描整个程序集
    pub fn from_assembly<S: Into<String>>(mut self, assembly: S) -> Self {
        self.sources.push(ScanSource::assembly(assembly));
        self
    }

    /// 扫描类型 `T` 所在的程序集
    pub fn from_assembly_of<T: Injectable>(mut self) -> Self {
        self.sources.push(ScanSource::AssemblyOf(T::type_descriptor()));
        self
    }

    /// 添加单个类型
    pub fn add_type<T: Injectable>(mut self) -> Self {
        self.sources.push(ScanSource::Type(T::type_descriptor()));
        self
    }

    /// 添加手写的类型描述符
    pub fn add_descriptor(mut self, descriptor: TypeDescriptor) -> Self {
        self.sources.push(ScanSource::Type(descriptor));
        self
    }

    /// 只保留完整路径匹配 glob 模式的类型
    pub fn include<S: Into<String>>(mut self, pattern: S) -> Self {
        self.options = self.options.include(pattern);
        self
    }

    /// 排除完整路径匹配 glob 模式的类型
    pub fn exclude<S: Into<String>>(mut self, pattern: S) -> Self {
        self.options = self.options.exclude(pattern);
        self
    }

    /// 设置覆盖表，已有覆盖表时合并且新表胜出
    pub fn with_overrides(mut self, table: OverrideTable) -> Self {
        self.overrides = Some(match self.overrides.take() {
            Some(mut existing) => {
                existing.merge(table);
                existing
            }
            None => table,
        });
        self
    }

    /// 从文件加载覆盖表
    pub fn with_override_file<P: AsRef<Path>>(self, path: P) -> SyringeResult<Self> {
        let path = path.as_ref();
        info!("加载覆盖表文件: {}", path.display());
        let table = OverrideTable::from_file(path)?;
        Ok(self.with_overrides(table))
    }

    /// 只注册覆盖表中列出的类型
    pub fn configuration_only(mut self) -> Self {
        self.engine = self.engine.with_mode(RegistrationMode::ConfigurationOnly);
        self
    }

    /// 扫描但不注册
    pub fn candidates(&self) -> SyringeResult<CandidateSet> {
        let scanner = AssemblyScanner::new(&self.catalog).with_options(self.options.clone());
        Ok(scanner.scan(&self.sources)?)
    }

    /// 执行自动注册
    ///
    /// 扫描失败或检测到冲突时返回错误，此时服务集合不会被修改。
    /// 与之前的调用相同的决策不会重复追加。
    pub fn register<S>(&mut self, services: &mut S) -> SyringeResult<RegistrationReport>
    where
        S: ServiceCollection + ?Sized,
    {
        info!(
            "开始自动注册: 目录 {}, {} 个扫描来源, 模式 {:?}",
            self.catalog.name(),
            self.sources.len(),
            self.engine.mode()
        );

        let candidates = self.candidates()?;
        if candidates.is_empty() {
            debug!("没有发现候选类型");
        }

        let overrides = self
            .overrides
            .as_ref()
            .map(|table| table as &dyn OverrideSource);
        let report = self.engine.register(services, candidates, overrides)?;

        info!("自动注册完成: 新增 {} 个服务", report.registered);
        Ok(report)
    }
}
