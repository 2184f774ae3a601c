//! 程序集/类型扫描器实现
//!
//! 只读取描述符，从不实例化任何类型。

use glob::Pattern;
use syringe_abstractions::{CandidateSet, ScanOptions, ScanSource, TypeCatalog, TypeScanner};
use syringe_common::{ScanError, ScanResult, TypeDescriptor};
use tracing::{debug, info};

/// 程序集扫描器
#[derive(Debug, Clone)]
pub struct AssemblyScanner<C> {
    catalog: C,
    options: ScanOptions,
}

impl<C: TypeCatalog> AssemblyScanner<C> {
    /// 创建新的扫描器
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            options: ScanOptions::default(),
        }
    }

    /// 设置扫描选项
    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// 获取类型目录
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// 展开单个扫描来源
    fn expand(&self, source: &ScanSource) -> ScanResult<Vec<TypeDescriptor>> {
        match source {
            ScanSource::Assembly(assembly) => self.load_assembly(assembly),
            ScanSource::AssemblyOf(descriptor) => {
                validate_reference(descriptor)?;
                self.load_assembly(&descriptor.assembly)
            }
            ScanSource::Type(descriptor) => {
                validate_reference(descriptor)?;
                Ok(vec![descriptor.clone()])
            }
            ScanSource::Types(descriptors) => {
                descriptors.iter().try_for_each(validate_reference)?;
                Ok(descriptors.clone())
            }
        }
    }

    fn load_assembly(&self, assembly: &str) -> ScanResult<Vec<TypeDescriptor>> {
        self.catalog
            .types_in(assembly)
            .ok_or_else(|| ScanError::AssemblyNotFound {
                assembly: assembly.to_string(),
            })
    }

    fn accepts(&self, descriptor: &TypeDescriptor, filters: &Filters) -> bool {
        if !descriptor.participates && !self.options.include_non_participating {
            debug!("类型声明为不参与自动注册: {}", descriptor.full_name);
            return false;
        }

        let included = filters.include.is_empty()
            || filters
                .include
                .iter()
                .any(|pattern| pattern.matches(&descriptor.full_name));
        let excluded = filters
            .exclude
            .iter()
            .any(|pattern| pattern.matches(&descriptor.full_name));

        if !included || excluded {
            debug!("类型被过滤: {}", descriptor.full_name);
        }
        included && !excluded
    }
}

impl<C: TypeCatalog> TypeScanner for AssemblyScanner<C> {
    fn scan(&self, sources: &[ScanSource]) -> ScanResult<CandidateSet> {
        let filters = Filters {
            include: compile_patterns(&self.options.include_patterns)?,
            exclude: compile_patterns(&self.options.exclude_patterns)?,
        };

        let mut candidates = CandidateSet::new();
        for source in sources {
            debug!("扫描来源: {}", source.describe());
            for descriptor in self.expand(source)? {
                if !self.accepts(&descriptor, &filters) {
                    continue;
                }
                let full_name = descriptor.full_name.clone();
                if !candidates.insert(descriptor) {
                    debug!("忽略重复类型: {}", full_name);
                }
            }
        }

        info!(
            "扫描完成: 目录 {}, {} 个来源, 发现 {} 个候选类型",
            self.catalog.name(),
            sources.len(),
            candidates.len()
        );
        Ok(candidates)
    }

    fn name(&self) -> &str {
        "AssemblyScanner"
    }
}

struct Filters {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

fn compile_patterns(patterns: &[String]) -> ScanResult<Vec<Pattern>> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).map_err(|e| ScanError::InvalidPattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            })
        })
        .collect()
}

fn validate_reference(descriptor: &TypeDescriptor) -> ScanResult<()> {
    if descriptor.has_identity() {
        Ok(())
    } else {
        Err(ScanError::invalid_type_reference("类型描述符缺少类型标识"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;

    fn catalog() -> StaticCatalog {
        StaticCatalog::new("test")
            .with_type(TypeDescriptor::new("app::services::MailService"))
            .with_type(TypeDescriptor::new("app::services::ClockSingleton"))
            .with_type(TypeDescriptor::new("app::internal::Hidden").skip())
            .with_type(TypeDescriptor::new("plugins::Exporter"))
    }

    #[test]
    fn test_scan_assembly() {
        let scanner = AssemblyScanner::new(catalog());
        let result = scanner.scan(&[ScanSource::assembly("app")]).unwrap();
        assert_eq!(
            result.names(),
            vec!["app::services::ClockSingleton", "app::services::MailService"]
        );
    }

    #[test]
    fn test_scan_deduplicates_across_sources() {
        let scanner = AssemblyScanner::new(catalog());
        let mail = TypeDescriptor::new("app::services::MailService");
        let result = scanner
            .scan(&[
                ScanSource::assembly("app"),
                ScanSource::AssemblyOf(mail.clone()),
                ScanSource::Type(mail),
            ])
            .unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_scan_twice_yields_same_set() {
        let scanner = AssemblyScanner::new(catalog());
        let sources = [ScanSource::assembly("app"), ScanSource::assembly("plugins")];
        assert_eq!(scanner.scan(&sources).unwrap(), scanner.scan(&sources).unwrap());
    }

    #[test]
    fn test_include_and_exclude_patterns() {
        let scanner = AssemblyScanner::new(catalog()).with_options(
            ScanOptions::default()
                .include("app::services::*")
                .exclude("*Singleton"),
        );
        let result = scanner.scan(&[ScanSource::assembly("app")]).unwrap();
        assert_eq!(result.names(), vec!["app::services::MailService"]);
    }

    #[test]
    fn test_non_participating_types_kept_on_request() {
        let scanner = AssemblyScanner::new(catalog())
            .with_options(ScanOptions::default().include_non_participating(true));
        let result = scanner.scan(&[ScanSource::assembly("app")]).unwrap();
        assert!(result.contains("app::internal::Hidden"));
    }

    #[test]
    fn test_unknown_assembly_fails() {
        let scanner = AssemblyScanner::new(catalog());
        let err = scanner
            .scan(&[ScanSource::assembly("app"), ScanSource::assembly("missing")])
            .unwrap_err();
        assert_eq!(
            err,
            ScanError::AssemblyNotFound {
                assembly: "missing".to_string()
            }
        );
    }

    #[test]
    fn test_empty_type_reference_fails() {
        let scanner = AssemblyScanner::new(catalog());
        let err = scanner
            .scan(&[ScanSource::Type(TypeDescriptor::new(""))])
            .unwrap_err();
        assert!(matches!(err, ScanError::InvalidTypeReference { .. }));
    }

    #[test]
    fn test_invalid_pattern_fails() {
        let scanner = AssemblyScanner::new(catalog())
            .with_options(ScanOptions::default().include("app::[unclosed"));
        let err = scanner.scan(&[ScanSource::assembly("app")]).unwrap_err();
        assert!(matches!(err, ScanError::InvalidPattern { .. }));
    }
}
