//! 约定匹配器实现

use syringe_abstractions::ConventionMatcher;
use syringe_common::{
    DecisionOrigin, Lifetime, RegistrationDecision, RegistrationError, RegistrationResult,
    RegistrationSettings, ServiceContract, TypeDescriptor,
};
use tracing::debug;

/// 默认约定匹配器
///
/// 生命周期优先级：类型声明 > 命名约定 > 默认设置。
/// 契约：恰好一个非框架接口且未开启“以类型自身注册”时暴露该接口，否则暴露类型自身。
#[derive(Debug, Clone, Default)]
pub struct DefaultConventionMatcher {
    settings: RegistrationSettings,
}

impl DefaultConventionMatcher {
    /// 创建新的约定匹配器
    pub fn new(settings: RegistrationSettings) -> Self {
        Self { settings }
    }

    /// 获取注册设置
    pub fn settings(&self) -> &RegistrationSettings {
        &self.settings
    }

    /// 去重后的非框架接口
    pub fn service_interfaces<'a>(&self, descriptor: &'a TypeDescriptor) -> Vec<&'a str> {
        let mut interfaces: Vec<&str> = Vec::new();
        for interface in &descriptor.interfaces {
            let interface = interface.trim();
            if interface.is_empty()
                || self.settings.is_framework_interface(interface)
                || interfaces.contains(&interface)
            {
                continue;
            }
            interfaces.push(interface);
        }
        interfaces
    }

    /// 推断生命周期及其来源
    fn infer_lifetime(&self, descriptor: &TypeDescriptor) -> RegistrationResult<(Lifetime, DecisionOrigin)> {
        if let Some(lifetime) = descriptor.declared_lifetime {
            return Ok((lifetime, DecisionOrigin::Declared));
        }

        let rules = self.settings.matching_rules(&descriptor.name);
        let Some(first) = rules.first() else {
            return Ok((self.settings.default_lifetime, DecisionOrigin::Default));
        };

        // 规则之间没有优先级：生命周期不一致即视为歧义
        if rules.iter().any(|rule| rule.lifetime != first.lifetime) {
            return Err(RegistrationError::AmbiguousConvention {
                type_name: descriptor.full_name.clone(),
                rules: rules
                    .iter()
                    .map(|rule| format!("{} => {}", rule.pattern, rule.lifetime))
                    .collect(),
            });
        }

        Ok((first.lifetime, DecisionOrigin::Convention))
    }
}

impl ConventionMatcher for DefaultConventionMatcher {
    fn classify(&self, descriptor: &TypeDescriptor) -> RegistrationResult<Option<RegistrationDecision>> {
        if !self.is_candidate(descriptor) {
            debug!("跳过非候选类型: {}", descriptor.full_name);
            return Ok(None);
        }

        let (lifetime, origin) = self.infer_lifetime(descriptor)?;
        let decision = RegistrationDecision {
            implementation: descriptor.full_name.clone(),
            assembly: descriptor.assembly.clone(),
            contract: self.contract_for(descriptor),
            lifetime,
            origin,
        };

        debug!(
            "分类类型: {} -> {} ({:?}, {:?})",
            decision.implementation, decision.contract, decision.lifetime, decision.origin
        );
        Ok(Some(decision))
    }

    fn is_candidate(&self, descriptor: &TypeDescriptor) -> bool {
        descriptor.participates
            && !descriptor.is_abstract
            && !descriptor.is_open_generic
            && descriptor.has_identity()
    }

    fn contract_for(&self, descriptor: &TypeDescriptor) -> ServiceContract {
        if !self.settings.register_as_type_when_type_has_interfaces {
            if let [interface] = self.service_interfaces(descriptor).as_slice() {
                return ServiceContract::Interface((*interface).to_string());
            }
        }
        ServiceContract::Concrete(descriptor.full_name.clone())
    }
}
