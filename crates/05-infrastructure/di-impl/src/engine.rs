//! 注册引擎实现
//!
//! 对每个候选类型：覆盖表命中则直接决定生命周期，否则交给约定匹配器，
//! 然后向服务集合追加一条注册。

use crate::matcher::DefaultConventionMatcher;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use syringe_abstractions::{ConventionMatcher, OverrideSource, RegistrationMode, ServiceCollection};
use syringe_common::{
    DecisionOrigin, Lifetime, RegistrationConflict, RegistrationDecision, RegistrationError,
    RegistrationResult, ServiceContract, ServiceDescriptor, TypeDescriptor,
};
use tracing::{debug, info, warn};

/// 注册报告
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationReport {
    /// 新追加的注册数量
    pub registered: usize,
    /// 跳过的候选数量（非候选或配置模式下未列出）
    pub skipped: usize,
    /// 重复的相同决策数量
    pub duplicates: usize,
    /// 冲突列表
    ///
    /// 成功返回的报告中始终为空：检测到冲突时整个调用失败，
    /// 冲突通过 [`RegistrationError::ConflictingRegistration`] 返回。
    pub conflicts: Vec<RegistrationConflict>,
    /// 本次追加的决策
    pub decisions: Vec<RegistrationDecision>,
    /// 被跳过的类型
    pub skipped_types: Vec<String>,
}

impl RegistrationReport {
    /// 合并另一份报告
    pub fn merge(&mut self, other: RegistrationReport) {
        self.registered += other.registered;
        self.skipped += other.skipped;
        self.duplicates += other.duplicates;
        self.conflicts.extend(other.conflicts);
        self.decisions.extend(other.decisions);
        self.skipped_types.extend(other.skipped_types);
    }
}

#[derive(Debug, Clone)]
struct ContractClaim {
    lifetime: Lifetime,
    implementation: String,
}

type EmittedKey = (ServiceContract, String, Lifetime);

/// 注册引擎
///
/// 引擎记录已经发出的决策，同一实例上的多次调用共享这份记录：
/// 相同的 (契约, 实现, 生命周期) 是幂等的空操作，
/// 同一契约出现不同生命周期则报告冲突。
/// 引擎先规划全部决策，只有在没有冲突时才写入服务集合。
#[derive(Debug, Clone)]
pub struct RegistrationEngine<M = DefaultConventionMatcher> {
    matcher: M,
    mode: RegistrationMode,
    claims: HashMap<ServiceContract, ContractClaim>,
    emitted: HashSet<EmittedKey>,
}

impl Default for RegistrationEngine<DefaultConventionMatcher> {
    fn default() -> Self {
        Self::new(DefaultConventionMatcher::default())
    }
}

impl<M: ConventionMatcher> RegistrationEngine<M> {
    /// 创建新的注册引擎
    pub fn new(matcher: M) -> Self {
        Self {
            matcher,
            mode: RegistrationMode::Convention,
            claims: HashMap::new(),
            emitted: HashSet::new(),
        }
    }

    /// 替换约定匹配器，已记录的决策保持不变
    pub fn with_matcher<N: ConventionMatcher>(self, matcher: N) -> RegistrationEngine<N> {
        RegistrationEngine {
            matcher,
            mode: self.mode,
            claims: self.claims,
            emitted: self.emitted,
        }
    }

    /// 设置注册模式
    pub fn with_mode(mut self, mode: RegistrationMode) -> Self {
        self.mode = mode;
        self
    }

    /// 获取注册模式
    pub fn mode(&self) -> RegistrationMode {
        self.mode
    }

    /// 获取约定匹配器
    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    /// 已声明生命周期的契约
    pub fn claimed_lifetime(&self, contract: &ServiceContract) -> Option<Lifetime> {
        self.claims.get(contract).map(|claim| claim.lifetime)
    }

    /// 为单个候选类型作出决策
    pub fn decide(
        &self,
        candidate: &TypeDescriptor,
        overrides: Option<&dyn OverrideSource>,
    ) -> RegistrationResult<Option<RegistrationDecision>> {
        if !self.matcher.is_candidate(candidate) {
            return Ok(None);
        }

        let forced = overrides.and_then(|source| source.lookup(&candidate.assembly, &candidate.name));
        match (forced, self.mode) {
            (Some(lifetime), _) => {
                debug!(
                    "覆盖表命中: {}.{} -> {}",
                    candidate.assembly, candidate.name, lifetime
                );
                Ok(Some(RegistrationDecision {
                    implementation: candidate.full_name.clone(),
                    assembly: candidate.assembly.clone(),
                    contract: self.matcher.contract_for(candidate),
                    lifetime,
                    origin: DecisionOrigin::Override,
                }))
            }
            (None, RegistrationMode::ConfigurationOnly) => {
                debug!("配置模式下未列出，跳过: {}", candidate.full_name);
                Ok(None)
            }
            (None, RegistrationMode::Convention) => self.matcher.classify(candidate),
        }
    }

    /// 注册候选类型到服务集合
    ///
    /// 失败时服务集合保持不变，引擎的记录也不会更新。
    pub fn register<S, I>(
        &mut self,
        services: &mut S,
        candidates: I,
        overrides: Option<&dyn OverrideSource>,
    ) -> RegistrationResult<RegistrationReport>
    where
        S: ServiceCollection + ?Sized,
        I: IntoIterator<Item = TypeDescriptor>,
    {
        let mut report = RegistrationReport::default();
        let mut claims = self.claims.clone();
        let mut emitted = self.emitted.clone();
        let mut planned = Vec::new();
        let mut conflicts = Vec::new();

        for candidate in candidates {
            let Some(decision) = self.decide(&candidate, overrides)? else {
                report.skipped += 1;
                report.skipped_types.push(candidate.full_name);
                continue;
            };

            let key = (
                decision.contract.clone(),
                decision.implementation.clone(),
                decision.lifetime,
            );
            if emitted.contains(&key) {
                debug!("忽略重复注册: {} -> {}", decision.implementation, decision.contract);
                report.duplicates += 1;
                continue;
            }

            match claims.get(&decision.contract) {
                Some(claim) if claim.lifetime != decision.lifetime => {
                    conflicts.push(RegistrationConflict {
                        contract: decision.contract.clone(),
                        first: claim.implementation.clone(),
                        first_lifetime: claim.lifetime,
                        second: decision.implementation.clone(),
                        second_lifetime: decision.lifetime,
                    });
                    continue;
                }
                Some(_) => {}
                None => {
                    claims.insert(
                        decision.contract.clone(),
                        ContractClaim {
                            lifetime: decision.lifetime,
                            implementation: decision.implementation.clone(),
                        },
                    );
                }
            }

            emitted.insert(key);
            planned.push(decision);
        }

        if !conflicts.is_empty() {
            warn!("注册中止: 检测到 {} 个冲突", conflicts.len());
            return Err(RegistrationError::ConflictingRegistration { conflicts });
        }

        for decision in &planned {
            services.add(ServiceDescriptor::new(
                decision.contract.clone(),
                decision.implementation.clone(),
                decision.lifetime,
            ));
            debug!(
                "注册服务: {} -> {} ({})",
                decision.implementation, decision.contract, decision.lifetime
            );
        }

        self.claims = claims;
        self.emitted = emitted;
        report.registered = planned.len();
        report.decisions = planned;

        info!(
            "注册完成: 新增 {} 个, 跳过 {} 个, 重复 {} 个",
            report.registered, report.skipped, report.duplicates
        );
        Ok(report)
    }
}
