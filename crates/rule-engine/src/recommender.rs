//! 推荐编排服务
//!
//! 对一个用户依次评估静态目录与全部动态规则，汇总符合条件的产品，
//! 并为每条触发的规则累加统计计数。评估本身无副作用，统计累加是
//! 整条流水线唯一的副作用，且只在规则判定为 true 之后发生。

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::atomic::AtomicRules;
use crate::catalog::{ProductRecommendation, ProductRuleSets, StaticRuleEntry};
use crate::error::{Result, RuleError};
use crate::facts::FactsRepository;
use crate::rule::RecommendationRule;
use crate::statistics::RuleStatisticsService;
use crate::store::RuleStore;

/// 单条规则的触发统计
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleStat {
    pub rule_id: Uuid,
    pub rule_name: String,
    pub count: u64,
}

/// 推荐编排服务
pub struct RecommendationService {
    facts: Arc<dyn FactsRepository>,
    static_rules: Vec<StaticRuleEntry>,
    store: RuleStore,
    statistics: Arc<RuleStatisticsService>,
}

impl RecommendationService {
    pub fn new(
        facts: Arc<dyn FactsRepository>,
        store: RuleStore,
        statistics: Arc<RuleStatisticsService>,
    ) -> Result<Self> {
        let rule_sets = ProductRuleSets::new(AtomicRules::new(Arc::clone(&facts)));
        let static_rules = rule_sets.standard_catalog()?;

        Ok(Self {
            facts,
            static_rules,
            store,
            statistics,
        })
    }

    /// 为用户生成推荐列表
    ///
    /// 输出顺序与目录声明顺序一致：静态产品在前（Invest 500 -> Top Saving
    /// -> Simple Credit），动态规则按存储顺序在后。没有符合条件的产品时
    /// 返回空列表；用户不存在则在评估任何规则之前报错，与空结果严格区分。
    #[instrument(skip(self))]
    pub async fn recommend(&self, user_id: Uuid) -> Result<Vec<ProductRecommendation>> {
        if !self.facts.user_exists(user_id).await? {
            return Err(RuleError::UserNotFound(user_id));
        }

        let mut recommendations = Vec::new();

        for entry in &self.static_rules {
            if entry.rule.is_eligible(user_id).await {
                debug!(rule = entry.rule.rule_name(), "静态规则命中");
                recommendations.push(entry.product.clone());
                self.statistics.increment(entry.rule_id);
            }
        }

        for compiled in self.store.list_compiled() {
            if compiled.predicate.is_eligible(user_id).await {
                debug!(rule = %compiled.rule.product_name, "动态规则命中");
                recommendations.push(compiled.rule.to_recommendation());
                self.statistics.increment(compiled.rule.id);
            }
        }

        info!(count = recommendations.len(), "推荐生成完成");
        Ok(recommendations)
    }

    /// 全部规则（静态 + 动态）的触发统计，未触发的规则计 0
    pub fn rule_stats(&self) -> Vec<RuleStat> {
        let mut stats: Vec<RuleStat> = self
            .static_rules
            .iter()
            .map(|entry| RuleStat {
                rule_id: entry.rule_id,
                rule_name: entry.product.name.clone(),
                count: self.statistics.count_for(entry.rule_id),
            })
            .collect();

        for compiled in self.store.list_compiled() {
            stats.push(RuleStat {
                rule_id: compiled.rule.id,
                rule_name: compiled.rule.product_name.clone(),
                count: self.statistics.count_for(compiled.rule.id),
            });
        }

        stats
    }

    /// 清空触发统计
    pub fn clear_statistics(&self) {
        self.statistics.clear();
        info!("规则触发统计已清空");
    }
}
