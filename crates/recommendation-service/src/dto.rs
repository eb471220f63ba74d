//! 服务请求/响应 DTO 定义
//!
//! 所有 REST API 的请求与响应体结构，字段统一使用 camelCase。

use rule_engine::{DynamicRule, ProductRecommendation, QueryType, RuleQuery, RuleStat};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// 创建动态规则的请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DynamicRuleRequest {
    #[validate(length(min = 1, message = "产品名称不能为空"))]
    pub product_name: String,
    pub product_id: Uuid,
    #[validate(length(min = 1, message = "推荐文案不能为空"))]
    pub product_text: String,
    /// 规则条件列表，至少一条
    #[validate(length(min = 1, message = "规则必须包含至少一个条件"))]
    pub rule: Vec<RuleQueryRequest>,
}

/// 规则条件请求
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleQueryRequest {
    pub query: QueryType,
    pub arguments: Vec<String>,
    #[serde(default)]
    pub negate: bool,
}

impl DynamicRuleRequest {
    /// 转换为领域模型（分配新的规则 ID）
    pub fn into_rule(self) -> DynamicRule {
        DynamicRule::new(
            self.product_name,
            self.product_id,
            self.product_text,
            self.rule
                .into_iter()
                .map(|q| RuleQuery::new(q.query, q.arguments, q.negate))
                .collect(),
        )
    }
}

/// 动态规则响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicRuleResponse {
    pub id: Uuid,
    pub product_name: String,
    pub product_id: Uuid,
    pub product_text: String,
    pub rule: Vec<RuleQueryResponse>,
}

/// 规则条件响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleQueryResponse {
    pub query: QueryType,
    pub arguments: Vec<String>,
    pub negate: bool,
}

impl From<&DynamicRule> for DynamicRuleResponse {
    fn from(rule: &DynamicRule) -> Self {
        Self {
            id: rule.id,
            product_name: rule.product_name.clone(),
            product_id: rule.product_id,
            product_text: rule.product_text.clone(),
            rule: rule
                .queries
                .iter()
                .map(|q| RuleQueryResponse {
                    query: q.query,
                    arguments: q.arguments.clone(),
                    negate: q.negate,
                })
                .collect(),
        }
    }
}

/// 动态规则列表响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleListResponse {
    pub total: usize,
    pub rules: Vec<DynamicRuleResponse>,
}

/// 推荐结果响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub user_id: Uuid,
    pub recommendations: Vec<ProductRecommendation>,
}

/// 规则触发统计响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleStatsResponse {
    pub stats: Vec<RuleStat>,
}

/// 服务信息响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfoResponse {
    pub service_name: &'static str,
    pub version: &'static str,
}
