//! 推荐规则接口

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// 推荐规则
///
/// 原子规则、组合规则与取反规则共享同一个评估接口，静态规则目录与
/// 动态规则解释器因此走同一条评估路径。实现必须是不可变的、可在
/// 多个用户的并发评估之间共享。
#[async_trait]
pub trait RecommendationRule: Send + Sync {
    /// 判断用户是否满足规则
    async fn is_eligible(&self, user_id: Uuid) -> bool;

    /// 规则名称，用于诊断与统计
    fn rule_name(&self) -> &str;
}

/// 取反规则
///
/// 包装任意规则并取反其结果，名称带 NOT_ 前缀。
pub struct NegatedRule {
    name: String,
    inner: Arc<dyn RecommendationRule>,
}

impl NegatedRule {
    pub fn new(inner: Arc<dyn RecommendationRule>) -> Self {
        Self {
            name: format!("NOT_{}", inner.rule_name()),
            inner,
        }
    }
}

#[async_trait]
impl RecommendationRule for NegatedRule {
    async fn is_eligible(&self, user_id: Uuid) -> bool {
        !self.inner.is_eligible(user_id).await
    }

    fn rule_name(&self) -> &str {
        &self.name
    }
}
