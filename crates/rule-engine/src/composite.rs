//! 组合规则
//!
//! 以 AND/OR 将原子规则或其他组合规则组织成递归布尔树。求值是短路
//! 折叠：AND 在第一个 false 处停止，OR 在第一个 true 处停止。

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{Result, RuleError};
use crate::operators::LogicalOperator;
use crate::rule::RecommendationRule;

/// 组合规则：带名称的 AND/OR 规则树节点
pub struct CompositeRule {
    name: String,
    operator: LogicalOperator,
    children: Vec<Arc<dyn RecommendationRule>>,
}

impl std::fmt::Debug for CompositeRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeRule")
            .field("name", &self.name)
            .field("operator", &self.operator)
            .field("children", &self.children.len())
            .finish_non_exhaustive()
    }
}

impl CompositeRule {
    /// 构造组合规则
    ///
    /// 空的子规则列表在构造期拒绝：空 AND 静默返回 true、空 OR 静默
    /// 返回 false 都是隐患，不允许留到求值期。
    pub fn new(
        name: impl Into<String>,
        operator: LogicalOperator,
        children: Vec<Arc<dyn RecommendationRule>>,
    ) -> Result<Self> {
        let name = name.into();
        if children.is_empty() {
            return Err(RuleError::EmptyComposite(name));
        }
        Ok(Self {
            name,
            operator,
            children,
        })
    }

    /// 构造 AND 组合规则
    pub fn and(name: impl Into<String>, children: Vec<Arc<dyn RecommendationRule>>) -> Result<Self> {
        Self::new(name, LogicalOperator::And, children)
    }

    /// 构造 OR 组合规则
    pub fn or(name: impl Into<String>, children: Vec<Arc<dyn RecommendationRule>>) -> Result<Self> {
        Self::new(name, LogicalOperator::Or, children)
    }

    pub fn operator(&self) -> LogicalOperator {
        self.operator
    }

    pub fn children(&self) -> &[Arc<dyn RecommendationRule>] {
        &self.children
    }
}

#[async_trait]
impl RecommendationRule for CompositeRule {
    async fn is_eligible(&self, user_id: Uuid) -> bool {
        match self.operator {
            LogicalOperator::And => {
                for child in &self.children {
                    if !child.is_eligible(user_id).await {
                        return false;
                    }
                }
                true
            }
            LogicalOperator::Or => {
                for child in &self.children {
                    if child.is_eligible(user_id).await {
                        return true;
                    }
                }
                false
            }
        }
    }

    fn rule_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 记录调用次数的探针规则，用于验证短路行为
    struct ProbeRule {
        result: bool,
        calls: Arc<AtomicUsize>,
    }

    impl ProbeRule {
        fn new(result: bool) -> (Arc<Self>, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Arc::new(Self {
                    result,
                    calls: Arc::clone(&calls),
                }),
                calls,
            )
        }
    }

    #[async_trait]
    impl RecommendationRule for ProbeRule {
        async fn is_eligible(&self, _user_id: Uuid) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result
        }

        fn rule_name(&self) -> &str {
            "PROBE"
        }
    }

    #[tokio::test]
    async fn test_and_all_true() {
        let (a, _) = ProbeRule::new(true);
        let (b, _) = ProbeRule::new(true);
        let rule = CompositeRule::and("ALL_TRUE", vec![a, b]).unwrap();
        assert!(rule.is_eligible(Uuid::new_v4()).await);
    }

    #[tokio::test]
    async fn test_and_single_false_flips_result() {
        let (a, _) = ProbeRule::new(true);
        let (b, _) = ProbeRule::new(false);
        let (c, _) = ProbeRule::new(true);
        let rule = CompositeRule::and("ONE_FALSE", vec![a, b, c]).unwrap();
        assert!(!rule.is_eligible(Uuid::new_v4()).await);
    }

    #[tokio::test]
    async fn test_and_short_circuits_after_first_false() {
        let (a, a_calls) = ProbeRule::new(false);
        let (b, b_calls) = ProbeRule::new(true);
        let rule = CompositeRule::and("SHORT", vec![a, b]).unwrap();

        assert!(!rule.is_eligible(Uuid::new_v4()).await);
        assert_eq!(a_calls.load(Ordering::SeqCst), 1);
        // 第一个 false 之后的子规则不再求值
        assert_eq!(b_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_or_all_false() {
        let (a, _) = ProbeRule::new(false);
        let (b, _) = ProbeRule::new(false);
        let rule = CompositeRule::or("ALL_FALSE", vec![a, b]).unwrap();
        assert!(!rule.is_eligible(Uuid::new_v4()).await);
    }

    #[tokio::test]
    async fn test_or_short_circuits_after_first_true() {
        let (a, a_calls) = ProbeRule::new(true);
        let (b, b_calls) = ProbeRule::new(false);
        let rule = CompositeRule::or("SHORT", vec![a, b]).unwrap();

        assert!(rule.is_eligible(Uuid::new_v4()).await);
        assert_eq!(a_calls.load(Ordering::SeqCst), 1);
        assert_eq!(b_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_children_rejected_at_construction() {
        let and_err = CompositeRule::and("EMPTY_AND", vec![]).unwrap_err();
        assert!(matches!(and_err, RuleError::EmptyComposite(name) if name == "EMPTY_AND"));

        let or_err = CompositeRule::or("EMPTY_OR", vec![]).unwrap_err();
        assert!(matches!(or_err, RuleError::EmptyComposite(_)));
    }

    #[tokio::test]
    async fn test_nested_composites() {
        let (a, _) = ProbeRule::new(true);
        let (b, _) = ProbeRule::new(false);
        let (c, _) = ProbeRule::new(true);

        // AND(a, OR(b, c)) => true
        let inner = Arc::new(CompositeRule::or("INNER", vec![b, c]).unwrap());
        let outer = CompositeRule::and("OUTER", vec![a, inner]).unwrap();
        assert!(outer.is_eligible(Uuid::new_v4()).await);
        assert_eq!(outer.rule_name(), "OUTER");
    }
}
