//! 动态规则领域模型
//!
//! 动态规则以数据形式存储：一组有类型、带参数、可取反的查询条件，
//! 条件之间隐式按 AND 组合。解释器把它编译成与静态目录相同的组合规则树。

use std::hash::{DefaultHasher, Hash, Hasher};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::ProductRecommendation;
use crate::error::{Result, RuleError};
use crate::query::QueryType;

/// 动态规则的单个查询条件
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleQuery {
    /// 查询类型
    pub query: QueryType,
    /// 位置参数（如 ["DEBIT"] 或 ["DEBIT", "DEPOSIT", ">", "100000"]）
    pub arguments: Vec<String>,
    /// 取反：true 表示条件不成立时才满足
    #[serde(default)]
    pub negate: bool,
}

impl RuleQuery {
    pub fn new(query: QueryType, arguments: Vec<String>, negate: bool) -> Self {
        Self {
            query,
            arguments,
            negate,
        }
    }
}

/// 动态规则：按产品存储的推荐规则记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamicRule {
    /// 规则标识，创建时分配
    pub id: Uuid,
    /// 推荐产品名称
    pub product_name: String,
    /// 银行系统中的产品 ID
    pub product_id: Uuid,
    /// 展示给用户的推荐文案
    pub product_text: String,
    /// 规则条件列表，非空，按 AND 组合
    pub queries: Vec<RuleQuery>,
}

impl DynamicRule {
    pub fn new(
        product_name: impl Into<String>,
        product_id: Uuid,
        product_text: impl Into<String>,
        queries: Vec<RuleQuery>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_name: product_name.into(),
            product_id,
            product_text: product_text.into(),
            queries,
        }
    }

    /// 校验规则记录本身的完整性（条件参数的解析交给解释器）
    pub fn validate(&self) -> Result<()> {
        if self.product_name.trim().is_empty() {
            return Err(RuleError::InvalidRule("产品名称不能为空".to_string()));
        }
        if self.product_text.trim().is_empty() {
            return Err(RuleError::InvalidRule("推荐文案不能为空".to_string()));
        }
        if self.queries.is_empty() {
            return Err(RuleError::EmptyRule(self.product_name.clone()));
        }
        Ok(())
    }

    /// 条件内容指纹，用于编译缓存的失效判断
    ///
    /// 只覆盖条件列表：仅修改展示元数据不需要重新编译。
    pub fn content_fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.queries.hash(&mut hasher);
        hasher.finish()
    }

    /// 转换为推荐结果描述
    pub fn to_recommendation(&self) -> ProductRecommendation {
        ProductRecommendation {
            name: self.product_name.clone(),
            id: self.product_id,
            text: self.product_text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rule() -> DynamicRule {
        DynamicRule::new(
            "测试产品",
            Uuid::new_v4(),
            "办理我们的测试产品",
            vec![RuleQuery::new(
                QueryType::UserOf,
                vec!["DEBIT".to_string()],
                false,
            )],
        )
    }

    #[test]
    fn test_validate_rejects_empty_queries() {
        let mut rule = sample_rule();
        rule.queries.clear();
        assert!(matches!(rule.validate(), Err(RuleError::EmptyRule(_))));
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let mut rule = sample_rule();
        rule.product_name = "  ".to_string();
        assert!(matches!(rule.validate(), Err(RuleError::InvalidRule(_))));
    }

    #[test]
    fn test_fingerprint_tracks_queries_only() {
        let mut rule = sample_rule();
        let original = rule.content_fingerprint();

        // 展示元数据的修改不影响指纹
        rule.product_text = "换一段文案".to_string();
        assert_eq!(rule.content_fingerprint(), original);

        // 条件列表的修改改变指纹
        rule.queries.push(RuleQuery::new(
            QueryType::UserOf,
            vec!["CREDIT".to_string()],
            true,
        ));
        assert_ne!(rule.content_fingerprint(), original);
    }

    #[test]
    fn test_deserialize_negate_defaults_false() {
        let json = r#"{"query": "USER_OF", "arguments": ["DEBIT"]}"#;
        let query: RuleQuery = serde_json::from_str(json).unwrap();
        assert!(!query.negate);
    }
}
