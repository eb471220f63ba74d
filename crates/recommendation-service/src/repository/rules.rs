//! 动态规则仓储
//!
//! 规则记录存于 dynamic_rules 表，条件列表以 JSONB 整体存储，
//! 读取时反序列化为领域模型再交给解释器编译。

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use rule_engine::{DynamicRule, RuleQuery};

use crate::error::ServiceError;

/// 动态规则仓储
#[derive(Clone)]
pub struct DynamicRuleRepository {
    pool: PgPool,
}

/// 数据库规则行
#[derive(sqlx::FromRow)]
struct DynamicRuleRow {
    id: Uuid,
    product_id: Uuid,
    product_name: String,
    product_text: String,
    queries: serde_json::Value,
}

impl DynamicRuleRow {
    fn into_rule(self) -> Result<DynamicRule, ServiceError> {
        let queries: Vec<RuleQuery> = serde_json::from_value(self.queries)?;
        Ok(DynamicRule {
            id: self.id,
            product_name: self.product_name,
            product_id: self.product_id,
            product_text: self.product_text,
            queries,
        })
    }
}

impl DynamicRuleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 插入新规则
    pub async fn insert(&self, rule: &DynamicRule) -> Result<(), ServiceError> {
        sqlx::query(
            r#"
            INSERT INTO dynamic_rules (id, product_id, product_name, product_text, queries)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(rule.id)
        .bind(rule.product_id)
        .bind(&rule.product_name)
        .bind(&rule.product_text)
        .bind(serde_json::to_value(&rule.queries)?)
        .execute(&self.pool)
        .await?;

        info!(rule_id = %rule.id, "动态规则已入库");
        Ok(())
    }

    /// 按创建顺序加载全部规则（推荐结果的顺序依赖这里的排序）
    pub async fn list_all(&self) -> Result<Vec<DynamicRule>, ServiceError> {
        let rows = sqlx::query_as::<_, DynamicRuleRow>(
            r#"
            SELECT id, product_id, product_name, product_text, queries
            FROM dynamic_rules
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(DynamicRuleRow::into_rule).collect()
    }

    /// 删除规则，返回规则是否存在
    pub async fn delete(&self, rule_id: Uuid) -> Result<bool, ServiceError> {
        let result = sqlx::query("DELETE FROM dynamic_rules WHERE id = $1")
            .bind(rule_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
