//! 动态规则 API 处理器
//!
//! 实现动态推荐规则的创建、查询与删除。规则在落库之前先做一次
//! 编译校验，坏规则在规则编辑边界被拒绝，不会延迟到推荐请求。

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::dto::{DynamicRuleRequest, DynamicRuleResponse, RuleListResponse};
use crate::error::ServiceError;
use crate::state::AppState;

/// 创建动态规则
///
/// POST /api/v1/rules
pub async fn create_rule(
    State(state): State<AppState>,
    Json(request): Json<DynamicRuleRequest>,
) -> Result<(StatusCode, Json<DynamicRuleResponse>), ServiceError> {
    request.validate()?;

    let rule = request.into_rule();

    // 编译校验在持久化之前，数据库里只会有可编译的规则
    state.store.validate(&rule)?;

    state.rule_repo.insert(&rule).await?;
    state.store.load(rule.clone())?;

    info!(rule_id = %rule.id, product = %rule.product_name, "动态规则已创建");
    Ok((StatusCode::CREATED, Json(DynamicRuleResponse::from(&rule))))
}

/// 查询全部动态规则（按存储顺序）
///
/// GET /api/v1/rules
pub async fn list_rules(State(state): State<AppState>) -> Json<RuleListResponse> {
    let rules: Vec<DynamicRuleResponse> = state
        .store
        .list_compiled()
        .iter()
        .map(|compiled| DynamicRuleResponse::from(&compiled.rule))
        .collect();

    Json(RuleListResponse {
        total: rules.len(),
        rules,
    })
}

/// 删除动态规则
///
/// DELETE /api/v1/rules/{rule_id}
pub async fn delete_rule(
    State(state): State<AppState>,
    Path(rule_id): Path<Uuid>,
) -> Result<StatusCode, ServiceError> {
    if !state.rule_repo.delete(rule_id).await? {
        return Err(ServiceError::RuleNotFound(rule_id));
    }

    // 数据库是事实来源；内存缓存里不存在只说明该规则从未编译成功
    if let Err(e) = state.store.delete(rule_id) {
        warn!(%rule_id, error = %e, "规则不在内存缓存中");
    }

    info!(%rule_id, "动态规则已删除");
    Ok(StatusCode::NO_CONTENT)
}
