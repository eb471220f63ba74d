//! 运维管理 API 处理器

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};
use tracing::info;

use crate::dto::ServiceInfoResponse;
use crate::error::ServiceError;
use crate::state::AppState;

/// 清空统计并重建规则缓存
///
/// POST /management/clear-caches
///
/// 触发统计清零，已编译规则全部丢弃并从数据库重新加载。
pub async fn clear_caches(State(state): State<AppState>) -> Result<Json<Value>, ServiceError> {
    state.service.clear_statistics();
    state.store.clear();

    let rules = state.rule_repo.list_all().await?;
    let reloaded = state.store.load_batch(rules);

    info!(reloaded, "缓存已清空并重建");
    Ok(Json(json!({
        "message": "缓存已清空",
        "rulesReloaded": reloaded,
    })))
}

/// 服务信息
///
/// GET /management/info
pub async fn info_endpoint() -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse {
        service_name: "recommendation-service",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// 健康检查
///
/// GET /health
pub async fn health(State(state): State<AppState>) -> Result<&'static str, ServiceError> {
    state.db.health_check().await?;
    Ok("OK")
}
