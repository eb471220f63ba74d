//! 规则统计 API 处理器

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::RuleStatsResponse;
use crate::state::AppState;

/// 查询全部规则的触发统计
///
/// GET /api/v1/rules/stats
///
/// 静态与动态规则都会出现在结果里，从未触发的规则计数为 0。
pub async fn get_rule_stats(State(state): State<AppState>) -> Json<RuleStatsResponse> {
    Json(RuleStatsResponse {
        stats: state.service.rule_stats(),
    })
}

/// 清空规则触发统计
///
/// POST /api/v1/rules/stats/clear
pub async fn clear_rule_stats(State(state): State<AppState>) -> StatusCode {
    state.service.clear_statistics();
    StatusCode::NO_CONTENT
}
