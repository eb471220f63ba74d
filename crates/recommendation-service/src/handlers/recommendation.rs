//! 推荐查询 API 处理器

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use crate::dto::RecommendationResponse;
use crate::error::ServiceError;
use crate::state::AppState;

/// 获取用户的产品推荐
///
/// GET /api/v1/recommendations/{user_id}
///
/// 用户不存在返回 404；已知用户没有符合条件的产品返回空列表。
pub async fn get_recommendations(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<RecommendationResponse>, ServiceError> {
    let recommendations = state.service.recommend(user_id).await?;

    Ok(Json(RecommendationResponse {
        user_id,
        recommendations,
    }))
}
