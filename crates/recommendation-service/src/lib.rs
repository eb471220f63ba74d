//! 产品推荐服务
//!
//! 在规则引擎之上提供 REST API：
//!
//! - **推荐查询**：按用户返回符合条件的产品列表
//! - **动态规则管理**：创建、查询、删除存储为数据的推荐规则
//! - **触发统计**：查询与清空规则触发计数
//! - **运维端点**：缓存重建、服务信息、健康检查
//!
//! ## 模块结构
//!
//! - `dto`: 请求/响应体定义
//! - `error`: 错误类型与 HTTP 状态映射
//! - `handlers`: REST API 处理器
//! - `repository`: 数据库仓储层（事实查询、规则持久化）
//! - `state`: 共享应用状态

pub mod dto;
pub mod error;
pub mod handlers;
pub mod repository;
pub mod state;

use axum::Router;
use axum::routing::{delete, get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// 构建服务路由
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/v1/recommendations/{user_id}",
            get(handlers::recommendation::get_recommendations),
        )
        .route(
            "/api/v1/rules",
            post(handlers::rule::create_rule).get(handlers::rule::list_rules),
        )
        .route("/api/v1/rules/{rule_id}", delete(handlers::rule::delete_rule))
        .route("/api/v1/rules/stats", get(handlers::stats::get_rule_stats))
        .route(
            "/api/v1/rules/stats/clear",
            post(handlers::stats::clear_rule_stats),
        )
        .route(
            "/management/clear-caches",
            post(handlers::management::clear_caches),
        )
        .route("/management/info", get(handlers::management::info_endpoint))
        .route("/health", get(handlers::management::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
