//! 推荐服务入口
//!
//! 装配顺序：配置 -> 日志 -> 数据库连接池 -> 仓储 -> 规则加载 ->
//! 编排服务 -> HTTP 路由，支持 Ctrl+C / SIGTERM 优雅关闭。

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::signal;
use tower_http::timeout::TimeoutLayer;
use tracing::{info, warn};

use recommendation_service::repository::{DynamicRuleRepository, PgFactsRepository};
use recommendation_service::router;
use recommendation_service::state::AppState;
use rule_engine::{FactsRepository, RecommendationService, RuleInterpreter, RuleStatisticsService, RuleStore};
use star_shared::config::AppConfig;
use star_shared::database::Database;
use star_shared::observability;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load("recommendation-service").unwrap_or_else(|e| {
        eprintln!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    observability::init(&config.observability)?;

    info!("Starting recommendation-service...");

    let db = Database::connect(&config.database).await?;
    sqlx::migrate!().run(db.pool()).await?;

    let facts: Arc<dyn FactsRepository> = Arc::new(PgFactsRepository::new(db.pool().clone()));
    let store = RuleStore::new(RuleInterpreter::new(Arc::clone(&facts)));
    let statistics = Arc::new(RuleStatisticsService::new());
    let rule_repo = DynamicRuleRepository::new(db.pool().clone());

    // 启动时从数据库恢复动态规则；失败时以空规则集启动
    match rule_repo.list_all().await {
        Ok(rules) => {
            let loaded = store.load_batch(rules);
            info!("Loaded {} dynamic rules from database", loaded);
        }
        Err(e) => warn!("Failed to load dynamic rules: {}, starting with empty store", e),
    }

    let service = Arc::new(RecommendationService::new(
        Arc::clone(&facts),
        store.clone(),
        Arc::clone(&statistics),
    )?);

    let state = AppState {
        service,
        store,
        rule_repo,
        db,
    };

    let app = router(state).layer(TimeoutLayer::new(Duration::from_secs(
        config.server.request_timeout_seconds,
    )));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("HTTP server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Service shutdown complete");
    Ok(())
}

/// 优雅关闭信号处理
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown...");
        }
    }
}
