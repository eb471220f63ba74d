//! 推荐服务错误类型定义
//!
//! 把引擎错误、数据库错误与参数校验错误统一映射到 HTTP 响应。

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rule_engine::RuleError;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

/// 推荐服务错误类型
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("参数验证失败: {0}")]
    Validation(String),

    #[error("规则不存在: {0}")]
    RuleNotFound(Uuid),

    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("规则序列化失败: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("基础设施错误: {0}")]
    Infra(#[from] star_shared::error::SharedError),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(e: validator::ValidationErrors) -> Self {
        Self::Validation(e.to_string())
    }
}

impl ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::RuleNotFound(_) => StatusCode::NOT_FOUND,
            Self::Rule(e) => match e {
                RuleError::UserNotFound(_) | RuleError::RuleNotFound(_) => StatusCode::NOT_FOUND,
                RuleError::FactsLookup(_) => StatusCode::INTERNAL_SERVER_ERROR,
                // 其余引擎错误都是规则构造期错误，属于调用方输入问题
                _ => StatusCode::BAD_REQUEST,
            },
            Self::Database(_) | Self::Serialization(_) | Self::Infra(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::RuleNotFound(_) => "RULE_NOT_FOUND",
            Self::Rule(e) => match e {
                RuleError::UserNotFound(_) => "USER_NOT_FOUND",
                RuleError::RuleNotFound(_) => "RULE_NOT_FOUND",
                RuleError::FactsLookup(_) => "FACTS_UNAVAILABLE",
                _ => "INVALID_RULE",
            },
            Self::Database(_) | Self::Serialization(_) | Self::Infra(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "请求处理失败");
        }

        let body = Json(json!({
            "error": self.error_code(),
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}
