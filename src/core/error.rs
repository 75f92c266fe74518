//! 核心错误处理模块

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// 核心错误类型
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// 路径中的 id 不是非负整数
    #[error("Invalid id: {0}")]
    InvalidId(String),
    /// 查询参数中包含未知字段
    #[error("Query Params not valid:{}", .0.join(","))]
    InvalidQuery(Vec<String>),
    /// 请求体无法解析
    #[error("{0}")]
    BadRequest(String),
    /// 字段校验失败，可能同时包含多条错误
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("User not found")]
    NotFound,
    #[error("{0}")]
    InternalServerError(String),
}

/// 错误响应结构
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
    pub timestamp: String,
}

impl CoreError {
    pub fn status(&self) -> StatusCode {
        match self {
            CoreError::InvalidId(_)
            | CoreError::InvalidQuery(_)
            | CoreError::BadRequest(_)
            | CoreError::Validation(_) => StatusCode::BAD_REQUEST,
            CoreError::NotFound => StatusCode::NOT_FOUND,
            CoreError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = self.status();

        // 校验错误直接返回错误列表
        if let CoreError::Validation(errors) = self {
            return (status, Json(errors)).into_response();
        }

        let error_message = match status {
            StatusCode::BAD_REQUEST => "BAD_REQUEST",
            StatusCode::NOT_FOUND => "NOT_FOUND",
            _ => "INTERNAL_SERVER_ERROR",
        };

        let error_response = ErrorResponse {
            error: error_message.to_string(),
            message: self.to_string(),
            code: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(error_response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(CoreError::InvalidId("abc".into()).to_string(), "Invalid id: abc");
        assert_eq!(
            CoreError::InvalidQuery(vec!["foo".into(), "bar".into()]).to_string(),
            "Query Params not valid:foo,bar"
        );
        assert_eq!(CoreError::NotFound.to_string(), "User not found");
    }

    #[test]
    fn test_error_status() {
        assert_eq!(CoreError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            CoreError::Validation(vec!["Missing email".into()])
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CoreError::InternalServerError("锁已失效".into())
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
