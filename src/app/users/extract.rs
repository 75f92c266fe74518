//! 用户路由的前置校验：路径 id 中间件与请求体提取器

use axum::{
    async_trait,
    extract::{rejection::PathRejection, FromRequest, Path, Request, State},
    middleware::Next,
    response::Response,
    Json,
};
use serde_json::Value;
use tracing::{debug, warn};

use super::model::UserDraft;
use super::validation::parse_user;
use crate::app::AppState;
use crate::core::error::CoreError;

/// 中间件解析出的目标记录，供后续处理器直接使用而无需再次查找
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserIndex {
    pub index: usize,
    pub id: u64,
}

/// 只接受十进制非负整数
pub fn parse_id(raw: &str) -> Result<u64, CoreError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::InvalidId(raw.to_string()));
    }
    raw.parse()
        .map_err(|_| CoreError::InvalidId(raw.to_string()))
}

/// 路径最后一段的原始文本（未解码）
fn raw_last_segment(req: &Request) -> String {
    req.uri()
        .path()
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// 校验路径中的 id 并确认记录存在，结果以 [`UserIndex`] 写入请求扩展
pub async fn check_valid_id(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    mut req: Request,
    next: Next,
) -> Result<Response, CoreError> {
    // 无法解码的路径参数（如非 UTF-8）同样按无效 id 处理
    let raw_id = match path {
        Ok(Path(raw_id)) => raw_id,
        Err(rejection) => {
            debug!("路径参数解析失败: {}", rejection.body_text());
            return Err(CoreError::InvalidId(raw_last_segment(&req)));
        }
    };
    let id = parse_id(&raw_id)?;
    let index = state.users.find_index(id)?.ok_or_else(|| {
        debug!("用户不存在 id={}", id);
        CoreError::NotFound
    })?;

    req.extensions_mut().insert(UserIndex { index, id });
    Ok(next.run(req).await)
}

/// 去掉未知字段并通过全部校验的请求体
#[derive(Debug)]
pub struct ValidUser(pub UserDraft);

#[async_trait]
impl FromRequest<AppState> for ValidUser {
    type Rejection = CoreError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| CoreError::BadRequest(rejection.body_text()))?;

        let draft = parse_user(body, state.users.genders()).map_err(|errors| {
            warn!("请求体校验失败: {:?}", errors);
            CoreError::Validation(errors)
        })?;

        Ok(Self(draft))
    }
}
