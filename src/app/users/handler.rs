//! 用户处理器

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde::Serialize;
use tracing::{info, warn};

use super::extract::{UserIndex, ValidUser};
use super::model::User;
use super::validation::check_query_keys;
use crate::app::AppState;
use crate::core::error::CoreError;

/// 列表响应
#[derive(Debug, Serialize)]
pub struct UserList {
    pub items: Vec<User>,
    pub count: usize,
}

/// 获取用户列表，查询参数按字段精确匹配
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<Vec<(String, String)>>,
) -> Result<Json<UserList>, CoreError> {
    let invalid = check_query_keys(&query);
    if !invalid.is_empty() {
        warn!("无效的查询参数: {:?}", invalid);
        return Err(CoreError::InvalidQuery(invalid));
    }

    let items = state.users.list_users(&query)?;
    Ok(Json(UserList {
        count: items.len(),
        items,
    }))
}

pub async fn get_user(
    State(state): State<AppState>,
    Extension(target): Extension<UserIndex>,
) -> Result<Json<User>, CoreError> {
    let user = state.users.get_user(target.index)?;
    Ok(Json(user))
}

pub async fn create_user(
    State(state): State<AppState>,
    ValidUser(draft): ValidUser,
) -> Result<(StatusCode, Json<User>), CoreError> {
    let user = state.users.create_user(draft)?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// 整体替换，id 取自路径
pub async fn update_user(
    State(state): State<AppState>,
    Extension(target): Extension<UserIndex>,
    ValidUser(draft): ValidUser,
) -> Result<Json<User>, CoreError> {
    let user = state.users.update_user(target.index, draft)?;
    Ok(Json(user))
}

/// 删除尚未启用：只做 id 校验，不修改数据，也不返回内容
pub async fn delete_user(Extension(target): Extension<UserIndex>) -> StatusCode {
    info!("收到删除请求 id={}，删除功能未启用", target.id);
    StatusCode::NO_CONTENT
}
