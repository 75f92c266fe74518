//! 应用层：路由与处理器

pub mod users;

use axum::{middleware, response::Json, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::core::middleware::request_logging_middleware;
use users::extract::check_valid_id;
use users::handler::{create_user, delete_user, get_user, list_users, update_user};
use users::service::UserService;

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
}

impl AppState {
    pub fn new(users: UserService) -> Self {
        Self { users }
    }
}

/// 健康检查
pub async fn status() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Ciao" }))
}

/// 组装全部路由和中间件
pub fn router(state: AppState) -> Router {
    // id 校验只作用于带 :id 的路由
    let by_id = Router::new()
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), check_valid_id));

    Router::new()
        .route("/status", get(status))
        .route("/users", get(list_users).post(create_user))
        .merge(by_id)
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
