//! # 用户管理 REST API
//!
//! 基于 Axum 的内存用户 CRUD 服务，分层结构：
//! - `app`: 路由、处理器、校验和用户存储
//! - `core`: 统一错误处理和请求日志中间件
//! - `infrastructure`: 配置、日志初始化、种子数据

pub mod app;
pub mod core;
pub mod infrastructure;

pub use app::{router, AppState};
pub use app::users::service::UserService;
