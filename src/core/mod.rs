//! 核心层：错误处理、中间件

pub mod error;
pub mod middleware;
