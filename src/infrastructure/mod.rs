//! 基础设施层：配置、日志、种子数据

pub mod config;
pub mod logger;
pub mod seed;
