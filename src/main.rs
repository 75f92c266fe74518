use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use users_api::infrastructure::{config::load_config, logger::Logger, seed::load_seed};
use users_api::{router, AppState, UserService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config()?;
    Logger::init(config.log_level()?);

    info!("启动用户 REST API 服务器...");

    let seed = load_seed(config.seed.path.as_deref())?;
    let state = AppState::new(UserService::new(seed));
    info!("✅ 已加载 {} 个种子用户", state.users.count()?);
    let genders = state.users.genders();
    if genders.is_empty() {
        warn!("种子数据中没有任何性别，所有创建和更新请求都将被拒绝");
    } else {
        info!(
            "合法的性别 ({} 种): {:?}",
            genders.len(),
            genders.iter().collect::<Vec<_>>()
        );
    }

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("无法绑定到 {}", addr))?;

    info!("🚀 REST API 服务器运行在 http://{}", addr);
    info!("📖 API 端点:");
    info!("   GET    /status        - 健康检查");
    info!("   GET    /users         - 获取用户列表 (支持按字段过滤)");
    info!("   POST   /users         - 创建新用户");
    info!("   GET    /users/:id     - 获取特定用户");
    info!("   PUT    /users/:id     - 更新用户");
    info!("   DELETE /users/:id     - 删除用户 (未启用)");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("服务器运行失败")?;

    info!("服务器已停止");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("收到退出信号，正在关闭...");
    }
}
