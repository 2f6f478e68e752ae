use tokio::signal;
use tracing::warn;

/// 等待 Ctrl+C，信号监听失败时直接返回以便服务退出
pub async fn listen_for_shutdown() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        return;
    }
    warn!("Shutdown signal received, initiating graceful shutdown...");
}
