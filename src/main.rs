use anyhow::Result;
use listing_scrape::orchestrator::{export_saved, App};
use listing_scrape::{logger, Config};
use tokio_util::sync::CancellationToken;
use tracing::{error, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logger::init(config.verbose_logging);

    let command = std::env::args().nth(1).unwrap_or_else(|| "scrape".to_string());
    match command.as_str() {
        "scrape" => {
            let cancel = CancellationToken::new();
            let on_ctrl_c = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("收到 Ctrl-C，正在停止...");
                    on_ctrl_c.cancel();
                }
            });

            App::initialize(config).await?.run(cancel).await?;
        }
        "export" => export_saved(&config).await?,
        other => {
            error!("未知命令: {} (可用: scrape, export)", other);
            anyhow::bail!("未知命令: {}", other);
        }
    }

    Ok(())
}
