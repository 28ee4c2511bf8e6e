//! 应用入口 - 编排层
//!
//! 加载配置、获取浏览器会话、执行抓取、保存中间结果并导出表格

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::browser;
use crate::config::Config;
use crate::infrastructure::BrowserSession;
use crate::models::{self, ScrapeConfig, TransformRegistry};
use crate::orchestrator::scraper::{ScrapeReport, Scraper};
use crate::services::export;
use crate::utils::logging::{log_startup, print_final_stats};

/// 应用主结构
pub struct App {
    config: Config,
    scrape_config: ScrapeConfig,
}

impl App {
    /// 初始化应用：读取并校验抓取配置
    pub async fn initialize(config: Config) -> Result<Self> {
        let scrape_config =
            models::load_scrape_config(&config.scrape_config_path, &TransformRegistry::default())
                .await
                .with_context(|| {
                    format!("无法加载抓取配置: {}", config.scrape_config_path.display())
                })?;

        log_startup(&scrape_config.page_url, scrape_config.concurrency);

        Ok(Self {
            config,
            scrape_config,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self, cancel: CancellationToken) -> Result<ScrapeReport> {
        let session = open_session(&self.config).await?;

        let report = Scraper::new(session)
            .with_cancellation(cancel)
            .run(&self.scrape_config)
            .await
            .context("抓取失败")?;

        persist(&self.config, &report).await?;
        export_tables(&self.config, &report)?;

        print_final_stats(&report, &self.config.output_dir.display().to_string());
        Ok(report)
    }
}

/// 只做导出：重新加载已保存的 JSON 并写出表格
pub async fn export_saved(config: &Config) -> Result<()> {
    info!("📁 正在加载已保存的结果...");
    let links = models::load_links(&config.links_path())
        .await
        .context("无法加载链接列表")?;
    let failures = models::load_failures(&config.errors_path())
        .await
        .context("无法加载失败列表")?;

    let report = ScrapeReport {
        links,
        failures,
        link_errors: Vec::new(),
    };
    export_tables(config, &report)
}

async fn open_session(config: &Config) -> Result<Box<dyn BrowserSession>> {
    let session = match config.browser_debug_port {
        Some(port) => browser::connect_to_browser(port).await?,
        None => {
            browser::launch_headless_browser(config.chrome_executable.as_deref(), config.headless)
                .await?
        }
    };
    Ok(Box::new(session))
}

async fn persist(config: &Config, report: &ScrapeReport) -> Result<()> {
    models::save_links(&config.links_path(), &report.links).await?;
    models::save_failures(&config.errors_path(), &report.failures).await?;
    info!(
        "💾 已保存 {} 和 {}",
        config.links_path().display(),
        config.errors_path().display()
    );
    Ok(())
}

fn export_tables(config: &Config, report: &ScrapeReport) -> Result<()> {
    export::write_table(&export::flatten_links(&report.links), &config.table_path())?;
    export::write_table(
        &export::flatten_failures(&report.failures),
        &config.errors_table_path(),
    )?;
    Ok(())
}
