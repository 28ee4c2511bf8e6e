//! 进度事件 - 业务能力层
//!
//! 核心流程不直接输出，只发出 `ScrapeEvent`，由调用方决定怎么呈现

use tracing::{info, warn};

use crate::models::Failure;

/// 抓取过程中的进度事件
#[derive(Debug, Clone, PartialEq)]
pub enum ScrapeEvent {
    /// 开始打开列表页
    DiscoveryStarted { url: String },
    /// 确定了目标链接数量
    LimitResolved { limit: usize, from_override: bool },
    /// 点击了一次“加载更多”
    MoreLoaded { iteration: usize, found: usize, limit: usize },
    /// 链接发现完成
    DiscoveryFinished { found: usize, limit: usize },
    /// 开始处理一个详情页
    LinkStarted { index: usize, total: usize, url: String },
    /// 字段提取失败
    FieldFailed(Failure),
    /// 详情页处理完成
    LinkFinished {
        index: usize,
        total: usize,
        url: String,
        fields: usize,
        failures: usize,
    },
    /// 详情页出现意外错误被跳过
    LinkSkipped { index: usize, url: String, error: String },
}

/// 进度事件的接收方
pub trait ProgressSink: Send + Sync {
    fn on_event(&self, event: &ScrapeEvent);
}

impl<F> ProgressSink for F
where
    F: Fn(&ScrapeEvent) + Send + Sync,
{
    fn on_event(&self, event: &ScrapeEvent) {
        self(event)
    }
}

/// 默认接收方：通过 tracing 输出
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn on_event(&self, event: &ScrapeEvent) {
        match event {
            ScrapeEvent::DiscoveryStarted { url } => info!("🔍 打开列表页: {}", url),
            ScrapeEvent::LimitResolved { limit, from_override } => {
                if *from_override {
                    info!("📊 目标链接数 (配置指定): {}", limit)
                } else {
                    info!("📊 目标链接数 (页面读取): {}", limit)
                }
            }
            ScrapeEvent::MoreLoaded {
                iteration,
                found,
                limit,
            } => info!("⏬ 第 {} 次加载更多: {}/{}", iteration, found, limit),
            ScrapeEvent::DiscoveryFinished { found, limit } => {
                info!("✓ 链接发现完成: 找到 {} 个 (目标 {})", found, limit)
            }
            ScrapeEvent::LinkStarted { index, total, url } => {
                info!("[{}/{}] 处理详情页: {}", index, total, url)
            }
            ScrapeEvent::FieldFailed(failure) => warn!("⚠️ 字段提取失败 {}", failure),
            ScrapeEvent::LinkFinished {
                index,
                total,
                fields,
                failures,
                ..
            } => info!(
                "[{}/{}] ✓ 完成: {} 个字段, {} 个失败",
                index, total, fields, failures
            ),
            ScrapeEvent::LinkSkipped { index, url, error } => {
                warn!("[{}] ❌ 跳过 {}: {}", index, url, error)
            }
        }
    }
}
