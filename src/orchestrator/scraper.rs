//! 抓取编排器 - 编排层
//!
//! ## 职责
//!
//! 1. **会话管理**：持有浏览器会话，任何退出路径上都会关闭
//! 2. **链接发现**：打开列表页，委托 `LinkDiscovery` 找到详情页链接
//! 3. **详情处理**：逐个（或按 `concurrency` 并发）打开详情页，委托 `DescriptionPipeline` 提取字段
//! 4. **结果汇总**：链接、字段失败、被跳过的链接
//!
//! 链接发现失败会中止整次运行；字段失败只记录；
//! 单个链接的意外错误默认跳过该链接，`abort_on_link_error` 打开时中止运行。

use std::collections::HashSet;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::error::{AppError, AppResult};
use crate::infrastructure::{BrowserSession, PageHandle};
use crate::models::{Failure, Link, ScrapeConfig};
use crate::services::{ProgressSink, ScrapeEvent, TracingProgress};
use crate::utils::pacing::{ensure_active, pause};
use crate::workflow::{Description, DescriptionPipeline, LinkCtx, LinkDiscovery};

/// 被跳过的链接
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkError {
    pub url: String,
    pub message: String,
}

/// 一次运行的结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeReport {
    pub links: Vec<Link>,
    pub failures: Vec<Failure>,
    pub link_errors: Vec<LinkError>,
}

impl ScrapeReport {
    /// 没有任何字段失败、也没有被跳过的链接数
    pub fn complete_records(&self) -> usize {
        let incomplete: HashSet<&str> = self
            .failures
            .iter()
            .map(|f| f.url.as_str())
            .chain(self.link_errors.iter().map(|e| e.url.as_str()))
            .collect();
        self.links
            .iter()
            .filter(|link| !incomplete.contains(link.url.as_str()))
            .count()
    }
}

/// 抓取编排器
pub struct Scraper {
    session: Box<dyn BrowserSession>,
    progress: Arc<dyn ProgressSink>,
    cancel: CancellationToken,
    links: Vec<Link>,
    failures: Vec<Failure>,
    link_errors: Vec<LinkError>,
}

impl Scraper {
    pub fn new(session: Box<dyn BrowserSession>) -> Self {
        Self {
            session,
            progress: Arc::new(TracingProgress),
            cancel: CancellationToken::new(),
            links: Vec::new(),
            failures: Vec::new(),
            link_errors: Vec::new(),
        }
    }

    /// 替换进度接收方
    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// 使用外部取消令牌
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// 执行一次完整运行，结束后关闭会话
    pub async fn run(mut self, config: &ScrapeConfig) -> AppResult<ScrapeReport> {
        let result = self.run_inner(config).await;

        if let Err(e) = self.session.close().await {
            warn!("关闭浏览器会话失败: {}", e);
        }

        result?;
        Ok(ScrapeReport {
            links: self.links,
            failures: self.failures,
            link_errors: self.link_errors,
        })
    }

    async fn run_inner(&mut self, config: &ScrapeConfig) -> AppResult<()> {
        let urls = self.discover(config).await?;
        self.links = urls.into_iter().map(Link::new).collect();
        info!("共 {} 个详情页待处理", self.links.len());

        self.describe_all(config).await
    }

    /// 在单独的页面上完成链接发现，并去重、截断到目标数量
    async fn discover(&self, config: &ScrapeConfig) -> AppResult<Vec<String>> {
        let page = self.session.new_page().await?;
        let discovered = LinkDiscovery::new(config, self.progress.as_ref(), &self.cancel)
            .discover_links(page.as_ref())
            .await;
        close_page(page.as_ref()).await;

        let discovered = discovered?;
        Ok(unique_links(discovered.hrefs, discovered.limit))
    }

    async fn describe_all(&mut self, config: &ScrapeConfig) -> AppResult<()> {
        let total = self.links.len();
        let pipeline = DescriptionPipeline::new(&config.fields);
        let session = self.session.as_ref();
        let progress = self.progress.as_ref();
        // 中止时只取消这个子令牌，外部令牌取消时它也随之取消
        let stop = self.cancel.child_token();

        let mut outcomes = Vec::with_capacity(total);
        let mut aborted: Option<AppError> = None;
        {
            let stop = &stop;
            let mut units = stream::iter(self.links.iter().enumerate().map(|(i, link)| {
                let ctx = LinkCtx::new(link.url.clone(), i + 1, total);
                describe_link(session, &pipeline, ctx, config, progress, stop)
            }))
            .buffered(config.concurrency);

            // 中止后继续消费剩余单元：已打开的页面在各自单元里关闭，未开始的单元立即返回
            while let Some((ctx, result)) = units.next().await {
                if aborted.is_some() {
                    continue;
                }
                match result {
                    Ok(description) => {
                        for failure in &description.failures {
                            progress.on_event(&ScrapeEvent::FieldFailed(failure.clone()));
                        }
                        progress.on_event(&ScrapeEvent::LinkFinished {
                            index: ctx.index,
                            total,
                            url: ctx.url.clone(),
                            fields: description.record.len(),
                            failures: description.failures.len(),
                        });
                        outcomes.push((ctx.index - 1, Ok(description)));
                    }
                    Err(AppError::Cancelled) => {
                        aborted = Some(AppError::Cancelled);
                        stop.cancel();
                    }
                    Err(e) if config.abort_on_link_error => {
                        error!("{} ❌ 处理失败，中止运行: {}", ctx, e);
                        aborted = Some(e);
                        stop.cancel();
                    }
                    Err(e) => {
                        progress.on_event(&ScrapeEvent::LinkSkipped {
                            index: ctx.index,
                            url: ctx.url.clone(),
                            error: e.to_string(),
                        });
                        outcomes.push((ctx.index - 1, Err(e)));
                    }
                }
            }
        }

        if let Some(e) = aborted {
            return Err(e);
        }

        for (index, outcome) in outcomes {
            match outcome {
                Ok(description) => {
                    self.links[index].record = description.record;
                    self.failures.extend(description.failures);
                }
                Err(e) => self.link_errors.push(LinkError {
                    url: self.links[index].url.clone(),
                    message: e.to_string(),
                }),
            }
        }

        Ok(())
    }
}

/// 处理单个详情页，最后一个链接之后不再等待
async fn describe_link(
    session: &dyn BrowserSession,
    pipeline: &DescriptionPipeline<'_>,
    ctx: LinkCtx,
    config: &ScrapeConfig,
    progress: &dyn ProgressSink,
    cancel: &CancellationToken,
) -> (LinkCtx, AppResult<Description>) {
    if let Err(e) = ensure_active(cancel) {
        return (ctx, Err(e));
    }

    progress.on_event(&ScrapeEvent::LinkStarted {
        index: ctx.index,
        total: ctx.total,
        url: ctx.url.clone(),
    });

    let result = open_and_describe(session, pipeline, &ctx.url).await;

    let paced = if ctx.index < ctx.total {
        pause(config.set_description_interval, cancel).await
    } else {
        Ok(())
    };

    // 等待期间被取消时以取消为准
    (ctx, paced.and(result))
}

async fn open_and_describe(
    session: &dyn BrowserSession,
    pipeline: &DescriptionPipeline<'_>,
    url: &str,
) -> AppResult<Description> {
    let page = session.new_page().await?;
    let result = navigate_and_describe(page.as_ref(), pipeline, url).await;
    close_page(page.as_ref()).await;
    result
}

async fn navigate_and_describe(
    page: &dyn PageHandle,
    pipeline: &DescriptionPipeline<'_>,
    url: &str,
) -> AppResult<Description> {
    page.navigate(url).await?;
    pipeline.build_record(page, url).await
}

async fn close_page(page: &dyn PageHandle) {
    if let Err(e) = page.close().await {
        warn!("关闭页面失败: {}", e);
    }
}

/// 去重（保留首次出现的顺序）并截断到目标数量
fn unique_links(hrefs: Vec<String>, limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    hrefs
        .into_iter()
        .filter(|href| seen.insert(href.clone()))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FailureReason;

    #[test]
    fn test_unique_links_dedups_and_truncates() {
        let hrefs = vec!["a", "b", "a", "c", "d"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(unique_links(hrefs, 3), ["a", "b", "c"]);
        assert!(unique_links(vec!["a".to_string()], 0).is_empty());
    }

    #[test]
    fn test_complete_records() {
        let report = ScrapeReport {
            links: vec![Link::new("u1"), Link::new("u2"), Link::new("u3")],
            failures: vec![
                Failure::new("u2", "phone", FailureReason::NotFound),
                Failure::new("u2", "email", FailureReason::NotFound),
            ],
            link_errors: vec![LinkError {
                url: "u3".to_string(),
                message: "timeout".to_string(),
            }],
        };
        assert_eq!(report.complete_records(), 1);
    }
}
