//! 链接发现 - 流程层
//!
//! 两个阶段：
//! 1. 确定目标数量：配置指定的 `links_limit`，否则读取页面上的结果总数
//! 2. 反复读取链接、点击“加载更多”，直到链接数达到目标
//!
//! “加载更多”不再产生新链接时，连续停滞 `max_stalled_loads` 次报 `DiscoveryStalled`；
//! 总加载次数超过 `max_load_iterations` 报 `IterationLimitReached`。

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{AppResult, ConfigError, DiscoveryError};
use crate::infrastructure::PageHandle;
use crate::models::ScrapeConfig;
use crate::services::links_count::read_links_count;
use crate::services::{ProgressSink, ScrapeEvent};
use crate::utils::pacing::{ensure_active, pause};

/// 链接发现结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovered {
    /// 目标链接数
    pub limit: usize,
    /// 页面上读到的所有 href，可能多于 `limit`，也可能有重复
    pub hrefs: Vec<String>,
}

/// 链接发现流程
pub struct LinkDiscovery<'a> {
    config: &'a ScrapeConfig,
    progress: &'a dyn ProgressSink,
    cancel: &'a CancellationToken,
}

impl<'a> LinkDiscovery<'a> {
    pub fn new(
        config: &'a ScrapeConfig,
        progress: &'a dyn ProgressSink,
        cancel: &'a CancellationToken,
    ) -> Self {
        Self {
            config,
            progress,
            cancel,
        }
    }

    /// 打开列表页并发现链接
    pub async fn discover_links(&self, page: &dyn PageHandle) -> AppResult<Discovered> {
        ensure_active(self.cancel)?;
        self.progress.on_event(&ScrapeEvent::DiscoveryStarted {
            url: self.config.page_url.clone(),
        });
        page.navigate(&self.config.page_url).await?;

        let limit = self.resolve_limit(page).await?;
        let hrefs = self.load_until(page, limit).await?;

        self.progress.on_event(&ScrapeEvent::DiscoveryFinished {
            found: hrefs.len(),
            limit,
        });
        Ok(Discovered { limit, hrefs })
    }

    /// 计数阶段
    async fn resolve_limit(&self, page: &dyn PageHandle) -> AppResult<usize> {
        if let Some(limit) = self.config.links_limit {
            self.progress.on_event(&ScrapeEvent::LimitResolved {
                limit,
                from_override: true,
            });
            return Ok(limit);
        }

        let info = self.config.count_info.as_ref().ok_or_else(|| ConfigError::MissingCountInfo {
            missing: "links_count_info_selector".to_string(),
        })?;
        let limit = read_links_count(page, info).await?;
        self.progress.on_event(&ScrapeEvent::LimitResolved {
            limit,
            from_override: false,
        });
        Ok(limit)
    }

    /// 加载阶段
    async fn load_until(&self, page: &dyn PageHandle, limit: usize) -> AppResult<Vec<String>> {
        let mut iteration = 0;
        let mut stalled = 0;
        let mut previous = 0;

        loop {
            ensure_active(self.cancel)?;

            let hrefs = page.hrefs(&self.config.links_selector).await?;
            let found = hrefs.len();

            if iteration > 0 {
                self.progress.on_event(&ScrapeEvent::MoreLoaded {
                    iteration,
                    found,
                    limit,
                });
                if found > previous {
                    stalled = 0;
                } else {
                    stalled += 1;
                    debug!("加载更多没有新链接 ({}/{})", stalled, self.config.max_stalled_loads);
                    if stalled >= self.config.max_stalled_loads {
                        return Err(DiscoveryError::DiscoveryStalled {
                            found,
                            limit,
                            stalled,
                        }
                        .into());
                    }
                }
            }

            if found >= limit {
                return Ok(hrefs);
            }

            if iteration >= self.config.max_load_iterations {
                return Err(DiscoveryError::IterationLimitReached {
                    found,
                    limit,
                    iterations: iteration,
                }
                .into());
            }

            ensure_active(self.cancel)?;
            if !page.click(&self.config.load_next_selector).await? {
                debug!("找不到加载更多按钮: {}", self.config.load_next_selector);
            }
            previous = found;
            iteration += 1;

            pause(self.config.load_next_interval, self.cancel).await?;
        }
    }
}
