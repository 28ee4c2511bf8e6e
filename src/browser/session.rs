use async_trait::async_trait;
use chromiumoxide::Browser;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult, BrowserError};
use crate::infrastructure::{BrowserSession, JsExecutor, PageHandle};

/// 会话的来源，决定关闭时是否结束浏览器进程
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOrigin {
    /// 自己启动的无头浏览器，关闭时结束进程
    Launched,
    /// 连接到已有浏览器，关闭时只断开
    Attached,
}

/// chromiumoxide 浏览器会话
pub struct ChromeSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    origin: SessionOrigin,
    closed: bool,
}

impl ChromeSession {
    pub(crate) fn new(
        browser: Browser,
        handler_task: JoinHandle<()>,
        origin: SessionOrigin,
    ) -> Self {
        Self {
            browser,
            handler_task,
            origin,
            closed: false,
        }
    }
}

#[async_trait]
impl BrowserSession for ChromeSession {
    async fn new_page(&self) -> AppResult<Box<dyn PageHandle>> {
        let page = self.browser.new_page("about:blank").await.map_err(|e| {
            AppError::Browser(BrowserError::PageCreationFailed {
                source: Box::new(e),
            })
        })?;
        debug!("已创建新页面");
        Ok(Box::new(JsExecutor::new(page)))
    }

    async fn close(&mut self) -> AppResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        if self.origin == SessionOrigin::Launched {
            if let Err(e) = self.browser.close().await {
                warn!("关闭浏览器失败: {}", e);
            }
            if let Err(e) = self.browser.wait().await {
                warn!("等待浏览器退出失败: {}", e);
            }
            info!("🛑 浏览器已关闭");
        } else {
            info!("🔌 已断开浏览器连接");
        }

        self.handler_task.abort();
        Ok(())
    }
}
