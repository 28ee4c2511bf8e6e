//! JS 执行器 - 基础设施层
//!
//! 持有一个 chromiumoxide Page，把 `PageHandle` 的每个能力翻译成一段 JS 执行

use async_trait::async_trait;
use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::infrastructure::page::PageHandle;

/// JS 执行器
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 暴露 eval() 能力
/// - 不认识 Link / Record
pub struct JsExecutor {
    page: Page,
}

#[derive(Debug, Deserialize)]
struct TextReply {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ClickReply {
    clicked: bool,
}

impl JsExecutor {
    /// 创建新的 JS 执行器
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 执行 JS 代码并返回 JSON 结果
    pub async fn eval(&self, js_code: impl Into<String>) -> AppResult<JsonValue> {
        let result = self.page.evaluate(js_code.into()).await?;
        let json_value = result.into_value()?;
        Ok(json_value)
    }

    /// 执行 JS 代码并反序列化为指定类型
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> AppResult<T> {
        let json_value = self.eval(js_code).await?;
        let typed_value = serde_json::from_value(json_value)?;
        Ok(typed_value)
    }
}

#[async_trait]
impl PageHandle for JsExecutor {
    async fn navigate(&self, url: &str) -> AppResult<()> {
        debug!("导航到: {}", url);
        self.page
            .goto(url)
            .await
            .map_err(|e| AppError::navigation_failed(url, e))?;
        Ok(())
    }

    async fn text(&self, selector: &str) -> AppResult<Option<String>> {
        let js_code = format!(
            r#"
            (() => {{
                const el = document.querySelector({});
                return {{ text: el ? el.textContent : null }};
            }})()
            "#,
            serde_json::to_string(selector)?
        );
        let reply: TextReply = self.eval_as(js_code).await?;
        Ok(reply.text)
    }

    async fn hrefs(&self, selector: &str) -> AppResult<Vec<String>> {
        let js_code = format!(
            r#"
            (() => Array.from(document.querySelectorAll({}))
                .map(el => el.href)
                .filter(href => typeof href === 'string' && href.length > 0))()
            "#,
            serde_json::to_string(selector)?
        );
        self.eval_as(js_code).await
    }

    async fn click(&self, selector: &str) -> AppResult<bool> {
        let js_code = format!(
            r#"
            (() => {{
                const el = document.querySelector({});
                if (!el) return {{ clicked: false }};
                el.scrollIntoView();
                el.click();
                return {{ clicked: true }};
            }})()
            "#,
            serde_json::to_string(selector)?
        );
        let reply: ClickReply = self.eval_as(js_code).await?;
        Ok(reply.clicked)
    }

    async fn close(&self) -> AppResult<()> {
        // Page 内部是 Arc，clone 后关闭的是同一个 target
        self.page.clone().close().await?;
        Ok(())
    }
}
