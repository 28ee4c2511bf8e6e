//! 浏览器能力 - 基础设施层
//!
//! 上层只通过这两个 trait 访问浏览器：打开页面、导航、读文本、读链接、点击、关闭。

use async_trait::async_trait;

use crate::error::AppResult;

/// 单个页面的能力
#[async_trait]
pub trait PageHandle: Send + Sync {
    /// 导航到指定 URL
    async fn navigate(&self, url: &str) -> AppResult<()>;

    /// 读取选择器匹配的第一个元素的文本，没有元素时返回 `None`
    async fn text(&self, selector: &str) -> AppResult<Option<String>>;

    /// 读取选择器匹配的所有元素的 href
    async fn hrefs(&self, selector: &str) -> AppResult<Vec<String>>;

    /// 点击选择器匹配的第一个元素，元素不存在时返回 `false`
    async fn click(&self, selector: &str) -> AppResult<bool>;

    /// 关闭页面
    async fn close(&self) -> AppResult<()>;
}

/// 浏览器会话的能力
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// 打开一个空白页面
    async fn new_page(&self) -> AppResult<Box<dyn PageHandle>>;

    /// 结束会话
    async fn close(&mut self) -> AppResult<()>;
}
