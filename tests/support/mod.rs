//! 内存中的假网站，实现 `BrowserSession` / `PageHandle`
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use listing_scrape::models::TransformRegistry;
use listing_scrape::{AppError, AppResult, BrowserSession, PageHandle, ScrapeConfig};

pub const INDEX_URL: &str = "https://listings.example/search";
pub const LINKS_SELECTOR: &str = "a.offer";
pub const LOAD_MORE_SELECTOR: &str = "button.more";
pub const COUNT_SELECTOR: &str = ".results-count";

/// 列表页和详情页的内容
#[derive(Debug, Default, Clone)]
pub struct SiteContent {
    /// 第 i 个元素是第 i 次“加载更多”后新出现的链接
    pub batches: Vec<Vec<String>>,
    pub count_text: Option<String>,
    /// url → (选择器 → 文本)
    pub pages: HashMap<String, HashMap<String, String>>,
    /// 导航时报错的 url
    pub failing_urls: HashSet<String>,
    /// 导航到这些 url 时先等待
    pub slow_urls: HashMap<String, Duration>,
}

/// 访问统计
#[derive(Debug, Default, Clone)]
pub struct SiteStats {
    pub loads: usize,
    pub clicks: usize,
    pub count_reads: usize,
    pub navigations: Vec<String>,
    pub pages_opened: usize,
    pub pages_closed: usize,
    pub session_closed: bool,
}

#[derive(Debug, Default)]
pub struct FakeSite {
    content: SiteContent,
    stats: Mutex<SiteStats>,
}

impl FakeSite {
    pub fn new(content: SiteContent) -> Arc<Self> {
        Arc::new(Self {
            content,
            stats: Mutex::new(SiteStats::default()),
        })
    }

    pub fn stats(&self) -> SiteStats {
        self.stats.lock().unwrap().clone()
    }

    pub fn session(self: &Arc<Self>) -> Box<dyn BrowserSession> {
        Box::new(FakeSession { site: self.clone() })
    }

    pub fn page(self: &Arc<Self>) -> FakePage {
        FakePage {
            site: self.clone(),
            current: Mutex::new(None),
        }
    }

    fn revealed_links(&self) -> Vec<String> {
        let loads = self.stats.lock().unwrap().loads;
        self.content
            .batches
            .iter()
            .take(loads + 1)
            .flatten()
            .cloned()
            .collect()
    }
}

pub struct FakeSession {
    site: Arc<FakeSite>,
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn new_page(&self) -> AppResult<Box<dyn PageHandle>> {
        self.site.stats.lock().unwrap().pages_opened += 1;
        Ok(Box::new(self.site.page()))
    }

    async fn close(&mut self) -> AppResult<()> {
        self.site.stats.lock().unwrap().session_closed = true;
        Ok(())
    }
}

pub struct FakePage {
    site: Arc<FakeSite>,
    current: Mutex<Option<String>>,
}

impl FakePage {
    fn current(&self) -> Option<String> {
        self.current.lock().unwrap().clone()
    }

    fn on_index(&self) -> bool {
        self.current().as_deref() == Some(INDEX_URL)
    }
}

#[async_trait]
impl PageHandle for FakePage {
    async fn navigate(&self, url: &str) -> AppResult<()> {
        self.site.stats.lock().unwrap().navigations.push(url.to_string());
        if let Some(delay) = self.site.content.slow_urls.get(url) {
            tokio::time::sleep(*delay).await;
        }
        if self.site.content.failing_urls.contains(url) {
            let timeout = std::io::Error::new(std::io::ErrorKind::TimedOut, "navigation timeout");
            return Err(AppError::navigation_failed(url, timeout));
        }
        *self.current.lock().unwrap() = Some(url.to_string());
        Ok(())
    }

    async fn text(&self, selector: &str) -> AppResult<Option<String>> {
        if self.on_index() && selector == COUNT_SELECTOR {
            self.site.stats.lock().unwrap().count_reads += 1;
            return Ok(self.site.content.count_text.clone());
        }
        Ok(self
            .current()
            .and_then(|url| self.site.content.pages.get(&url))
            .and_then(|page| page.get(selector))
            .cloned())
    }

    async fn hrefs(&self, selector: &str) -> AppResult<Vec<String>> {
        if self.on_index() && selector == LINKS_SELECTOR {
            return Ok(self.site.revealed_links());
        }
        Ok(Vec::new())
    }

    async fn click(&self, selector: &str) -> AppResult<bool> {
        if !(self.on_index() && selector == LOAD_MORE_SELECTOR) {
            return Ok(false);
        }
        let mut stats = self.site.stats.lock().unwrap();
        stats.clicks += 1;
        stats.loads += 1;
        Ok(true)
    }

    async fn close(&self) -> AppResult<()> {
        self.site.stats.lock().unwrap().pages_closed += 1;
        Ok(())
    }
}

/// 列表页链接
pub fn offer_urls(range: std::ops::Range<usize>) -> Vec<String> {
    range
        .map(|i| format!("https://listings.example/offer/{}", i))
        .collect()
}

/// 详情页内容
pub fn detail_page(fields: &[(&str, &str)]) -> HashMap<String, String> {
    fields
        .iter()
        .map(|(selector, text)| (selector.to_string(), text.to_string()))
        .collect()
}

/// 基础配置加上额外的 TOML 片段
pub fn scrape_config(extra: &str) -> ScrapeConfig {
    let content = format!(
        r#"
        page_url = "{INDEX_URL}"
        load_next_selector = "{LOAD_MORE_SELECTOR}"
        links_selector = "{LINKS_SELECTOR}"
        links_count_info_selector = "{COUNT_SELECTOR}"
        links_count_info_regex = '(\d[\d ]*) ogłosz'
        {extra}
        "#
    );
    ScrapeConfig::from_toml_str(&content, &TransformRegistry::default()).unwrap()
}
