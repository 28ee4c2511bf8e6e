//! # Listing Scrape
//!
//! 从分页列表网站抓取结构化记录：先在列表页上反复“加载更多”发现详情页链接，
//! 再逐个访问详情页，按字段规则（选择器 → 正则 → 转换）提取字段。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - `PageHandle` / `BrowserSession` 能力接口
//! - `JsExecutor` - 持有 chromiumoxide Page，用 JS 实现这些能力
//! - `browser/` - 启动或连接浏览器，得到 `ChromeSession`
//!
//! ### ② 业务能力层（Services）
//! - `field_extractor` - 单条字段规则的提取
//! - `links_count` - 结果总数解析
//! - `progress` - 进度事件
//! - `export` - CSV 表格导出
//!
//! ### ③ 流程层（Workflow）
//! - `LinkDiscovery` - 列表页的链接发现循环
//! - `DescriptionPipeline` - 一个详情页的全部字段
//!
//! ### ④ 编排层（Orchestration）
//! - `Scraper` - 持有会话，串起链接发现和详情页处理
//! - `App` - 配置、持久化、导出

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{BrowserSession, JsExecutor, PageHandle};
pub use models::{Failure, FailureReason, FieldRule, Link, Record, ScrapeConfig};
pub use orchestrator::{App, ScrapeReport, Scraper};
pub use services::{ProgressSink, ScrapeEvent};
pub use workflow::{DescriptionPipeline, LinkDiscovery};
