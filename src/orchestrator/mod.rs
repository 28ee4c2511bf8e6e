//! 编排层（Orchestration Layer）
//!
//! ```text
//! app (配置、会话、持久化、导出)
//!     ↓
//! scraper (链接发现 → 逐个详情页)
//!     ↓
//! workflow::{LinkDiscovery, DescriptionPipeline}
//!     ↓
//! services (字段提取 / 总数解析 / 进度 / 导出)
//!     ↓
//! infrastructure (PageHandle / BrowserSession)
//! ```

pub mod app;
pub mod scraper;

pub use app::{export_saved, App};
pub use scraper::{LinkError, ScrapeReport, Scraper};
