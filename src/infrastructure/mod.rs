//! 基础设施层：持有浏览器资源，只暴露能力

pub mod js_executor;
pub mod page;

pub use js_executor::JsExecutor;
pub use page::{BrowserSession, PageHandle};
