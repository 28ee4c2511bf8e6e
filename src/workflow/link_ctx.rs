//! 详情页处理上下文
//!
//! 封装"我正在处理第几个链接"这一信息

use std::fmt::Display;

/// 详情页处理上下文
#[derive(Debug, Clone)]
pub struct LinkCtx {
    /// 详情页地址
    pub url: String,

    /// 链接序号（从1开始，仅用于日志显示）
    pub index: usize,

    /// 链接总数
    pub total: usize,
}

impl LinkCtx {
    pub fn new(url: String, index: usize, total: usize) -> Self {
        Self { url, index, total }
    }
}

impl Display for LinkCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[链接 {}/{} {}]", self.index, self.total, self.url)
    }
}
