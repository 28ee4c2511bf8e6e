use serde::{Deserialize, Serialize};
use std::fmt;

/// 字段提取失败原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    /// 选择器没有匹配到元素，或元素文本为空
    NotFound,
    /// 文本与字段正则不匹配
    PatternMismatch,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::NotFound => write!(f, "NotFound"),
            FailureReason::PatternMismatch => write!(f, "PatternMismatch"),
        }
    }
}

/// 一次字段提取失败，写入运行期的失败列表后不再移除
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Failure {
    pub url: String,
    pub field_name: String,
    pub reason: FailureReason,
}

impl Failure {
    pub fn new(
        url: impl Into<String>,
        field_name: impl Into<String>,
        reason: FailureReason,
    ) -> Self {
        Self {
            url: url.into(),
            field_name: field_name.into(),
            reason,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.url, self.field_name, self.reason)
    }
}
