//! 字段提取 - 业务能力层
//!
//! 对单个页面应用单条字段规则：选择器 → 正则 → 转换

use crate::error::AppResult;
use crate::infrastructure::PageHandle;
use crate::models::{FailureReason, FieldRule};
use crate::utils::text::first_match;

/// 单条规则的提取结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    /// 提取成功
    Extracted(String),
    /// 提取失败（可恢复，记录后继续下一个字段）
    Failed(FailureReason),
}

/// 读取选择器文本并按规则精炼
///
/// 浏览器调用本身的错误通过 `Err` 返回，字段缺失或不匹配通过 `FieldOutcome::Failed` 返回
pub async fn extract(page: &dyn PageHandle, rule: &FieldRule) -> AppResult<FieldOutcome> {
    let raw = page.text(&rule.selector).await?;
    Ok(refine(raw.as_deref(), rule))
}

/// 纯函数部分：对选择器读到的原始文本应用规则
pub fn refine(raw: Option<&str>, rule: &FieldRule) -> FieldOutcome {
    let text = match raw {
        Some(text) if !text.trim().is_empty() => text,
        _ => return FieldOutcome::Failed(FailureReason::NotFound),
    };

    let value = match &rule.pattern {
        Some(re) => match first_match(re, text) {
            Some(m) => m,
            None => return FieldOutcome::Failed(FailureReason::PatternMismatch),
        },
        None => text,
    };

    let value = match &rule.transform {
        Some(transform) => transform.apply(value),
        None => value.to_string(),
    };

    FieldOutcome::Extracted(value)
}
