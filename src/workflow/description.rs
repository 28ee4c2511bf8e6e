//! 详情页流程 - 流程层
//!
//! 按配置顺序对一个详情页执行所有字段规则，组装记录。
//! 单个字段失败只记录，不中断流程，也不丢弃链接。

use tracing::debug;

use crate::error::AppResult;
use crate::infrastructure::PageHandle;
use crate::models::{Failure, FieldRule, Record};
use crate::services::field_extractor::{self, FieldOutcome};

/// 一个详情页的提取结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Description {
    /// 提取成功的字段
    pub record: Record,
    /// 本页的字段失败
    pub failures: Vec<Failure>,
}

/// 详情页流程
///
/// - 不持有任何资源（page），页面由调用方打开并导航
/// - 只依赖字段提取能力
pub struct DescriptionPipeline<'a> {
    rules: &'a [FieldRule],
}

impl<'a> DescriptionPipeline<'a> {
    pub fn new(rules: &'a [FieldRule]) -> Self {
        Self { rules }
    }

    /// 对当前页面执行全部规则
    pub async fn build_record(&self, page: &dyn PageHandle, url: &str) -> AppResult<Description> {
        let mut description = Description::default();

        for rule in self.rules {
            match field_extractor::extract(page, rule).await? {
                FieldOutcome::Extracted(value) => {
                    debug!("{} → {}: {}", url, rule.name, crate::utils::truncate_text(&value, 60));
                    description.record.insert(rule.name.clone(), value);
                }
                FieldOutcome::Failed(reason) => {
                    debug!("{} → {}: {}", url, rule.name, reason);
                    description.failures.push(Failure::new(url, rule.name.clone(), reason));
                }
            }
        }

        Ok(description)
    }
}
