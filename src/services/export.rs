//! 表格导出 - 业务能力层
//!
//! 把记录拍平成行写入 CSV：列为所有记录键的并集（按首次出现顺序），缺失的单元格留空

use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::scrape_config::LINK_COLUMN;
use crate::models::{Failure, Link};

/// 拍平后的表格
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// 把链接及其记录拍平成表格，第一列为 url
pub fn flatten_links(links: &[Link]) -> Table {
    let mut headers = vec![LINK_COLUMN.to_string()];
    let mut seen: HashSet<&str> = HashSet::from([LINK_COLUMN]);
    for link in links {
        for key in link.record.keys() {
            if seen.insert(key) {
                headers.push(key.to_string());
            }
        }
    }

    let rows = links
        .iter()
        .map(|link| {
            headers
                .iter()
                .enumerate()
                .map(|(i, header)| {
                    if i == 0 {
                        link.url.clone()
                    } else {
                        link.record.get(header).unwrap_or_default().to_string()
                    }
                })
                .collect()
        })
        .collect();

    Table { headers, rows }
}

/// 失败列表的表格形式
pub fn flatten_failures(failures: &[Failure]) -> Table {
    Table {
        headers: vec![
            LINK_COLUMN.to_string(),
            "fieldName".to_string(),
            "reason".to_string(),
        ],
        rows: failures
            .iter()
            .map(|f| vec![f.url.clone(), f.field_name.clone(), f.reason.to_string()])
            .collect(),
    }
}

/// 写入 CSV 文件
pub fn write_table(table: &Table, path: &Path) -> AppResult<()> {
    let display = path.display().to_string();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| AppError::file_write_failed(&display, e))?;
    }

    let mut writer =
        csv::Writer::from_path(path).map_err(|e| AppError::file_write_failed(&display, e))?;
    writer
        .write_record(&table.headers)
        .map_err(|e| AppError::file_write_failed(&display, e))?;
    for row in &table.rows {
        writer
            .write_record(row)
            .map_err(|e| AppError::file_write_failed(&display, e))?;
    }
    writer.flush().map_err(|e| AppError::file_write_failed(&display, e))?;

    info!("📄 已导出 {} 行到 {}", table.rows.len(), path.display());
    Ok(())
}
