//! 运行结果的 JSON 持久化
//!
//! 运行结束后写出链接列表和失败列表，导出步骤可以单独重新加载。

use crate::error::{AppError, AppResult, FileError};
use crate::models::{Failure, Link};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tokio::fs;

/// 保存链接列表（url + record）
pub async fn save_links(path: &Path, links: &[Link]) -> AppResult<()> {
    save_json(path, links).await
}

/// 保存失败列表
pub async fn save_failures(path: &Path, failures: &[Failure]) -> AppResult<()> {
    save_json(path, failures).await
}

/// 重新加载链接列表
pub async fn load_links(path: &Path) -> AppResult<Vec<Link>> {
    load_json(path).await
}

/// 重新加载失败列表
pub async fn load_failures(path: &Path) -> AppResult<Vec<Failure>> {
    load_json(path).await
}

async fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> AppResult<()> {
    let display = path.display().to_string();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::file_write_failed(&display, e))?;
    }

    let content = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::file_write_failed(&display, e))?;
    fs::write(path, content)
        .await
        .map_err(|e| AppError::file_write_failed(&display, e))?;

    tracing::debug!("已写入: {}", path.display());
    Ok(())
}

async fn load_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let display = path.display().to_string();

    if !path.exists() {
        return Err(FileError::NotFound { path: display }.into());
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(&display, e))?;

    serde_json::from_str(&content).map_err(|e| {
        AppError::from(FileError::JsonParseFailed {
            path: display,
            source: Box::new(e),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FailureReason;

    #[tokio::test]
    async fn test_save_and_reload() {
        let dir = std::env::temp_dir().join(format!("listing_scrape_store_{}", std::process::id()));
        let links_path = dir.join("links.json");
        let errors_path = dir.join("errors.json");

        let mut link = Link::new("https://listings.example/offer/1");
        link.record.insert("title", "Dom");
        let failures = vec![Failure::new(&link.url, "phone", FailureReason::PatternMismatch)];

        save_links(&links_path, std::slice::from_ref(&link)).await.unwrap();
        save_failures(&errors_path, &failures).await.unwrap();

        assert_eq!(load_links(&links_path).await.unwrap(), vec![link]);
        assert_eq!(load_failures(&errors_path).await.unwrap(), failures);

        let _ = fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_malformed_json_reported() {
        let path = std::env::temp_dir()
            .join(format!("listing_scrape_bad_{}.json", std::process::id()));
        fs::write(&path, "{not json").await.unwrap();

        let err = load_links(&path).await.unwrap_err();
        assert!(matches!(err, AppError::File(FileError::JsonParseFailed { .. })));

        let _ = fs::remove_file(&path).await;
    }
}
