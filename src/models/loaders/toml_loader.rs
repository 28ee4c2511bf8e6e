use crate::error::{AppError, AppResult, FileError};
use crate::models::scrape_config::{ScrapeConfig, ScrapeConfigFile};
use crate::models::transform::TransformRegistry;
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载抓取配置并校验
pub async fn load_scrape_config(
    toml_file_path: &Path,
    registry: &TransformRegistry,
) -> AppResult<ScrapeConfig> {
    let path = toml_file_path.display().to_string();

    if !toml_file_path.exists() {
        return Err(FileError::NotFound { path }.into());
    }

    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|e| AppError::file_read_failed(&path, e))?;

    let file: ScrapeConfigFile = toml::from_str(&content).map_err(|e| FileError::TomlParseFailed {
        path: path.clone(),
        source: Box::new(e),
    })?;

    tracing::info!("已加载抓取配置: {} ({} 个字段)", path, file.fields.len());

    Ok(ScrapeConfig::from_file(file, registry)?)
}
