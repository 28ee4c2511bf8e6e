use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// 链接发现阶段错误（整次运行中止）
    #[error("链接发现错误: {0}")]
    Discovery(#[from] DiscoveryError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 运行被取消
    #[error("运行已取消")]
    Cancelled,
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 连接浏览器失败
    #[error("无法连接到浏览器 (端口: {port}): {source}")]
    ConnectionFailed {
        port: u16,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 启动浏览器失败
    #[error("启动浏览器失败: {source}")]
    LaunchFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 创建页面失败
    #[error("创建页面失败: {source}")]
    PageCreationFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 导航失败
    #[error("导航到 {url} 失败: {source}")]
    NavigationFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 执行脚本失败
    #[error("执行脚本失败: {source}")]
    ScriptExecutionFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 浏览器配置失败
    #[error("浏览器配置失败: {message}")]
    ConfigurationFailed { message: String },
}

/// 链接发现错误
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// 页面上找不到结果总数
    #[error("找不到结果总数 (选择器: {selector})")]
    LinksCountNotFound { selector: String },
    /// 结果总数文本与正则不匹配
    #[error("结果总数格式错误: '{text}' 不匹配 {pattern}")]
    LinksCountFormatError { text: String, pattern: String },
    /// 连续多次“加载更多”都没有新链接
    #[error("加载停滞: 连续 {stalled} 次没有新链接 (已找到 {found}/{limit})")]
    DiscoveryStalled {
        found: usize,
        limit: usize,
        stalled: usize,
    },
    /// 超过最大加载次数
    #[error("超过最大加载次数 {iterations} (已找到 {found}/{limit})")]
    IterationLimitReached {
        found: usize,
        limit: usize,
        iterations: usize,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({path}): {source}")]
    JsonParseFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 字段名为空
    #[error("第 {index} 个字段规则名称为空")]
    EmptyFieldName { index: usize },
    /// 字段名重复
    #[error("字段名重复: {name}")]
    DuplicateFieldName { name: String },
    /// 字段名与导出表的链接列同名
    #[error("字段名 {name} 与链接列冲突")]
    ReservedFieldName { name: String },
    /// 选择器为空
    #[error("选择器为空: {what}")]
    EmptySelector { what: String },
    /// 正则编译失败
    #[error("正则表达式无效 ({what}): {source}")]
    InvalidRegex {
        what: String,
        #[source]
        source: regex::Error,
    },
    /// 未注册的转换函数
    #[error("未知的转换函数 '{transform}' (字段: {field}，可用: {available})")]
    UnknownTransform {
        field: String,
        transform: String,
        available: String,
    },
    /// 没有 links_limit 时必须提供结果总数选择器和正则
    #[error("未设置 links_limit 时必须提供 {missing}")]
    MissingCountInfo { missing: String },
    /// 数值超出允许范围
    #[error("配置项 {key} 必须 >= {min}")]
    OutOfRange { key: String, min: usize },
}

// ========== 从常见错误类型转换 ==========

impl From<chromiumoxide::error::CdpError> for AppError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        AppError::Browser(BrowserError::ScriptExecutionFailed {
            source: Box::new(err),
        })
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::File(FileError::JsonParseFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::File(FileError::TomlParseFailed {
            path: String::new(), // TOML错误通常不包含路径信息
            source: Box::new(err),
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建浏览器连接错误
    pub fn browser_connection_failed(
        port: u16,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Browser(BrowserError::ConnectionFailed {
            port,
            source: Box::new(source),
        })
    }

    /// 创建导航错误
    pub fn navigation_failed(
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Browser(BrowserError::NavigationFailed {
            url: url.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovery_error_is_classified() {
        let err: AppError = DiscoveryError::LinksCountNotFound {
            selector: ".count".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Discovery(_)));
        assert!(err.to_string().contains(".count"));
    }
}
