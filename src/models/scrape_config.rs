//! 抓取配置
//!
//! `ScrapeConfigFile` 是 TOML 文件的原始形状，
//! `ScrapeConfig` 是校验后的不可变运行参数（正则已编译、转换函数已解析）。

use std::collections::HashSet;
use std::time::Duration;

use regex::Regex;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::models::transform::{Transform, TransformRegistry};

/// 导出表中链接地址所在的列，字段规则不能使用这个名称
pub const LINK_COLUMN: &str = "url";

fn default_max_stalled_loads() -> usize {
    5
}

fn default_max_load_iterations() -> usize {
    500
}

fn default_concurrency() -> usize {
    1
}

/// TOML 中的单个字段规则
#[derive(Debug, Clone, Deserialize)]
pub struct FieldRuleSpec {
    pub name: String,
    pub selector: String,
    #[serde(default)]
    pub regex: Option<String>,
    #[serde(default)]
    pub transform: Option<String>,
}

/// TOML 配置文件的原始结构
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeConfigFile {
    pub page_url: String,
    #[serde(default)]
    pub links_limit: Option<usize>,
    pub load_next_selector: String,
    #[serde(default)]
    pub load_next_interval_ms: u64,
    pub links_selector: String,
    #[serde(default)]
    pub links_count_info_selector: Option<String>,
    #[serde(default)]
    pub links_count_info_regex: Option<String>,
    #[serde(default)]
    pub set_description_interval_ms: u64,
    #[serde(default = "default_max_stalled_loads")]
    pub max_stalled_loads: usize,
    #[serde(default = "default_max_load_iterations")]
    pub max_load_iterations: usize,
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    #[serde(default)]
    pub abort_on_link_error: bool,
    #[serde(default)]
    pub fields: Vec<FieldRuleSpec>,
}

/// 字段提取规则
#[derive(Debug, Clone)]
pub struct FieldRule {
    /// 输出列名，在同一配置中唯一
    pub name: String,
    pub selector: String,
    pub pattern: Option<Regex>,
    pub transform: Option<Transform>,
}

impl FieldRule {
    pub fn new(name: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            selector: selector.into(),
            pattern: None,
            transform: None,
        }
    }

    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    fn compile(spec: &FieldRuleSpec, registry: &TransformRegistry) -> Result<Self, ConfigError> {
        let pattern = spec
            .regex
            .as_deref()
            .map(|re| {
                Regex::new(re).map_err(|source| ConfigError::InvalidRegex {
                    what: format!("fields.{}", spec.name),
                    source,
                })
            })
            .transpose()?;

        let transform = match spec.transform.as_deref() {
            Some(name) => {
                let transform = registry.get(name).ok_or_else(|| ConfigError::UnknownTransform {
                    field: spec.name.clone(),
                    transform: name.to_string(),
                    available: registry.names().join(", "),
                })?;
                Some(transform)
            }
            None => None,
        };

        Ok(Self {
            name: spec.name.clone(),
            selector: spec.selector.clone(),
            pattern,
            transform,
        })
    }
}

/// 结果总数的读取方式
#[derive(Debug, Clone)]
pub struct CountInfo {
    pub selector: String,
    pub pattern: Regex,
}

/// 一次运行的不可变参数
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// 列表页地址
    pub page_url: String,
    /// 直接指定链接数量，跳过读取页面上的总数
    pub links_limit: Option<usize>,
    /// “加载更多”按钮
    pub load_next_selector: String,
    pub load_next_interval: Duration,
    /// 详情页链接
    pub links_selector: String,
    /// 页面上的结果总数（`links_limit` 为空时必填）
    pub count_info: Option<CountInfo>,
    /// 两次访问详情页之间的间隔
    pub set_description_interval: Duration,
    pub max_stalled_loads: usize,
    pub max_load_iterations: usize,
    /// 同时打开的详情页数量，1 表示完全顺序
    pub concurrency: usize,
    /// 单个链接出现意外错误时是否中止整次运行
    pub abort_on_link_error: bool,
    pub fields: Vec<FieldRule>,
}

impl ScrapeConfig {
    /// 从 TOML 文本解析并校验
    pub fn from_toml_str(
        content: &str,
        registry: &TransformRegistry,
    ) -> crate::AppResult<Self> {
        let file: ScrapeConfigFile = toml::from_str(content)?;
        Ok(Self::from_file(file, registry)?)
    }

    /// 校验原始配置并编译正则、解析转换函数
    pub fn from_file(
        file: ScrapeConfigFile,
        registry: &TransformRegistry,
    ) -> Result<Self, ConfigError> {
        require_selector("page_url", &file.page_url)?;
        require_selector("load_next_selector", &file.load_next_selector)?;
        require_selector("links_selector", &file.links_selector)?;
        require_min("concurrency", file.concurrency, 1)?;
        require_min("max_stalled_loads", file.max_stalled_loads, 1)?;
        require_min("max_load_iterations", file.max_load_iterations, 1)?;

        let count_info = match (file.links_count_info_selector, file.links_count_info_regex) {
            (Some(selector), Some(regex)) => {
                require_selector("links_count_info_selector", &selector)?;
                let pattern = Regex::new(&regex).map_err(|source| ConfigError::InvalidRegex {
                    what: "links_count_info_regex".to_string(),
                    source,
                })?;
                Some(CountInfo { selector, pattern })
            }
            (None, _) if file.links_limit.is_none() => {
                return Err(ConfigError::MissingCountInfo {
                    missing: "links_count_info_selector".to_string(),
                })
            }
            (_, None) if file.links_limit.is_none() => {
                return Err(ConfigError::MissingCountInfo {
                    missing: "links_count_info_regex".to_string(),
                })
            }
            _ => None,
        };

        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(file.fields.len());
        for (index, spec) in file.fields.iter().enumerate() {
            if spec.name.trim().is_empty() {
                return Err(ConfigError::EmptyFieldName { index });
            }
            if spec.name == LINK_COLUMN {
                return Err(ConfigError::ReservedFieldName {
                    name: spec.name.clone(),
                });
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(ConfigError::DuplicateFieldName {
                    name: spec.name.clone(),
                });
            }
            require_selector(&format!("fields.{}.selector", spec.name), &spec.selector)?;
            fields.push(FieldRule::compile(spec, registry)?);
        }

        Ok(Self {
            page_url: file.page_url,
            links_limit: file.links_limit,
            load_next_selector: file.load_next_selector,
            load_next_interval: Duration::from_millis(file.load_next_interval_ms),
            links_selector: file.links_selector,
            count_info,
            set_description_interval: Duration::from_millis(file.set_description_interval_ms),
            max_stalled_loads: file.max_stalled_loads,
            max_load_iterations: file.max_load_iterations,
            concurrency: file.concurrency,
            abort_on_link_error: file.abort_on_link_error,
            fields,
        })
    }
}

fn require_selector(what: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::EmptySelector {
            what: what.to_string(),
        });
    }
    Ok(())
}

fn require_min(key: &str, value: usize, min: usize) -> Result<(), ConfigError> {
    if value < min {
        return Err(ConfigError::OutOfRange {
            key: key.to_string(),
            min,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    const BASE: &str = r#"
        page_url = "https://listings.example/search"
        load_next_selector = "button.more"
        load_next_interval_ms = 250
        links_selector = "a.offer"
        links_count_info_selector = ".count"
        links_count_info_regex = '\d[\d ]*'
        set_description_interval_ms = 1000
    "#;

    fn parse(extra: &str) -> crate::AppResult<ScrapeConfig> {
        let content = format!("{}\n{}", BASE, extra);
        ScrapeConfig::from_toml_str(&content, &TransformRegistry::default())
    }

    #[test]
    fn test_parse_full_config() {
        let config = parse(
            r#"
            [[fields]]
            name = "title"
            selector = "h1"
            transform = "trim"

            [[fields]]
            name = "phone"
            selector = ".contact"
            regex = '\d+'
            "#,
        )
        .unwrap();

        assert_eq!(config.load_next_interval, Duration::from_millis(250));
        assert_eq!(config.set_description_interval, Duration::from_secs(1));
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.max_stalled_loads, 5);
        assert!(!config.abort_on_link_error);
        assert!(config.count_info.is_some());
        let names: Vec<_> = config.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["title", "phone"]);
        assert_eq!(config.fields[0].transform.as_ref().unwrap().name(), "trim");
        assert!(config.fields[1].pattern.is_some());
    }

    #[test]
    fn test_duplicate_field_name_rejected() {
        let err = parse(
            r#"
            [[fields]]
            name = "title"
            selector = "h1"

            [[fields]]
            name = "title"
            selector = "h2"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::DuplicateFieldName { .. })));
    }

    #[test]
    fn test_unknown_transform_rejected() {
        let err = parse(
            r#"
            [[fields]]
            name = "title"
            selector = "h1"
            transform = "shout"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::UnknownTransform { .. })));
        // 错误信息列出可用的转换函数
        let message = err.to_string();
        assert!(message.contains("shout"));
        assert!(message.contains("digits_only"));
    }

    #[test]
    fn test_url_field_name_rejected() {
        let err = parse(
            r#"
            [[fields]]
            name = "url"
            selector = "a.canonical"
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::ReservedFieldName { ref name }) if name == "url"
        ));

        // 只有完全同名才冲突
        let config = parse(
            r#"
            [[fields]]
            name = "url_canonical"
            selector = "a.canonical"
            "#,
        )
        .unwrap();
        assert_eq!(config.fields[0].name, "url_canonical");
    }

    #[test]
    fn test_invalid_regex_rejected() {
        let err = parse(
            r#"
            [[fields]]
            name = "title"
            selector = "h1"
            regex = '(unclosed'
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::InvalidRegex { .. })));
    }

    #[test]
    fn test_count_info_required_without_limit() {
        let content = r#"
            page_url = "https://listings.example/search"
            load_next_selector = "button.more"
            links_selector = "a.offer"
        "#;
        let registry = TransformRegistry::default();
        let err = ScrapeConfig::from_toml_str(content, &registry).unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::MissingCountInfo { .. })));

        let with_limit = format!("links_limit = 3\n{}", content);
        let config = ScrapeConfig::from_toml_str(&with_limit, &registry).unwrap();
        assert_eq!(config.links_limit, Some(3));
        assert!(config.count_info.is_none());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let err = parse("concurrency = 0").unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::OutOfRange { .. })));
    }
}
