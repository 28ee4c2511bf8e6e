use std::path::PathBuf;

/// 程序配置（来自环境变量）
///
/// 抓取规则本身在 `SCRAPE_CONFIG` 指向的 TOML 文件里，见 `models::ScrapeConfig`
#[derive(Clone, Debug)]
pub struct Config {
    /// 抓取配置文件路径
    pub scrape_config_path: PathBuf,
    /// 输出目录
    pub output_dir: PathBuf,
    /// 浏览器调试端口，设置后连接已有浏览器而不是启动新的
    pub browser_debug_port: Option<u16>,
    /// 浏览器可执行文件路径
    pub chrome_executable: Option<PathBuf>,
    /// 是否无头模式
    pub headless: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- 输出文件名 ---
    pub links_file: String,
    pub errors_file: String,
    pub table_file: String,
    pub errors_table_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scrape_config_path: PathBuf::from("scrape.toml"),
            output_dir: PathBuf::from("output"),
            browser_debug_port: None,
            chrome_executable: None,
            headless: true,
            verbose_logging: false,
            links_file: "links.json".to_string(),
            errors_file: "errors.json".to_string(),
            table_file: "records.csv".to_string(),
            errors_table_file: "errors.csv".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 按给定的查找函数读取配置，缺失或无法解析的值使用默认值
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default = Self::default();
        Self {
            scrape_config_path: lookup("SCRAPE_CONFIG")
                .map(PathBuf::from)
                .unwrap_or(default.scrape_config_path),
            output_dir: lookup("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.output_dir),
            browser_debug_port: lookup("BROWSER_DEBUG_PORT").and_then(|v| v.parse().ok()),
            chrome_executable: lookup("CHROME_EXECUTABLE").map(PathBuf::from),
            headless: lookup("HEADLESS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.headless),
            verbose_logging: lookup("VERBOSE_LOGGING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.verbose_logging),
            links_file: lookup("LINKS_FILE").unwrap_or(default.links_file),
            errors_file: lookup("ERRORS_FILE").unwrap_or(default.errors_file),
            table_file: lookup("TABLE_FILE").unwrap_or(default.table_file),
            errors_table_file: lookup("ERRORS_TABLE_FILE").unwrap_or(default.errors_table_file),
        }
    }

    pub fn links_path(&self) -> PathBuf {
        self.output_dir.join(&self.links_file)
    }

    pub fn errors_path(&self) -> PathBuf {
        self.output_dir.join(&self.errors_file)
    }

    pub fn table_path(&self) -> PathBuf {
        self.output_dir.join(&self.table_file)
    }

    pub fn errors_table_path(&self) -> PathBuf {
        self.output_dir.join(&self.errors_table_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_lookup_overrides_and_defaults() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("OUTPUT_DIR", "out"),
            ("BROWSER_DEBUG_PORT", "9222"),
            ("HEADLESS", "false"),
            ("VERBOSE_LOGGING", "yes"),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.browser_debug_port, Some(9222));
        assert!(!config.headless);
        // 无法解析时回落到默认值
        assert!(!config.verbose_logging);
        assert_eq!(config.links_path(), PathBuf::from("out").join("links.json"));
        assert_eq!(config.scrape_config_path, PathBuf::from("scrape.toml"));
    }
}
