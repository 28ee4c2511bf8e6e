//! 结果总数解析 - 业务能力层

use crate::error::{AppResult, DiscoveryError};
use crate::infrastructure::PageHandle;
use crate::models::CountInfo;
use crate::utils::text::first_match;

/// 从页面读取结果总数
pub async fn read_links_count(page: &dyn PageHandle, info: &CountInfo) -> AppResult<usize> {
    let text = page
        .text(&info.selector)
        .await?
        .ok_or_else(|| DiscoveryError::LinksCountNotFound {
            selector: info.selector.clone(),
        })?;
    Ok(parse_links_count(&text, info)?)
}

/// 对总数文本应用正则，并去掉空格、千位分隔等非数字字符
pub fn parse_links_count(text: &str, info: &CountInfo) -> Result<usize, DiscoveryError> {
    let format_error = || DiscoveryError::LinksCountFormatError {
        text: text.trim().to_string(),
        pattern: info.pattern.as_str().to_string(),
    };

    let matched = first_match(&info.pattern, text).ok_or_else(format_error)?;
    let digits: String = matched.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(format_error());
    }
    digits.parse().map_err(|_| format_error())
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn info(pattern: &str) -> CountInfo {
        CountInfo {
            selector: ".count".to_string(),
            pattern: Regex::new(pattern).unwrap(),
        }
    }

    #[test]
    fn test_strips_separator() {
        assert_eq!(parse_links_count("12 345", &info(r"\d{2} \d{3}")).unwrap(), 12345);
        assert_eq!(
            parse_links_count("Znaleziono 1,204 ogłoszeń", &info(r"([\d,]+) ogłosze")).unwrap(),
            1204
        );
    }

    #[test]
    fn test_mismatch_is_format_error() {
        let err = parse_links_count("brak wyników", &info(r"\d+")).unwrap_err();
        assert!(matches!(err, DiscoveryError::LinksCountFormatError { .. }));
    }

    #[test]
    fn test_match_without_digits_is_format_error() {
        let err = parse_links_count("wyniki: -", &info(r"wyniki: (\S+)")).unwrap_err();
        assert!(matches!(err, DiscoveryError::LinksCountFormatError { .. }));
    }
}
