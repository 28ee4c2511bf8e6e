//! 文本匹配工具

use regex::Regex;

/// 取正则在文本中的第一个匹配
///
/// 正则定义了捕获组且第一组参与了匹配时返回第一组，否则返回整个匹配。
pub fn first_match<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    let caps = re.captures(text)?;
    caps.get(1)
        .or_else(|| caps.get(0))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_whole() {
        let re = Regex::new(r"\d+").unwrap();
        assert_eq!(first_match(&re, "Tel: 123 456"), Some("123"));
        assert_eq!(first_match(&re, "brak"), None);
    }

    #[test]
    fn test_first_match_prefers_group() {
        let re = Regex::new(r"Tel: (\d+)").unwrap();
        assert_eq!(first_match(&re, "Tel: 123"), Some("123"));

        // 可选组未参与匹配时退回整个匹配
        let re = Regex::new(r"\d+(x)?").unwrap();
        assert_eq!(first_match(&re, "a 42 b"), Some("42"));
    }
}
