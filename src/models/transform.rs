//! 字段值转换函数
//!
//! 转换函数是全函数 `&str -> String`，不允许失败。
//! 配置文件里按名称引用，加载配置时解析，未知名称直接报配置错误。

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type TransformFn = dyn Fn(&str) -> String + Send + Sync;

/// 命名的转换函数
#[derive(Clone)]
pub struct Transform {
    name: String,
    func: Arc<TransformFn>,
}

impl Transform {
    /// 用任意闭包创建转换函数
    pub fn new(
        name: impl Into<String>,
        func: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, value: &str) -> String {
        (self.func)(value)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Transform").field(&self.name).finish()
    }
}

/// 转换函数注册表
///
/// 默认包含内置转换：
/// - `trim`
/// - `collapse_whitespace`：连续空白合并为一个空格并去掉首尾空白
/// - `lowercase` / `uppercase`
/// - `digits_only`：只保留数字
/// - `strip_currency`：去掉货币符号和千位分隔，保留数字、小数点和逗号
#[derive(Debug, Clone)]
pub struct TransformRegistry {
    transforms: HashMap<String, Transform>,
}

impl TransformRegistry {
    /// 空注册表
    pub fn empty() -> Self {
        Self {
            transforms: HashMap::new(),
        }
    }

    /// 注册（或覆盖）一个转换函数
    pub fn register(&mut self, transform: Transform) -> &mut Self {
        self.transforms.insert(transform.name.clone(), transform);
        self
    }

    pub fn get(&self, name: &str) -> Option<Transform> {
        self.transforms.get(name).cloned()
    }

    /// 已注册的名称（排序后，用于错误提示）
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.transforms.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for TransformRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register(Transform::new("trim", |s| s.trim().to_string()))
            .register(Transform::new("collapse_whitespace", |s| {
                s.split_whitespace().collect::<Vec<_>>().join(" ")
            }))
            .register(Transform::new("lowercase", |s| s.to_lowercase()))
            .register(Transform::new("uppercase", |s| s.to_uppercase()))
            .register(Transform::new("digits_only", |s| {
                s.chars().filter(|c| c.is_ascii_digit()).collect()
            }))
            .register(Transform::new("strip_currency", |s| {
                s.chars()
                    .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
                    .collect()
            }));
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_transforms() {
        let registry = TransformRegistry::default();
        let apply = |name: &str, input: &str| registry.get(name).unwrap().apply(input);

        assert_eq!(apply("trim", "  Kraków \n"), "Kraków");
        assert_eq!(apply("collapse_whitespace", " 3  pokoje\n\t 54 m2 "), "3 pokoje 54 m2");
        assert_eq!(apply("lowercase", "ABC"), "abc");
        assert_eq!(apply("uppercase", "abc"), "ABC");
        assert_eq!(apply("digits_only", "+48 600-100-200"), "48600100200");
        assert_eq!(apply("strip_currency", "459 000,50 zł"), "459000,50");
    }

    #[test]
    fn test_custom_transform_overrides_builtin() {
        let mut registry = TransformRegistry::default();
        registry.register(Transform::new("trim", |s| format!("<{}>", s)));

        assert_eq!(registry.get("trim").unwrap().apply("x"), "<x>");
        assert!(registry.get("missing").is_none());
        assert!(registry.names().contains(&"digits_only"));
    }
}
