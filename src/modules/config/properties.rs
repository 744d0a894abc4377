use std::collections::BTreeMap;
use std::str::FromStr;

use crate::shared::errors::{AppError, AppResult};

/// Flat key/value pairs read from one configuration resource.
///
/// Keys are case-sensitive (`Nonexisting_moviename` is not `nonexisting_moviename`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    source: String,
    entries: BTreeMap<String, String>,
}

impl Properties {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Where these properties were read from, used in error messages
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Value for `key`, treating blank values as absent
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    pub fn require(&self, key: &str) -> AppResult<&str> {
        self.get(key)
            .ok_or_else(|| AppError::MissingConfigKey(key.to_string()))
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Parse an optional value, reporting malformed numbers as unreadable config
    pub fn parse_optional<T>(&self, key: &str) -> AppResult<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse::<T>()
                .map(Some)
                .map_err(|e| AppError::ConfigUnreadable {
                    path: self.source.clone(),
                    reason: format!("invalid value '{}' for '{}': {}", raw, key, e),
                }),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl FromIterator<(String, String)> for Properties {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            source: String::from("<memory>"),
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Properties {
        [
            ("token", "abc123"),
            ("page_size", "20"),
            ("blank", "   "),
            ("bad_number", "twenty"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_blank_values_are_absent() {
        let props = sample();
        assert_eq!(props.get("token"), Some("abc123"));
        assert_eq!(props.get("blank"), None);
        assert!(matches!(
            props.require("blank"),
            Err(AppError::MissingConfigKey(key)) if key == "blank"
        ));
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let props = sample();
        assert!(props.get("TOKEN").is_none());
    }

    #[test]
    fn test_parse_optional() {
        let props = sample();
        assert_eq!(props.parse_optional::<u32>("page_size").unwrap(), Some(20));
        assert_eq!(props.parse_optional::<u32>("missing").unwrap(), None);
        assert!(matches!(
            props.parse_optional::<u32>("bad_number"),
            Err(AppError::ConfigUnreadable { .. })
        ));
    }

    #[test]
    fn test_get_or_default() {
        let props = sample();
        assert_eq!(props.get_or("language", "en"), "en");
        assert_eq!(props.get_or("token", "fallback"), "abc123");
    }
}
