// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::BehaviorError;
use crate::graph::NodeConfig;

/// Deserialize a node's option map into a behaviour's typed config.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use serde_json::json;
/// use openflow::graph::NodeConfig;
/// use openflow::utils::parse_config;
///
/// #[derive(Deserialize)]
/// struct WaitConfig { ms: u64 }
///
/// let mut config = NodeConfig::new();
/// config.insert("ms".to_string(), json!(20));
/// let parsed: WaitConfig = parse_config(&config).unwrap();
/// assert_eq!(parsed.ms, 20);
/// ```
pub fn parse_config<T: DeserializeOwned>(config: &NodeConfig) -> Result<T, BehaviorError> {
    serde_json::from_value(Value::Object(config.clone()))
        .map_err(|e| BehaviorError::InvalidConfig(e.to_string()))
}

/// Follow a dotted path (`user.emails.0`) into a JSON value.
///
/// Numeric segments index into arrays. An empty path returns the value itself.
pub fn lookup_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }
    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Render a value for inline interpolation into a larger string.
///
/// Strings are inserted without quotes; everything else as compact JSON.
pub fn render_inline(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_path() {
        let value = json!({"user": {"name": "ada", "tags": ["a", "b"]}});

        assert_eq!(lookup_path(&value, "user.name"), Some(&json!("ada")));
        assert_eq!(lookup_path(&value, "user.tags.1"), Some(&json!("b")));
        assert_eq!(lookup_path(&value, ""), Some(&value));
        assert_eq!(lookup_path(&value, "user.missing"), None);
        assert_eq!(lookup_path(&value, "user.tags.x"), None);
        assert_eq!(lookup_path(&value, "user.name.first"), None);
    }

    #[test]
    fn test_render_inline() {
        assert_eq!(render_inline(&json!("plain")), "plain");
        assert_eq!(render_inline(&json!(3)), "3");
        assert_eq!(render_inline(&json!({"x": 1})), "{\"x\":1}");
        assert_eq!(render_inline(&Value::Null), "");
    }

    #[test]
    fn test_parse_config_reports_invalid_config() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Strict {
            ms: u64,
        }

        let mut config = NodeConfig::new();
        config.insert("ms".to_string(), json!("soon"));
        let err = parse_config::<Strict>(&config).unwrap_err();
        assert!(matches!(err, BehaviorError::InvalidConfig(_)));
    }
}
