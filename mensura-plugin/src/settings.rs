//! Host settings - a string-keyed JSON map with typed getters

use mensura_core::{MensuraError, Result};
use serde_json::{Map, Value};

/// Key/value settings handed to plugins by the host
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    values: Map<String, Value>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object, e.g. the contents of a settings file
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| MensuraError::Config(format!("settings are not valid JSON: {}", e)))?;

        match value {
            Value::Object(values) => Ok(Self { values }),
            other => Err(MensuraError::Config(format!(
                "settings must be a JSON object, found {}",
                type_name(&other)
            ))),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// Set `key` only if the host has not configured it
    pub fn set_default(&mut self, key: &str, value: impl Into<Value>) {
        self.values.entry(key.to_string()).or_insert_with(|| value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// String setting; any other JSON type is a configuration error
    pub fn get_str(&self, key: &str) -> Result<Option<&str>> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(wrong_type(key, "a string", other)),
        }
    }

    /// Non-negative integer setting; numeric strings are accepted
    pub fn get_u32(&self, key: &str) -> Result<Option<u32>> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| wrong_type(key, "a non-negative integer", &Value::Number(n.clone()))),
            Some(Value::String(s)) => s
                .trim()
                .parse::<u32>()
                .map(Some)
                .map_err(|_| wrong_type(key, "a non-negative integer", &Value::String(s.clone()))),
            Some(other) => Err(wrong_type(key, "a non-negative integer", other)),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

fn wrong_type(key: &str, expected: &str, found: &Value) -> MensuraError {
    MensuraError::Config(format!("{} must be {}, found {}", key, expected, found))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_str() {
        let settings = Settings::from_json_str(r#"{"UNIT_SYSTEM": "US", "UNIT_PRECISION": 3}"#).unwrap();
        assert_eq!(settings.get_str("UNIT_SYSTEM").unwrap(), Some("US"));
        assert_eq!(settings.get_u32("UNIT_PRECISION").unwrap(), Some(3));
        assert_eq!(settings.get_str("MISSING").unwrap(), None);
    }

    #[test]
    fn test_rejects_non_objects() {
        let err = Settings::from_json_str("[1, 2]").unwrap_err();
        assert_eq!(err.code(), mensura_core::codes::CONFIG_ERROR);
        assert!(Settings::from_json_str("{").is_err());
    }

    #[test]
    fn test_typed_getters() {
        let settings = Settings::new()
            .with("A", "4")
            .with("B", -1)
            .with("C", true)
            .with("D", 2.5);

        assert_eq!(settings.get_u32("A").unwrap(), Some(4));
        assert!(settings.get_u32("B").is_err());
        assert!(settings.get_str("C").is_err());
        assert!(settings.get_u32("D").is_err());
    }

    #[test]
    fn test_set_default() {
        let mut settings = Settings::new().with("UNIT_SYSTEM", "cgs");
        settings.set_default("UNIT_SYSTEM", "SI");
        settings.set_default("UNIT_PRECISION", 2);

        assert_eq!(settings.get_str("UNIT_SYSTEM").unwrap(), Some("cgs"));
        assert_eq!(settings.get_u32("UNIT_PRECISION").unwrap(), Some(2));
        assert!(settings.contains("UNIT_PRECISION"));
    }
}
