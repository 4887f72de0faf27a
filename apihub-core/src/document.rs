use serde_json::Value;

use crate::error::{CoreError, CoreResult};

/// Serialization format of a definition document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

/// Parse document text into a JSON value, detecting the format from content.
///
/// Strict JSON is tried first so that JSON documents keep their format even
/// though YAML would accept them too. Everything else goes through the YAML
/// parser, deserializing directly into `serde_json::Value` so mapping and
/// sequence semantics carry over.
pub fn parse(text: &str) -> CoreResult<(Value, Format)> {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return Ok((value, Format::Json));
    }

    match serde_yaml::from_str::<Value>(text) {
        Ok(value) => Ok((value, Format::Yaml)),
        Err(err) => {
            if let Some(loc) = err.location() {
                Err(CoreError::parse(format!(
                    "YAML parse error at {}:{}: {}",
                    loc.line(),
                    loc.column(),
                    err
                )))
            } else {
                Err(CoreError::parse(format!("YAML parse error: {}", err)))
            }
        }
    }
}

/// Serialize a JSON value back to text in the given format.
pub fn serialize(value: &Value, format: Format) -> CoreResult<String> {
    match format {
        Format::Json => Ok(serde_json::to_string_pretty(value)?),
        Format::Yaml => Ok(serde_yaml::to_string(value)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_json() {
        let (value, format) = parse(r#"{"openapi": "3.1.0"}"#).unwrap();
        assert_eq!(format, Format::Json);
        assert_eq!(value["openapi"], "3.1.0");
    }

    #[test]
    fn test_parse_yaml() {
        let (value, format) = parse("openapi: 3.1.0\npaths: {}\n").unwrap();
        assert_eq!(format, Format::Yaml);
        assert_eq!(value["openapi"], "3.1.0");
    }

    #[test]
    fn test_parse_yaml_numeric_keys_become_strings() {
        let (value, _) = parse("responses:\n  200:\n    description: ok\n").unwrap();
        assert_eq!(value["responses"]["200"]["description"], "ok");
    }

    #[test]
    fn test_parse_invalid_reports_location() {
        let err = parse("a: [1, 2\nb: 2").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("YAML parse error"));
    }

    #[test]
    fn test_serialize_roundtrip_json() {
        let value = json!({"a": 1, "b": [2, 3]});
        let text = serialize(&value, Format::Json).unwrap();
        assert_eq!(serde_json::from_str::<Value>(&text).unwrap(), value);
    }

    #[test]
    fn test_serialize_yaml() {
        let value = json!({"info": {"title": "Pets"}});
        let text = serialize(&value, Format::Yaml).unwrap();
        assert!(text.contains("title: Pets"));
    }
}
