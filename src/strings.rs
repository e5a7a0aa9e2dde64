//! Small string helpers shared by the analyzer, the intrinsics and the resource catalog.

use itertools::Itertools;
use serde_json::Value;

/// True for empty or whitespace-only text.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Case-insensitive `"true"` / `"false"`.
pub fn parse_bool_literal(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Replace every `{name}` in `pattern` with its value. Unknown placeholders are kept.
pub fn interpolate(pattern: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(pattern.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{name}}}"), value)
    })
}

/// Cut `text` to at most `max` characters.
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// CloudFormation-style physical name: `{stack}-{logical}-{suffix}`, shortened so the
/// whole name fits in `max_len` while the random suffix stays intact.
pub fn physical_name(stack: &str, logical_id: &str, suffix: &str, max_len: usize, lowercase: bool) -> String {
    let room = max_len.saturating_sub(suffix.chars().count() + 1);
    let prefix = truncate_chars(&format!("{stack}-{logical_id}"), room);
    let name = if prefix.is_empty() {
        truncate_chars(suffix, max_len)
    } else {
        format!("{prefix}-{suffix}")
    };
    if lowercase { name.to_lowercase() } else { name }
}

/// Split `AWS::Service::Resource` into lowercase (`service`, `resource`) parts.
///
/// `Custom::Thing` and other short names are treated as CloudFormation custom resources.
pub fn type_segments(type_name: &str) -> (String, String) {
    let parts: Vec<&str> = type_name.split("::").filter(|p| !p.is_empty()).collect();
    match parts.as_slice() {
        [_, service, rest @ ..] if !rest.is_empty() => (
            service.to_lowercase(),
            rest.iter().map(|p| p.to_lowercase()).join("-"),
        ),
        _ => (
            "cloudformation".to_string(),
            parts.iter().map(|p| p.to_lowercase()).join("-"),
        ),
    }
}

/// Text form of a resolved value when it is spliced into a string.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) if items.iter().all(|v| !v.is_object() && !v.is_array()) => {
            items.iter().map(stringify).join(",")
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use yare::parameterized;

    #[parameterized(
        empty = { "", true },
        spaces = { "  \t\n", true },
        text = { " x ", false },
    )]
    fn test_is_blank(text: &str, expected: bool) {
        assert_eq!(is_blank(text), expected);
    }

    #[parameterized(
        lower_true = { "true", Some(true) },
        upper_true = { "TRUE", Some(true) },
        mixed_false = { "False", Some(false) },
        other = { "yes", None },
    )]
    fn test_parse_bool_literal(text: &str, expected: Option<bool>) {
        assert_eq!(parse_bool_literal(text), expected);
    }

    #[test]
    fn test_interpolate() {
        let out = interpolate(
            "arn:{partition}:s3:::{id}/{unknown}",
            &[("partition", "aws"), ("id", "bucket")],
        );
        assert_eq!(out, "arn:aws:s3:::bucket/{unknown}");
    }

    #[test]
    fn test_physical_name_fits_max_len() {
        let name = physical_name("a-very-long-stack-name", "SomeLogicalId", "ABCDEF123456", 20, false);
        assert_eq!(name.len(), 20);
        assert!(name.ends_with("-ABCDEF123456"));

        let lower = physical_name("Stack", "Bucket", "XYZ", 63, true);
        assert_eq!(lower, "stack-bucket-xyz");
    }

    #[parameterized(
        aws = { "AWS::Lambda::Function", "lambda", "function" },
        nested = { "AWS::EC2::VPC::Endpoint", "ec2", "vpc-endpoint" },
        custom = { "Custom::Thing", "cloudformation", "custom-thing" },
    )]
    fn test_type_segments(type_name: &str, service: &str, resource: &str) {
        assert_eq!(type_segments(type_name), (service.to_string(), resource.to_string()));
    }

    #[test]
    fn test_stringify() {
        assert_eq!(stringify(&json!("x")), "x");
        assert_eq!(stringify(&json!(3)), "3");
        assert_eq!(stringify(&json!(["a", "b"])), "a,b");
        assert_eq!(stringify(&json!({"a": 1})), r#"{"a":1}"#);
    }
}
