//! The closed set of intrinsic function names.

use std::str::FromStr;

use serde_json::{Map, Value};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Every intrinsic function the resolver evaluates.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, AsRefStr, IntoStaticStr, Display,
)]
pub enum IntrinsicName {
    #[strum(serialize = "Ref")]
    Ref,
    #[strum(serialize = "Condition")]
    Condition,
    #[strum(serialize = "Fn::GetAtt")]
    GetAtt,
    #[strum(serialize = "Fn::If")]
    If,
    #[strum(serialize = "Fn::And")]
    And,
    #[strum(serialize = "Fn::Or")]
    Or,
    #[strum(serialize = "Fn::Not")]
    Not,
    #[strum(serialize = "Fn::Equals")]
    Equals,
    #[strum(serialize = "Fn::Contains")]
    Contains,
    #[strum(serialize = "Fn::FindInMap")]
    FindInMap,
    #[strum(serialize = "Fn::Sub")]
    Sub,
    #[strum(serialize = "Fn::Join")]
    Join,
    #[strum(serialize = "Fn::Split")]
    Split,
    #[strum(serialize = "Fn::Select")]
    Select,
    #[strum(serialize = "Fn::Base64")]
    Base64,
    #[strum(serialize = "Fn::ImportValue")]
    ImportValue,
    #[strum(serialize = "Fn::ToJsonString")]
    ToJsonString,
    #[strum(serialize = "Fn::GetAZs")]
    GetAzs,
    #[strum(serialize = "Fn::Length")]
    Length,
    #[strum(serialize = "Fn::Cidr")]
    Cidr,
}

/// Classification of a single-key object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntrinsicCall<'a> {
    Known(IntrinsicName, &'a Value),
    /// An `Fn::` key outside the supported set.
    Unsupported(&'a str, &'a Value),
}

/// Recognize `{ "<intrinsic>": args }`.
///
/// `Condition` only counts when its argument is a condition name, so IAM-style
/// `{"Condition": {...}}` blocks stay plain data.
pub fn intrinsic_call(map: &Map<String, Value>) -> Option<IntrinsicCall<'_>> {
    if map.len() != 1 {
        return None;
    }
    let (key, args) = map.iter().next()?;
    match IntrinsicName::from_str(key) {
        Ok(IntrinsicName::Condition) if !args.is_string() => None,
        Ok(name) => Some(IntrinsicCall::Known(name, args)),
        Err(_) if key.starts_with("Fn::") => Some(IntrinsicCall::Unsupported(key, args)),
        Err(_) => None,
    }
}

/// True for a single-key object that the resolver treats as a function call.
pub fn is_intrinsic_node(value: &Value) -> bool {
    value.as_object().and_then(intrinsic_call).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use strum::IntoEnumIterator;

    fn classify(value: &Value) -> Option<IntrinsicCall<'_>> {
        intrinsic_call(value.as_object().unwrap())
    }

    #[test]
    fn test_names_round_trip() {
        for name in IntrinsicName::iter() {
            assert_eq!(IntrinsicName::from_str(name.as_ref()).unwrap(), name);
        }
        assert_eq!(IntrinsicName::iter().count(), 20);
    }

    #[test]
    fn test_known_call() {
        let node = json!({ "Ref": "Env" });
        let expected = json!("Env");
        assert_eq!(
            classify(&node),
            Some(IntrinsicCall::Known(IntrinsicName::Ref, &expected))
        );
    }

    #[test]
    fn test_unsupported_fn_key() {
        let node = json!({ "Fn::Transform": { "Name": "AWS::Include" } });
        assert!(matches!(
            classify(&node),
            Some(IntrinsicCall::Unsupported("Fn::Transform", _))
        ));
    }

    #[test]
    fn test_plain_objects_are_not_calls() {
        assert_eq!(classify(&json!({ "Name": "x" })), None);
        assert_eq!(classify(&json!({ "Ref": "A", "Other": 1 })), None);
        assert_eq!(
            classify(&json!({ "Condition": { "Bool": { "aws:SecureTransport": "false" } } })),
            None
        );
        assert!(is_intrinsic_node(&json!({ "Condition": "IsProd" })));
        assert!(!is_intrinsic_node(&json!("Ref")));
    }
}
