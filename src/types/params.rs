//! Parameter types: declarations after analysis, user input, and the merged map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// Flat key to concrete value map handed to the resolving context.
pub type ParamMap = BTreeMap<String, Value>;

/// The fixed pseudo-parameters every template can reference without declaring them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, AsRefStr, Display)]
pub enum PseudoParam {
    #[strum(serialize = "AWS::AccountId")]
    AccountId,
    #[strum(serialize = "AWS::Region")]
    Region,
    #[strum(serialize = "AWS::Partition")]
    Partition,
    #[strum(serialize = "AWS::StackName")]
    StackName,
    #[strum(serialize = "AWS::StackId")]
    StackId,
    #[strum(serialize = "AWS::NotificationARNs")]
    NotificationArns,
    #[strum(serialize = "AWS::NoValue")]
    NoValue,
    #[strum(serialize = "AWS::URLSuffix")]
    UrlSuffix,
}

/// Where a parameter comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum ParamKind {
    Pseudo,
    Declared,
}

/// A parameter as seen after analysing the template, ready for review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TemplateParam {
    pub key: String,
    pub param_type: String,
    pub kind: ParamKind,
    /// Declared default, or the first allowed value.
    #[schema(value_type = Option<Object>)]
    pub value: Option<Value>,
    pub is_required: bool,
    /// Stand-in used when neither the user nor the template supplies a value.
    #[schema(value_type = Object)]
    pub stub: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[schema(value_type = Vec<Object>)]
    pub allowed_values: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_pattern: Option<String>,
}

impl TemplateParam {
    /// `CommaDelimitedList`, `List<…>` and SSM parameters wrapping either.
    pub fn is_list_type(&self) -> bool {
        is_list_type(&self.param_type)
    }
}

pub(crate) fn is_list_type(param_type: &str) -> bool {
    param_type.contains("CommaDelimitedList") || param_type.contains("List<")
}

/// A user-supplied `{paramKey, paramValue}` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserParam {
    pub param_key: String,
    #[schema(value_type = Object)]
    pub param_value: Value,
}

impl UserParam {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            param_key: key.into(),
            param_value: value.into(),
        }
    }
}

/// Where each merged value came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParamStats {
    pub from_user: Vec<String>,
    pub from_default: Vec<String>,
    pub from_stub: Vec<String>,
    pub missing: Vec<String>,
    /// User keys the template never declared.
    pub extensions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;
    use yare::parameterized;

    #[test]
    fn test_pseudo_params_are_eight() {
        let names: Vec<String> = PseudoParam::iter().map(|p| p.to_string()).collect();
        assert_eq!(names.len(), 8);
        assert!(names.iter().all(|n| n.starts_with("AWS::")));
    }

    #[test]
    fn test_pseudo_param_from_str() {
        assert_eq!(PseudoParam::from_str("AWS::URLSuffix").unwrap(), PseudoParam::UrlSuffix);
        assert_eq!(
            PseudoParam::from_str("AWS::NotificationARNs").unwrap(),
            PseudoParam::NotificationArns
        );
        assert!(PseudoParam::from_str("AWS::Nope").is_err());
    }

    #[parameterized(
        string = { "String", false },
        comma = { "CommaDelimitedList", true },
        numbers = { "List<Number>", true },
        subnets = { "List<AWS::EC2::Subnet::Id>", true },
        ssm_list = { "AWS::SSM::Parameter::Value<List<String>>", true },
        ssm_string = { "AWS::SSM::Parameter::Value<String>", false },
    )]
    fn test_is_list_type(param_type: &str, expected: bool) {
        assert_eq!(is_list_type(param_type), expected);
    }

    #[test]
    fn test_user_param_serialization() {
        let param = UserParam::new("Env", "prod");
        let value = serde_json::to_value(&param).unwrap();
        assert_eq!(value, serde_json::json!({ "paramKey": "Env", "paramValue": "prod" }));
    }
}
