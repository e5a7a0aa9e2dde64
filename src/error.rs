use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ResolveError {
    #[error("failed to parse template: {0}")]
    ParseError(String),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("lookup error: {0}")]
    LookupError(String),

    #[error("parameter error: {0}")]
    ParamError(String),

    #[error("duplicate key in resolution cache: {0}")]
    DuplicateKey(String),

    #[error("identifier error: {0}")]
    IdentifierError(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

impl ResolveError {
    /// Attach a diagnostic location to the message, keeping the variant.
    /// The innermost location wins; messages that already carry one pass through.
    pub(crate) fn at(self, path: &str) -> Self {
        if path.is_empty() {
            return self;
        }
        match self {
            ResolveError::ValidationError(msg) if !has_location(&msg) => {
                ResolveError::ValidationError(format!("{msg} (at {path})"))
            }
            ResolveError::LookupError(msg) if !has_location(&msg) => {
                ResolveError::LookupError(format!("{msg} (at {path})"))
            }
            other => other,
        }
    }
}

fn has_location(msg: &str) -> bool {
    msg.contains(" (at ")
}

impl From<serde_json::Error> for ResolveError {
    fn from(err: serde_json::Error) -> Self {
        ResolveError::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_appends_path_to_validation_errors() {
        let err = ResolveError::ValidationError("Fn::Join expects an array".into())
            .at("Resources/Fn/Fn::Join");
        assert_eq!(
            err.to_string(),
            "validation error: Fn::Join expects an array (at Resources/Fn/Fn::Join)"
        );
    }

    #[test]
    fn test_at_keeps_innermost_location() {
        let err = ResolveError::LookupError("unknown resource 'Queue'".into())
            .at("Outputs/Url/Fn::GetAtt")
            .at("Outputs/Url");
        assert_eq!(
            err.to_string(),
            "lookup error: unknown resource 'Queue' (at Outputs/Url/Fn::GetAtt)"
        );
    }

    #[test]
    fn test_at_leaves_other_variants_alone() {
        let err = ResolveError::DuplicateKey("Env".into()).at("Outputs");
        assert_eq!(err, ResolveError::DuplicateKey("Env".into()));
    }

    #[test]
    fn test_serde_json_error_maps_to_parse_error() {
        let err: ResolveError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, ResolveError::ParseError(_)));
    }
}
