//! Run-wide settings for template resolution.

use serde::{Deserialize, Serialize};

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_PARTITION: &str = "aws";
pub const DEFAULT_MAX_ID_ATTEMPTS: usize = 10;

/// Settings shared by every parse and resolve performed by a `TemplateEngine`.
///
/// All fields have defaults, so a partial JSON document deserializes cleanly:
///
/// ```rust
/// use cfn_resolver::ResolverConfig;
/// let config: ResolverConfig = serde_json::from_str(r#"{"region": "eu-west-1"}"#).unwrap();
/// assert_eq!(config.region, "eu-west-1");
/// assert_eq!(config.max_id_attempts, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverConfig {
    /// Region used for the `AWS::Region` stub.
    pub region: String,
    /// Partition used for the `AWS::Partition` stub.
    pub partition: String,
    /// Fixed `AWS::AccountId` stub; random 12 digits when unset.
    pub account_id: Option<String>,
    /// Fixed `AWS::StackName` stub; random when unset.
    pub stack_name: Option<String>,
    /// Seed for every random value drawn during a run.
    pub seed: Option<u64>,
    /// How many times a generated identifier is redrawn on collision.
    pub max_id_attempts: usize,
    /// Fail the run when the attempts are exhausted instead of accepting a duplicate.
    pub strict_unique_ids: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            partition: DEFAULT_PARTITION.to_string(),
            account_id: None,
            stack_name: None,
            seed: None,
            max_id_attempts: DEFAULT_MAX_ID_ATTEMPTS,
            strict_unique_ids: false,
        }
    }
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_partition(mut self, partition: impl Into<String>) -> Self {
        self.partition = partition.into();
        self
    }

    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    pub fn with_stack_name(mut self, stack_name: impl Into<String>) -> Self {
        self.stack_name = Some(stack_name.into());
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// A cap of zero is treated as one attempt.
    pub fn with_max_id_attempts(mut self, attempts: usize) -> Self {
        self.max_id_attempts = attempts.max(1);
        self
    }

    pub fn with_strict_unique_ids(mut self, strict: bool) -> Self {
        self.strict_unique_ids = strict;
        self
    }

    /// URL suffix matching the configured partition.
    pub fn url_suffix(&self) -> &'static str {
        match self.partition.as_str() {
            "aws-cn" => "amazonaws.com.cn",
            _ => "amazonaws.com",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[test]
    fn test_default_config() {
        let config = ResolverConfig::default();
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.partition, "aws");
        assert_eq!(config.max_id_attempts, 10);
        assert!(!config.strict_unique_ids);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_methods() {
        let config = ResolverConfig::new()
            .with_region("eu-north-1")
            .with_account_id("111122223333")
            .with_stack_name("teststack")
            .with_seed(42)
            .with_max_id_attempts(0)
            .with_strict_unique_ids(true);
        assert_eq!(config.region, "eu-north-1");
        assert_eq!(config.account_id.as_deref(), Some("111122223333"));
        assert_eq!(config.stack_name.as_deref(), Some("teststack"));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.max_id_attempts, 1);
        assert!(config.strict_unique_ids);
    }

    #[test]
    fn test_deserialize_camel_case() {
        let config: ResolverConfig =
            serde_json::from_str(r#"{"accountId": "123456789012", "strictUniqueIds": true}"#)
                .unwrap();
        assert_eq!(config.account_id.as_deref(), Some("123456789012"));
        assert!(config.strict_unique_ids);
        assert_eq!(config.region, DEFAULT_REGION);
    }

    #[parameterized(
        commercial = { "aws", "amazonaws.com" },
        china = { "aws-cn", "amazonaws.com.cn" },
        govcloud = { "aws-us-gov", "amazonaws.com" },
    )]
    fn test_url_suffix(partition: &str, expected: &str) {
        let config = ResolverConfig::new().with_partition(partition);
        assert_eq!(config.url_suffix(), expected);
    }
}
