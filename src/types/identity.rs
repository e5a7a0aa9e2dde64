//! Synthesized identity of a resource.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The physical identifier and ARN assigned to a resource during a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceIdentity {
    pub id: String,
    pub arn: String,
}

impl ResourceIdentity {
    pub fn new(id: impl Into<String>, arn: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            arn: arn.into(),
        }
    }
}
