//! Fixtures shared by the unit tests.


use std::cell::RefCell;

use serde_json::{Value, json};

use crate::config::ResolverConfig;
use crate::context::ResolvingContext;
use crate::error::ResolveError;
use crate::random::RandomSource;
use crate::resolver::ValueResolver;
use crate::traits::Resolve;
use crate::types::{ParamMap, Template};

pub(crate) const TEST_STACK_ID: &str =
    "arn:aws:cloudformation:us-east-1:123456789012:stack/teststack/6a1f3c2e-9b4d-4e8f-a7c1-0d2b5e6f7a8b";

/// The pseudo-parameters of a `teststack` deployment in `us-east-1`.
pub(crate) fn pseudo_params() -> ParamMap {
    ParamMap::from([
        ("AWS::AccountId".to_string(), json!("123456789012")),
        ("AWS::Region".to_string(), json!("us-east-1")),
        ("AWS::Partition".to_string(), json!("aws")),
        ("AWS::StackName".to_string(), json!("teststack")),
        ("AWS::StackId".to_string(), json!(TEST_STACK_ID)),
        ("AWS::NotificationARNs".to_string(), json!([])),
        ("AWS::NoValue".to_string(), json!("AWS::NoValue")),
        ("AWS::URLSuffix".to_string(), json!("amazonaws.com")),
    ])
}

pub(crate) fn template_from(value: Value) -> Template {
    serde_json::from_value(value).unwrap()
}

/// Resolve `expr` against `template` with the pseudo-parameters plus `params`.
pub(crate) fn evaluate_with(
    template: Value,
    params: &[(&str, Value)],
    expr: Value,
) -> Result<Value, ResolveError> {
    let template = template_from(template);
    let mut merged = pseudo_params();
    for (key, value) in params {
        merged.insert(key.to_string(), value.clone());
    }
    let mut ctx = ResolvingContext::new(
        &template,
        merged,
        &ResolverConfig::default(),
        RandomSource::seeded(7),
    )?;
    ValueResolver::new().resolve(&expr, &mut ctx)
}

pub(crate) fn evaluate(template: Value, expr: Value) -> Result<Value, ResolveError> {
    evaluate_with(template, &[], expr)
}

/// Delegates to [`ValueResolver`] and remembers every fragment it was asked to resolve.
#[derive(Debug, Default)]
pub(crate) struct RecordingResolver {
    seen: RefCell<Vec<Value>>,
}

impl RecordingResolver {
    pub(crate) fn seen(&self) -> Vec<Value> {
        self.seen.borrow().clone()
    }
}

impl Resolve for RecordingResolver {
    fn resolve(
        &self,
        value: &Value,
        ctx: &mut ResolvingContext<'_>,
    ) -> Result<Value, ResolveError> {
        self.seen.borrow_mut().push(value.clone());
        ValueResolver::new().resolve(value, ctx)
    }
}
