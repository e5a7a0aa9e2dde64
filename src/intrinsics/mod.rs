//! Intrinsic function implementations and their dispatch.
//!
//! Every function receives its raw argument node and evaluates the parts it
//! needs through the resolver it is handed, so lazily evaluated arguments
//! (the untaken `Fn::If` branch, short-circuited `Fn::And`/`Fn::Or` operands)
//! are never resolved.

mod collections;
mod conditions;
mod refs;
mod text;

use serde_json::Value;

use crate::context::ResolvingContext;
use crate::error::ResolveError;
use crate::traits::{Intrinsic, Resolve};
use crate::types::IntrinsicName;

pub use conditions::values_equal;

/// What unsupported `Fn::*` functions resolve to.
pub const UNRESOLVED: &str = "UNRESOLVED";

/// Maps intrinsic names to their implementations.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntrinsicResolver;

impl IntrinsicResolver {
    pub fn get(&self, name: IntrinsicName) -> &'static dyn Intrinsic {
        match name {
            IntrinsicName::Ref => &refs::Ref,
            IntrinsicName::GetAtt => &refs::GetAtt,
            IntrinsicName::ImportValue => &refs::ImportValue,
            IntrinsicName::GetAzs => &refs::GetAzs,
            IntrinsicName::Condition => &conditions::ConditionRef,
            IntrinsicName::If => &conditions::If,
            IntrinsicName::And => &conditions::And,
            IntrinsicName::Or => &conditions::Or,
            IntrinsicName::Not => &conditions::Not,
            IntrinsicName::Equals => &conditions::Equals,
            IntrinsicName::Contains => &conditions::Contains,
            IntrinsicName::Sub => &text::Sub,
            IntrinsicName::Join => &text::Join,
            IntrinsicName::Split => &text::Split,
            IntrinsicName::Base64 => &text::Base64,
            IntrinsicName::ToJsonString => &text::ToJsonString,
            IntrinsicName::FindInMap => &collections::FindInMap,
            IntrinsicName::Select => &collections::Select,
            IntrinsicName::Length => &collections::Length,
            IntrinsicName::Cidr => &collections::Cidr,
        }
    }

    /// Shared implementation for `Fn::*` names outside the supported set.
    pub fn unsupported(&self) -> &'static dyn Intrinsic {
        &Unsupported
    }
}

/// Resolves to [`UNRESOLVED`] without looking at its arguments.
#[derive(Debug, Clone, Copy)]
pub struct Unsupported;

impl Intrinsic for Unsupported {
    fn resolve(
        &self,
        _args: &Value,
        _ctx: &mut ResolvingContext<'_>,
        _resolver: &dyn Resolve,
    ) -> Result<Value, ResolveError> {
        Ok(Value::String(UNRESOLVED.to_string()))
    }
}

pub(crate) fn invalid(name: IntrinsicName, message: impl AsRef<str>) -> ResolveError {
    ResolveError::ValidationError(format!("{name}: {}", message.as_ref()))
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub(crate) fn array_args(name: IntrinsicName, args: &Value) -> Result<&[Value], ResolveError> {
    args.as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| invalid(name, format!("expects an array, got {}", kind_of(args))))
}

pub(crate) fn fixed_args<const N: usize>(
    name: IntrinsicName,
    args: &Value,
) -> Result<&[Value; N], ResolveError> {
    let items = array_args(name, args)?;
    <&[Value; N]>::try_from(items)
        .map_err(|_| invalid(name, format!("expects {N} elements, got {}", items.len())))
}

pub(crate) fn resolve_string(
    name: IntrinsicName,
    value: &Value,
    role: &str,
    ctx: &mut ResolvingContext<'_>,
    resolver: &dyn Resolve,
) -> Result<String, ResolveError> {
    match resolver.resolve(value, ctx)? {
        Value::String(text) => Ok(text),
        other => Err(invalid(
            name,
            format!("{role} must resolve to a string, got {}", kind_of(&other)),
        )),
    }
}

/// An integer, or a string holding one.
pub(crate) fn resolve_integer(
    name: IntrinsicName,
    value: &Value,
    role: &str,
    ctx: &mut ResolvingContext<'_>,
    resolver: &dyn Resolve,
) -> Result<i64, ResolveError> {
    let resolved = resolver.resolve(value, ctx)?;
    let parsed = match &resolved {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        invalid(
            name,
            format!("{role} must be an integer, got {}", kind_of(&resolved)),
        )
    })
}
