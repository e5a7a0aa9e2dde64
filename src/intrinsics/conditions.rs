//! Condition functions and named-condition evaluation.

use serde_json::Value;

use super::{array_args, fixed_args, invalid, kind_of};
use crate::context::ResolvingContext;
use crate::error::ResolveError;
use crate::strings::parse_bool_literal;
use crate::traits::{Intrinsic, Resolve};
use crate::types::IntrinsicName;

/// Deep equality where numbers compare by value, so `1` equals `1.0`.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => {
            a == b || matches!((a.as_f64(), b.as_f64()), (Some(x), Some(y)) if x == y)
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| values_equal(x, y)))
        }
        _ => left == right,
    }
}

/// Evaluate a named condition from the template's `Conditions` section, once.
pub(crate) fn evaluate_condition(
    name: &str,
    ctx: &mut ResolvingContext<'_>,
    resolver: &dyn Resolve,
) -> Result<bool, ResolveError> {
    if let Some(value) = ctx.condition(name) {
        return Ok(value);
    }
    let template = ctx.template();
    let expression = template
        .conditions
        .get(name)
        .ok_or_else(|| ResolveError::LookupError(format!("condition '{name}' is not defined")))?;

    ctx.begin_condition(name)?;
    let result = resolver
        .resolve(expression, ctx)
        .and_then(|value| match value {
            Value::Bool(value) => Ok(value),
            other => Err(ResolveError::ValidationError(format!(
                "condition '{name}' must evaluate to a boolean, got {}",
                kind_of(&other)
            ))),
        });
    ctx.end_condition(name, result.as_ref().ok().copied());
    result
}

/// A boolean operand: a literal, a `"true"`/`"false"` string, a condition name,
/// or anything that resolves to a boolean.
fn operand(
    name: IntrinsicName,
    value: &Value,
    ctx: &mut ResolvingContext<'_>,
    resolver: &dyn Resolve,
) -> Result<bool, ResolveError> {
    match value {
        Value::Bool(flag) => Ok(*flag),
        Value::String(text) => match parse_bool_literal(text) {
            Some(flag) => Ok(flag),
            None if ctx.template().conditions.contains_key(text) => {
                evaluate_condition(text, ctx, resolver)
            }
            None => Err(invalid(
                name,
                format!("'{text}' is neither a boolean nor a condition name"),
            )),
        },
        _ => match resolver.resolve(value, ctx)? {
            Value::Bool(flag) => Ok(flag),
            other => Err(invalid(
                name,
                format!("incorrect type: expected a boolean, got {}", kind_of(&other)),
            )),
        },
    }
}

/// `{"Condition": "Name"}`.
pub struct ConditionRef;

impl Intrinsic for ConditionRef {
    fn resolve(
        &self,
        args: &Value,
        ctx: &mut ResolvingContext<'_>,
        resolver: &dyn Resolve,
    ) -> Result<Value, ResolveError> {
        let name = args.as_str().ok_or_else(|| {
            invalid(
                IntrinsicName::Condition,
                format!("expects a condition name, got {}", kind_of(args)),
            )
        })?;
        evaluate_condition(name, ctx, resolver).map(Value::Bool)
    }
}

/// Resolves only the chosen branch.
pub struct If;

impl Intrinsic for If {
    fn resolve(
        &self,
        args: &Value,
        ctx: &mut ResolvingContext<'_>,
        resolver: &dyn Resolve,
    ) -> Result<Value, ResolveError> {
        let [condition, when_true, when_false] = fixed_args::<3>(IntrinsicName::If, args)?;
        if operand(IntrinsicName::If, condition, ctx, resolver)? {
            resolver.resolve(when_true, ctx)
        } else {
            resolver.resolve(when_false, ctx)
        }
    }
}

/// Stops at the first false operand.
pub struct And;

impl Intrinsic for And {
    fn resolve(
        &self,
        args: &Value,
        ctx: &mut ResolvingContext<'_>,
        resolver: &dyn Resolve,
    ) -> Result<Value, ResolveError> {
        for item in array_args(IntrinsicName::And, args)? {
            if !operand(IntrinsicName::And, item, ctx, resolver)? {
                return Ok(Value::Bool(false));
            }
        }
        Ok(Value::Bool(true))
    }
}

/// Stops at the first true operand.
pub struct Or;

impl Intrinsic for Or {
    fn resolve(
        &self,
        args: &Value,
        ctx: &mut ResolvingContext<'_>,
        resolver: &dyn Resolve,
    ) -> Result<Value, ResolveError> {
        for item in array_args(IntrinsicName::Or, args)? {
            if operand(IntrinsicName::Or, item, ctx, resolver)? {
                return Ok(Value::Bool(true));
            }
        }
        Ok(Value::Bool(false))
    }
}

pub struct Not;

impl Intrinsic for Not {
    fn resolve(
        &self,
        args: &Value,
        ctx: &mut ResolvingContext<'_>,
        resolver: &dyn Resolve,
    ) -> Result<Value, ResolveError> {
        let [value] = fixed_args::<1>(IntrinsicName::Not, args)?;
        operand(IntrinsicName::Not, value, ctx, resolver).map(|flag| Value::Bool(!flag))
    }
}

pub struct Equals;

impl Intrinsic for Equals {
    fn resolve(
        &self,
        args: &Value,
        ctx: &mut ResolvingContext<'_>,
        resolver: &dyn Resolve,
    ) -> Result<Value, ResolveError> {
        let [left, right] = fixed_args::<2>(IntrinsicName::Equals, args)?;
        let left = resolver.resolve(left, ctx)?;
        let right = resolver.resolve(right, ctx)?;
        Ok(Value::Bool(values_equal(&left, &right)))
    }
}

/// True when the resolved list holds a value equal to the resolved needle.
pub struct Contains;

impl Intrinsic for Contains {
    fn resolve(
        &self,
        args: &Value,
        ctx: &mut ResolvingContext<'_>,
        resolver: &dyn Resolve,
    ) -> Result<Value, ResolveError> {
        let [list, needle] = fixed_args::<2>(IntrinsicName::Contains, args)?;
        let items = match resolver.resolve(list, ctx)? {
            Value::Array(items) => items,
            other => {
                return Err(invalid(
                    IntrinsicName::Contains,
                    format!("first element must resolve to an array, got {}", kind_of(&other)),
                ));
            }
        };
        let needle = resolver.resolve(needle, ctx)?;
        Ok(Value::Bool(
            items.iter().any(|item| values_equal(item, &needle)),
        ))
    }
}
