//! String-producing functions: `Fn::Sub`, `Fn::Join`, `Fn::Split`,
//! `Fn::Base64` and `Fn::ToJsonString`.

use base64::prelude::*;
use serde_json::{Map, Value};

use super::{fixed_args, invalid, kind_of, resolve_string};
use crate::context::ResolvingContext;
use crate::error::ResolveError;
use crate::strings::stringify;
use crate::traits::{Intrinsic, Resolve};
use crate::types::IntrinsicName;

/// `${Name}` substitution.
///
/// Names come from the variable map, then from parameters and cached
/// `Ref`/`Fn::GetAtt` answers; `${Res.Attr}` reads the cached attribute.
/// `${!Name}` is emitted as the literal `${Name}`.
pub struct Sub;

impl Intrinsic for Sub {
    fn resolve(
        &self,
        args: &Value,
        ctx: &mut ResolvingContext<'_>,
        resolver: &dyn Resolve,
    ) -> Result<Value, ResolveError> {
        let name = IntrinsicName::Sub;
        let (template, variables) = match args {
            Value::String(template) => (template.clone(), Map::new()),
            Value::Array(_) => {
                let [template, variables] = fixed_args::<2>(name, args)?;
                let template = resolve_string(name, template, "template", ctx, resolver)?;
                let variables = variables.as_object().ok_or_else(|| {
                    invalid(
                        name,
                        format!("variables must be an object, got {}", kind_of(variables)),
                    )
                })?;
                let mut resolved = Map::new();
                for (key, expression) in variables {
                    resolved.insert(key.clone(), resolver.resolve(expression, ctx)?);
                }
                (template, resolved)
            }
            other => {
                return Err(invalid(
                    name,
                    format!("expects a string or an array, got {}", kind_of(other)),
                ));
            }
        };
        substitute(&template, &variables, ctx).map(Value::String)
    }
}

fn substitute(
    template: &str,
    variables: &Map<String, Value>,
    ctx: &ResolvingContext<'_>,
) -> Result<String, ResolveError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return Ok(out);
        };
        let placeholder = &after[..end];
        match placeholder.strip_prefix('!') {
            Some(literal) => {
                out.push_str("${");
                out.push_str(literal);
                out.push('}');
            }
            None => out.push_str(&stringify(variable(placeholder.trim(), variables, ctx)?)),
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

fn variable<'a>(
    name: &str,
    variables: &'a Map<String, Value>,
    ctx: &'a ResolvingContext<'_>,
) -> Result<&'a Value, ResolveError> {
    variables
        .get(name)
        .or_else(|| ctx.lookup(name))
        .or_else(|| {
            let (logical_id, attribute) = name.split_once('.')?;
            ctx.lookup(&format!("{logical_id}:{attribute}"))
        })
        .ok_or_else(|| {
            ResolveError::LookupError(format!(
                "Fn::Sub: '{name}' is not a variable, a parameter or a resolved reference"
            ))
        })
}

pub struct Join;

impl Intrinsic for Join {
    fn resolve(
        &self,
        args: &Value,
        ctx: &mut ResolvingContext<'_>,
        resolver: &dyn Resolve,
    ) -> Result<Value, ResolveError> {
        let name = IntrinsicName::Join;
        let [delimiter, list] = fixed_args::<2>(name, args)?;
        let delimiter = resolve_string(name, delimiter, "delimiter", ctx, resolver)?;
        let items = match resolver.resolve(list, ctx)? {
            Value::Array(items) => items,
            other => {
                return Err(invalid(
                    name,
                    format!("list must resolve to an array, got {}", kind_of(&other)),
                ));
            }
        };
        let parts = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::String(part) => Ok(part),
                other => Err(invalid(
                    name,
                    format!("element {index} must be a string, got {}", kind_of(&other)),
                )),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::String(parts.join(&delimiter)))
    }
}

/// An empty delimiter yields the whole source as the single element.
pub struct Split;

impl Intrinsic for Split {
    fn resolve(
        &self,
        args: &Value,
        ctx: &mut ResolvingContext<'_>,
        resolver: &dyn Resolve,
    ) -> Result<Value, ResolveError> {
        let name = IntrinsicName::Split;
        let [delimiter, source] = fixed_args::<2>(name, args)?;
        let delimiter = resolve_string(name, delimiter, "delimiter", ctx, resolver)?;
        let source = resolve_string(name, source, "source", ctx, resolver)?;
        let parts = if delimiter.is_empty() {
            vec![Value::String(source)]
        } else {
            source
                .split(delimiter.as_str())
                .map(|part| Value::String(part.to_string()))
                .collect()
        };
        Ok(Value::Array(parts))
    }
}

pub struct Base64;

impl Intrinsic for Base64 {
    fn resolve(
        &self,
        args: &Value,
        ctx: &mut ResolvingContext<'_>,
        resolver: &dyn Resolve,
    ) -> Result<Value, ResolveError> {
        let text = resolve_string(IntrinsicName::Base64, args, "argument", ctx, resolver)?;
        Ok(Value::String(BASE64_STANDARD.encode(text)))
    }
}

/// Compact JSON text of an object or array. Strings pass through.
pub struct ToJsonString;

impl Intrinsic for ToJsonString {
    fn resolve(
        &self,
        args: &Value,
        ctx: &mut ResolvingContext<'_>,
        resolver: &dyn Resolve,
    ) -> Result<Value, ResolveError> {
        match resolver.resolve(args, ctx)? {
            Value::String(text) => Ok(Value::String(text)),
            value @ (Value::Object(_) | Value::Array(_)) => Ok(Value::String(value.to_string())),
            other => Err(invalid(
                IntrinsicName::ToJsonString,
                format!("expects an object or an array, got {}", kind_of(&other)),
            )),
        }
    }
}
