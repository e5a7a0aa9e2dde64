//! The recursive walk that evaluates intrinsic functions anywhere in a tree.

use serde_json::{Map, Value};
use tracing::debug;

use crate::context::ResolvingContext;
use crate::error::ResolveError;
use crate::intrinsics::IntrinsicResolver;
use crate::resources::{ensure_identity, synthesize_identity};
use crate::traits::Resolve;
use crate::types::{
    ARN_KEY, ID_KEY, IntrinsicCall, has_identity_fields, intrinsic_call, is_intrinsic_node,
    is_resource_shaped,
};

/// Walks arrays and objects, dispatching single-key intrinsic objects to their
/// implementation.
///
/// - Scalars come back unchanged.
/// - A child whose intrinsic resolves to `AWS::NoValue` is dropped from its
///   object or array.
/// - Resource-shaped objects without `Id`/`Arn` get an identity before their
///   contents are resolved.
///
/// Errors carry the `/`-separated path of the innermost failing function,
/// ending with the function name.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueResolver {
    intrinsics: IntrinsicResolver,
}

impl ValueResolver {
    pub fn new() -> Self {
        Self::default()
    }

    fn resolve_object(
        &self,
        map: &Map<String, Value>,
        ctx: &mut ResolvingContext<'_>,
    ) -> Result<Value, ResolveError> {
        if let Some(call) = intrinsic_call(map) {
            let (function, intrinsic, args): (&str, _, _) = match call {
                IntrinsicCall::Known(name, args) => (name.into(), self.intrinsics.get(name), args),
                IntrinsicCall::Unsupported(function, args) => {
                    debug!(
                        event = "Intrinsic",
                        phase = "Unsupported",
                        function = function,
                        path = %ctx.path()
                    );
                    (function, self.intrinsics.unsupported(), args)
                }
            };
            ctx.push_path(function);
            let result = intrinsic
                .resolve(args, ctx, self)
                .map_err(|err| err.at(&ctx.path()));
            ctx.pop_path();
            return result;
        }

        let mut resolved = Map::with_capacity(map.len());
        for (key, child) in map {
            let with_identity = self.attach_identity(key, child, ctx)?;
            let child = with_identity.as_ref().unwrap_or(child);

            ctx.push_path(key);
            let value = self.resolve_child(child, ctx);
            ctx.pop_path();

            if let Some(value) = value? {
                resolved.insert(key.clone(), value);
            }
        }
        Ok(Value::Object(resolved))
    }

    fn resolve_array(
        &self,
        items: &[Value],
        ctx: &mut ResolvingContext<'_>,
    ) -> Result<Value, ResolveError> {
        let mut resolved = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            ctx.push_path(&index.to_string());
            let value = self.resolve_child(item, ctx);
            ctx.pop_path();

            if let Some(value) = value? {
                resolved.push(value);
            }
        }
        Ok(Value::Array(resolved))
    }

    /// `None` when an intrinsic child resolved to `AWS::NoValue`.
    fn resolve_child(
        &self,
        child: &Value,
        ctx: &mut ResolvingContext<'_>,
    ) -> Result<Option<Value>, ResolveError> {
        let value = self.resolve(child, ctx)?;
        if is_intrinsic_node(child) && ctx.is_no_value(&value) {
            return Ok(None);
        }
        Ok(Some(value))
    }

    /// A copy of a resource-shaped child with `Id` and `Arn` filled in, or `None`
    /// when the child needs nothing.
    fn attach_identity(
        &self,
        key: &str,
        child: &Value,
        ctx: &mut ResolvingContext<'_>,
    ) -> Result<Option<Value>, ResolveError> {
        let Some(object) = child.as_object() else {
            return Ok(None);
        };
        if !is_resource_shaped(child) || has_identity_fields(object) {
            return Ok(None);
        }

        let identity = if ctx.at_resources_root() && ctx.template().resource(key).is_some() {
            ensure_identity(key, ctx, self)?
        } else {
            synthesize_identity(key, object, ctx, self)?
        };
        let mut object = object.clone();
        object.insert(ID_KEY.to_string(), Value::String(identity.id));
        object.insert(ARN_KEY.to_string(), Value::String(identity.arn));
        Ok(Some(Value::Object(object)))
    }
}

impl Resolve for ValueResolver {
    fn resolve(
        &self,
        value: &Value,
        ctx: &mut ResolvingContext<'_>,
    ) -> Result<Value, ResolveError> {
        match value {
            Value::Object(map) => self.resolve_object(map, ctx),
            Value::Array(items) => self.resolve_array(items, ctx),
            scalar => Ok(scalar.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolverConfig;
    use crate::random::RandomSource;
    use crate::tests::{evaluate, evaluate_with, pseudo_params, template_from};
    use serde_json::json;

    fn template() -> Value {
        json!({
            "Parameters": { "Env": { "Type": "String" } },
            "Conditions": { "IsProd": { "Fn::Equals": [{ "Ref": "Env" }, "prod"] } },
            "Resources": {
                "Bucket": { "Type": "AWS::S3::Bucket", "Properties": { "BucketName": "assets" } }
            }
        })
    }

    #[test]
    fn test_scalars_are_returned_unchanged() {
        for scalar in [json!(null), json!(true), json!(4.5), json!("plain")] {
            assert_eq!(evaluate(template(), scalar.clone()).unwrap(), scalar);
        }
    }

    #[test]
    fn test_no_value_children_are_omitted() {
        let value = evaluate_with(
            template(),
            &[("Env", json!("dev"))],
            json!({
                "Keep": "yes",
                "Drop": { "Fn::If": ["IsProd", "big", { "Ref": "AWS::NoValue" }] },
                "List": ["a", { "Ref": "AWS::NoValue" }, "b"],
                "Literal": "AWS::NoValue"
            }),
        )
        .unwrap();
        assert_eq!(
            value,
            json!({ "Keep": "yes", "List": ["a", "b"], "Literal": "AWS::NoValue" })
        );
    }

    #[test]
    fn test_errors_carry_the_failing_path() {
        let err = evaluate(
            template(),
            json!({ "Outputs": { "Out": { "Value": { "Fn::Join": ["-", [{ "Ref": "Ghost" }]] } } } }),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ResolveError::LookupError(
                "Ref: 'Ghost' is not a parameter or a resource (at Outputs/Out/Value/Fn::Join/0/Ref)".into()
            )
        );
    }

    #[test]
    fn test_nested_resource_shapes_get_identities() {
        let value = evaluate(
            template(),
            json!({
                "Nested": { "Type": "AWS::SNS::Topic", "Properties": { "TopicName": "alerts" } }
            }),
        )
        .unwrap();
        assert_eq!(value["Nested"]["Id"], json!("alerts"));
        assert_eq!(
            value["Nested"]["Arn"],
            json!("arn:aws:sns:us-east-1:123456789012:alerts")
        );
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let template = template_from(template());
        let mut ctx = ResolvingContext::new(
            &template,
            pseudo_params(),
            &ResolverConfig::default(),
            RandomSource::seeded(9),
        )
        .unwrap();
        let resolver = ValueResolver::new();
        let expr = json!({
            "Name": { "Fn::Sub": "${AWS::StackName}-${AWS::Region}" },
            "Ref": { "Ref": "Bucket" },
            "Zones": { "Fn::GetAZs": "" }
        });

        let once = resolver.resolve(&expr, &mut ctx).unwrap();
        let twice = resolver.resolve(&once, &mut ctx).unwrap();
        assert_eq!(once, twice);
        assert_eq!(once["Ref"], json!("assets"));
    }
}
