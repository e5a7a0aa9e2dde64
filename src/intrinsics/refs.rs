//! `Ref`, `Fn::GetAtt`, `Fn::ImportValue` and `Fn::GetAZs`.

use serde_json::Value;
use tracing::debug;

use super::{fixed_args, invalid, kind_of, resolve_string};
use crate::context::ResolvingContext;
use crate::error::ResolveError;
use crate::resources::{ResourceIntrinsicResolver, ensure_identity};
use crate::strings::is_blank;
use crate::traits::{Intrinsic, Resolve};
use crate::types::IntrinsicName;

/// Parameter value, or the resource's `Ref` answer, cached under the logical id.
pub struct Ref;

impl Intrinsic for Ref {
    fn resolve(
        &self,
        args: &Value,
        ctx: &mut ResolvingContext<'_>,
        resolver: &dyn Resolve,
    ) -> Result<Value, ResolveError> {
        let key = resolve_string(IntrinsicName::Ref, args, "argument", ctx, resolver)?;
        if let Some(value) = ctx.lookup(&key) {
            return Ok(value.clone());
        }

        let template = ctx.template();
        let resource = template.resource(&key).ok_or_else(|| {
            ResolveError::LookupError(format!("Ref: '{key}' is not a parameter or a resource"))
        })?;
        let identity = ensure_identity(&key, ctx, resolver)?;
        let value = ResourceIntrinsicResolver
            .get(&resource.resource_type)
            .ref_value(&key, &identity.id, &identity.arn, ctx)?;
        ctx.add_dynamic(key, value.clone())?;
        Ok(value)
    }
}

/// Resource attribute, cached under `logicalId:attribute`.
pub struct GetAtt;

impl Intrinsic for GetAtt {
    fn resolve(
        &self,
        args: &Value,
        ctx: &mut ResolvingContext<'_>,
        resolver: &dyn Resolve,
    ) -> Result<Value, ResolveError> {
        let name = IntrinsicName::GetAtt;
        let (logical_id, attribute) = match args {
            Value::String(dotted) => {
                let (logical_id, attribute) = dotted
                    .split_once('.')
                    .ok_or_else(|| invalid(name, format!("expects 'Resource.Attribute', got '{dotted}'")))?;
                (logical_id.to_string(), attribute.to_string())
            }
            _ => {
                let [logical_id, attribute] = fixed_args::<2>(name, args)?;
                (
                    resolve_string(name, logical_id, "resource name", ctx, resolver)?,
                    resolve_string(name, attribute, "attribute name", ctx, resolver)?,
                )
            }
        };

        let key = format!("{logical_id}:{attribute}");
        if let Some(value) = ctx.lookup(&key) {
            return Ok(value.clone());
        }

        let template = ctx.template();
        let resource = template.resource(&logical_id).ok_or_else(|| {
            ResolveError::LookupError(format!("Fn::GetAtt: unknown resource '{logical_id}'"))
        })?;
        let identity = ensure_identity(&logical_id, ctx, resolver)?;
        let value = ResourceIntrinsicResolver.get(&resource.resource_type).get_att(
            &logical_id,
            &attribute,
            &identity.id,
            &identity.arn,
            ctx,
        )?;
        ctx.add_dynamic(key, value.clone())?;
        Ok(value)
    }
}

/// The export name itself; there is no other stack to import from.
pub struct ImportValue;

impl Intrinsic for ImportValue {
    fn resolve(
        &self,
        args: &Value,
        ctx: &mut ResolvingContext<'_>,
        resolver: &dyn Resolve,
    ) -> Result<Value, ResolveError> {
        match args {
            Value::String(name) => Ok(Value::String(name.clone())),
            _ => resolve_string(IntrinsicName::ImportValue, args, "export name", ctx, resolver)
                .map(Value::String),
        }
    }
}

/// Two synthetic zones in the requested region, or the run's region when blank.
pub struct GetAzs;

impl Intrinsic for GetAzs {
    fn resolve(
        &self,
        args: &Value,
        ctx: &mut ResolvingContext<'_>,
        resolver: &dyn Resolve,
    ) -> Result<Value, ResolveError> {
        let region = match resolver.resolve(args, ctx)? {
            Value::String(region) if !is_blank(&region) => region,
            Value::String(_) | Value::Null => ctx.region().to_string(),
            other => {
                debug!(
                    event = "Intrinsic",
                    phase = "GetAZs",
                    argument = kind_of(&other)
                );
                ctx.region().to_string()
            }
        };
        Ok(Value::Array(vec![
            Value::String(format!("{region}a")),
            Value::String(format!("{region}b")),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ResolveError;
    use crate::tests::{evaluate, evaluate_with};
    use serde_json::json;

    fn queue_template() -> serde_json::Value {
        json!({
            "Parameters": { "Env": { "Type": "String" } },
            "Resources": {
                "Queue": { "Type": "AWS::SQS::Queue", "Properties": { "QueueName": "jobs" } },
                "Fn": { "Type": "AWS::Lambda::Function", "Properties": {} }
            }
        })
    }

    #[test]
    fn test_ref_parameter_and_pseudo_parameter() {
        let value = evaluate_with(
            queue_template(),
            &[("Env", json!("prod"))],
            json!([{ "Ref": "Env" }, { "Ref": "AWS::Region" }]),
        )
        .unwrap();
        assert_eq!(value, json!(["prod", "us-east-1"]));
    }

    #[test]
    fn test_ref_resource_uses_type_answer() {
        let value = evaluate(queue_template(), json!({ "Ref": "Queue" })).unwrap();
        assert_eq!(
            value,
            json!("https://sqs.us-east-1.amazonaws.com/123456789012/jobs")
        );
    }

    #[test]
    fn test_ref_is_cached() {
        let value = evaluate(queue_template(), json!([{ "Ref": "Fn" }, { "Ref": "Fn" }])).unwrap();
        assert_eq!(value[0], value[1]);
        assert!(value[0].as_str().unwrap().starts_with("teststack-Fn-"));
    }

    #[test]
    fn test_ref_errors() {
        let err = evaluate(queue_template(), json!({ "Ref": "Nope" })).unwrap_err();
        assert!(matches!(err, ResolveError::LookupError(msg) if msg.contains("'Nope'")));

        let err = evaluate(queue_template(), json!({ "Ref": ["Queue"] })).unwrap_err();
        assert!(matches!(err, ResolveError::ValidationError(_)));
    }

    #[test]
    fn test_get_att_forms() {
        let value = evaluate(
            queue_template(),
            json!([
                { "Fn::GetAtt": ["Queue", "Arn"] },
                { "Fn::GetAtt": "Queue.Arn" },
                { "Fn::GetAtt": ["Fn", "Arn"] }
            ]),
        )
        .unwrap();
        assert_eq!(value[0], json!("arn:aws:sqs:us-east-1:123456789012:jobs"));
        assert_eq!(value[0], value[1]);
        assert!(value[2].as_str().unwrap().starts_with("arn:aws:lambda:us-east-1:123456789012:function:teststack-Fn-"));
    }

    #[test]
    fn test_get_att_errors() {
        let err = evaluate(queue_template(), json!({ "Fn::GetAtt": ["Queue"] })).unwrap_err();
        assert!(matches!(err, ResolveError::ValidationError(msg) if msg.contains("expects 2 elements")));

        let err = evaluate(queue_template(), json!({ "Fn::GetAtt": ["Ghost", "Arn"] })).unwrap_err();
        assert!(matches!(err, ResolveError::LookupError(msg) if msg.contains("'Ghost'")));

        let err = evaluate(queue_template(), json!({ "Fn::GetAtt": ["Queue", 3] })).unwrap_err();
        assert!(matches!(err, ResolveError::ValidationError(_)));
    }

    #[test]
    fn test_import_value() {
        let value = evaluate_with(
            queue_template(),
            &[("Env", json!("prod"))],
            json!([
                { "Fn::ImportValue": "shared-vpc" },
                { "Fn::ImportValue": { "Fn::Sub": "${Env}-vpc" } }
            ]),
        )
        .unwrap();
        assert_eq!(value, json!(["shared-vpc", "prod-vpc"]));
    }

    #[test]
    fn test_get_azs() {
        let value = evaluate(
            queue_template(),
            json!([{ "Fn::GetAZs": "" }, { "Fn::GetAZs": "eu-west-1" }, { "Fn::GetAZs": { "Ref": "AWS::Region" } }]),
        )
        .unwrap();
        assert_eq!(
            value,
            json!([
                ["us-east-1a", "us-east-1b"],
                ["eu-west-1a", "eu-west-1b"],
                ["us-east-1a", "us-east-1b"]
            ])
        );
    }
}
