use serde_json::Value;

use super::{IdStyle, generate_id};
use crate::context::ResolvingContext;
use crate::error::ResolveError;
use crate::strings::type_segments;
use crate::traits::ResourceSynthesizer;

const GENERIC_ID_STYLE: IdStyle = IdStyle::Stack {
    max_len: 64,
    lowercase: false,
};

/// Fallback for types outside the catalogue, including `Custom::*` resources.
/// Every operation succeeds with a plausible value.
#[derive(Debug, Clone)]
pub struct GenericSynthesizer {
    service: String,
    resource: String,
}

impl GenericSynthesizer {
    pub fn new(type_name: &str) -> Self {
        let (service, resource) = type_segments(type_name);
        Self { service, resource }
    }
}

impl ResourceSynthesizer for GenericSynthesizer {
    fn name_property(&self) -> Option<&'static str> {
        Some("Name")
    }

    fn identifier(
        &self,
        logical_id: &str,
        name: Option<&str>,
        ctx: &mut ResolvingContext<'_>,
    ) -> Result<String, ResolveError> {
        match name {
            Some(name) => {
                ctx.register_id(name);
                Ok(name.to_string())
            }
            None => generate_id(GENERIC_ID_STYLE, logical_id, ctx),
        }
    }

    fn arn(
        &self,
        _logical_id: &str,
        id: &str,
        ctx: &mut ResolvingContext<'_>,
    ) -> Result<String, ResolveError> {
        Ok(format!(
            "arn:{}:{}:{}:{}:{}/{id}",
            ctx.partition(),
            self.service,
            ctx.region(),
            ctx.account_id(),
            self.resource
        ))
    }

    fn ref_value(
        &self,
        _logical_id: &str,
        id: &str,
        _arn: &str,
        _ctx: &mut ResolvingContext<'_>,
    ) -> Result<Value, ResolveError> {
        Ok(Value::String(id.to_string()))
    }

    fn get_att(
        &self,
        _logical_id: &str,
        attribute: &str,
        id: &str,
        arn: &str,
        _ctx: &mut ResolvingContext<'_>,
    ) -> Result<Value, ResolveError> {
        let value = if attribute.ends_with("Arn") || attribute.ends_with("ARN") {
            arn.to_string()
        } else if attribute.ends_with("Id") || attribute.ends_with("Name") {
            id.to_string()
        } else {
            format!("{id}-{}", attribute.to_lowercase().replace('.', "-"))
        };
        Ok(Value::String(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolverConfig;
    use crate::random::RandomSource;
    use crate::tests::{pseudo_params, template_from};
    use serde_json::json;
    use yare::parameterized;

    #[parameterized(
        arn = { "Arn", "arn:aws:cloudformation:us-east-1:123456789012:custom-widget/w-1" },
        suffixed_arn = { "WidgetArn", "arn:aws:cloudformation:us-east-1:123456789012:custom-widget/w-1" },
        id = { "WidgetId", "w-1" },
        name = { "Name", "w-1" },
        other = { "Endpoint.Address", "w-1-endpoint-address" },
    )]
    fn test_get_att_by_attribute_shape(attribute: &str, expected: &str) {
        let template = template_from(json!({ "Resources": {} }));
        let mut ctx = ResolvingContext::new(
            &template,
            pseudo_params(),
            &ResolverConfig::default(),
            RandomSource::seeded(5),
        )
        .unwrap();
        let synthesizer = GenericSynthesizer::new("Custom::Widget");
        let arn = synthesizer.arn("Widget", "w-1", &mut ctx).unwrap();

        let value = synthesizer
            .get_att("Widget", attribute, "w-1", &arn, &mut ctx)
            .unwrap();
        assert_eq!(value, json!(expected));
    }

    #[test]
    fn test_aws_type_arn_uses_service_segment() {
        let template = template_from(json!({ "Resources": {} }));
        let mut ctx = ResolvingContext::new(
            &template,
            pseudo_params(),
            &ResolverConfig::default(),
            RandomSource::seeded(5),
        )
        .unwrap();
        let synthesizer = GenericSynthesizer::new("AWS::Batch::JobQueue");
        let id = synthesizer.identifier("Jobs", None, &mut ctx).unwrap();
        assert!(id.starts_with("teststack-Jobs-"));
        assert_eq!(
            synthesizer.arn("Jobs", &id, &mut ctx).unwrap(),
            format!("arn:aws:batch:us-east-1:123456789012:jobqueue/{id}")
        );
        assert_eq!(
            synthesizer.ref_value("Jobs", &id, "", &mut ctx).unwrap(),
            json!(id)
        );
    }
}
