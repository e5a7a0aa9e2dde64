//! Physical identifiers, ARNs and `Ref`/`Fn::GetAtt` answers per resource type.

mod catalog;
mod generic;

use std::str::FromStr;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::context::ResolvingContext;
use crate::error::ResolveError;
use crate::random::{Charset, RandomSource};
use crate::strings::{interpolate, is_blank, physical_name};
use crate::traits::{Resolve, ResourceSynthesizer};
use crate::types::{ARN_KEY, ID_KEY, ResourceIdentity, is_intrinsic_node};

pub use catalog::{Attr, IdStyle, KindSpec, RefStyle, ResourceKind};
pub use generic::GenericSynthesizer;

/// Random placeholders: token, character set, length.
const RANDOM_TOKENS: [(&str, Charset, usize); 3] = [
    ("{suffix}", Charset::LowerAlnum, 12),
    ("{SUFFIX}", Charset::UpperAlnum, 17),
    ("{hex}", Charset::Hex, 17),
];

/// Random part of stack-scoped names.
const NAME_SUFFIX_LEN: usize = 12;

/// Picks the synthesizer for a resource type. Unknown types get a generic one,
/// so resolution never fails just because a type is not catalogued.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceIntrinsicResolver;

impl ResourceIntrinsicResolver {
    pub fn get(&self, type_name: &str) -> Box<dyn ResourceSynthesizer> {
        match ResourceKind::from_str(type_name) {
            Ok(kind) => Box::new(CatalogSynthesizer::new(kind)),
            Err(_) => {
                debug!(event = "Resource", phase = "Fallback", resource_type = type_name);
                Box::new(GenericSynthesizer::new(type_name))
            }
        }
    }
}

/// Synthesizer driven by a catalogue entry.
#[derive(Debug, Clone, Copy)]
pub struct CatalogSynthesizer {
    kind: ResourceKind,
    spec: KindSpec,
}

impl CatalogSynthesizer {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            spec: kind.spec(),
        }
    }
}

impl ResourceSynthesizer for CatalogSynthesizer {
    fn name_property(&self) -> Option<&'static str> {
        self.spec.name_property
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
            None => generate_id(self.spec.id_style, logical_id, ctx),
        }
    }

    fn arn(
        &self,
        logical_id: &str,
        id: &str,
        ctx: &mut ResolvingContext<'_>,
    ) -> Result<String, ResolveError> {
        Ok(expand(self.spec.arn, logical_id, id, "", ctx))
    }

    fn ref_value(
        &self,
        logical_id: &str,
        id: &str,
        arn: &str,
        ctx: &mut ResolvingContext<'_>,
    ) -> Result<Value, ResolveError> {
        let value = match self.spec.reference {
            RefStyle::Id => id.to_string(),
            RefStyle::Arn => arn.to_string(),
            RefStyle::Pattern(pattern) => expand(pattern, logical_id, id, arn, ctx),
        };
        Ok(Value::String(value))
    }

    fn get_att(
        &self,
        logical_id: &str,
        attribute: &str,
        id: &str,
        arn: &str,
        ctx: &mut ResolvingContext<'_>,
    ) -> Result<Value, ResolveError> {
        let value = match self.spec.attribute(attribute) {
            Some(Attr::Id) => id.to_string(),
            Some(Attr::Arn) => arn.to_string(),
            Some(Attr::Fixed(value)) => value.to_string(),
            Some(Attr::Pattern(pattern)) => expand(pattern, logical_id, id, arn, ctx),
            None => {
                return Err(ResolveError::LookupError(format!(
                    "attribute '{attribute}' is not available on {} '{logical_id}'",
                    self.kind
                )));
            }
        };
        Ok(Value::String(value))
    }
}

/// Draw a fresh identifier in the given style.
pub(crate) fn generate_id(
    style: IdStyle,
    logical_id: &str,
    ctx: &mut ResolvingContext<'_>,
) -> Result<String, ResolveError> {
    let stack = ctx.stack_name().to_string();
    let region = ctx.region().to_string();
    match style {
        IdStyle::Stack { max_len, lowercase } => ctx.unique_id(|random| {
            let suffix = random.string(Charset::UpperAlnum, NAME_SUFFIX_LEN);
            physical_name(&stack, logical_id, &suffix, max_len, lowercase)
        }),
        IdStyle::Prefixed {
            prefix,
            len,
            charset,
        } => ctx.unique_id(|random| format!("{prefix}{}", random.string(charset, len))),
        IdStyle::Uuid => ctx.unique_id(RandomSource::uuid),
        IdStyle::Regional { len } => {
            ctx.unique_id(|random| format!("{region}_{}", random.alphanumeric(len)))
        }
        IdStyle::RegionalUuid => ctx.unique_id(|random| format!("{region}:{}", random.uuid())),
    }
}

/// Fill a pattern: random tokens first, each occurrence drawn separately, then
/// the run and resource values.
pub(crate) fn expand(
    pattern: &str,
    logical_id: &str,
    id: &str,
    arn: &str,
    ctx: &mut ResolvingContext<'_>,
) -> String {
    let mut filled = pattern.to_string();
    for (token, charset, len) in RANDOM_TOKENS {
        while let Some(pos) = filled.find(token) {
            let value = ctx.random().string(charset, len);
            filled.replace_range(pos..pos + token.len(), &value);
        }
    }

    interpolate(
        &filled,
        &[
            ("partition", ctx.partition()),
            ("region", ctx.region()),
            ("account", ctx.account_id()),
            ("urlsuffix", ctx.url_suffix()),
            ("stack", ctx.stack_name()),
            ("logical", logical_id),
            ("arn", arn),
            ("id", id),
        ],
    )
}

/// Identity of a top-level resource, assigning it on first use.
///
/// A string name property becomes the identifier. A name property holding an
/// intrinsic is resolved first; when that fails the identifier is generated.
pub(crate) fn ensure_identity(
    logical_id: &str,
    ctx: &mut ResolvingContext<'_>,
    resolver: &dyn Resolve,
) -> Result<ResourceIdentity, ResolveError> {
    if let Some(identity) = ctx.identity(logical_id) {
        return Ok(identity.clone());
    }
    let template = ctx.template();
    let resource = template
        .resource(logical_id)
        .ok_or_else(|| ResolveError::LookupError(format!("unknown resource '{logical_id}'")))?;

    if !ctx.begin_assigning(logical_id) {
        return Err(ResolveError::ValidationError(format!(
            "identity of resource '{logical_id}' depends on itself"
        )));
    }
    let built = build_identity(
        logical_id,
        &resource.resource_type,
        resource.properties.as_ref(),
        resource.id.as_deref(),
        resource.arn.as_deref(),
        ctx,
        resolver,
    );
    ctx.end_assigning(logical_id);

    let identity = ctx.assign_identity(logical_id, built?);
    debug!(
        event = "Identity",
        phase = "Assign",
        logical_id = logical_id,
        id = identity.id.as_str()
    );
    Ok(identity)
}

/// Identity for a resource-shaped object outside the top-level `Resources`
/// section. It is not recorded as a resource identity.
pub(crate) fn synthesize_identity(
    key: &str,
    object: &Map<String, Value>,
    ctx: &mut ResolvingContext<'_>,
    resolver: &dyn Resolve,
) -> Result<ResourceIdentity, ResolveError> {
    let resource_type = object.get("Type").and_then(Value::as_str).unwrap_or_default();
    build_identity(
        key,
        resource_type,
        object.get("Properties"),
        object.get(ID_KEY).and_then(Value::as_str),
        object.get(ARN_KEY).and_then(Value::as_str),
        ctx,
        resolver,
    )
}

fn build_identity(
    logical_id: &str,
    resource_type: &str,
    properties: Option<&Value>,
    existing_id: Option<&str>,
    existing_arn: Option<&str>,
    ctx: &mut ResolvingContext<'_>,
    resolver: &dyn Resolve,
) -> Result<ResourceIdentity, ResolveError> {
    let synthesizer = ResourceIntrinsicResolver.get(resource_type);
    let id = match existing_id {
        Some(id) => {
            ctx.register_id(id);
            id.to_string()
        }
        None => {
            let name = resolve_name(synthesizer.name_property(), properties, ctx, resolver);
            synthesizer.identifier(logical_id, name.as_deref(), ctx)?
        }
    };
    let arn = match existing_arn {
        Some(arn) => arn.to_string(),
        None => synthesizer.arn(logical_id, &id, ctx)?,
    };
    Ok(ResourceIdentity::new(id, arn))
}

fn resolve_name(
    property: Option<&str>,
    properties: Option<&Value>,
    ctx: &mut ResolvingContext<'_>,
    resolver: &dyn Resolve,
) -> Option<String> {
    let value = properties?.as_object()?.get(property?)?;
    let resolved = if is_intrinsic_node(value) {
        match resolver.resolve(value, ctx) {
            Ok(resolved) => resolved,
            Err(err) => {
                warn!(
                    event = "Identity",
                    phase = "NameProperty",
                    property = property.unwrap_or_default(),
                    error = %err
                );
                return None;
            }
        }
    } else {
        value.clone()
    };

    if ctx.is_no_value(&resolved) {
        return None;
    }
    match resolved {
        Value::String(name) if !is_blank(&name) => Some(name),
        _ => None,
    }
}
