//! Seams between the recursive resolver, the intrinsic functions and the
//! per-type resource synthesizers.

use serde_json::Value;

use crate::context::ResolvingContext;
use crate::error::ResolveError;

/// Anything that can evaluate a template fragment against a context.
///
/// Intrinsics receive the resolver as `&dyn Resolve` so they can evaluate their
/// own arguments without knowing which resolver drives them.
pub trait Resolve {
    fn resolve(&self, value: &Value, ctx: &mut ResolvingContext<'_>)
    -> Result<Value, ResolveError>;
}

/// One intrinsic function, e.g. `Fn::Join`.
pub trait Intrinsic: Send + Sync {
    /// Evaluate the function. `args` is the raw, unresolved argument node.
    fn resolve(
        &self,
        args: &Value,
        ctx: &mut ResolvingContext<'_>,
        resolver: &dyn Resolve,
    ) -> Result<Value, ResolveError>;
}

/// Per-type synthesis of physical identifiers, ARNs and the answers to
/// `Ref` and `Fn::GetAtt`.
pub trait ResourceSynthesizer {
    /// Property whose value, when it resolves to a string, becomes the identifier.
    fn name_property(&self) -> Option<&'static str>;

    /// Physical identifier. `name` is the resolved name property, if any.
    fn identifier(
        &self,
        logical_id: &str,
        name: Option<&str>,
        ctx: &mut ResolvingContext<'_>,
    ) -> Result<String, ResolveError>;

    fn arn(
        &self,
        logical_id: &str,
        id: &str,
        ctx: &mut ResolvingContext<'_>,
    ) -> Result<String, ResolveError>;

    /// What `Ref` on the resource returns.
    fn ref_value(
        &self,
        logical_id: &str,
        id: &str,
        arn: &str,
        ctx: &mut ResolvingContext<'_>,
    ) -> Result<Value, ResolveError>;

    /// What `Fn::GetAtt` returns for `attribute`.
    fn get_att(
        &self,
        logical_id: &str,
        attribute: &str,
        id: &str,
        arn: &str,
        ctx: &mut ResolvingContext<'_>,
    ) -> Result<Value, ResolveError>;
}
