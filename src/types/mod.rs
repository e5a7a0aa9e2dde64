//! Data model for templates, parameters and synthesized identities.
//!
//! Templates are kept close to their JSON form: typed where resolution needs
//! structure (resources, parameter declarations) and `serde_json::Value`
//! everywhere else.

mod identity;
mod intrinsic_name;
mod params;
mod template;

pub use identity::ResourceIdentity;
pub use intrinsic_name::{IntrinsicCall, IntrinsicName, intrinsic_call, is_intrinsic_node};
pub(crate) use params::is_list_type;
pub use params::{ParamKind, ParamMap, ParamStats, PseudoParam, TemplateParam, UserParam};
pub use template::{
    ARN_KEY, ID_KEY, ParameterDeclaration, Resource, Template, has_identity_fields,
    is_resource_shaped,
};
