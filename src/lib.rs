// src/lib.rs
#[cfg(test)]
#[macro_use]
mod tests;

pub use analyzer::{
    PLACEHOLDER_VALUE, StubGenerator, analyze_params, replace_params_with_user_defined,
    stack_id_arn, validate_params_list,
};
pub use config::ResolverConfig;
pub use context::ResolvingContext;
pub use engine::{ParseOutcome, ParsedTemplate, TemplateEngine};
pub use error::ResolveError;
pub use intrinsics::{IntrinsicResolver, UNRESOLVED, values_equal};
pub use lookup::ResolvedTemplate;
pub use random::{Charset, RandomSource};
pub use resolver::ValueResolver;
pub use resources::ResourceIntrinsicResolver;
pub use timers::ResolvePhases;
pub use traits::{Intrinsic, Resolve, ResourceSynthesizer};

mod analyzer;
mod config;
mod context;
mod engine;
mod error;
mod intrinsics;
mod lookup;
mod random;
mod resolver;
pub mod resources;
mod strings;
mod timers;
mod traits;
pub mod types;
