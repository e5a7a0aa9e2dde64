//! Mutable state for one resolve run.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde_json::Value;
use tracing::{debug, warn};

use crate::analyzer::validate_params_list;
use crate::config::ResolverConfig;
use crate::error::ResolveError;
use crate::random::RandomSource;
use crate::types::{ParamMap, PseudoParam, ResourceIdentity, Template};

/// Pseudo-parameters that must be strings; ARNs and names are built from them.
const STRING_PSEUDO_PARAMS: [PseudoParam; 7] = [
    PseudoParam::AccountId,
    PseudoParam::Region,
    PseudoParam::Partition,
    PseudoParam::StackName,
    PseudoParam::StackId,
    PseudoParam::NoValue,
    PseudoParam::UrlSuffix,
];

/// Everything one run of the resolver reads and writes.
///
/// Values come from two tiers: the merged parameters, fixed at construction, and
/// a dynamic tier that caches `Ref` and `Fn::GetAtt` answers as they are first
/// computed. A key lives in at most one tier. Identities, generated ids and the
/// dynamic tier only ever grow.
#[derive(Debug)]
pub struct ResolvingContext<'t> {
    template: &'t Template,
    pre_processed: ParamMap,
    dynamic: HashMap<String, Value>,
    generated_ids: HashSet<String>,
    identities: BTreeMap<String, ResourceIdentity>,
    assigning: HashSet<String>,
    conditions: HashMap<String, bool>,
    evaluating_conditions: HashSet<String>,
    path: Vec<String>,
    random: RandomSource,
    max_id_attempts: usize,
    strict_unique_ids: bool,
}

impl<'t> ResolvingContext<'t> {
    /// Build a context over `template` with merged `params`.
    ///
    /// Fails with `ParamError` when a value is null, a pseudo-parameter is missing,
    /// or a pseudo-parameter used in names and ARNs is not a string.
    pub fn new(
        template: &'t Template,
        params: ParamMap,
        config: &ResolverConfig,
        random: RandomSource,
    ) -> Result<Self, ResolveError> {
        validate_params_list(&params)?;
        let not_strings: Vec<&str> = STRING_PSEUDO_PARAMS
            .iter()
            .map(|p| p.as_ref())
            .filter(|key| !params.get(*key).is_some_and(Value::is_string))
            .collect();
        if !not_strings.is_empty() {
            return Err(ResolveError::ParamError(format!(
                "pseudo-parameters must be strings: {}",
                not_strings.join(", ")
            )));
        }

        Ok(Self {
            template,
            pre_processed: params,
            dynamic: HashMap::new(),
            generated_ids: HashSet::new(),
            identities: BTreeMap::new(),
            assigning: HashSet::new(),
            conditions: HashMap::new(),
            evaluating_conditions: HashSet::new(),
            path: Vec::new(),
            random,
            max_id_attempts: config.max_id_attempts.max(1),
            strict_unique_ids: config.strict_unique_ids,
        })
    }

    pub fn template(&self) -> &'t Template {
        self.template
    }

    pub fn params(&self) -> &ParamMap {
        &self.pre_processed
    }

    /// Look a key up in the parameters, then in the dynamic cache.
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        self.pre_processed.get(key).or_else(|| self.dynamic.get(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Cache a computed value. Keys are write-once across both tiers.
    pub fn add_dynamic(
        &mut self,
        key: impl Into<String>,
        value: Value,
    ) -> Result<(), ResolveError> {
        let key = key.into();
        if self.contains(&key) {
            return Err(ResolveError::DuplicateKey(key));
        }
        debug!(event = "Cache", phase = "Insert", key = key.as_str());
        self.dynamic.insert(key, value);
        Ok(())
    }

    pub fn dynamic_len(&self) -> usize {
        self.dynamic.len()
    }

    pub fn push_path(&mut self, segment: &str) {
        self.path.push(segment.to_string());
    }

    pub fn pop_path(&mut self) {
        self.path.pop();
    }

    /// Current location in the tree, `/`-separated.
    pub fn path(&self) -> String {
        self.path.join("/")
    }

    /// True when the walk is directly under the top-level `Resources` section.
    pub(crate) fn at_resources_root(&self) -> bool {
        matches!(self.path.as_slice(), [only] if only == "Resources")
    }

    /// String value of a pseudo-parameter. Empty for the non-string ones.
    pub fn pseudo(&self, param: PseudoParam) -> &str {
        self.pre_processed
            .get(param.as_ref())
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn account_id(&self) -> &str {
        self.pseudo(PseudoParam::AccountId)
    }

    pub fn region(&self) -> &str {
        self.pseudo(PseudoParam::Region)
    }

    pub fn partition(&self) -> &str {
        self.pseudo(PseudoParam::Partition)
    }

    pub fn stack_name(&self) -> &str {
        self.pseudo(PseudoParam::StackName)
    }

    pub fn url_suffix(&self) -> &str {
        self.pseudo(PseudoParam::UrlSuffix)
    }

    /// True when `value` is what `Ref: AWS::NoValue` resolves to.
    pub fn is_no_value(&self, value: &Value) -> bool {
        self.pre_processed
            .get(PseudoParam::NoValue.as_ref())
            .is_some_and(|no_value| no_value == value)
    }

    pub fn random(&mut self) -> &mut RandomSource {
        &mut self.random
    }

    /// Draw an identifier not handed out before in this run.
    ///
    /// `generate` is retried up to the configured attempt cap. When every attempt
    /// collides the last value is accepted with a warning, or rejected with
    /// `IdentifierError` in strict mode.
    pub fn unique_id<F>(&mut self, mut generate: F) -> Result<String, ResolveError>
    where
        F: FnMut(&mut RandomSource) -> String,
    {
        let mut candidate = generate(&mut self.random);
        for _ in 1..self.max_id_attempts {
            if !self.generated_ids.contains(&candidate) {
                break;
            }
            candidate = generate(&mut self.random);
        }

        if self.generated_ids.contains(&candidate) {
            if self.strict_unique_ids {
                return Err(ResolveError::IdentifierError(format!(
                    "no unique identifier after {} attempts, last candidate '{candidate}'",
                    self.max_id_attempts
                )));
            }
            warn!(
                event = "UniqueId",
                phase = "Exhausted",
                attempts = self.max_id_attempts,
                id = candidate.as_str()
            );
        }
        self.generated_ids.insert(candidate.clone());
        Ok(candidate)
    }

    /// Record an identifier that did not come from `unique_id`. Returns false if
    /// it was already taken.
    pub fn register_id(&mut self, id: &str) -> bool {
        self.generated_ids.insert(id.to_string())
    }

    pub fn is_generated(&self, id: &str) -> bool {
        self.generated_ids.contains(id)
    }

    pub fn identity(&self, logical_id: &str) -> Option<&ResourceIdentity> {
        self.identities.get(logical_id)
    }

    pub fn identities(&self) -> &BTreeMap<String, ResourceIdentity> {
        &self.identities
    }

    /// Store an identity. An identity already assigned wins and is returned instead.
    pub fn assign_identity(
        &mut self,
        logical_id: &str,
        identity: ResourceIdentity,
    ) -> ResourceIdentity {
        self.identities
            .entry(logical_id.to_string())
            .or_insert(identity)
            .clone()
    }

    /// Mark `logical_id` as being assigned. False if it already is, i.e. a cycle.
    pub(crate) fn begin_assigning(&mut self, logical_id: &str) -> bool {
        self.assigning.insert(logical_id.to_string())
    }

    pub(crate) fn end_assigning(&mut self, logical_id: &str) {
        self.assigning.remove(logical_id);
    }

    pub fn condition(&self, name: &str) -> Option<bool> {
        self.conditions.get(name).copied()
    }

    /// Mark a named condition as under evaluation. Fails on a cycle.
    pub(crate) fn begin_condition(&mut self, name: &str) -> Result<(), ResolveError> {
        if self.evaluating_conditions.insert(name.to_string()) {
            Ok(())
        } else {
            Err(ResolveError::ValidationError(format!(
                "condition '{name}' depends on itself"
            )))
        }
    }

    /// Finish evaluating a named condition, caching the result when there is one.
    pub(crate) fn end_condition(&mut self, name: &str, result: Option<bool>) {
        self.evaluating_conditions.remove(name);
        if let Some(value) = result {
            self.conditions.insert(name.to_string(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{pseudo_params, template_from};
    use serde_json::json;

    fn empty_template() -> Template {
        template_from(json!({ "Resources": {} }))
    }

    fn build(template: &Template, params: ParamMap) -> Result<ResolvingContext<'_>, ResolveError> {
        ResolvingContext::new(
            template,
            params,
            &ResolverConfig::default(),
            RandomSource::seeded(1),
        )
    }

    fn context_for(template: &Template) -> ResolvingContext<'_> {
        build(template, pseudo_params()).unwrap()
    }

    #[test]
    fn test_new_rejects_missing_pseudo_params() {
        let template = empty_template();
        let mut params = pseudo_params();
        params.remove("AWS::Region");
        let err = build(&template, params).unwrap_err();
        assert_eq!(
            err,
            ResolveError::ParamError("missing values for parameters: AWS::Region".into())
        );
    }

    #[test]
    fn test_new_rejects_non_string_pseudo_params() {
        let template = empty_template();
        let mut params = pseudo_params();
        params.insert("AWS::AccountId".into(), json!(123456789012u64));
        let err = build(&template, params).unwrap_err();
        assert!(matches!(err, ResolveError::ParamError(msg) if msg.contains("AWS::AccountId")));
    }

    #[test]
    fn test_two_tier_lookup_and_duplicates() {
        let template = empty_template();
        let mut params = pseudo_params();
        params.insert("Env".into(), json!("dev"));
        let mut ctx = build(&template, params).unwrap();

        assert_eq!(ctx.lookup("Env"), Some(&json!("dev")));
        assert_eq!(ctx.region(), "us-east-1");

        ctx.add_dynamic("Bucket", json!("my-bucket")).unwrap();
        assert_eq!(ctx.lookup("Bucket"), Some(&json!("my-bucket")));
        assert_eq!(ctx.dynamic_len(), 1);

        assert_eq!(
            ctx.add_dynamic("Bucket", json!("other")),
            Err(ResolveError::DuplicateKey("Bucket".into()))
        );
        assert_eq!(
            ctx.add_dynamic("Env", json!("prod")),
            Err(ResolveError::DuplicateKey("Env".into()))
        );
        assert_eq!(ctx.lookup("Bucket"), Some(&json!("my-bucket")));
    }

    #[test]
    fn test_path_stack() {
        let template = empty_template();
        let mut ctx = context_for(&template);
        assert_eq!(ctx.path(), "");
        ctx.push_path("Resources");
        assert!(ctx.at_resources_root());
        ctx.push_path("Fn");
        assert_eq!(ctx.path(), "Resources/Fn");
        assert!(!ctx.at_resources_root());
        ctx.pop_path();
        ctx.pop_path();
        assert_eq!(ctx.path(), "");
    }

    #[test]
    fn test_unique_id_retries_collisions() {
        let template = empty_template();
        let mut ctx = context_for(&template);
        assert!(ctx.register_id("taken"));

        let mut candidates = vec!["fresh", "taken"];
        let id = ctx
            .unique_id(|_| candidates.pop().unwrap_or("never").to_string())
            .unwrap();
        assert_eq!(id, "fresh");
        assert!(ctx.is_generated("fresh"));
    }

    #[test]
    fn test_unique_id_exhaustion() {
        let template = empty_template();
        let config = ResolverConfig::default().with_max_id_attempts(3);
        let mut ctx =
            ResolvingContext::new(&template, pseudo_params(), &config, RandomSource::seeded(1))
                .unwrap();
        ctx.register_id("same");

        let mut calls = 0;
        let id = ctx
            .unique_id(|_| {
                calls += 1;
                "same".to_string()
            })
            .unwrap();
        assert_eq!(id, "same");
        assert_eq!(calls, 3);

        let strict = config.with_strict_unique_ids(true);
        let mut ctx =
            ResolvingContext::new(&template, pseudo_params(), &strict, RandomSource::seeded(1))
                .unwrap();
        ctx.register_id("same");
        let err = ctx.unique_id(|_| "same".to_string()).unwrap_err();
        assert!(matches!(err, ResolveError::IdentifierError(_)));
    }

    #[test]
    fn test_identity_is_never_reassigned() {
        let template = empty_template();
        let mut ctx = context_for(&template);
        let first = ctx.assign_identity("Fn", ResourceIdentity::new("a", "arn:a"));
        let second = ctx.assign_identity("Fn", ResourceIdentity::new("b", "arn:b"));
        assert_eq!(first, second);
        assert_eq!(ctx.identity("Fn").map(|i| i.id.as_str()), Some("a"));
    }

    #[test]
    fn test_condition_cycle_guard() {
        let template = empty_template();
        let mut ctx = context_for(&template);
        ctx.begin_condition("IsProd").unwrap();
        assert!(ctx.begin_condition("IsProd").is_err());
        ctx.end_condition("IsProd", Some(true));
        assert_eq!(ctx.condition("IsProd"), Some(true));
        assert!(ctx.begin_condition("IsProd").is_ok());
    }
}
