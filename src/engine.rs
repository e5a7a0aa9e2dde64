use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::analyzer::{StubGenerator, analyze_params, replace_params_with_user_defined};
use crate::config::ResolverConfig;
use crate::context::ResolvingContext;
use crate::error::ResolveError;
use crate::lookup::ResolvedTemplate;
use crate::random::RandomSource;
use crate::resolver::ValueResolver;
use crate::resources::ensure_identity;
use crate::strings::is_blank;
use crate::timers::{PhaseDurations, PhaseTimer, ResolvePhases};
use crate::traits::Resolve;
use crate::types::{Template, TemplateParam, UserParam};

/// A template that deserialized, with its parameters analysed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTemplate {
    pub template: Template,
    /// Pseudo-parameters first, then every declared parameter.
    pub params: Vec<TemplateParam>,
}

/// Result of [`TemplateEngine::parse`]. Parse failures are data, not errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ParseOutcome {
    Parsed(ParsedTemplate),
    Failed { message: String },
}

impl ParseOutcome {
    pub fn has_errors(&self) -> bool {
        matches!(self, ParseOutcome::Failed { .. })
    }

    pub fn parsed(&self) -> Option<&ParsedTemplate> {
        match self {
            ParseOutcome::Parsed(parsed) => Some(parsed),
            ParseOutcome::Failed { .. } => None,
        }
    }

    /// Every parameter the caller may want to supply. Empty after a failure.
    pub fn params_to_review(&self) -> &[TemplateParam] {
        self.parsed()
            .map(|parsed| parsed.params.as_slice())
            .unwrap_or_default()
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ParseOutcome::Failed { message } => Some(message.as_str()),
            ParseOutcome::Parsed(_) => None,
        }
    }
}

/// Entry point: parse template text, then resolve it against user values.
///
/// The engine holds only configuration. Every `resolve` call builds its own
/// context, so one engine can serve many threads.
#[derive(Debug, Clone, Default)]
pub struct TemplateEngine {
    config: Arc<ResolverConfig>,
}

impl TemplateEngine {
    pub fn new(config: ResolverConfig) -> Self {
        TemplateEngine {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Deserialize `text` and analyse its parameters. Never fails outright.
    pub fn parse(&self, text: &str) -> ParseOutcome {
        match self.try_parse(text) {
            Ok(parsed) => {
                debug!(
                    event = "Template",
                    phase = "Parsed",
                    resources = parsed.template.resources.len(),
                    params = parsed.params.len()
                );
                ParseOutcome::Parsed(parsed)
            }
            Err(err) => {
                warn!(event = "Template", phase = "ParseFailed", error = %err);
                ParseOutcome::Failed {
                    message: err.to_string(),
                }
            }
        }
    }

    fn try_parse(&self, text: &str) -> Result<ParsedTemplate, ResolveError> {
        if is_blank(text) {
            return Err(ResolveError::ParseError("template is empty".to_string()));
        }
        let template: Template = serde_json::from_str(text)?;
        let mut stubs = StubGenerator::new(&self.config, RandomSource::new(self.config.seed));
        let params = analyze_params(&template, &mut stubs);
        Ok(ParsedTemplate { template, params })
    }

    /// Resolve a parsed template into concrete values.
    ///
    /// Runs the parameter merge, then assigns an identity to every resource in
    /// logical-id order, then evaluates every intrinsic in the tree, and finally
    /// fills any identity the evaluation left out.
    ///
    /// Evaluation follows document order with the sections in template order,
    /// so `Fn::Sub` in `Outputs` sees every `Ref` cached under `Resources`.
    pub fn resolve(
        &self,
        outcome: &ParseOutcome,
        user_params: &[UserParam],
    ) -> Result<ResolvedTemplate, ResolveError> {
        let parsed = match outcome {
            ParseOutcome::Parsed(parsed) => parsed,
            ParseOutcome::Failed { message } => {
                return Err(ResolveError::ParseError(format!(
                    "template did not parse: {message}"
                )));
            }
        };

        let started = Instant::now();
        let mut durations = PhaseDurations::default();
        let mut random = RandomSource::new(self.config.seed);
        let resolver = ValueResolver::new();

        let (mut ctx, stats) = {
            let _timer = PhaseTimer::new(&mut durations.merge);
            let (params, stats) =
                replace_params_with_user_defined(&parsed.params, user_params, &mut random);
            let ctx = ResolvingContext::new(&parsed.template, params, &self.config, random)?;
            (ctx, stats)
        };

        let mut working = parsed.template.clone();
        {
            let _timer = PhaseTimer::new(&mut durations.identities);
            let mut logical_ids: Vec<&String> = parsed.template.resources.keys().collect();
            logical_ids.sort();
            for logical_id in logical_ids {
                let identity = ensure_identity(logical_id, &mut ctx, &resolver)?;
                if let Some(resource) = working.resources.get_mut(logical_id) {
                    resource.id = Some(identity.id);
                    resource.arn = Some(identity.arn);
                }
            }
        }

        let mut resolved: Template = {
            let _timer = PhaseTimer::new(&mut durations.resolve);
            let tree = serde_json::to_value(&working)?;
            serde_json::from_value(resolver.resolve(&tree, &mut ctx)?)?
        };

        {
            let _timer = PhaseTimer::new(&mut durations.finalize);
            for (logical_id, resource) in resolved.resources.iter_mut() {
                if resource.has_identity() {
                    continue;
                }
                let identity = ensure_identity(logical_id, &mut ctx, &resolver)?;
                resource.id.get_or_insert(identity.id);
                resource.arn.get_or_insert(identity.arn);
            }
        }

        let phases = ResolvePhases::from_durations(&durations, started.elapsed());
        info!(
            event = "Template",
            phase = "Resolved",
            resources = resolved.resources.len(),
            cached = ctx.dynamic_len(),
            from_user = stats.from_user.len(),
            missing = stats.missing.len(),
            total_ms = phases.total_ms,
            overhead_ms = phases.overhead_ms()
        );

        Ok(ResolvedTemplate::new(
            resolved,
            parsed.template.clone(),
            ctx.params().clone(),
            stats,
            phases,
        ))
    }
}

#[cfg(test)]
mod tests;
