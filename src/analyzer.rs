//! Parameter analysis, stand-in generation and the user-value merge.

use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use strum::IntoEnumIterator;
use tracing::{debug, warn};

use crate::config::ResolverConfig;
use crate::error::ResolveError;
use crate::random::{Charset, RandomSource};
use crate::strings::stringify;
use crate::types::{
    ParamKind, ParamMap, ParamStats, PseudoParam, Template, TemplateParam, UserParam,
    is_list_type,
};

/// Stub used for parameter types that have no better stand-in.
pub const PLACEHOLDER_VALUE: &str = "PLACEHOLDER_VALUE";

const SSM_VALUE_PREFIX: &str = "AWS::SSM::Parameter::Value<";

/// Compiled `AllowedPattern` expressions, keyed by their source text.
static ALLOWED_PATTERNS: Lazy<RwLock<HashMap<String, Regex>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Id prefixes for the `AWS::EC2::*` parameter types.
const AWS_ID_PREFIXES: &[(&str, &str)] = &[
    ("AWS::EC2::VPC::Id", "vpc-"),
    ("AWS::EC2::Subnet::Id", "subnet-"),
    ("AWS::EC2::SecurityGroup::Id", "sg-"),
    ("AWS::EC2::Image::Id", "ami-"),
    ("AWS::EC2::Instance::Id", "i-"),
    ("AWS::EC2::Volume::Id", "vol-"),
];

/// Generates plausible stand-in values for parameters nobody supplied.
#[derive(Debug)]
pub struct StubGenerator {
    config: ResolverConfig,
    random: RandomSource,
}

impl StubGenerator {
    pub fn new(config: &ResolverConfig, random: RandomSource) -> Self {
        Self {
            config: config.clone(),
            random,
        }
    }

    /// One stub per pseudo-parameter, consistent with each other: the stack id
    /// embeds the generated account and stack name.
    pub fn pseudo_stubs(&mut self) -> Vec<(PseudoParam, Value)> {
        let account = match &self.config.account_id {
            Some(account) => account.clone(),
            None => self.random.digits(12),
        };
        let stack_name = match &self.config.stack_name {
            Some(name) => name.clone(),
            None => format!("stack-{}", self.random.string(Charset::LowerAlnum, 8)),
        };
        let stack_id = stack_id_arn(
            &self.config.partition,
            &self.config.region,
            &account,
            &stack_name,
            &self.random.uuid(),
        );

        PseudoParam::iter()
            .map(|param| {
                let value = match param {
                    PseudoParam::AccountId => Value::String(account.clone()),
                    PseudoParam::Region => Value::String(self.config.region.clone()),
                    PseudoParam::Partition => Value::String(self.config.partition.clone()),
                    PseudoParam::StackName => Value::String(stack_name.clone()),
                    PseudoParam::StackId => Value::String(stack_id.clone()),
                    PseudoParam::NotificationArns => Value::Array(Vec::new()),
                    PseudoParam::NoValue => Value::String(PseudoParam::NoValue.to_string()),
                    PseudoParam::UrlSuffix => Value::String(self.config.url_suffix().to_string()),
                };
                (param, value)
            })
            .collect()
    }

    /// Type-directed stub for a declared parameter.
    pub fn stub_for(&mut self, key: &str, param_type: &str) -> Value {
        let param_type = param_type.trim();
        if let Some(inner) = param_type
            .strip_prefix(SSM_VALUE_PREFIX)
            .and_then(|rest| rest.strip_suffix('>'))
        {
            return self.stub_for(key, inner);
        }

        match param_type {
            "String" => Value::String(format!(
                "{}-{}",
                key.to_lowercase(),
                self.random.string(Charset::LowerAlnum, 6)
            )),
            "Number" | "Integer" => Value::String(self.random.number(1, 100).to_string()),
            "List<Number>" => Value::Array(
                (0..2)
                    .map(|_| Value::String(self.random.number(1, 100).to_string()))
                    .collect(),
            ),
            "CommaDelimitedList" | "List<String>" => Value::Array(
                (1..=2)
                    .map(|i| Value::String(format!("{}-{i}", key.to_lowercase())))
                    .collect(),
            ),
            _ => {
                if let Some(inner) = param_type
                    .strip_prefix("List<")
                    .and_then(|rest| rest.strip_suffix('>'))
                {
                    return Value::Array((0..2).map(|_| self.stub_for(key, inner)).collect());
                }
                if param_type.starts_with("AWS::") {
                    return Value::String(self.aws_stub(param_type));
                }
                Value::String(PLACEHOLDER_VALUE.to_string())
            }
        }
    }

    fn aws_stub(&mut self, param_type: &str) -> String {
        if let Some((_, prefix)) = AWS_ID_PREFIXES.iter().find(|(t, _)| *t == param_type) {
            return format!("{prefix}{}", self.random.hex(17));
        }
        match param_type {
            "AWS::EC2::AvailabilityZone::Name" => format!("{}a", self.config.region),
            "AWS::EC2::KeyPair::KeyName" => {
                format!("key-{}", self.random.string(Charset::LowerAlnum, 8))
            }
            "AWS::Route53::HostedZone::Id" => {
                format!("Z{}", self.random.string(Charset::UpperAlnum, 20))
            }
            other => {
                let prefix = other
                    .trim_start_matches("AWS::")
                    .split("::")
                    .filter(|segment| *segment != "Id" && *segment != "Name")
                    .map(str::to_lowercase)
                    .join("-");
                format!("{prefix}-{}", self.random.hex(8))
            }
        }
    }
}

/// `arn:{partition}:cloudformation:{region}:{account}:stack/{name}/{uuid}`
pub fn stack_id_arn(partition: &str, region: &str, account: &str, stack: &str, uuid: &str) -> String {
    format!("arn:{partition}:cloudformation:{region}:{account}:stack/{stack}/{uuid}")
}

/// Every parameter the template needs: the pseudo-parameters first, then the
/// declared ones in declaration order.
pub fn analyze_params(template: &Template, stubs: &mut StubGenerator) -> Vec<TemplateParam> {
    let mut params: Vec<TemplateParam> = stubs
        .pseudo_stubs()
        .into_iter()
        .map(|(param, stub)| TemplateParam {
            key: param.to_string(),
            param_type: match param {
                PseudoParam::NotificationArns => "List<String>".to_string(),
                _ => "String".to_string(),
            },
            kind: ParamKind::Pseudo,
            value: None,
            is_required: false,
            stub,
            description: None,
            allowed_values: Vec::new(),
            allowed_pattern: None,
        })
        .collect();

    for (key, declaration) in &template.parameters {
        let allowed_values = declaration.allowed_values.clone().unwrap_or_default();
        let value = declaration
            .default
            .clone()
            .filter(|v| !v.is_null())
            .or_else(|| allowed_values.first().cloned());
        params.push(TemplateParam {
            key: key.clone(),
            param_type: declaration.param_type.clone(),
            kind: ParamKind::Declared,
            is_required: value.is_none(),
            value,
            stub: stubs.stub_for(key, &declaration.param_type),
            description: declaration.description.clone(),
            allowed_values,
            allowed_pattern: declaration.allowed_pattern.clone(),
        });
    }

    debug!(
        event = "Params",
        phase = "Analyze",
        declared = template.parameters.len(),
        required = params.iter().filter(|p| p.is_required).count()
    );
    params
}

/// Merge user values over defaults over stubs.
///
/// User keys the template does not declare are kept as extensions. The stack id
/// is always rebuilt from the merged account, region, partition and stack name.
pub fn replace_params_with_user_defined(
    params: &[TemplateParam],
    user_params: &[UserParam],
    random: &mut RandomSource,
) -> (ParamMap, ParamStats) {
    let mut merged = ParamMap::new();
    let mut stats = ParamStats::default();

    for param in params {
        let user_value = user_params
            .iter()
            .rev()
            .find(|u| u.param_key == param.key)
            .map(|u| &u.param_value)
            .filter(|v| !v.is_null());

        let value = if let Some(value) = user_value {
            check_allowed(param, value);
            stats.from_user.push(param.key.clone());
            value.clone()
        } else if let Some(value) = &param.value {
            stats.from_default.push(param.key.clone());
            value.clone()
        } else if !param.stub.is_null() {
            stats.from_stub.push(param.key.clone());
            param.stub.clone()
        } else {
            stats.missing.push(param.key.clone());
            Value::Null
        };

        let value = if param.is_list_type() { split_list(value) } else { value };
        merged.insert(param.key.clone(), value);
    }

    for user in user_params {
        if params.iter().all(|p| p.key != user.param_key) {
            if !merged.contains_key(&user.param_key) {
                stats.extensions.push(user.param_key.clone());
            }
            merged.insert(user.param_key.clone(), user.param_value.clone());
        }
    }

    let text = |key: PseudoParam| merged.get(key.as_ref()).map(stringify).unwrap_or_default();
    let stack_id = stack_id_arn(
        &text(PseudoParam::Partition),
        &text(PseudoParam::Region),
        &text(PseudoParam::AccountId),
        &text(PseudoParam::StackName),
        &random.uuid(),
    );
    merged.insert(PseudoParam::StackId.to_string(), Value::String(stack_id));

    debug!(
        event = "Params",
        phase = "Merge",
        from_user = stats.from_user.len(),
        from_default = stats.from_default.len(),
        from_stub = stats.from_stub.len(),
        missing = stats.missing.len(),
        extensions = stats.extensions.len()
    );
    (merged, stats)
}

/// Fail when any merged value is null or any pseudo-parameter is absent.
pub fn validate_params_list(params: &ParamMap) -> Result<(), ResolveError> {
    let mut offending: BTreeSet<String> = PseudoParam::iter()
        .map(|p| p.to_string())
        .filter(|key| !params.contains_key(key))
        .collect();
    offending.extend(
        params
            .iter()
            .filter(|(_, value)| value.is_null())
            .map(|(key, _)| key.clone()),
    );

    if offending.is_empty() {
        Ok(())
    } else {
        Err(ResolveError::ParamError(format!(
            "missing values for parameters: {}",
            offending.iter().join(", ")
        )))
    }
}

/// Comma-separated strings become arrays for list-typed parameters.
fn split_list(value: Value) -> Value {
    match value {
        Value::String(text) if text.is_empty() => Value::Array(Vec::new()),
        Value::String(text) => Value::Array(
            text.split(',')
                .map(|item| Value::String(item.trim().to_string()))
                .collect(),
        ),
        other => other,
    }
}

fn check_allowed(param: &TemplateParam, value: &Value) {
    if !param.allowed_values.is_empty()
        && !param
            .allowed_values
            .iter()
            .any(|allowed| stringify(allowed) == stringify(value))
    {
        warn!(
            event = "Params",
            phase = "AllowedValues",
            key = param.key.as_str(),
            value = %stringify(value)
        );
    }

    let (Some(pattern), Value::String(text)) = (&param.allowed_pattern, value) else {
        return;
    };
    match allowed_pattern(pattern) {
        Ok(regex) if !regex.is_match(text) => warn!(
            event = "Params",
            phase = "AllowedPattern",
            key = param.key.as_str(),
            pattern = pattern.as_str()
        ),
        Ok(_) => {}
        Err(err) => warn!(
            event = "Params",
            phase = "AllowedPattern",
            key = param.key.as_str(),
            error = %err
        ),
    }
}

/// Anchored regex for an `AllowedPattern`, compiled once per distinct pattern.
fn allowed_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    if let Some(regex) = ALLOWED_PATTERNS
        .read()
        .ok()
        .and_then(|cache| cache.get(pattern).cloned())
    {
        return Ok(regex);
    }
    let regex = Regex::new(&format!("^(?:{pattern})$"))?;
    if let Ok(mut cache) = ALLOWED_PATTERNS.write() {
        cache.insert(pattern.to_string(), regex.clone());
    }
    Ok(regex)
}
