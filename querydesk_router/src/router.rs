use querydesk_core::{ArgValue, Arguments, ParsedCall};
use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::error::{Result, RouterError};
use crate::rules::{ParamType, PatternRule, default_rules};

/// Text parameters with this name are upper-cased (department acronyms).
const DEPARTMENT_PARAM: &str = "department";

struct CompiledRule {
    regex: Regex,
    rule: PatternRule,
}

/// Ordered first-match-wins dispatcher from free text to function calls.
pub struct PatternRouter {
    rules: Vec<CompiledRule>,
}

impl PatternRouter {
    /// Compile a rule table, preserving its order.
    pub fn new(rules: Vec<PatternRule>) -> Result<Self> {
        let rules = rules
            .into_iter()
            .map(compile)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Router over [`default_rules`].
    pub fn with_defaults() -> Result<Self> {
        Self::new(default_rules())
    }

    #[must_use]
    pub fn rules(&self) -> impl Iterator<Item = &PatternRule> {
        self.rules.iter().map(|c| &c.rule)
    }

    /// Route `query` to the first matching rule.
    ///
    /// Matching runs on the trimmed, lowercased query. Unmatched queries
    /// yield the `unknown_function` sentinel carrying the original text.
    ///
    /// # Errors
    /// Returns [`RouterError::InvalidInteger`] when an integer capture does
    /// not fit an `i64`.
    pub fn parse_query(&self, query: &str) -> Result<ParsedCall> {
        let normalized = query.trim().to_lowercase();

        for compiled in &self.rules {
            let Some(caps) = compiled.regex.captures(&normalized) else {
                continue;
            };
            let rule = &compiled.rule;
            debug!("Query matched rule {}", rule.name);

            let mut arguments = Arguments::new();
            for (i, (param, ty)) in rule.params.iter().zip(&rule.types).enumerate() {
                let raw = caps.get(i + 1).map_or("", |m| m.as_str());
                arguments.push(param.as_str(), convert(param, *ty, raw)?);
            }
            return Ok(ParsedCall::new(rule.name.as_str(), arguments));
        }

        debug!("No rule matched query");
        Ok(ParsedCall::unknown(query))
    }
}

fn compile(rule: PatternRule) -> Result<CompiledRule> {
    if rule.params.len() != rule.types.len() {
        return Err(RouterError::TypeMismatch {
            name: rule.name,
            params: rule.params.len(),
            types: rule.types.len(),
        });
    }

    let regex = RegexBuilder::new(&rule.pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| RouterError::InvalidPattern {
            name: rule.name.clone(),
            source,
        })?;

    let groups = regex.captures_len() - 1;
    if groups < rule.params.len() {
        return Err(RouterError::MissingGroups {
            name: rule.name,
            params: rule.params.len(),
            groups,
        });
    }

    Ok(CompiledRule { regex, rule })
}

fn convert(param: &str, ty: ParamType, raw: &str) -> Result<ArgValue> {
    match ty {
        ParamType::Integer => raw
            .trim()
            .parse::<i64>()
            .map(ArgValue::Integer)
            .map_err(|source| RouterError::InvalidInteger {
                param: param.to_string(),
                value: raw.to_string(),
                source,
            }),
        ParamType::Text => {
            let value = raw.trim();
            if param == DEPARTMENT_PARAM {
                Ok(ArgValue::Text(value.to_uppercase()))
            } else {
                Ok(ArgValue::Text(value.to_string()))
            }
        }
    }
}
