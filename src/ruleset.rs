//! Rulesets and the registry that resolves them by name.
//!
//! A ruleset bundles rules for one language version and exposes a single
//! `validate` over a token stream. Instances are built once per run and
//! reused for every file, so they must not keep per-file state.

use crate::error::ConfigError;
use crate::lexer::TokenStream;
use crate::models::Violation;
use crate::rules::{DelimiterSpacing, DeprecatedTag, LowerCaseVariable, Rule, TrailingSpace};
use std::collections::BTreeMap;

pub trait Ruleset: Send + Sync {
    fn name(&self) -> &str;
    fn validate(&self, tokens: &TokenStream) -> Vec<Violation>;
}

/// Rules run in declaration order against the same stream.
pub struct RuleList {
    name: String,
    rules: Vec<Box<dyn Rule>>,
}

impl RuleList {
    pub fn new(name: impl Into<String>, rules: Vec<Box<dyn Rule>>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }
}

impl Ruleset for RuleList {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self, tokens: &TokenStream) -> Vec<Violation> {
        let mut out = Vec::new();
        for rule in &self.rules {
            let before = out.len();
            rule.check(tokens, &mut out);
            tracing::trace!(
                rule = rule.id(),
                file = tokens.source_path(),
                found = out.len() - before,
                "rule checked"
            );
        }
        out
    }
}

pub fn official(version: u8) -> Result<Box<dyn Ruleset>, ConfigError> {
    if !(1..=3).contains(&version) {
        return Err(ConfigError::UnsupportedVersion {
            ruleset: "official".into(),
            version,
            supported: "1-3".into(),
        });
    }
    Ok(Box::new(RuleList::new(
        "official",
        vec![
            Box::new(DelimiterSpacing::default()),
            Box::new(TrailingSpace::default()),
            Box::new(LowerCaseVariable::default()),
            Box::new(DeprecatedTag::new(version)),
        ],
    )))
}

pub fn whitespace(version: u8) -> Result<Box<dyn Ruleset>, ConfigError> {
    if version == 0 {
        return Err(ConfigError::UnsupportedVersion {
            ruleset: "whitespace".into(),
            version,
            supported: "1+".into(),
        });
    }
    Ok(Box::new(RuleList::new(
        "whitespace",
        vec![
            Box::new(DelimiterSpacing::default()),
            Box::new(TrailingSpace::default()),
        ],
    )))
}

pub type RulesetFactory = fn(u8) -> Result<Box<dyn Ruleset>, ConfigError>;

/// Name -> ruleset factory. Resolution validates the name before any file
/// is touched.
pub struct RulesetRegistry {
    factories: BTreeMap<String, RulesetFactory>,
}

impl Default for RulesetRegistry {
    fn default() -> Self {
        let mut reg = Self::empty();
        reg.register("official", official);
        reg.register("whitespace", whitespace);
        reg
    }
}

impl RulesetRegistry {
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, name: &str, factory: RulesetFactory) {
        self.factories.insert(name.to_string(), factory);
    }

    pub fn names(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }

    pub fn resolve(&self, name: &str, version: u8) -> Result<Box<dyn Ruleset>, ConfigError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ConfigError::UnknownRuleset {
                name: name.to_string(),
                available: self.names(),
            })?;
        let ruleset = factory(version)?;
        tracing::debug!(ruleset = name, version, "ruleset resolved");
        Ok(ruleset)
    }
}
