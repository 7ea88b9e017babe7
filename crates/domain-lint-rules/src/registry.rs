//! Rule construction from configuration.

use domain_lint_core::{Config, ConfigError, RuleBox};

use crate::no_cross_imports::{self, NoCrossImports};

/// Returns every rule with default options, for listing.
#[must_use]
pub fn available_rules() -> Vec<RuleBox> {
    vec![Box::new(NoCrossImports::default())]
}

/// Builds every rule, reading each rule's options from `config`.
///
/// # Errors
///
/// Returns an error if a rule's options are malformed.
pub fn all_rules(config: &Config) -> Result<Vec<RuleBox>, ConfigError> {
    Ok(vec![no_cross_imports_from(config)?])
}

/// Builds the rule named by `name` (kebab-case name or code).
///
/// Returns `Ok(None)` for unknown names.
///
/// # Errors
///
/// Returns an error if the rule's options are malformed.
pub fn rule_by_name(name: &str, config: &Config) -> Result<Option<RuleBox>, ConfigError> {
    match name {
        no_cross_imports::NAME | no_cross_imports::CODE => {
            Ok(Some(no_cross_imports_from(config)?))
        }
        _ => Ok(None),
    }
}

fn no_cross_imports_from(config: &Config) -> Result<RuleBox, ConfigError> {
    let rule = match config.rule_config(no_cross_imports::NAME) {
        Some(rule_config) => NoCrossImports::from_config(rule_config)?,
        None => NoCrossImports::default(),
    };
    Ok(Box::new(rule))
}
