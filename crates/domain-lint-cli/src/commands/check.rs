//! Check command implementation.

use anyhow::{Context, Result};
use domain_lint_core::{Analyzer, Config, RuleBox};
use domain_lint_js::JsParser;
use domain_lint_rules::{all_rules, rule_by_name};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    rules_filter: Option<&str>,
    exclude: Vec<String>,
    source: &ConfigSource,
) -> Result<()> {
    let config = source.load()?;

    let rules = match rules_filter {
        Some(filter) => filter_rules(filter, &config)?,
        None => all_rules(&config).context("Invalid rule options")?,
    };

    let mut builder = Analyzer::builder()
        .root(path)
        .parser(JsParser::new())
        .config(config)
        .excludes(exclude);

    for rule in rules {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {} with {} rules",
        analyzer.root().display(),
        analyzer.rule_count()
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, format, analyzer.root())?;

    // Exit with error code if there are errors
    if result.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

fn filter_rules(filter: &str, config: &Config) -> Result<Vec<RuleBox>> {
    let mut rules = Vec::new();

    for name in filter.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        match rule_by_name(name, config).with_context(|| format!("Invalid options for {name}"))? {
            Some(rule) => rules.push(rule),
            None => tracing::warn!("Unknown rule: {}", name),
        }
    }

    Ok(rules)
}
