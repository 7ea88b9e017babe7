//! Options for `no-cross-imports` and the report decision.

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

use super::domains::DomainMap;

/// Options accepted under `[rules.no-cross-imports]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleOptions {
    /// Explicit domain table, in declaration order.
    #[serde(default)]
    pub domains: DomainMap,

    /// Merge `compilerOptions.paths` from the project's `tsconfig.json`.
    #[serde(default = "default_true", alias = "useTSConfig")]
    pub use_tsconfig: bool,

    /// Check files that belong to no domain.
    #[serde(default = "default_true", alias = "reportOutside")]
    pub report_outside: bool,

    /// Domains anyone may import.
    #[serde(default)]
    pub shared: BTreeSet<String>,

    /// Pairwise exemptions: own domain to the import domains it may use.
    #[serde(default, alias = "allowedCrossings")]
    pub allowed_crossings: BTreeMap<String, BTreeSet<String>>,
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self {
            domains: DomainMap::default(),
            use_tsconfig: true,
            report_outside: true,
            shared: BTreeSet::new(),
            allowed_crossings: BTreeMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

impl RuleOptions {
    /// Allows `own` to import from `import` without a report.
    #[must_use]
    pub fn allow_crossing(mut self, own: impl Into<String>, import: impl Into<String>) -> Self {
        self.allowed_crossings
            .entry(own.into())
            .or_default()
            .insert(import.into());
        self
    }

    /// Marks a domain as importable from anywhere.
    #[must_use]
    pub fn share(mut self, domain: impl Into<String>) -> Self {
        self.shared.insert(domain.into());
        self
    }
}

/// Decides whether an import from `own` into `import` is a violation.
#[must_use]
pub fn should_report(own: Option<&str>, import: Option<&str>, options: &RuleOptions) -> bool {
    if import.is_some_and(|domain| options.shared.contains(domain)) {
        return false;
    }

    if !options.report_outside && own.is_none() {
        return false;
    }

    if let (Some(own), Some(import)) = (own, import) {
        if options
            .allowed_crossings
            .get(own)
            .is_some_and(|allowed| allowed.contains(import))
        {
            return false;
        }
    }

    import.is_some() && import != own
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = RuleOptions::default();
        assert!(options.use_tsconfig);
        assert!(options.report_outside);
        assert!(options.domains.is_empty());
    }

    #[test]
    fn deserializes_snake_and_camel_case() {
        let snake: RuleOptions = toml::from_str(
            r#"
use_tsconfig = false
report_outside = false
shared = ["@shared"]

[domains]
"@ui" = "./src/ui"
"@core" = ["./src/core", "./lib/core"]

[allowed_crossings]
"@ui" = ["@core"]
"#,
        )
        .unwrap();
        assert!(!snake.use_tsconfig);
        assert!(!snake.report_outside);
        assert!(snake.shared.contains("@shared"));
        assert_eq!(snake.domains.len(), 2);
        assert!(snake.allowed_crossings["@ui"].contains("@core"));

        let camel: RuleOptions = serde_json::from_str(
            r#"{"useTSConfig": false, "reportOutside": false, "allowedCrossings": {"@ui": ["@core"]}}"#,
        )
        .unwrap();
        assert!(!camel.use_tsconfig);
        assert!(!camel.report_outside);
        assert!(camel.allowed_crossings["@ui"].contains("@core"));
    }

    #[test]
    fn rejects_unknown_options() {
        assert!(toml::from_str::<RuleOptions>("domain = {}").is_err());
    }

    #[test]
    fn different_domains_are_reported() {
        let options = RuleOptions::default();
        assert!(should_report(Some("@ui"), Some("@core"), &options));
        assert!(!should_report(Some("@ui"), Some("@ui"), &options));
        assert!(!should_report(Some("@ui"), None, &options));
    }

    #[test]
    fn shared_domain_is_never_reported() {
        let options = RuleOptions::default().share("@shared");
        assert!(!should_report(Some("@ui"), Some("@shared"), &options));
        assert!(!should_report(None, Some("@shared"), &options));
    }

    #[test]
    fn files_outside_domains() {
        let options = RuleOptions::default();
        assert!(should_report(None, Some("@core"), &options));

        let options = RuleOptions {
            report_outside: false,
            ..RuleOptions::default()
        };
        assert!(!should_report(None, Some("@core"), &options));
        assert!(should_report(Some("@ui"), Some("@core"), &options));
    }

    #[test]
    fn allowed_crossings_are_directional() {
        let options = RuleOptions::default().allow_crossing("@ui", "@core");
        assert!(!should_report(Some("@ui"), Some("@core"), &options));
        assert!(should_report(Some("@core"), Some("@ui"), &options));
    }
}
