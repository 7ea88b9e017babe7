//! Rule to forbid imports that cross domain boundaries.
//!
//! # Rationale
//!
//! Large front-end codebases are often split into domains (`@core`, `@ui`,
//! feature folders) that should only talk to each other through agreed
//! seams. This rule flags every module load whose target lives in a
//! different domain than the importing file.
//!
//! # Detected Patterns
//!
//! - `import x from "..."`, `import "..."`, `import x = require("...")`
//! - `require("...")` and `import("...")` as statements
//! - `const x = require("...")`, `const x = import("...")`
//! - `const Page = lazy(() => import("..."))` and the other lazy loaders
//!
//! # Configuration
//!
//! - `domains`: table of domain key to path prefix(es)
//! - `use_tsconfig`: merge `compilerOptions.paths` from `tsconfig.json`
//!   (default: true)
//! - `report_outside`: check files outside every domain (default: true)
//! - `shared`: domains anyone may import
//! - `allowed_crossings`: per-domain list of importable domains
//!
//! # Suppression
//!
//! - `// domain-lint: allow(no-cross-imports) reason="..."` on the import or
//!   the line above

pub mod classify;
pub mod domains;
pub mod options;
pub mod tsconfig;

use std::fmt;
use std::path::Path;

use domain_lint_core::utils::allowance::check_allow_with_reason;
use domain_lint_core::{
    ConfigError, FileContext, Location, Module, Rule, RuleConfig, Severity, Span, Suggestion,
    Violation,
};
use tracing::debug;

use self::classify::classify;
use self::domains::{resolve_import_domain, resolve_own_domain, DomainMap};
use self::options::{should_report, RuleOptions};
use self::tsconfig::{AliasSource, TsConfigFile};

/// Rule code for no-cross-imports.
pub const CODE: &str = "DL001";

/// Rule name for no-cross-imports.
pub const NAME: &str = "no-cross-imports";

/// Rendered in place of the own domain for files outside every domain.
pub const NO_DOMAIN: &str = "<no domain>";

/// One flagged import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossImport {
    /// Specifier as written.
    pub specifier: String,
    /// Domain the specifier resolved to.
    pub import_domain: String,
    /// Domain of the importing file, if any.
    pub own_domain: Option<String>,
    /// Span of the importing statement.
    pub span: Span,
}

impl CrossImport {
    /// Renders the violation message.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Import of `{}` crosses from {} into {}",
            self.specifier,
            self.own_domain.as_deref().unwrap_or(NO_DOMAIN),
            self.import_domain
        )
    }

    fn into_violation(self, file: &Path, severity: Severity, domains: &DomainMap) -> Violation {
        let help = domains
            .get(&self.import_domain)
            .and_then(|d| d.canonical_prefix())
            .map_or_else(
                || format!("Keep imports of `{}` inside its domain", self.import_domain),
                |prefix| {
                    format!(
                        "`{}` lives under {prefix}; add it to `shared` or `allowed_crossings` if this dependency is intended",
                        self.import_domain
                    )
                },
            );

        Violation::new(
            CODE,
            NAME,
            severity,
            Location::from_span(file.to_path_buf(), self.span),
            self.message(),
        )
        .with_suggestion(Suggestion::new(help))
        .with_data("specifier", self.specifier)
        .with_data("importDomain", self.import_domain)
        .with_data(
            "ownDomain",
            self.own_domain.unwrap_or_else(|| NO_DOMAIN.to_string()),
        )
    }
}

/// Forbids imports whose target domain differs from the importing file's.
pub struct NoCrossImports {
    options: RuleOptions,
    aliases: Box<dyn AliasSource>,
    severity: Severity,
}

impl fmt::Debug for NoCrossImports {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoCrossImports")
            .field("options", &self.options)
            .field("severity", &self.severity)
            .finish_non_exhaustive()
    }
}

impl Default for NoCrossImports {
    fn default() -> Self {
        Self::new(RuleOptions::default())
    }
}

impl NoCrossImports {
    /// Creates the rule, reading aliases from `tsconfig.json`.
    #[must_use]
    pub fn new(options: RuleOptions) -> Self {
        Self {
            options,
            aliases: Box::new(TsConfigFile::default()),
            severity: Severity::Error,
        }
    }

    /// Creates the rule from its `[rules.no-cross-imports]` block.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are malformed.
    pub fn from_config(config: &RuleConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.options_as()?))
    }

    /// Replaces where alias domains are read from.
    #[must_use]
    pub fn with_alias_source(mut self, source: impl AliasSource + 'static) -> Self {
        self.aliases = Box::new(source);
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Returns the configured options.
    #[must_use]
    pub fn options(&self) -> &RuleOptions {
        &self.options
    }

    /// Builds the domain table for one check: explicit domains first, then
    /// alias domains not already declared.
    #[must_use]
    pub fn effective_domains(&self, root: &Path) -> DomainMap {
        let explicit = self.options.domains.clone();
        if !self.options.use_tsconfig {
            return explicit;
        }
        match self.aliases.load(root) {
            Some(aliases) => explicit.merged_with(aliases),
            None => explicit,
        }
    }

    /// Finds every crossing import in `module`, in statement order.
    #[must_use]
    pub fn find_crossings(&self, root: &Path, path: &Path, module: &Module) -> Vec<CrossImport> {
        let domains = self.effective_domains(root);
        self.crossings_in(&domains, root, path, module)
    }

    fn crossings_in(
        &self,
        domains: &DomainMap,
        root: &Path,
        path: &Path,
        module: &Module,
    ) -> Vec<CrossImport> {
        if domains.is_empty() {
            debug!("No domains configured, skipping {}", path.display());
            return Vec::new();
        }

        let own = resolve_own_domain(root, path, domains);
        debug!(file = %path.display(), own_domain = ?own, "resolved own domain");

        module
            .statements
            .iter()
            .filter_map(|statement| {
                let specifier = classify(statement)?;
                let import = resolve_import_domain(specifier, domains);
                if !should_report(own, import, &self.options) {
                    return None;
                }
                Some(CrossImport {
                    specifier: specifier.to_string(),
                    import_domain: import?.to_string(),
                    own_domain: own.map(str::to_string),
                    span: statement.span(),
                })
            })
            .collect()
    }
}

impl Rule for NoCrossImports {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids imports that cross domain boundaries"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, module: &Module) -> Vec<Violation> {
        let domains = self.effective_domains(ctx.root);
        let mut violations = Vec::new();

        for crossing in self.crossings_in(&domains, ctx.root, ctx.path, module) {
            let line = crossing.span.line;
            let allow_check = check_allow_with_reason(ctx.content, line, NAME);
            if allow_check.is_allowed() {
                if self.requires_allow_reason() && allow_check.reason().is_none() {
                    violations.push(
                        Violation::new(
                            CODE,
                            NAME,
                            Severity::Warning,
                            Location::from_span(ctx.relative_path.clone(), crossing.span),
                            format!("Allow directive for '{NAME}' is missing required reason"),
                        )
                        .with_suggestion(Suggestion::new(
                            "Add reason=\"...\" to explain why this crossing is necessary",
                        )),
                    );
                }
                continue;
            }

            violations.push(crossing.into_violation(&ctx.relative_path, self.severity, &domains));
        }

        violations
    }
}
