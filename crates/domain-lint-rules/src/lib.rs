//! # domain-lint-rules
//!
//! Built-in lint rules for domain-lint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | DL001 | `no-cross-imports` | Forbids imports that cross domain boundaries |
//!
//! ## Usage
//!
//! ```ignore
//! use domain_lint_core::Analyzer;
//! use domain_lint_js::JsParser;
//! use domain_lint_rules::{NoCrossImports, RuleOptions};
//!
//! let options: RuleOptions = toml::from_str(r#"
//! [domains]
//! "@core" = "./src/core"
//! "@ui" = "./src/ui"
//! "#)?;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./web")
//!     .parser(JsParser::new())
//!     .rule(NoCrossImports::new(options))
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod no_cross_imports;
mod registry;

pub use no_cross_imports::classify::classify;
pub use no_cross_imports::domains::{
    resolve_import_domain, resolve_own_domain, strip_wildcard, Domain, DomainMap,
};
pub use no_cross_imports::options::{should_report, RuleOptions};
pub use no_cross_imports::tsconfig::{AliasSource, TsConfigFile};
pub use no_cross_imports::{CrossImport, NoCrossImports};
pub use registry::{all_rules, available_rules, rule_by_name};

/// Re-export core types for convenience.
pub use domain_lint_core::{Rule, Severity, Violation};
