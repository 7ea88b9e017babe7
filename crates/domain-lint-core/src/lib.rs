//! # domain-lint-core
//!
//! Core framework for linting import boundaries between source domains.
//!
//! This crate provides the language-neutral pieces of the linter:
//!
//! - A closed [syntax model](Module) that front ends lower source files into
//! - [`SourceParser`] trait implemented by language front ends
//! - [`Rule`] trait for per-file rules over the syntax model
//! - [`Analyzer`] for discovering files and orchestrating lint execution
//! - [`Violation`] for representing lint findings
//!
//! ## Example
//!
//! ```ignore
//! use domain_lint_core::Analyzer;
//! use domain_lint_js::JsParser;
//! use domain_lint_rules::NoCrossImports;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./web")
//!     .parser(JsParser::new())
//!     .rule(NoCrossImports::new(options))
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod parser;
mod rule;
mod syntax;
mod types;

/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::FileContext;
pub use parser::{ParseError, ParserBox, SourceParser};
pub use rule::{Rule, RuleBox};
pub use syntax::{
    ArrowFunction, CallExpr, Callee, Declarator, Expr, ExpressionStatement, ImportDeclaration,
    Module, OtherStatement, Span, Statement, VariableDeclaration,
};
pub use types::{LintResult, Location, Severity, Suggestion, Violation, ViolationDiagnostic};
pub use utils::allowance::AllowCheck;
