//! Rule trait for defining lint rules.

use crate::context::FileContext;
use crate::syntax::Module;
use crate::types::{Severity, Violation};

/// A per-file lint rule over the closed syntax model.
///
/// Rules receive the file's statements in traversal order and must not keep
/// state between calls: the same inputs always yield the same violations.
///
/// # Example
///
/// ```ignore
/// use domain_lint_core::{FileContext, Module, Rule, Statement, Violation};
///
/// pub struct NoSideEffectImports;
///
/// impl Rule for NoSideEffectImports {
///     fn name(&self) -> &'static str { "no-side-effect-imports" }
///     fn code(&self) -> &'static str { "DL900" }
///
///     fn check(&self, ctx: &FileContext, module: &Module) -> Vec<Violation> {
///         module
///             .statements
///             .iter()
///             .filter_map(|s| match s { /* ... */ _ => None })
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "no-cross-imports").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "DL001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Whether this rule requires a reason when using allow directives.
    ///
    /// By default, rules with `Severity::Error` require a reason.
    fn requires_allow_reason(&self) -> bool {
        self.default_severity() == Severity::Error
    }

    /// Checks a single file and returns any violations found, in statement
    /// order.
    fn check(&self, ctx: &FileContext, module: &Module) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
