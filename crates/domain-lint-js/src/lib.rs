//! # domain-lint-js
//!
//! Tree-sitter powered JavaScript and TypeScript front end for domain-lint.
//!
//! [`JsParser`] implements [`domain_lint_core::SourceParser`] and lowers
//! `.js`, `.jsx`, `.mjs`, `.cjs`, `.ts`, `.mts`, `.cts` and `.tsx` files
//! into the core syntax model.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod dialect;
mod lower;
mod parser;

pub use dialect::Dialect;
pub use parser::JsParser;
