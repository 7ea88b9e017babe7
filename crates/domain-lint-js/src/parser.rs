//! [`SourceParser`] implementation backed by tree-sitter.

use std::path::Path;

use domain_lint_core::{Module, ParseError, SourceParser};
use tracing::debug;
use tree_sitter::Parser;

use crate::dialect::Dialect;
use crate::lower::lower_program;

/// Parses JavaScript and TypeScript files into the core syntax model.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsParser;

impl JsParser {
    /// Creates a new parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SourceParser for JsParser {
    fn language_id(&self) -> &'static str {
        "javascript"
    }

    fn extensions(&self) -> &'static [&'static str] {
        Dialect::EXTENSIONS
    }

    fn parse(&self, path: &Path, source: &str) -> Result<Module, ParseError> {
        let dialect = Dialect::from_path(path).ok_or_else(|| ParseError::Unsupported {
            path: path.to_path_buf(),
        })?;

        let mut parser = Parser::new();
        parser
            .set_language(&dialect.language())
            .map_err(|e| ParseError::Language {
                language: dialect.name(),
                message: e.to_string(),
            })?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ParseError::NoTree {
                path: path.to_path_buf(),
            })?;

        let root = tree.root_node();
        if root.has_error() {
            debug!(
                "{} has syntax errors, lowering what parsed",
                path.display()
            );
        }

        Ok(lower_program(root, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_lint_core::Statement;

    #[test]
    fn rejects_unknown_extension() {
        let err = JsParser::new()
            .parse(Path::new("styles.css"), "a {}")
            .unwrap_err();
        assert!(matches!(err, ParseError::Unsupported { .. }));
    }

    #[test]
    fn parses_each_dialect() {
        let cases = [
            ("a.js", "import x from \"./x\";"),
            ("a.ts", "import type { T } from \"./t\";\nconst n: number = 1;"),
            ("a.tsx", "import x from \"./x\";\nconst el = <div>{x}</div>;"),
        ];
        for (file, code) in cases {
            let module = JsParser::new().parse(Path::new(file), code).unwrap();
            assert!(
                matches!(module.statements.first(), Some(Statement::Import(_))),
                "{file}"
            );
        }
    }

    #[test]
    fn syntax_errors_still_lower() {
        let module = JsParser::new()
            .parse(Path::new("a.js"), "import a from \"./a\";\nconst = ;\n")
            .unwrap();
        assert!(matches!(module.statements.first(), Some(Statement::Import(_))));
    }

    #[test]
    fn handles_declared_extensions() {
        let parser = JsParser::new();
        assert!(parser.handles(Path::new("src/a.mjs")));
        assert!(parser.handles(Path::new("src/a.tsx")));
        assert!(!parser.handles(Path::new("src/a.json")));
    }
}
