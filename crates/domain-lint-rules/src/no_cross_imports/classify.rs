//! Recognizes statements that load a module.

use domain_lint_core::{CallExpr, Expr, Statement, VariableDeclaration};

/// Callee names treated as lazy loaders around a dynamic import.
pub const LAZY_LOADERS: &[&str] = &["lazy", "lazyWithRetry", "lazily", "lazilyWithRetry"];

/// Returns the module specifier a statement loads, or `None` when the
/// statement is not a module load.
///
/// Recognized shapes, in priority order:
///
/// 1. `import x from "y"` and friends.
/// 2. `import("y");` or `require("y");` as a bare statement.
/// 3. A declaration where any binding is initialized by `require(...)` or
///    `import(...)`; the declaration-level source is used.
/// 4. A declaration binding `lazy(() => import("y"))` (or another name in
///    [`LAZY_LOADERS`]); the nested import's source is used.
#[must_use]
pub fn classify(statement: &Statement) -> Option<&str> {
    match statement {
        Statement::Import(import) => import.source.as_deref(),
        Statement::Expression(stmt) => match &stmt.expression {
            Expr::Call(call) if call.calls("import") || call.calls("require") => call.source(),
            _ => None,
        },
        Statement::Variable(decl) => classify_declaration(decl),
        Statement::Other(_) => None,
    }
}

fn classify_declaration(decl: &VariableDeclaration) -> Option<&str> {
    if ["require", "import"]
        .iter()
        .any(|callee| initializers(decl).any(|call| call.calls(callee)))
    {
        return decl.source.as_deref();
    }

    initializers(decl)
        .find_map(lazy_import)
        .and_then(CallExpr::source)
}

/// Call expressions that directly initialize a binding.
fn initializers(decl: &VariableDeclaration) -> impl Iterator<Item = &CallExpr> {
    decl.declarations.iter().filter_map(|d| match &d.init {
        Some(Expr::Call(call)) => Some(call),
        _ => None,
    })
}

/// Matches `lazy(() => import("y"), ...)` and returns the inner import call.
fn lazy_import(call: &CallExpr) -> Option<&CallExpr> {
    let name = call.callee_name()?;
    if !LAZY_LOADERS.contains(&name) {
        return None;
    }
    match call.arguments.first()? {
        Expr::Arrow(arrow) => match arrow.body.as_ref() {
            Expr::Call(inner) if inner.calls("import") => Some(inner),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_lint_core::{
        ArrowFunction, Callee, Declarator, ExpressionStatement, ImportDeclaration,
        OtherStatement, Span,
    };

    fn call(name: &str, args: Vec<Expr>) -> Expr {
        Expr::Call(CallExpr {
            callee: Callee::Identifier(name.into()),
            arguments: args,
        })
    }

    fn string(s: &str) -> Expr {
        Expr::String(s.into())
    }

    fn arrow(body: Expr) -> Expr {
        Expr::Arrow(ArrowFunction {
            body: Box::new(body),
        })
    }

    fn expr_stmt(expression: Expr) -> Statement {
        Statement::Expression(ExpressionStatement {
            expression,
            span: Span::default(),
        })
    }

    fn var(inits: Vec<Option<Expr>>, source: Option<&str>) -> Statement {
        Statement::Variable(VariableDeclaration {
            declarations: inits.into_iter().map(|init| Declarator { init }).collect(),
            source: source.map(str::to_string),
            span: Span::default(),
        })
    }

    #[test]
    fn static_import() {
        let stmt = Statement::Import(ImportDeclaration {
            source: Some("@core/helpers".into()),
            span: Span::default(),
        });
        assert_eq!(classify(&stmt), Some("@core/helpers"));
    }

    #[test]
    fn import_without_source_is_absent() {
        let stmt = Statement::Import(ImportDeclaration {
            source: None,
            span: Span::default(),
        });
        assert_eq!(classify(&stmt), None);
    }

    #[test]
    fn bare_require_and_dynamic_import() {
        assert_eq!(
            classify(&expr_stmt(call("require", vec![string("./polyfill")]))),
            Some("./polyfill")
        );
        assert_eq!(
            classify(&expr_stmt(call("import", vec![string("@ui/theme")]))),
            Some("@ui/theme")
        );
    }

    #[test]
    fn other_calls_are_not_imports() {
        assert_eq!(
            classify(&expr_stmt(call("requireAll", vec![string("./x")]))),
            None
        );
        assert_eq!(
            classify(&expr_stmt(Expr::Call(CallExpr {
                callee: Callee::Other,
                arguments: vec![string("./x")],
            }))),
            None
        );
        assert_eq!(classify(&expr_stmt(string("use strict"))), None);
    }

    #[test]
    fn require_with_computed_argument_is_absent() {
        assert_eq!(
            classify(&expr_stmt(call("require", vec![Expr::Other]))),
            None
        );
    }

    #[test]
    fn declaration_uses_statement_level_source() {
        let stmt = var(
            vec![
                Some(string("plain")),
                Some(call("require", vec![string("./a")])),
            ],
            Some("./a"),
        );
        assert_eq!(classify(&stmt), Some("./a"));

        let stmt = var(vec![Some(call("import", vec![string("./b")]))], Some("./b"));
        assert_eq!(classify(&stmt), Some("./b"));
    }

    #[test]
    fn declaration_without_statement_source_is_absent() {
        let stmt = var(vec![Some(call("require", vec![Expr::Other]))], None);
        assert_eq!(classify(&stmt), None);
    }

    #[test]
    fn lazy_loaders() {
        for name in LAZY_LOADERS {
            let stmt = var(
                vec![Some(call(
                    name,
                    vec![arrow(call("import", vec![string("@core/page")]))],
                ))],
                None,
            );
            assert_eq!(classify(&stmt), Some("@core/page"), "{name}");
        }
    }

    #[test]
    fn first_matching_lazy_binding_wins() {
        let stmt = var(
            vec![
                None,
                Some(call("lazy", vec![arrow(call("fetch", vec![string("./x")]))])),
                Some(call(
                    "lazily",
                    vec![arrow(call("import", vec![string("./first")]))],
                )),
                Some(call(
                    "lazy",
                    vec![arrow(call("import", vec![string("./second")]))],
                )),
            ],
            None,
        );
        assert_eq!(classify(&stmt), Some("./first"));
    }

    #[test]
    fn lazy_shapes_that_do_not_qualify() {
        // No arguments.
        assert_eq!(classify(&var(vec![Some(call("lazy", vec![]))], None)), None);
        // First argument is not an arrow.
        assert_eq!(
            classify(&var(
                vec![Some(call("lazy", vec![call("import", vec![string("./x")])]))],
                None
            )),
            None
        );
        // Unknown loader name.
        assert_eq!(
            classify(&var(
                vec![Some(call(
                    "defer",
                    vec![arrow(call("import", vec![string("./x")]))]
                ))],
                None
            )),
            None
        );
    }

    #[test]
    fn require_takes_priority_over_lazy() {
        let stmt = var(
            vec![
                Some(call(
                    "lazy",
                    vec![arrow(call("import", vec![string("./lazy")]))],
                )),
                Some(call("require", vec![string("./eager")])),
            ],
            Some("./eager"),
        );
        assert_eq!(classify(&stmt), Some("./eager"));
    }

    #[test]
    fn other_statements_are_absent() {
        let stmt = Statement::Other(OtherStatement {
            kind: "if_statement".into(),
            span: Span::default(),
        });
        assert_eq!(classify(&stmt), None);
    }
}
