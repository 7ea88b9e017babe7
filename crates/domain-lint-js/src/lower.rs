//! Lowering of tree-sitter JS/TS trees into the core syntax model.

use domain_lint_core::{
    ArrowFunction, CallExpr, Callee, Declarator, Expr, ExpressionStatement, ImportDeclaration,
    Module, OtherStatement, Span, Statement, VariableDeclaration,
};
use tree_sitter::Node;

/// Lowers every statement under `root`, in depth-first pre-order.
pub(crate) fn lower_program(root: Node<'_>, src: &str) -> Module {
    let mut statements = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if let Some(statement) = lower_statement(node, src) {
            statements.push(statement);
        }

        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }

    Module::new(statements)
}

fn is_statement_kind(kind: &str) -> bool {
    kind.ends_with("_statement") || kind.ends_with("_declaration") || kind == "statement_block"
}

fn lower_statement(node: Node<'_>, src: &str) -> Option<Statement> {
    let span = span_of(node);
    let statement = match node.kind() {
        "import_statement" => Statement::Import(ImportDeclaration {
            source: import_source(node, src),
            span,
        }),
        "expression_statement" => Statement::Expression(ExpressionStatement {
            expression: first_named_child(node).map_or(Expr::Other, |e| lower_expr(e, src)),
            span,
        }),
        "lexical_declaration" | "variable_declaration" => {
            Statement::Variable(lower_declaration(node, src, span))
        }
        kind if is_statement_kind(kind) => Statement::Other(OtherStatement {
            kind: kind.to_string(),
            span,
        }),
        _ => return None,
    };
    Some(statement)
}

/// `import ... from "x"`, `import "x"`, and TS `import x = require("x")`.
fn import_source(node: Node<'_>, src: &str) -> Option<String> {
    if let Some(source) = node.child_by_field_name("source") {
        return string_value(source, src);
    }
    let mut cursor = node.walk();
    let clause = node
        .named_children(&mut cursor)
        .find(|c| c.kind() == "import_require_clause")?;
    string_value(clause.child_by_field_name("source")?, src)
}

fn lower_declaration(node: Node<'_>, src: &str, span: Span) -> VariableDeclaration {
    let mut cursor = node.walk();
    let declarations: Vec<Declarator> = node
        .named_children(&mut cursor)
        .filter(|c| c.kind() == "variable_declarator")
        .map(|d| Declarator {
            init: d.child_by_field_name("value").map(|v| lower_expr(v, src)),
        })
        .collect();

    let source = declarations.iter().find_map(|d| match &d.init {
        Some(Expr::Call(call)) if call.calls("require") || call.calls("import") => {
            call.source().map(str::to_string)
        }
        _ => None,
    });

    VariableDeclaration {
        declarations,
        source,
        span,
    }
}

fn lower_expr(node: Node<'_>, src: &str) -> Expr {
    match node.kind() {
        "parenthesized_expression" => {
            first_named_child(node).map_or(Expr::Other, |e| lower_expr(e, src))
        }
        "call_expression" => Expr::Call(lower_call(node, src)),
        "arrow_function" => match node.child_by_field_name("body") {
            Some(body) if body.kind() != "statement_block" => Expr::Arrow(ArrowFunction {
                body: Box::new(lower_expr(body, src)),
            }),
            _ => Expr::Other,
        },
        "string" | "template_string" => string_value(node, src).map_or(Expr::Other, Expr::String),
        _ => Expr::Other,
    }
}

fn lower_call(node: Node<'_>, src: &str) -> CallExpr {
    let callee = match node.child_by_field_name("function") {
        Some(f) if f.kind() == "import" => Callee::Identifier("import".to_string()),
        Some(f) if f.kind() == "identifier" => Callee::Identifier(text(f, src).to_string()),
        _ => Callee::Other,
    };

    // Tagged templates carry a template string here rather than `arguments`.
    let arguments = match node.child_by_field_name("arguments") {
        Some(args) if args.kind() == "arguments" => {
            let mut cursor = args.walk();
            args.named_children(&mut cursor)
                .filter(|a| a.kind() != "comment")
                .map(|a| lower_expr(a, src))
                .collect()
        }
        _ => Vec::new(),
    };

    CallExpr { callee, arguments }
}

/// Contents of a string literal, or of a template string without
/// substitutions.
fn string_value(node: Node<'_>, src: &str) -> Option<String> {
    match node.kind() {
        "string" => {}
        "template_string" => {
            let mut cursor = node.walk();
            if node
                .named_children(&mut cursor)
                .any(|c| c.kind() == "template_substitution")
            {
                return None;
            }
        }
        _ => return None,
    }
    let raw = text(node, src);
    raw.get(1..raw.len().saturating_sub(1)).map(str::to_string)
}

fn first_named_child(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    let first = node.named_children(&mut cursor).find(|c| c.kind() != "comment");
    first
}

fn text<'a>(node: Node<'_>, src: &'a str) -> &'a str {
    src.get(node.start_byte()..node.end_byte()).unwrap_or("")
}

fn span_of(node: Node<'_>) -> Span {
    let start = node.start_position();
    Span::new(
        start.row + 1,
        start.column + 1,
        node.start_byte(),
        node.end_byte() - node.start_byte(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JsParser;
    use domain_lint_core::SourceParser;
    use std::path::Path;

    fn lower(file: &str, code: &str) -> Vec<Statement> {
        JsParser::new()
            .parse(Path::new(file), code)
            .unwrap()
            .statements
    }

    fn only(file: &str, code: &str) -> Statement {
        let mut statements = lower(file, code);
        assert_eq!(statements.len(), 1, "{statements:?}");
        statements.remove(0)
    }

    fn import_call(source: &str) -> Expr {
        Expr::Call(CallExpr {
            callee: Callee::Identifier("import".into()),
            arguments: vec![Expr::String(source.into())],
        })
    }

    #[test]
    fn static_imports() {
        for code in [
            "import x from \"@core/a\";",
            "import { a, b } from '@core/a';",
            "import * as ns from \"@core/a\";",
            "import \"@core/a\";",
        ] {
            match only("a.js", code) {
                Statement::Import(i) => assert_eq!(i.source.as_deref(), Some("@core/a"), "{code}"),
                other => panic!("{code}: {other:?}"),
            }
        }
    }

    #[test]
    fn typescript_import_require() {
        match only("a.ts", "import fs = require(\"./fs\");") {
            Statement::Import(i) => assert_eq!(i.source.as_deref(), Some("./fs")),
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn expression_statements() {
        match only("a.js", "require(\"./polyfill\");") {
            Statement::Expression(e) => assert_eq!(
                e.expression,
                Expr::Call(CallExpr {
                    callee: Callee::Identifier("require".into()),
                    arguments: vec![Expr::String("./polyfill".into())],
                })
            ),
            other => panic!("{other:?}"),
        }
        match only("a.js", "import(\"./lazy\");") {
            Statement::Expression(e) => assert_eq!(e.expression, import_call("./lazy")),
            other => panic!("{other:?}"),
        }
        match only("a.js", "module.exports = 1;") {
            Statement::Expression(e) => assert_eq!(e.expression, Expr::Other),
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn member_callee_is_other() {
        match only("a.js", "loader.require(\"./x\");") {
            Statement::Expression(ExpressionStatement {
                expression: Expr::Call(call),
                ..
            }) => assert_eq!(call.callee, Callee::Other),
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn declarations_carry_statement_source() {
        match only("a.js", "const a = 1, b = require(\"./b\"), c = require(\"./c\");") {
            Statement::Variable(v) => {
                assert_eq!(v.declarations.len(), 3);
                assert_eq!(v.source.as_deref(), Some("./b"));
            }
            other => panic!("{other:?}"),
        }
        match only("a.js", "var m = import(`./m`);") {
            Statement::Variable(v) => assert_eq!(v.source.as_deref(), Some("./m")),
            other => panic!("{other:?}"),
        }
        match only("a.js", "let x;") {
            Statement::Variable(v) => {
                assert_eq!(v.declarations, vec![Declarator { init: None }]);
                assert_eq!(v.source, None);
            }
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn lazy_loader_shape() {
        match only("a.tsx", "const Page = lazy(() => import(\"@core/page\"));") {
            Statement::Variable(v) => {
                assert_eq!(v.source, None);
                assert_eq!(
                    v.declarations[0].init,
                    Some(Expr::Call(CallExpr {
                        callee: Callee::Identifier("lazy".into()),
                        arguments: vec![Expr::Arrow(ArrowFunction {
                            body: Box::new(import_call("@core/page")),
                        })],
                    }))
                );
            }
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn parenthesized_arrow_body_is_unwrapped() {
        match only("a.js", "const P = lazy(() => (import(\"./p\")));") {
            Statement::Variable(v) => match &v.declarations[0].init {
                Some(Expr::Call(call)) => assert_eq!(
                    call.arguments[0],
                    Expr::Arrow(ArrowFunction {
                        body: Box::new(import_call("./p")),
                    })
                ),
                other => panic!("{other:?}"),
            },
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn block_bodied_arrow_is_other() {
        let statements = lower("a.js", "const P = lazy(() => { return import(\"./p\"); });");
        match &statements[0] {
            Statement::Variable(v) => match &v.declarations[0].init {
                Some(Expr::Call(call)) => assert_eq!(call.arguments[0], Expr::Other),
                other => panic!("{other:?}"),
            },
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn template_with_substitution_is_not_a_string() {
        match only("a.js", "require(`./${name}`);") {
            Statement::Expression(ExpressionStatement {
                expression: Expr::Call(call),
                ..
            }) => assert_eq!(call.arguments, vec![Expr::Other]),
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn nested_statements_follow_their_parent() {
        let code = "function load() {\n  require(\"./a\");\n}\nexport const B = require(\"./b\");\n";
        let statements = lower("a.js", code);
        let kinds: Vec<&str> = statements
            .iter()
            .map(|s| match s {
                Statement::Import(_) => "import",
                Statement::Expression(_) => "expression",
                Statement::Variable(_) => "variable",
                Statement::Other(o) => o.kind.as_str(),
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                "function_declaration",
                "statement_block",
                "expression",
                "export_statement",
                "variable"
            ]
        );
    }

    #[test]
    fn spans_are_one_indexed() {
        let statements = lower("a.js", "\n  import \"./x\";\n");
        let span = statements[0].span();
        assert_eq!((span.line, span.column), (2, 3));
        assert_eq!(span.offset, 3);
        assert_eq!(span.length, "import \"./x\";".len());
    }
}
