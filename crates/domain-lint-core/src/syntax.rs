//! Closed syntax model consumed by rules.
//!
//! Front ends (see `domain-lint-js`) lower a concrete parse tree into these
//! types. Only the shapes rules care about get their own variants; anything
//! else collapses into an `Other` variant, so rules match exhaustively
//! instead of probing optional fields.

/// Position of a syntax node in its source file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset from the start of the file.
    pub offset: usize,
    /// Length in bytes.
    pub length: usize,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub fn new(line: usize, column: usize, offset: usize, length: usize) -> Self {
        Self {
            line,
            column,
            offset,
            length,
        }
    }
}

/// One parsed source file: every statement in depth-first pre-order.
///
/// Nested statements (inside function bodies, blocks, exports) are included
/// right after their enclosing statement, matching the order a tree walker
/// would visit them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Module {
    /// Statements in traversal order.
    pub statements: Vec<Statement>,
}

impl Module {
    /// Creates a module from statements already in traversal order.
    #[must_use]
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}

/// A statement or declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `import x from "y"`, `import "y"`, `import x = require("y")`.
    Import(ImportDeclaration),
    /// An expression used as a statement, e.g. `require("y");`.
    Expression(ExpressionStatement),
    /// `const`/`let`/`var` declarations.
    Variable(VariableDeclaration),
    /// Any other statement kind.
    Other(OtherStatement),
}

impl Statement {
    /// Returns the span covering the whole statement.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Import(s) => s.span,
            Self::Expression(s) => s.span,
            Self::Variable(s) => s.span,
            Self::Other(s) => s.span,
        }
    }
}

/// A static import declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDeclaration {
    /// The module source string, when the front end could read one.
    pub source: Option<String>,
    /// Statement span.
    pub span: Span,
}

/// An expression statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionStatement {
    /// The wrapped expression.
    pub expression: Expr,
    /// Statement span.
    pub span: Span,
}

/// A variable declaration with one or more declarators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDeclaration {
    /// Declarators in source order.
    pub declarations: Vec<Declarator>,
    /// Module source associated with the declaration as a whole.
    ///
    /// Front ends set this to the first string-literal argument of a
    /// `require(...)` or `import(...)` initializer among the declarators.
    pub source: Option<String>,
    /// Statement span.
    pub span: Span,
}

/// A single `name = init` binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declarator {
    /// Initializer expression, if any.
    pub init: Option<Expr>,
}

/// A statement kind rules don't distinguish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherStatement {
    /// Front-end node kind, kept for debugging.
    pub kind: String,
    /// Statement span.
    pub span: Span,
}

/// Expression shapes relevant to module loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A call, including dynamic `import(...)`.
    Call(CallExpr),
    /// An arrow function with an expression body.
    Arrow(ArrowFunction),
    /// A string literal (or substitution-free template string).
    String(String),
    /// Anything else.
    Other,
}

/// A call expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpr {
    /// What is being called.
    pub callee: Callee,
    /// Arguments in source order.
    pub arguments: Vec<Expr>,
}

impl CallExpr {
    /// Returns the callee name when it is a bare identifier.
    #[must_use]
    pub fn callee_name(&self) -> Option<&str> {
        match &self.callee {
            Callee::Identifier(name) => Some(name),
            Callee::Other => None,
        }
    }

    /// Returns true if the callee is the bare identifier `name`.
    #[must_use]
    pub fn calls(&self, name: &str) -> bool {
        self.callee_name() == Some(name)
    }

    /// Returns the call's source string: its first argument, when that is a
    /// string literal.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        match self.arguments.first() {
            Some(Expr::String(s)) => Some(s),
            _ => None,
        }
    }
}

/// Callee of a call expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callee {
    /// A bare identifier such as `require`, `lazy`, or the `import` keyword.
    Identifier(String),
    /// Member expressions, calls, and everything else.
    Other,
}

/// An arrow function whose body is a single expression.
///
/// Arrow functions with block bodies lower to [`Expr::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrowFunction {
    /// The body expression.
    pub body: Box<Expr>,
}
