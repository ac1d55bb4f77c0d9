//! minic - front end for a minimal C-like language
//!
//! The language has integer variables, arithmetic and comparison
//! expressions, `if`/`else`, `return` and nested blocks, all inside a single
//! `int name() { ... }` function.
//!
//! ## Architecture
//!
//! - **Frontend** (`frontend/`): lexer, recursive descent parser, AST and
//!   scope-aware semantic analysis
//! - **Driver** (`driver/`): runs the stages in order and reports errors
//! - **Common** (`common/`): spans, locations, error types and diagnostics
//!
//! ```
//! let tokens = minic::tokenize("int main() { int x = 1; return x + 2; }")?;
//! let function = minic::parse_function(tokens)?;
//! minic::analyze(&function)?;
//! assert_eq!(function.name, "main");
//! # Ok::<(), minic::CompileError>(())
//! ```

pub mod common;
pub mod frontend;
pub mod driver;

// Re-exports for convenience
pub use common::{
    CompileError, CompileResult, DiagnosticReporter, LexError, Location, ParseError,
    SemanticError, SemanticErrorKind, Span,
};
pub use frontend::ast::{self, BinaryOp, Block, Expr, ExprKind, FunctionDecl, Stmt, StmtKind};
pub use frontend::{analyze, parse_function, tokenize, Token, TokenKind};
pub use driver::{compile_source, CheckedProgram, CompileContext, FrontendConfig};
