//! Language front end
//!
//! The front end is responsible for:
//! 1. Lexing source code into tokens
//! 2. Parsing tokens into an AST
//! 3. Performing semantic analysis
//!
//! Each stage consumes the previous stage's whole output and fails with the
//! first error it finds.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod sema;

pub use ast::FunctionDecl;
pub use lexer::{Lexer, Token, TokenKind, tokenize};
pub use parser::{Parser, parse_function};
pub use sema::{SemanticAnalyzer, analyze};
