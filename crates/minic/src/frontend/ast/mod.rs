//! Abstract Syntax Tree definitions

mod expr;
mod stmt;
pub mod printer;

pub use expr::*;
pub use stmt::*;

use crate::common::Span;

/// Function definition, the root of every program
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    /// Always empty for now; the grammar has no parameter list syntax
    pub parameters: Vec<String>,
    pub body: Block,
    pub span: Span,
}

impl FunctionDecl {
    pub fn new(name: impl Into<String>, parameters: Vec<String>, body: Block, span: Span) -> Self {
        Self {
            name: name.into(),
            parameters,
            body,
            span,
        }
    }

    /// Total number of AST nodes in the tree
    pub fn node_count(&self) -> usize {
        1 + self.body.node_count()
    }
}
