//! Statement AST nodes

use super::Expr;
use crate::common::Span;

/// Statement node
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn node_count(&self) -> usize {
        match &self.kind {
            StmtKind::VarDecl { initializer, .. } => 1 + initializer.node_count(),
            StmtKind::Return(value) => 1 + value.node_count(),
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                1 + condition.node_count()
                    + then_branch.node_count()
                    + else_branch.as_ref().map_or(0, |s| s.node_count())
            }
            StmtKind::Block(block) => block.node_count(),
        }
    }
}

/// Statement kinds
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// Variable declaration: int name = initializer;
    VarDecl {
        name: String,
        initializer: Expr,
    },

    /// Return statement: return expr;
    Return(Expr),

    /// If statement: if (cond) then [else else]
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },

    /// Nested block: { ... }
    Block(Block),
}

/// Block (compound statement)
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

impl Block {
    pub fn new(statements: Vec<Stmt>, span: Span) -> Self {
        Self { statements, span }
    }

    pub fn node_count(&self) -> usize {
        1 + self.statements.iter().map(Stmt::node_count).sum::<usize>()
    }
}
