//! Semantic analyzer - declaration and initialization checks

use crate::frontend::ast::*;
use crate::common::{SemanticError, Span};
use super::scope::{Scope, VarState};

pub type SemaResult<T> = Result<T, SemanticError>;

/// Walks a function checking that every variable is declared once per scope
/// and declared and initialized before use.
///
/// The AST is only read. The first violation in traversal order is returned.
pub struct SemanticAnalyzer {
    scope: Scope,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self {
            scope: Scope::new(),
        }
    }

    /// Analyze a function definition
    pub fn analyze(&mut self, func: &FunctionDecl) -> SemaResult<()> {
        let base_depth = self.scope.depth();
        let result = self.analyze_function(func);
        // Leave the root frame as it was, even after an error
        self.scope.truncate(base_depth);

        if result.is_ok() {
            log::debug!("function '{}' passed semantic analysis", func.name);
        }
        result
    }

    fn analyze_function(&mut self, func: &FunctionDecl) -> SemaResult<()> {
        self.with_child_scope(|this| {
            for param in &func.parameters {
                this.declare(param, func.span)?;
                this.scope.initialize(param);
            }
            this.analyze_block(&func.body)
        })
    }

    /// Run `f` inside a fresh child scope, popping it whatever `f` returns
    fn with_child_scope<T>(&mut self, f: impl FnOnce(&mut Self) -> SemaResult<T>) -> SemaResult<T> {
        self.scope.push_child();
        let result = f(self);
        self.scope.pop_to_parent();
        result
    }

    fn declare(&mut self, name: &str, span: Span) -> SemaResult<()> {
        if self.scope.declare(name) {
            Ok(())
        } else {
            Err(SemanticError::DuplicateDeclaration {
                name: name.to_string(),
                span,
            })
        }
    }

    fn analyze_block(&mut self, block: &Block) -> SemaResult<()> {
        self.with_child_scope(|this| {
            for stmt in &block.statements {
                this.analyze_stmt(stmt)?;
            }
            Ok(())
        })
    }

    fn analyze_stmt(&mut self, stmt: &Stmt) -> SemaResult<()> {
        match &stmt.kind {
            StmtKind::VarDecl { name, initializer } => {
                self.declare(name, stmt.span)?;
                self.analyze_expr(initializer)?;
                self.scope.initialize(name);
            }
            StmtKind::Return(value) => {
                self.analyze_expr(value)?;
            }
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.analyze_expr(condition)?;
                self.with_child_scope(|this| this.analyze_stmt(then_branch))?;
                if let Some(else_branch) = else_branch {
                    self.with_child_scope(|this| this.analyze_stmt(else_branch))?;
                }
            }
            StmtKind::Block(block) => {
                self.analyze_block(block)?;
            }
        }
        Ok(())
    }

    fn analyze_expr(&mut self, expr: &Expr) -> SemaResult<()> {
        match &expr.kind {
            ExprKind::Binary { left, right, .. } => {
                self.analyze_expr(left)?;
                self.analyze_expr(right)?;
            }
            ExprKind::Number(_) => {}
            ExprKind::Identifier(name) => match self.scope.lookup(name) {
                None => {
                    return Err(SemanticError::UndeclaredVariable {
                        name: name.clone(),
                        span: expr.span,
                    });
                }
                Some(VarState::Declared) => {
                    return Err(SemanticError::UninitializedVariable {
                        name: name.clone(),
                        span: expr.span,
                    });
                }
                Some(VarState::Initialized) => {}
            },
        }
        Ok(())
    }
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
