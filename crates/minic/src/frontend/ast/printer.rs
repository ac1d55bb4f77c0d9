//! Labeled, indented rendering of the AST

use std::fmt::Write;

use super::{Block, Expr, ExprKind, FunctionDecl, Stmt, StmtKind};

const INDENT: &str = "  ";

/// Render a function and everything under it, one node per line
pub fn dump_function(func: &FunctionDecl) -> String {
    let mut printer = TreePrinter::default();
    printer.function(func);
    printer.out
}

#[derive(Default)]
struct TreePrinter {
    out: String,
    depth: usize,
}

impl TreePrinter {
    fn line(&mut self, label: std::fmt::Arguments<'_>) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        // Writing into a String cannot fail
        let _ = self.out.write_fmt(label);
        self.out.push('\n');
    }

    fn nested(&mut self, f: impl FnOnce(&mut Self)) {
        self.depth += 1;
        f(self);
        self.depth -= 1;
    }

    fn function(&mut self, func: &FunctionDecl) {
        self.line(format_args!("FunctionDecl {}({})", func.name, func.parameters.join(", ")));
        self.nested(|p| p.block(&func.body));
    }

    fn block(&mut self, block: &Block) {
        self.line(format_args!("Block"));
        self.nested(|p| {
            for stmt in &block.statements {
                p.stmt(stmt);
            }
        });
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::VarDecl { name, initializer } => {
                self.line(format_args!("VarDecl {}", name));
                self.nested(|p| p.expr(initializer));
            }
            StmtKind::Return(value) => {
                self.line(format_args!("Return"));
                self.nested(|p| p.expr(value));
            }
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.line(format_args!("If"));
                self.nested(|p| {
                    p.line(format_args!("Condition"));
                    p.nested(|p| p.expr(condition));
                    p.line(format_args!("Then"));
                    p.nested(|p| p.stmt(then_branch));
                    if let Some(else_branch) = else_branch {
                        p.line(format_args!("Else"));
                        p.nested(|p| p.stmt(else_branch));
                    }
                });
            }
            StmtKind::Block(block) => self.block(block),
        }
    }

    fn expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Binary { op, left, right } => {
                self.line(format_args!("BinaryExpr {}", op));
                self.nested(|p| {
                    p.expr(left);
                    p.expr(right);
                });
            }
            ExprKind::Number(value) => self.line(format_args!("Number {}", value)),
            ExprKind::Identifier(name) => self.line(format_args!("Identifier {}", name)),
        }
    }
}
