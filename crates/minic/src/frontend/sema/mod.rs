//! Semantic analysis module
//!
//! This module checks declaration, initialization and scoping rules.

mod scope;
mod analyzer;

pub use scope::{Scope, VarState};
pub use analyzer::{SemaResult, SemanticAnalyzer};

use crate::frontend::ast::FunctionDecl;

/// Check a parsed function with a fresh analyzer
pub fn analyze(func: &FunctionDecl) -> SemaResult<()> {
    SemanticAnalyzer::new().analyze(func)
}
