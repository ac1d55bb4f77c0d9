//! Common infrastructure shared by every stage of the front end

mod error;
mod span;

pub use error::{
    CompileError, CompileResult, DiagnosticReporter, LexError, ParseError, SemanticError,
    SemanticErrorKind,
};
pub use span::{LineIndex, Location, Span};
