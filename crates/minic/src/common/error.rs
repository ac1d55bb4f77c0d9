//! Error types and diagnostic reporting

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{Buffer, ColorChoice, StandardStream, WriteColor};
use thiserror::Error;
use super::{Location, Span};

/// Character the lexer has no rule for
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unexpected character '{character}' at {location}")]
pub struct LexError {
    pub character: char,
    pub location: Location,
    pub span: Span,
}

impl LexError {
    pub fn new(character: char, location: Location, span: Span) -> Self {
        Self { character, location, span }
    }
}

/// Token that does not fit the grammar at the current position
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at {location}")]
pub struct ParseError {
    pub message: String,
    pub location: Location,
    pub span: Span,
}

impl ParseError {
    pub fn new(message: impl Into<String>, location: Location, span: Span) -> Self {
        Self {
            message: message.into(),
            location,
            span,
        }
    }
}

/// Scope rule violated by a well-formed program
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SemanticError {
    #[error("variable '{name}' is already declared in this scope")]
    DuplicateDeclaration { name: String, span: Span },

    #[error("use of undeclared variable '{name}'")]
    UndeclaredVariable { name: String, span: Span },

    #[error("use of uninitialized variable '{name}'")]
    UninitializedVariable { name: String, span: Span },
}

/// Fieldless discriminant of [`SemanticError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticErrorKind {
    DuplicateDeclaration,
    UndeclaredVariable,
    UninitializedVariable,
}

impl SemanticError {
    pub fn kind(&self) -> SemanticErrorKind {
        match self {
            SemanticError::DuplicateDeclaration { .. } => SemanticErrorKind::DuplicateDeclaration,
            SemanticError::UndeclaredVariable { .. } => SemanticErrorKind::UndeclaredVariable,
            SemanticError::UninitializedVariable { .. } => SemanticErrorKind::UninitializedVariable,
        }
    }

    /// The offending identifier
    pub fn name(&self) -> &str {
        match self {
            SemanticError::DuplicateDeclaration { name, .. }
            | SemanticError::UndeclaredVariable { name, .. }
            | SemanticError::UninitializedVariable { name, .. } => name,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            SemanticError::DuplicateDeclaration { span, .. }
            | SemanticError::UndeclaredVariable { span, .. }
            | SemanticError::UninitializedVariable { span, .. } => *span,
        }
    }
}

/// Compile error from any stage of the front end
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Lexer error: {0}")]
    Lexer(#[from] LexError),

    #[error("Parser error: {0}")]
    Parser(#[from] ParseError),

    #[error("Semantic error: {0}")]
    Semantic(#[from] SemanticError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompileError {
    /// Source range the error points at, if any
    pub fn span(&self) -> Option<Span> {
        match self {
            CompileError::Lexer(e) => Some(e.span),
            CompileError::Parser(e) => Some(e.span),
            CompileError::Semantic(e) => Some(e.span()),
            CompileError::Io(_) => None,
        }
    }
}

pub type CompileResult<T> = Result<T, CompileError>;

/// Diagnostic reporter for pretty error output
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            config: term::Config::default(),
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        self.files.add(name.into(), source.into())
    }

    fn diagnostic(file_id: usize, error: &CompileError) -> Diagnostic<usize> {
        match error {
            CompileError::Lexer(e) => Diagnostic::error()
                .with_message("Lexer error")
                .with_labels(vec![
                    Label::primary(file_id, e.span).with_message(e.to_string())
                ]),

            CompileError::Parser(e) => Diagnostic::error()
                .with_message("Syntax error")
                .with_labels(vec![
                    Label::primary(file_id, e.span).with_message(e.message.clone())
                ]),

            CompileError::Semantic(e) => Diagnostic::error()
                .with_message("Semantic error")
                .with_labels(vec![
                    Label::primary(file_id, e.span()).with_message(e.to_string())
                ]),

            CompileError::Io(err) => {
                Diagnostic::error().with_message(format!("IO error: {}", err))
            }
        }
    }

    /// Write the diagnostic for `error` to `writer`
    pub fn emit(
        &self,
        writer: &mut dyn WriteColor,
        file_id: usize,
        error: &CompileError,
    ) -> Result<(), codespan_reporting::files::Error> {
        let diagnostic = Self::diagnostic(file_id, error);
        term::emit(writer, &self.config, &self.files, &diagnostic)
    }

    /// Report an error on stderr
    pub fn report_error(&self, file_id: usize, error: &CompileError) {
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let _ = self.emit(&mut writer.lock(), file_id, error);
    }

    /// Render an error without colors, for logs and tests
    pub fn render(&self, file_id: usize, error: &CompileError) -> String {
        let mut buffer = Buffer::no_color();
        let _ = self.emit(&mut buffer, file_id, error);
        String::from_utf8_lossy(buffer.as_slice()).into_owned()
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}
