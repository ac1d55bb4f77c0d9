//! Compilation driver and pipeline orchestration

use std::fmt::Write;

use crate::common::{CompileResult, DiagnosticReporter};
use crate::frontend::ast::{printer, FunctionDecl};
use crate::frontend::lexer::{self, Token};
use crate::frontend::{parser, sema};

/// Configuration options for a front end run
#[derive(Debug, Clone, Default)]
pub struct FrontendConfig {
    pub dump_tokens: bool,
    pub dump_ast: bool,
}

/// Compilation context providing access to diagnostics and file info
pub struct CompileContext<'a> {
    pub filename: String,
    pub file_id: usize,
    pub reporter: &'a DiagnosticReporter,
}

impl<'a> CompileContext<'a> {
    pub fn new(filename: String, file_id: usize, reporter: &'a DiagnosticReporter) -> Self {
        Self { filename, file_id, reporter }
    }
}

/// Output of a successful run: the tokens and the validated AST
#[derive(Debug, Clone)]
pub struct CheckedProgram {
    pub tokens: Vec<Token>,
    pub function: FunctionDecl,
    /// Present when `dump_tokens` was requested
    pub token_dump: Option<String>,
    /// Present when `dump_ast` was requested
    pub ast_dump: Option<String>,
}

/// Run lexer, parser and semantic analyzer over `source`
pub fn compile_source(source: &str, config: &FrontendConfig) -> CompileResult<CheckedProgram> {
    // Phase 1: Lexing
    log::debug!("lexing {} bytes", source.len());
    let tokens = lexer::tokenize(source)?;

    let token_dump = config.dump_tokens.then(|| dump_tokens(&tokens));
    if let Some(dump) = &token_dump {
        log::info!("tokens:\n{}", dump);
    }

    // Phase 2: Parsing
    log::debug!("parsing {} tokens", tokens.len());
    let function = parser::parse_function(tokens.clone())?;

    let ast_dump = config.dump_ast.then(|| printer::dump_function(&function));
    if let Some(dump) = &ast_dump {
        log::info!("ast:\n{}", dump);
    }

    // Phase 3: Semantic Analysis
    log::debug!("analyzing function '{}'", function.name);
    sema::analyze(&function)?;

    Ok(CheckedProgram {
        tokens,
        function,
        token_dump,
        ast_dump,
    })
}

/// Like [`compile_source`], reporting any error through the context's reporter
pub fn compile(
    source: &str,
    ctx: &CompileContext,
    config: &FrontendConfig,
) -> CompileResult<CheckedProgram> {
    compile_source(source, config).inspect_err(|e| {
        log::debug!("{}: {}", ctx.filename, e);
        ctx.reporter.report_error(ctx.file_id, e);
    })
}

/// One line per token: kind, text and position
pub fn dump_tokens(tokens: &[Token]) -> String {
    let mut output = String::new();
    for token in tokens {
        let _ = writeln!(
            output,
            "Token: {} | Value: '{}' | Line: {} | Column: {}",
            token.kind.name(),
            token.text,
            token.line,
            token.column
        );
    }
    output
}
