//! Parser module

mod parser;

pub use parser::{ParseResult, Parser};

use crate::frontend::ast::FunctionDecl;
use crate::frontend::lexer::Token;

/// Parse a lexed token vector into the program's single function
pub fn parse_function(tokens: Vec<Token>) -> ParseResult<FunctionDecl> {
    Parser::new(tokens).parse_function()
}
