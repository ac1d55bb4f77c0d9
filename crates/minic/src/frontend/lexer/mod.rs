//! Lexer module for tokenizing minic source code

mod token;
mod scanner;

pub use token::{Token, TokenKind};
pub use scanner::Lexer;

use crate::common::LexError;

/// Tokenize `source` into a token vector terminated by one `EndOfInput`
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize_all()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_is_deterministic() {
        let source = "int main() {\n  int x = 42;\n  if (x >= 1) { return x * 2; }\n  return 0;\n}\n";
        let first = tokenize(source).unwrap();
        let second = tokenize(source).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_end_of_input() {
        let tokens = tokenize("return 1;").unwrap();
        let eofs = tokens.iter().filter(|t| t.kind == TokenKind::EndOfInput).count();
        assert_eq!(eofs, 1);
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EndOfInput));
    }
}
