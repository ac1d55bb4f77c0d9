//! Recursive descent parser

use crate::frontend::ast::*;
use crate::common::{ParseError, Span};
use crate::frontend::lexer::{Token, TokenKind};

pub type ParseResult<T> = Result<T, ParseError>;

/// Deepest nesting of statements, parenthesized expressions and operator
/// chains the parser accepts. Later stages recurse over the tree, so this
/// also bounds their stack use.
const MAX_NESTING_DEPTH: usize = 128;

/// Recursive descent parser over a lexed token vector.
///
/// Looks at the current token and the one just consumed, nothing else.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    depth: usize,
}

impl Parser {
    /// Create a parser for `tokens`.
    ///
    /// The vector is expected to end with `EndOfInput` as produced by the
    /// lexer; one is appended if it does not, placed just past the last
    /// token.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::EndOfInput) {
            let end = tokens.last().map_or(0, |t| t.span.end);
            let location = tokens.last().map(Token::end_location).unwrap_or_default();
            tokens.push(Token::new(TokenKind::EndOfInput, "", Span::new(end, end), location));
        }
        Self { tokens, current: 0, depth: 0 }
    }

    /// Parse `function := 'int' IDENT '(' ')' block` followed by end of input
    pub fn parse_function(&mut self) -> ParseResult<FunctionDecl> {
        let start_span = self.peek().span;
        self.depth = 0;

        self.expect(TokenKind::Int, "before function declaration")?;
        let name = self.expect(TokenKind::Identifier, "as function name")?.text;
        self.expect(TokenKind::LParen, "after function name")?;
        self.expect(TokenKind::RParen, "after parameters")?;

        let body = self.parse_block()?;

        if !self.at_end() {
            return Err(self.error_at_current("expected end of input after function body"));
        }

        let span = start_span.merge(body.span);
        log::debug!("parsed function '{}' ({} statements)", name, body.statements.len());
        Ok(FunctionDecl::new(name, Vec::new(), body, span))
    }

    // =========================================================================
    // Helper methods
    // =========================================================================

    /// Current token; `EndOfInput` once the cursor runs past the end
    fn peek(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.current.min(last)]
    }

    /// Token consumed by the last `advance`
    fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1).min(self.tokens.len() - 1)]
    }

    fn at_end(&self) -> bool {
        self.peek().kind == TokenKind::EndOfInput
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.at_end() {
            self.current += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, context: &str) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            let expected = if context.is_empty() {
                format!("expected {}", kind)
            } else {
                format!("expected {} {}", kind, context)
            };
            Err(self.error_at_current(&expected))
        }
    }

    fn error_at_current(&self, expected: &str) -> ParseError {
        let found = self.peek();
        ParseError::new(
            format!("{}, found {}", expected, found),
            found.location(),
            found.span,
        )
    }

    /// Go one nesting level deeper, failing past `MAX_NESTING_DEPTH`
    fn enter_nested(&mut self, what: &str) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            let token = self.peek();
            return Err(ParseError::new(
                format!("{} nested too deeply", what),
                token.location(),
                token.span,
            ));
        }
        Ok(())
    }

    fn leave_nested(&mut self, levels: usize) {
        self.depth -= levels;
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn parse_block(&mut self) -> ParseResult<Block> {
        let start_span = self.peek().span;
        self.expect(TokenKind::LBrace, "to open block")?;

        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.at_end() {
            statements.push(self.parse_statement()?);
        }

        self.expect(TokenKind::RBrace, "to close block")?;
        let span = start_span.merge(self.previous().span);

        Ok(Block::new(statements, span))
    }

    fn parse_statement(&mut self) -> ParseResult<Stmt> {
        self.enter_nested("statement")?;
        let stmt = self.parse_statement_kind()?;
        self.leave_nested(1);
        Ok(stmt)
    }

    fn parse_statement_kind(&mut self) -> ParseResult<Stmt> {
        match self.peek().kind {
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::If => self.parse_if_statement(),
            TokenKind::Int => self.parse_var_declaration(),
            TokenKind::LBrace => {
                let block = self.parse_block()?;
                let span = block.span;
                Ok(Stmt::new(StmtKind::Block(block), span))
            }
            _ => Err(self.error_at_current("expected statement")),
        }
    }

    fn parse_return_statement(&mut self) -> ParseResult<Stmt> {
        let start_span = self.peek().span;
        self.expect(TokenKind::Return, "")?;

        let value = self.parse_expression()?;

        self.expect(TokenKind::Semi, "after return value")?;
        let span = start_span.merge(self.previous().span);

        Ok(Stmt::new(StmtKind::Return(value), span))
    }

    fn parse_if_statement(&mut self) -> ParseResult<Stmt> {
        let start_span = self.peek().span;
        self.expect(TokenKind::If, "")?;
        self.expect(TokenKind::LParen, "after 'if'")?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen, "after if condition")?;

        let then_branch = Box::new(self.parse_statement()?);

        let else_branch = if self.match_token(TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        let span = start_span.merge(self.previous().span);
        Ok(Stmt::new(
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            },
            span,
        ))
    }

    fn parse_var_declaration(&mut self) -> ParseResult<Stmt> {
        let start_span = self.peek().span;
        self.expect(TokenKind::Int, "")?;
        let name = self.expect(TokenKind::Identifier, "as variable name")?.text;
        self.expect(TokenKind::Assign, "after variable name")?;
        let initializer = self.parse_expression()?;
        self.expect(TokenKind::Semi, "after variable declaration")?;

        let span = start_span.merge(self.previous().span);
        Ok(Stmt::new(StmtKind::VarDecl { name, initializer }, span))
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_term()?;
        let mut folds = 0;

        // each fold makes the left operand one level deeper
        while let Some(op) = comparison_op(self.peek().kind) {
            self.advance();
            self.enter_nested("expression")?;
            folds += 1;
            let right = self.parse_term()?;
            expr = Expr::binary(op, expr, right);
        }

        self.leave_nested(folds);
        Ok(expr)
    }

    fn parse_term(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_factor()?;
        let mut folds = 0;

        while let Some(op) = term_op(self.peek().kind) {
            self.advance();
            self.enter_nested("expression")?;
            folds += 1;
            let right = self.parse_factor()?;
            expr = Expr::binary(op, expr, right);
        }

        self.leave_nested(folds);
        Ok(expr)
    }

    fn parse_factor(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_primary()?;
        let mut folds = 0;

        while let Some(op) = factor_op(self.peek().kind) {
            self.advance();
            self.enter_nested("expression")?;
            folds += 1;
            let right = self.parse_primary()?;
            expr = Expr::binary(op, expr, right);
        }

        self.leave_nested(folds);
        Ok(expr)
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let span = self.peek().span;

        match self.peek().kind {
            TokenKind::Number => {
                let value = self.parse_number_literal()?;
                self.advance();
                Ok(Expr::new(ExprKind::Number(value), span))
            }
            TokenKind::Identifier => {
                let name = self.advance().text;
                Ok(Expr::new(ExprKind::Identifier(name), span))
            }
            TokenKind::LParen => {
                self.advance();
                self.enter_nested("expression")?;
                let mut expr = self.parse_expression()?;
                self.leave_nested(1);
                self.expect(TokenKind::RParen, "after expression")?;
                expr.span = span.merge(self.previous().span);
                Ok(expr)
            }
            _ => Err(self.error_at_current("expected expression")),
        }
    }

    // =========================================================================
    // Literal parsing helpers
    // =========================================================================

    fn parse_number_literal(&self) -> ParseResult<f64> {
        let token = self.peek();
        token.text.parse().map_err(|_| {
            ParseError::new(
                format!("invalid number literal '{}'", token.text),
                token.location(),
                token.span,
            )
        })
    }
}

fn comparison_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Greater => Some(BinaryOp::Gt),
        TokenKind::GreaterEqual => Some(BinaryOp::Ge),
        TokenKind::Less => Some(BinaryOp::Lt),
        TokenKind::LessEqual => Some(BinaryOp::Le),
        TokenKind::EqualEqual => Some(BinaryOp::Eq),
        TokenKind::NotEqual => Some(BinaryOp::Ne),
        _ => None,
    }
}

fn term_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        _ => None,
    }
}

fn factor_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Location;
    use crate::frontend::lexer::tokenize;

    fn parse(source: &str) -> ParseResult<FunctionDecl> {
        Parser::new(tokenize(source).unwrap()).parse_function()
    }

    /// Parse `expr` as the value of a return statement
    fn parse_expr(expr: &str) -> Expr {
        let func = parse(&format!("int main() {{ return {}; }}", expr)).unwrap();
        match func.body.statements.into_iter().next().map(|s| s.kind) {
            Some(StmtKind::Return(value)) => value,
            other => panic!("expected return statement, got {:?}", other),
        }
    }

    /// Compact prefix rendering: (+ 1 (* 2 3))
    fn sexpr(expr: &Expr) -> String {
        match &expr.kind {
            ExprKind::Binary { op, left, right } => {
                format!("({} {} {})", op, sexpr(left), sexpr(right))
            }
            ExprKind::Number(v) => v.to_string(),
            ExprKind::Identifier(name) => name.clone(),
        }
    }

    #[test]
    fn test_parse_simple_function() {
        let func = parse("int main() { return 0; }").unwrap();

        assert_eq!(func.name, "main");
        assert!(func.parameters.is_empty());
        assert_eq!(func.body.statements.len(), 1);
        assert!(matches!(
            func.body.statements[0].kind,
            StmtKind::Return(Expr { kind: ExprKind::Number(v), .. }) if v == 0.0
        ));
    }

    #[test]
    fn test_parse_variable_declaration() {
        let func = parse("int main() { int x = 42; return x; }").unwrap();

        if let StmtKind::VarDecl { name, initializer } = &func.body.statements[0].kind {
            assert_eq!(name, "x");
            assert_eq!(initializer.kind, ExprKind::Number(42.0));
        } else {
            panic!("expected variable declaration");
        }
    }

    #[test]
    fn test_precedence() {
        assert_eq!(sexpr(&parse_expr("1 + 2 * 3")), "(+ 1 (* 2 3))");
        assert_eq!(sexpr(&parse_expr("1 * 2 + 3")), "(+ (* 1 2) 3)");
        assert_eq!(sexpr(&parse_expr("a + b < c * d")), "(< (+ a b) (* c d))");
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(sexpr(&parse_expr("10 - 3 - 2")), "(- (- 10 3) 2)");
        assert_eq!(sexpr(&parse_expr("8 / 4 / 2")), "(/ (/ 8 4) 2)");
        assert_eq!(sexpr(&parse_expr("a == b != c")), "(!= (== a b) c)");
    }

    #[test]
    fn test_parentheses_override_precedence() {
        assert_eq!(sexpr(&parse_expr("(1 + 2) * 3")), "(* (+ 1 2) 3)");
        assert_eq!(sexpr(&parse_expr("10 - (3 - 2)")), "(- 10 (- 3 2))");
    }

    #[test]
    fn test_parse_if_without_else() {
        let func = parse("int main() { if (x > 0) { return 1; } return 0; }").unwrap();

        assert_eq!(func.body.statements.len(), 2);
        if let StmtKind::If { condition, then_branch, else_branch } = &func.body.statements[0].kind {
            assert_eq!(sexpr(condition), "(> x 0)");
            assert!(matches!(then_branch.kind, StmtKind::Block(_)));
            assert!(else_branch.is_none());
        } else {
            panic!("expected if statement");
        }
    }

    #[test]
    fn test_parse_if_else_chain() {
        let func = parse("int main() { if (a) return 1; else if (b) return 2; else return 3; }").unwrap();

        if let StmtKind::If { else_branch: Some(else_branch), .. } = &func.body.statements[0].kind {
            assert!(matches!(
                else_branch.kind,
                StmtKind::If { else_branch: Some(_), .. }
            ));
        } else {
            panic!("expected if/else statement");
        }
    }

    #[test]
    fn test_parse_nested_block() {
        let func = parse("int main() { { int y = 1; { } } return 0; }").unwrap();

        if let StmtKind::Block(inner) = &func.body.statements[0].kind {
            assert_eq!(inner.statements.len(), 2);
            assert!(matches!(&inner.statements[1].kind, StmtKind::Block(b) if b.statements.is_empty()));
        } else {
            panic!("expected nested block");
        }
    }

    #[test]
    fn test_missing_semicolon() {
        let err = parse("int main() {\n  return 1\n}").unwrap_err();
        assert_eq!(err.message, "expected ';' after return value, found '}'");
        assert_eq!(err.location, Location::new(3, 1));
    }

    #[test]
    fn test_missing_function_name() {
        let err = parse("int () { return 0; }").unwrap_err();
        assert_eq!(err.message, "expected identifier as function name, found '('");
        assert_eq!(err.location, Location::new(1, 5));
    }

    #[test]
    fn test_unexpected_statement() {
        let err = parse("int main() { x = 1; }").unwrap_err();
        assert_eq!(err.message, "expected statement, found identifier 'x'");
        assert_eq!(err.location, Location::new(1, 14));
    }

    #[test]
    fn test_missing_expression() {
        let err = parse("int main() { return ; }").unwrap_err();
        assert_eq!(err.message, "expected expression, found ';'");
    }

    #[test]
    fn test_unterminated_block() {
        let err = parse("int main() { return 0;").unwrap_err();
        assert_eq!(err.message, "expected '}' to close block, found end of input");
    }

    #[test]
    fn test_trailing_tokens() {
        let err = parse("int main() { return 0; } int").unwrap_err();
        assert_eq!(err.message, "expected end of input after function body, found 'int'");
    }

    #[test]
    fn test_reserved_words_are_not_identifiers() {
        let err = parse("int main() { int while = 1; return 0; }").unwrap_err();
        assert_eq!(err.message, "expected identifier as variable name, found 'while'");
    }

    #[test]
    fn test_malformed_number_fails_at_parse() {
        let err = parse("int main() { return 1.2.3; }").unwrap_err();
        assert_eq!(err.message, "invalid number literal '1.2.3'");
        assert_eq!(err.location, Location::new(1, 21));
    }

    #[test]
    fn test_spans_cover_source() {
        let source = "int main() { int x = 1 + 2; }";
        let func = parse(source).unwrap();
        assert_eq!(func.span, Span::new(0, source.len()));

        let decl = &func.body.statements[0];
        assert_eq!(&source[decl.span.start..decl.span.end], "int x = 1 + 2;");
        if let StmtKind::VarDecl { initializer, .. } = &decl.kind {
            assert_eq!(&source[initializer.span.start..initializer.span.end], "1 + 2");
        }
    }

    #[test]
    fn test_node_count_bounded_by_tokens() {
        let sources = [
            "int main() { return 0; }",
            "int main() { int x = (1 + 2) * 3; if (x >= 9) { return x; } else return 0; }",
            "int f() { { { } } if (a) if (b) return c; return a - b - c; }",
        ];
        for source in sources {
            let tokens = tokenize(source).unwrap();
            let count = tokens.len();
            let func = Parser::new(tokens).parse_function().unwrap();
            assert!(func.node_count() <= count, "{}", source);
        }
    }

    #[test]
    fn test_missing_end_of_input_is_supplied() {
        let mut tokens = tokenize("int main() { return 0; }").unwrap();
        tokens.pop();
        assert!(Parser::new(tokens).parse_function().is_ok());
    }

    #[test]
    fn test_supplied_end_of_input_sits_past_last_token() {
        let mut tokens = tokenize("int main() {\n  return 0;").unwrap();
        tokens.pop();
        let err = Parser::new(tokens).parse_function().unwrap_err();
        assert_eq!(err.message, "expected '}' to close block, found end of input");
        assert_eq!(err.location, Location::new(2, 12));

        let mut tokens = tokenize("int main() { return abc").unwrap();
        tokens.pop();
        let err = Parser::new(tokens).parse_function().unwrap_err();
        assert_eq!(err.message, "expected ';' after return value, found end of input");
        assert_eq!(err.location, Location::new(1, 24));
        assert_eq!(err.span, Span::new(23, 23));
    }

    fn nested_parens(levels: usize) -> String {
        format!("int main() {{ return {}1{}; }}", "(".repeat(levels), ")".repeat(levels))
    }

    #[test]
    fn test_nesting_within_limit() {
        assert!(parse(&nested_parens(100)).is_ok());

        let chain = ["1"; 100].join(" + ");
        assert!(parse(&format!("int main() {{ return {}; }}", chain)).is_ok());
    }

    #[test]
    fn test_deep_parentheses_are_rejected() {
        let err = parse(&nested_parens(500)).unwrap_err();
        assert_eq!(err.message, "expression nested too deeply");
        // the 129th '(' is the first one past the limit
        assert_eq!(err.location, Location::new(1, 149));
    }

    #[test]
    fn test_long_operator_chain_is_rejected() {
        let chain = ["x"; 1000].join(" - ");
        let err = parse(&format!("int main() {{ return {}; }}", chain)).unwrap_err();
        assert_eq!(err.message, "expression nested too deeply");
    }

    #[test]
    fn test_deep_statements_are_rejected() {
        let blocks = format!("int main() {{ {}{}}}", "{ ".repeat(500), "} ".repeat(500));
        assert_eq!(parse(&blocks).unwrap_err().message, "statement nested too deeply");

        let ifs = format!("int main() {{ {}return 0; }}", "if (a) ".repeat(500));
        assert_eq!(parse(&ifs).unwrap_err().message, "statement nested too deeply");
    }
}
