use crate::ast::{self, Expression, Statement};
use crate::lexer::Lexer;
use crate::stack::ensure_sufficient_stack;
use crate::token::{Token, TokenType};
use custom_error::custom_error;
use std::rc::Rc;
use tracing::debug;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub ParseError

    UnexpectedToken{expected: TokenType, got: TokenType} = "expected next token to be {expected}, got {got} instead",
    NoPrefixParseFn{token: TokenType} = "no prefix parse function for {token} found",
    InvalidInteger{literal: String} = "could not parse {literal} as integer",
    NestingTooDeep{limit: usize} = "expression nested deeper than {limit} levels",
}

/// Deepest expression tree the parser will build.
pub const MAX_NESTING: usize = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
}

impl From<TokenType> for Precedence {
    fn from(token_type: TokenType) -> Self {
        match token_type {
            TokenType::Eq | TokenType::NotEq => Self::Equals,
            TokenType::LT | TokenType::GT | TokenType::LtEq | TokenType::GtEq => Self::LessGreater,
            TokenType::Plus | TokenType::Minus => Self::Sum,
            TokenType::Slash | TokenType::Asterisk => Self::Product,
            TokenType::LParen => Self::Call,
            TokenType::LBracket => Self::Index,
            _ => Self::Lowest,
        }
    }
}

type PrefixParseFn = fn(&mut Parser) -> Option<Expression>;
type InfixParseFn = fn(&mut Parser, Expression) -> Option<Expression>;

fn prefix_rule(token_type: TokenType) -> Option<PrefixParseFn> {
    let rule: PrefixParseFn = match token_type {
        TokenType::Ident => Parser::parse_identifier,
        TokenType::Int => Parser::parse_integer_literal,
        TokenType::String => Parser::parse_string_literal,
        TokenType::True | TokenType::False => Parser::parse_boolean,
        TokenType::Bang | TokenType::Minus => Parser::parse_prefix_expression,
        TokenType::LParen => Parser::parse_grouped_expression,
        TokenType::If => Parser::parse_if_expression,
        TokenType::Function => Parser::parse_function_literal,
        TokenType::LBracket => Parser::parse_array_literal,
        TokenType::LBrace => Parser::parse_hash_literal,
        _ => return None,
    };
    Some(rule)
}

fn infix_rule(token_type: TokenType) -> Option<InfixParseFn> {
    let rule: InfixParseFn = match token_type {
        TokenType::Plus
        | TokenType::Minus
        | TokenType::Slash
        | TokenType::Asterisk
        | TokenType::Eq
        | TokenType::NotEq
        | TokenType::LT
        | TokenType::GT
        | TokenType::LtEq
        | TokenType::GtEq => Parser::parse_infix_expression,
        TokenType::LParen => Parser::parse_call_expression,
        TokenType::LBracket => Parser::parse_index_expression,
        _ => return None,
    };
    Some(rule)
}

/// Parses a complete program, failing with every error the parser recorded.
pub fn parse(input: &str) -> Result<ast::Program, Vec<ParseError>> {
    let mut parser = Parser::new(Lexer::new(input.to_owned()));
    let program = parser.parse_program();
    if parser.errors.is_empty() {
        Ok(program)
    } else {
        Err(parser.errors)
    }
}

pub struct Parser {
    lexer: Lexer,
    cur_token: Token,
    peek_token: Token,
    errors: Vec<ParseError>,
    depth: usize,
    too_deep: bool,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Self {
        let cur_token = lexer.next_token();
        let peek_token = lexer.next_token();

        Self {
            lexer,
            cur_token,
            peek_token,
            errors: vec![],
            depth: 0,
            too_deep: false,
        }
    }

    /// Errors recorded so far. A program parsed alongside any of these
    /// must not be evaluated.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    fn next_token(&mut self) {
        self.cur_token = std::mem::replace(&mut self.peek_token, self.lexer.next_token());
    }

    pub fn parse_program(&mut self) -> ast::Program {
        let mut program = ast::Program::default();

        while !self.cur_token.is(TokenType::Eof) {
            if let Some(stmt) = self.parse_statement() {
                program.statements.push(stmt)
            }
            self.next_token();
        }

        program
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.cur_token.token_type() {
            TokenType::Let => self.parse_let_statement().map(Statement::Let),
            TokenType::Return => self.parse_return_statement().map(Statement::Return),
            _ => self.parse_expression_statement().map(Statement::Expr),
        }
    }

    fn parse_let_statement(&mut self) -> Option<ast::LetStatement> {
        if !self.expect_peek(TokenType::Ident) {
            return None;
        }

        let name: ast::Identifier = self.cur_token.literal().into();

        if !self.expect_peek(TokenType::Assign) {
            return None;
        }
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Some(ast::LetStatement { name, value })
    }

    fn parse_return_statement(&mut self) -> Option<ast::ReturnStatement> {
        self.next_token();

        let return_value = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Some(ast::ReturnStatement { return_value })
    }

    fn parse_expression_statement(&mut self) -> Option<ast::ExpressionStatement> {
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Some(ast::ExpressionStatement { expression })
    }

    fn skip_semicolon(&mut self) {
        if self.peek_token.is(TokenType::Semicolon) {
            self.next_token();
        }
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let depth = self.depth;
        let expression = ensure_sufficient_stack(|| self.parse_nested_expression(precedence));
        self.depth = depth;
        expression
    }

    fn parse_nested_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        if !self.descend() {
            return None;
        }

        let prefix = match prefix_rule(self.cur_token.token_type()) {
            Some(rule) => rule,
            None => {
                self.record(ParseError::NoPrefixParseFn {
                    token: self.cur_token.token_type(),
                });
                return None;
            }
        };
        let mut left = prefix(self)?;

        while !self.peek_token.is(TokenType::Semicolon) && precedence < self.peek_precedence() {
            let infix = match infix_rule(self.peek_token.token_type()) {
                Some(rule) => rule,
                None => return Some(left),
            };
            // Each fold puts `left` one level further down.
            if !self.descend() {
                return None;
            }
            self.next_token();
            left = infix(self, left)?;
        }

        Some(left)
    }

    // Once the limit is hit the rest of the input is skipped and no further
    // errors are recorded.
    fn descend(&mut self) -> bool {
        self.depth += 1;
        if self.depth <= MAX_NESTING {
            return true;
        }

        self.record(ParseError::NestingTooDeep { limit: MAX_NESTING });
        self.too_deep = true;
        while !self.peek_token.is(TokenType::Eof) {
            self.next_token();
        }
        false
    }

    fn parse_identifier(&mut self) -> Option<Expression> {
        Some(Expression::Identifier(self.cur_token.literal().into()))
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        let literal = self.cur_token.literal();
        match literal.parse() {
            Ok(value) => Some(Expression::IntegerLiteral(value)),
            Err(_) => {
                self.record(ParseError::InvalidInteger { literal });
                None
            }
        }
    }

    fn parse_string_literal(&mut self) -> Option<Expression> {
        Some(Expression::String(self.cur_token.literal().into()))
    }

    fn parse_boolean(&mut self) -> Option<Expression> {
        Some(Expression::Boolean(self.cur_token.is(TokenType::True).into()))
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let operator = ast::Operator::from_token(&self.cur_token)?;
        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;

        Some(Expression::Prefix(ast::PrefixExpression {
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let operator = ast::Operator::from_token(&self.cur_token)?;
        let precedence = self.cur_precedence();
        self.next_token();
        let right = self.parse_expression(precedence)?;

        Some(Expression::Infix(ast::InfixExpression {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();
        let expression = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenType::RParen) {
            return None;
        }
        Some(expression)
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        if !self.expect_peek(TokenType::LParen) {
            return None;
        }
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenType::RParen) || !self.expect_peek(TokenType::LBrace) {
            return None;
        }
        let consequence = self.parse_block_statement()?;

        let alternative = if self.peek_token.is(TokenType::Else) {
            self.next_token();
            if !self.expect_peek(TokenType::LBrace) {
                return None;
            }
            Some(self.parse_block_statement()?)
        } else {
            None
        };

        Some(Expression::If(ast::IfExpression {
            condition: Box::new(condition),
            consequence,
            alternative,
        }))
    }

    // Starts on `{` and finishes on the matching `}`.
    fn parse_block_statement(&mut self) -> Option<ast::BlockStatement> {
        let mut statements = vec![];
        self.next_token();

        while !self.cur_token.is(TokenType::RBrace) {
            if self.cur_token.is(TokenType::Eof) {
                self.record(ParseError::UnexpectedToken {
                    expected: TokenType::RBrace,
                    got: TokenType::Eof,
                });
                return None;
            }
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.next_token();
        }

        Some(statements.into())
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        if !self.expect_peek(TokenType::LParen) {
            return None;
        }
        let parameters = self.parse_function_parameters()?;

        if !self.expect_peek(TokenType::LBrace) {
            return None;
        }
        let body = self.parse_block_statement()?;

        Some(Expression::Function(ast::FunctionLiteral {
            parameters,
            body: Rc::new(body),
        }))
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<ast::Identifier>> {
        let mut identifiers = vec![];

        if self.peek_token.is(TokenType::RParen) {
            self.next_token();
            return Some(identifiers);
        }

        loop {
            if !self.expect_peek(TokenType::Ident) {
                return None;
            }
            identifiers.push(self.cur_token.literal().into());

            if !self.peek_token.is(TokenType::Comma) {
                break;
            }
            self.next_token();
        }

        if !self.expect_peek(TokenType::RParen) {
            return None;
        }
        Some(identifiers)
    }

    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let arguments = self.parse_expression_list(TokenType::RParen)?;

        Some(Expression::Call(ast::CallExpression {
            function: Box::new(function),
            arguments,
        }))
    }

    fn parse_array_literal(&mut self) -> Option<Expression> {
        let elements = self.parse_expression_list(TokenType::RBracket)?;
        Some(Expression::Array(elements.into()))
    }

    fn parse_expression_list(&mut self, end: TokenType) -> Option<Vec<Expression>> {
        let mut list = vec![];

        if self.peek_token.is(end) {
            self.next_token();
            return Some(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_token.is(TokenType::Comma) {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(end) {
            return None;
        }
        Some(list)
    }

    fn parse_index_expression(&mut self, left: Expression) -> Option<Expression> {
        self.next_token();
        let index = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenType::RBracket) {
            return None;
        }

        Some(Expression::Index(ast::IndexExpression {
            left: Box::new(left),
            index: Box::new(index),
        }))
    }

    fn parse_hash_literal(&mut self) -> Option<Expression> {
        let mut pairs = vec![];

        while !self.peek_token.is(TokenType::RBrace) {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;

            if !self.expect_peek(TokenType::Colon) {
                return None;
            }
            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;
            pairs.push((key, value));

            if !self.peek_token.is(TokenType::RBrace) && !self.expect_peek(TokenType::Comma) {
                return None;
            }
        }

        if !self.expect_peek(TokenType::RBrace) {
            return None;
        }
        Some(Expression::Hash(pairs.into()))
    }

    fn peek_precedence(&self) -> Precedence {
        self.peek_token.token_type().into()
    }

    fn cur_precedence(&self) -> Precedence {
        self.cur_token.token_type().into()
    }

    fn expect_peek(&mut self, expected: TokenType) -> bool {
        if self.peek_token.is(expected) {
            self.next_token();
            true
        } else {
            self.peek_error(expected);
            false
        }
    }

    fn peek_error(&mut self, expected: TokenType) {
        self.record(ParseError::UnexpectedToken {
            expected,
            got: self.peek_token.token_type(),
        });
    }

    fn record(&mut self, error: ParseError) {
        if self.too_deep {
            return;
        }
        debug!(%error, "parse error");
        self.errors.push(error);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ast::Node;
    use pretty_assertions::assert_eq;

    fn parse_ok(input: &str) -> ast::Program {
        match parse(input) {
            Ok(program) => program,
            Err(errors) => panic!("Parse errors found for {:?}: {:?}", input, errors),
        }
    }

    fn parse_errors(input: &str) -> Vec<String> {
        parse(input)
            .expect_err("Expected parse errors")
            .iter()
            .map(ParseError::to_string)
            .collect()
    }

    fn single_expression(input: &str) -> Expression {
        let program = parse_ok(input);
        assert_eq!(program.statements.len(), 1, "program: {}", program);
        match program.statements.into_iter().next() {
            Some(Statement::Expr(stmt)) => stmt.expression,
            other => panic!("not an expression statement: {:?}", other),
        }
    }

    fn ident(name: &str) -> Box<Expression> {
        Box::new(Expression::Identifier(name.into()))
    }

    fn int(value: i64) -> Box<Expression> {
        Box::new(Expression::IntegerLiteral(value))
    }

    #[test]
    fn test_let_statements() {
        let cases = [
            ("let x = 5;", "x", "5"),
            ("let y = true;", "y", "true"),
            ("let foobar = y", "foobar", "y"),
        ];

        for (input, name, value) in cases.iter() {
            let program = parse_ok(input);
            assert_eq!(program.statements.len(), 1);

            let stmt = &program.statements[0];
            assert_eq!(stmt.token_literal(), "let");
            match stmt {
                Statement::Let(let_stmt) => {
                    assert_eq!(let_stmt.name.value, *name);
                    assert_eq!(let_stmt.name.token_literal(), *name);
                    assert_eq!(let_stmt.value.to_string(), *value);
                }
                _ => panic!("not a let statement: {:?}", stmt),
            }
        }
    }

    #[test]
    fn test_return_statements() {
        let cases = [
            ("return 5;", "5"),
            ("return true;", "true"),
            ("return foobar", "foobar"),
        ];

        for (input, value) in cases.iter() {
            let program = parse_ok(input);
            assert_eq!(program.statements.len(), 1);

            match &program.statements[0] {
                Statement::Return(ret_stmt) => {
                    assert_eq!(ret_stmt.token_literal(), "return");
                    assert_eq!(ret_stmt.return_value.to_string(), *value);
                }
                stmt => panic!("not a return statement: {:?}", stmt),
            }
        }
    }

    #[test]
    fn test_literal_expressions() {
        assert_eq!(single_expression("foobar;"), *ident("foobar"));
        assert_eq!(single_expression("5;"), *int(5));
        assert_eq!(
            single_expression("true"),
            Expression::Boolean(true.into())
        );
        assert_eq!(
            single_expression("\"hello world\";"),
            Expression::String("hello world".to_owned().into())
        );
    }

    #[test]
    fn test_prefix_expressions() {
        let cases = [
            ("!5;", ast::Operator::Bang, *int(5)),
            ("-15;", ast::Operator::Minus, *int(15)),
            ("!true;", ast::Operator::Bang, Expression::Boolean(true.into())),
            ("-x", ast::Operator::Minus, *ident("x")),
        ];

        for (input, operator, right) in cases.iter() {
            assert_eq!(
                single_expression(input),
                Expression::Prefix(ast::PrefixExpression {
                    operator: *operator,
                    right: Box::new(right.clone()),
                })
            );
        }
    }

    #[test]
    fn test_infix_expressions() {
        let cases = [
            ("5 + 5;", ast::Operator::Plus),
            ("5 - 5;", ast::Operator::Minus),
            ("5 * 5;", ast::Operator::Asterisk),
            ("5 / 5;", ast::Operator::Slash),
            ("5 > 5;", ast::Operator::GT),
            ("5 < 5;", ast::Operator::LT),
            ("5 >= 5;", ast::Operator::GtEq),
            ("5 <= 5;", ast::Operator::LtEq),
            ("5 == 5;", ast::Operator::Eq),
            ("5 != 5;", ast::Operator::NotEq),
        ];

        for (input, operator) in cases.iter() {
            assert_eq!(
                single_expression(input),
                Expression::Infix(ast::InfixExpression {
                    left: int(5),
                    operator: *operator,
                    right: int(5),
                })
            );
        }
    }

    #[test]
    fn test_operator_precedence() {
        let cases = [
            ("-a * b", "((-a) * b)"),
            ("!-a", "(!(-a))"),
            ("a + b + c", "((a + b) + c)"),
            ("a + b - c", "((a + b) - c)"),
            ("a * b * c", "((a * b) * c)"),
            ("a * b / c", "((a * b) / c)"),
            ("a + b / c", "(a + (b / c))"),
            ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
            ("3 + 4; -5 * 5", "(3 + 4)((-5) * 5)"),
            ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
            ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
            ("a <= b == c >= d", "((a <= b) == (c >= d))"),
            (
                "3 + 4 * 5 == 3 * 1 + 4 * 5",
                "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
            ),
            ("true", "true"),
            ("false", "false"),
            ("3 > 5 == false", "((3 > 5) == false)"),
            ("3 < 5 == true", "((3 < 5) == true)"),
            ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
            ("(5 + 5) * 2", "((5 + 5) * 2)"),
            ("2 / (5 + 5)", "(2 / (5 + 5))"),
            ("-(5 + 5)", "(-(5 + 5))"),
            ("!(true == true)", "(!(true == true))"),
            ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
            (
                "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
                "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
            ),
            ("add(a + b + c * d / f + g)", "add((((a + b) + ((c * d) / f)) + g))"),
            (
                "a * [1, 2, 3, 4][b * c] * d",
                "((a * ([1, 2, 3, 4][(b * c)])) * d)",
            ),
            (
                "add(a * b[2], b[1], 2 * [1, 2][1])",
                "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))",
            ),
        ];

        for (input, expected) in cases.iter() {
            assert_eq!(parse_ok(input).to_string(), *expected, "input: {}", input);
        }
    }

    #[test]
    fn test_render_round_trip() {
        let inputs = [
            "-a * b",
            "let x = fn(a, b) { let c = a + b; c * 2 };",
            "if (x < y) { x } else { y; z }",
            "if (x) { }",
            "return add(1, [2, 3][0]);",
            "{\"one\": 1, true: fn() { 2 }}[\"one\"]",
            "\"quoted \\\"text\\\"\\n\"",
            "fn(x) { return x; }(5)",
        ];

        for input in inputs.iter() {
            let rendered = parse_ok(input).to_string();
            let reparsed = parse_ok(&rendered).to_string();
            assert_eq!(reparsed, rendered, "input: {}", input);
        }
    }

    #[test]
    fn test_if_expression() {
        match single_expression("if (x < y) { x }") {
            Expression::If(expr) => {
                assert_eq!(expr.condition.to_string(), "(x < y)");
                assert_eq!(expr.consequence.statements.len(), 1);
                assert_eq!(expr.consequence.to_string(), "x");
                assert!(expr.alternative.is_none());
            }
            expr => panic!("not an if expression: {:?}", expr),
        }
    }

    #[test]
    fn test_if_else_expression() {
        match single_expression("if (x < y) { x } else { y }") {
            Expression::If(expr) => {
                assert_eq!(expr.condition.to_string(), "(x < y)");
                assert_eq!(expr.consequence.to_string(), "x");
                let alternative = expr.alternative.expect("missing alternative");
                assert_eq!(alternative.to_string(), "y");
            }
            expr => panic!("not an if expression: {:?}", expr),
        }
    }

    #[test]
    fn test_function_literal() {
        match single_expression("fn(x, y) { x + y; }") {
            Expression::Function(func) => {
                let names: Vec<String> = func.parameters.iter().map(|p| p.to_string()).collect();
                assert_eq!(names, vec!["x", "y"]);
                assert_eq!(func.body.statements.len(), 1);
                assert_eq!(func.body.to_string(), "(x + y)");
            }
            expr => panic!("not a function literal: {:?}", expr),
        }
    }

    #[test]
    fn test_function_parameters() {
        let cases: [(&str, &[&str]); 3] = [
            ("fn() {};", &[]),
            ("fn(x) {};", &["x"]),
            ("fn(x, y, z) {};", &["x", "y", "z"]),
        ];

        for (input, expected) in cases.iter() {
            match single_expression(input) {
                Expression::Function(func) => {
                    let names: Vec<String> =
                        func.parameters.iter().map(|p| p.value.clone()).collect();
                    assert_eq!(names, *expected);
                }
                expr => panic!("not a function literal: {:?}", expr),
            }
        }
    }

    #[test]
    fn test_call_expression() {
        match single_expression("add(1, 2 * 3, 4 + 5);") {
            Expression::Call(call) => {
                assert_eq!(*call.function, *ident("add"));
                let args: Vec<String> = call.arguments.iter().map(|a| a.to_string()).collect();
                assert_eq!(args, vec!["1", "(2 * 3)", "(4 + 5)"]);
            }
            expr => panic!("not a call expression: {:?}", expr),
        }
    }

    #[test]
    fn test_array_and_index() {
        assert_eq!(
            single_expression("[1, 2 * 2, 3 + 3]").to_string(),
            "[1, (2 * 2), (3 + 3)]"
        );
        assert_eq!(single_expression("[]"), Expression::Array(vec![].into()));
        assert_eq!(
            single_expression("myArray[1 + 1]"),
            Expression::Index(ast::IndexExpression {
                left: ident("myArray"),
                index: Box::new(Expression::Infix(ast::InfixExpression {
                    left: int(1),
                    operator: ast::Operator::Plus,
                    right: int(1),
                })),
            })
        );
    }

    #[test]
    fn test_hash_literals() {
        let cases = [
            ("{}", "{}"),
            (
                "{\"one\": 1, \"two\": 2, \"three\": 3}",
                "{\"one\": 1, \"two\": 2, \"three\": 3}",
            ),
            ("{true: 1, 2: \"b\"}", "{true: 1, 2: \"b\"}"),
            (
                "{\"one\": 0 + 1, \"two\": 10 - 8}",
                "{\"one\": (0 + 1), \"two\": (10 - 8)}",
            ),
        ];

        for (input, expected) in cases.iter() {
            assert_eq!(single_expression(input).to_string(), *expected);
        }
    }

    #[test]
    fn test_parse_errors() {
        let cases = [
            (
                "let x 5;",
                vec!["expected next token to be Assign, got Int instead"],
            ),
            (
                "let = 10;",
                vec![
                    "expected next token to be Ident, got Assign instead",
                    "no prefix parse function for Assign found",
                ],
            ),
            (
                "(1 + 2",
                vec!["expected next token to be RParen, got Eof instead"],
            ),
            (
                "if (x) { x",
                vec!["expected next token to be RBrace, got Eof instead"],
            ),
            (
                "99999999999999999999",
                vec!["could not parse 99999999999999999999 as integer"],
            ),
            ("@", vec!["no prefix parse function for Illegal found"]),
            (
                "{\"a\" 1}",
                vec![
                    "expected next token to be Colon, got Int instead",
                    "no prefix parse function for RBrace found",
                ],
            ),
        ];

        for (input, expected) in cases.iter() {
            assert_eq!(parse_errors(input), *expected, "input: {}", input);
        }
    }

    #[test]
    fn test_errors_accumulate() {
        let mut parser = Parser::new(Lexer::new("let x 5; let = 10; let y = 3;".to_owned()));
        let program = parser.parse_program();

        assert_eq!(parser.errors().len(), 3);
        assert!(program
            .statements
            .iter()
            .any(|stmt| stmt.to_string() == "let y = 3;"));
    }

    #[test]
    fn test_nesting_limit() {
        let too_deep = vec![
            format!("{}true", "!".repeat(100_001)),
            format!("1{}", " + 1".repeat(100_001)),
            format!("{}1{}", "[".repeat(100_001), "]".repeat(100_001)),
            format!("let f = {}", "fn() { ".repeat(100_001)),
        ];

        for input in too_deep.iter() {
            assert_eq!(
                parse(input),
                Err(vec![ParseError::NestingTooDeep { limit: MAX_NESTING }]),
                "input starting {:?}",
                &input[..20]
            );
        }

        let deepest = format!("{}true", "!".repeat(MAX_NESTING - 1));
        assert!(parse(&deepest).is_ok());
    }
}
