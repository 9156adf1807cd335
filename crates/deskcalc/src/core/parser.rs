//! Expression tokenizer and recursive descent parser
//!
//! The parser consults an [`OperatorConfig`] while it reads, so a disabled
//! operator is rejected at the point it appears rather than after the
//! whole tree is built.

use crate::core::{CalcError, CalcResult, Operation, OperatorConfig, UnaryOp};

/// Token types from lexical analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Variable, constant or function name
    Identifier(String),
    /// Binary operator (`+` and `-` double as prefix signs)
    Operator(Operation),
    /// `not`
    Not,
    /// `in`
    In,
    /// Postfix `!`
    Bang,
    /// `?` of a conditional
    Question,
    /// `:` of a conditional
    Colon,
    /// `=` assignment
    Assign,
    /// Left parenthesis
    LeftParen,
    /// Right parenthesis
    RightParen,
}

impl Token {
    /// Returns true if this token is a binary operator
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }

    /// Returns true if this token is a number
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }
}

/// Abstract Syntax Tree node
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Numeric literal
    Number(f64),
    /// Named value looked up at evaluation time
    Variable(String),
    /// Prefix or postfix operation
    Unary {
        /// Operator
        op: UnaryOp,
        /// Operand
        operand: Box<AstNode>,
    },
    /// Binary operation
    BinaryOp {
        /// Left operand
        left: Box<AstNode>,
        /// Operator
        op: Operation,
        /// Right operand
        right: Box<AstNode>,
    },
    /// `condition ? then_branch : else_branch`
    Conditional {
        /// Tested value
        condition: Box<AstNode>,
        /// Taken when the condition is truthy
        then_branch: Box<AstNode>,
        /// Taken otherwise
        else_branch: Box<AstNode>,
    },
    /// `name = value`
    Assign {
        /// Target variable
        name: String,
        /// Assigned expression
        value: Box<AstNode>,
    },
    /// Single-argument function call
    Call {
        /// Function name
        function: String,
        /// Argument expression
        argument: Box<AstNode>,
    },
}

impl AstNode {
    /// Creates a new number node
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a new variable node
    #[must_use]
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    /// Creates a new binary operation node
    #[must_use]
    pub fn binary(left: AstNode, op: Operation, right: AstNode) -> Self {
        Self::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a new unary operation node
    #[must_use]
    pub fn unary(op: UnaryOp, operand: AstNode) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// Creates a new negation node
    #[must_use]
    pub fn negate(inner: AstNode) -> Self {
        Self::unary(UnaryOp::Negate, inner)
    }
}

/// Tokenizer for converting expression strings to tokens
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer for the given input
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Returns the remaining input
    #[must_use]
    pub fn remaining(&self) -> &str {
        &self.input[self.pos..]
    }

    /// Tokenizes the entire input
    pub fn tokenize(&mut self) -> CalcResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or None if at end of input
    pub fn next_token(&mut self) -> CalcResult<Option<Token>> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        let token = match ch {
            '0'..='9' | '.' => self.read_number()?,
            'a'..='z' | 'A'..='Z' | '_' => self.read_word(),
            '+' => self.single(Token::Operator(Operation::Add)),
            '-' => self.single(Token::Operator(Operation::Subtract)),
            '*' => self.single(Token::Operator(Operation::Multiply)),
            '/' => self.single(Token::Operator(Operation::Divide)),
            '%' => self.single(Token::Operator(Operation::Remainder)),
            '^' => self.single(Token::Operator(Operation::Power)),
            '?' => self.single(Token::Question),
            ':' => self.single(Token::Colon),
            '(' => self.single(Token::LeftParen),
            ')' => self.single(Token::RightParen),
            '|' => {
                self.advance();
                if self.current_char() == Some('|') {
                    self.single(Token::Operator(Operation::Concatenate))
                } else {
                    return Err(CalcError::ParseError("Expected '||'".into()));
                }
            }
            '=' => self.one_or_two('=', Token::Assign, Token::Operator(Operation::Equal)),
            '!' => self.one_or_two('=', Token::Bang, Token::Operator(Operation::NotEqual)),
            '<' => self.one_or_two(
                '=',
                Token::Operator(Operation::Less),
                Token::Operator(Operation::LessEqual),
            ),
            '>' => self.one_or_two(
                '=',
                Token::Operator(Operation::Greater),
                Token::Operator(Operation::GreaterEqual),
            ),
            _ => {
                return Err(CalcError::ParseError(format!(
                    "Unexpected character: '{ch}'"
                )));
            }
        };

        Ok(Some(token))
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn single(&mut self, token: Token) -> Token {
        self.advance();
        token
    }

    /// Reads `first` or, when followed by `next`, the two-character `second`
    fn one_or_two(&mut self, next: char, first: Token, second: Token) -> Token {
        self.advance();
        if self.current_char() == Some(next) {
            self.advance();
            second
        } else {
            first
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self) -> CalcResult<Token> {
        let start = self.pos;
        let mut has_dot = false;
        let mut has_digit = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                has_digit = true;
                self.advance();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        if has_digit && matches!(self.current_char(), Some('e' | 'E')) {
            self.read_exponent();
        }

        let num_str = &self.input[start..self.pos];
        let value: f64 = num_str
            .parse()
            .map_err(|_| CalcError::ParseError(format!("Invalid number: '{num_str}'")))?;

        Ok(Token::Number(value))
    }

    /// Consumes `e[+-]digits` only when at least one digit follows
    fn read_exponent(&mut self) {
        let rest = &self.input[self.pos + 1..];
        let sign_len = usize::from(rest.starts_with(['+', '-']));
        let digits = rest[sign_len..]
            .chars()
            .take_while(char::is_ascii_digit)
            .count();
        if digits > 0 {
            self.pos += 1 + sign_len + digits;
        }
    }

    fn read_word(&mut self) -> Token {
        let start = self.pos;
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                self.advance();
            } else {
                break;
            }
        }

        match &self.input[start..self.pos] {
            "and" => Token::Operator(Operation::And),
            "or" => Token::Operator(Operation::Or),
            "not" => Token::Not,
            "in" => Token::In,
            word => Token::Identifier(word.to_string()),
        }
    }
}

/// Recursive descent parser for expressions
///
/// Grammar, loosest binding first:
/// ```text
/// expression  ::= IDENT '=' expression | conditional
/// conditional ::= or ('?' conditional ':' conditional)?
/// or          ::= and ('or' and)*
/// and         ::= comparison ('and' comparison)*
/// comparison  ::= additive (('==' | '!=' | '<' | '<=' | '>' | '>=' | 'in') additive)*
/// additive    ::= term (('+' | '-' | '||') term)*
/// term        ::= unary (('*' | '/' | '%') unary)*
/// unary       ::= ('-' | '+' | 'not') unary | power
/// power       ::= postfix ('^' unary)?     // Right associative
/// postfix     ::= primary '!'*
/// primary     ::= NUMBER | IDENT | IDENT '(' expression ')' | '(' expression ')'
/// ```
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    config: OperatorConfig,
    depth: usize,
}

/// Deepest nesting the parser accepts
///
/// Counts parentheses, prefix operators, chained binary operators and
/// postfix `!`, which bounds the depth of the resulting AST. Deeper input
/// fails with a parse error.
pub const MAX_DEPTH: usize = 128;

impl Parser {
    /// Creates a new parser from tokens with the calculator operator profile
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_config(tokens, OperatorConfig::calculator())
    }

    /// Creates a new parser from tokens with a custom operator profile
    #[must_use]
    pub fn with_config(tokens: Vec<Token>, config: OperatorConfig) -> Self {
        Self {
            tokens,
            pos: 0,
            config,
            depth: 0,
        }
    }

    /// Parses a string expression into an AST using the calculator profile
    pub fn parse_str(input: &str) -> CalcResult<AstNode> {
        Self::parse_str_with(input, OperatorConfig::calculator())
    }

    /// Parses a string expression into an AST using `config`
    pub fn parse_str_with(input: &str, config: OperatorConfig) -> CalcResult<AstNode> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        let tokens = Tokenizer::new(trimmed).tokenize()?;
        let mut parser = Self::with_config(tokens, config);
        let ast = parser.parse()?;

        // Ensure all tokens consumed
        if let Some(token) = parser.current() {
            return Err(CalcError::ParseError(format!(
                "Unexpected token {token:?} at position {}",
                parser.pos
            )));
        }

        Ok(ast)
    }

    /// Parses tokens into an AST
    pub fn parse(&mut self) -> CalcResult<AstNode> {
        if self.tokens.is_empty() {
            return Err(CalcError::EmptyExpression);
        }
        self.parse_expression()
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos + 1)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Goes one nesting level deeper; callers restore `depth` on success
    fn enter(&mut self) -> CalcResult<()> {
        if self.depth >= MAX_DEPTH {
            return Err(CalcError::ParseError("expression nested too deeply".into()));
        }
        self.depth += 1;
        Ok(())
    }

    fn require(enabled: bool, symbol: &str) -> CalcResult<()> {
        if enabled {
            Ok(())
        } else {
            Err(CalcError::DisabledOperator(symbol.to_string()))
        }
    }

    /// Returns the binary operation at the cursor if it is one of `ops`
    fn binary_at(&self, ops: &[Operation]) -> Option<Operation> {
        match self.current() {
            Some(Token::Operator(op)) if ops.contains(op) => Some(*op),
            _ => None,
        }
    }

    /// Left-associative loop shared by every binary precedence level
    fn parse_left_assoc(
        &mut self,
        ops: &[Operation],
        next: fn(&mut Self) -> CalcResult<AstNode>,
    ) -> CalcResult<AstNode> {
        let mut left = next(self)?;
        let depth = self.depth;

        while let Some(op) = self.binary_at(ops) {
            Self::require(op.is_enabled(&self.config), op.symbol())?;
            // Each link makes the left-deep tree one level taller
            self.enter()?;
            self.advance();
            let right = next(self)?;
            left = AstNode::binary(left, op, right);
        }

        self.depth = depth;
        Ok(left)
    }

    fn parse_expression(&mut self) -> CalcResult<AstNode> {
        self.enter()?;
        let node = self.parse_assignment()?;
        self.depth -= 1;
        Ok(node)
    }

    fn parse_assignment(&mut self) -> CalcResult<AstNode> {
        if let (Some(Token::Identifier(name)), Some(Token::Assign)) = (self.current(), self.peek())
        {
            let name = name.clone();
            Self::require(self.config.assignment, "=")?;
            self.pos += 2;
            let value = self.parse_expression()?;
            return Ok(AstNode::Assign {
                name,
                value: Box::new(value),
            });
        }

        self.parse_conditional()
    }

    fn parse_conditional(&mut self) -> CalcResult<AstNode> {
        let condition = self.parse_or()?;

        if !matches!(self.current(), Some(Token::Question)) {
            return Ok(condition);
        }
        Self::require(self.config.conditional, "?")?;
        self.advance();
        self.enter()?;

        let then_branch = self.parse_conditional()?;
        match self.advance() {
            Some(Token::Colon) => {}
            Some(t) => {
                return Err(CalcError::ParseError(format!(
                    "Expected ':' but found {t:?}"
                )))
            }
            None => return Err(CalcError::ParseError("Missing ':' in conditional".into())),
        }
        let else_branch = self.parse_conditional()?;
        self.depth -= 1;

        Ok(AstNode::Conditional {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        })
    }

    fn parse_or(&mut self) -> CalcResult<AstNode> {
        self.parse_left_assoc(&[Operation::Or], Self::parse_and)
    }

    fn parse_and(&mut self) -> CalcResult<AstNode> {
        self.parse_left_assoc(&[Operation::And], Self::parse_comparison)
    }

    fn parse_comparison(&mut self) -> CalcResult<AstNode> {
        let node = self.parse_left_assoc(
            &[
                Operation::Equal,
                Operation::NotEqual,
                Operation::Less,
                Operation::LessEqual,
                Operation::Greater,
                Operation::GreaterEqual,
            ],
            Self::parse_additive,
        )?;

        if matches!(self.current(), Some(Token::In)) {
            Self::require(self.config.in_operator, "in")?;
            return Err(CalcError::ParseError(
                "'in' needs an array operand".into(),
            ));
        }

        Ok(node)
    }

    fn parse_additive(&mut self) -> CalcResult<AstNode> {
        self.parse_left_assoc(
            &[Operation::Add, Operation::Subtract, Operation::Concatenate],
            Self::parse_term,
        )
    }

    fn parse_term(&mut self) -> CalcResult<AstNode> {
        self.parse_left_assoc(
            &[Operation::Multiply, Operation::Divide, Operation::Remainder],
            Self::parse_unary,
        )
    }

    fn parse_unary(&mut self) -> CalcResult<AstNode> {
        let op = match self.current() {
            Some(Token::Operator(Operation::Subtract)) => UnaryOp::Negate,
            Some(Token::Operator(Operation::Add)) => UnaryOp::Plus,
            Some(Token::Not) => UnaryOp::Not,
            _ => return self.parse_power(),
        };
        Self::require(op.is_enabled(&self.config), op.symbol())?;
        self.advance();

        self.enter()?;
        let operand = self.parse_unary()?;
        self.depth -= 1;
        Ok(AstNode::unary(op, operand))
    }

    fn parse_power(&mut self) -> CalcResult<AstNode> {
        let base = self.parse_postfix()?;

        if self.binary_at(&[Operation::Power]).is_some() {
            Self::require(self.config.power, "^")?;
            self.advance();
            // Recurse through unary so `2^-1` parses and `^` stays right associative
            self.enter()?;
            let exponent = self.parse_unary()?;
            self.depth -= 1;
            return Ok(AstNode::binary(base, Operation::Power, exponent));
        }

        Ok(base)
    }

    fn parse_postfix(&mut self) -> CalcResult<AstNode> {
        let mut node = self.parse_primary()?;
        let depth = self.depth;

        while matches!(self.current(), Some(Token::Bang)) {
            Self::require(self.config.factorial, "!")?;
            self.enter()?;
            self.advance();
            node = AstNode::unary(UnaryOp::Factorial, node);
        }

        self.depth = depth;
        Ok(node)
    }

    fn parse_primary(&mut self) -> CalcResult<AstNode> {
        let token = self
            .advance()
            .ok_or_else(|| CalcError::ParseError("Unexpected end of expression".into()))?;

        match token {
            Token::Number(n) => Ok(AstNode::number(n)),
            Token::Identifier(name) => {
                if !matches!(self.current(), Some(Token::LeftParen)) {
                    return Ok(AstNode::Variable(name));
                }
                self.advance();
                let argument = self.parse_expression()?;
                self.expect_right_paren()?;
                Ok(AstNode::Call {
                    function: name,
                    argument: Box::new(argument),
                })
            }
            Token::LeftParen => {
                let expr = self.parse_expression()?;
                self.expect_right_paren()?;
                Ok(expr)
            }
            _ => Err(CalcError::ParseError(format!(
                "Unexpected token: {token:?}"
            ))),
        }
    }

    fn expect_right_paren(&mut self) -> CalcResult<()> {
        match self.advance() {
            Some(Token::RightParen) => Ok(()),
            Some(t) => Err(CalcError::ParseError(format!(
                "Expected ')' but found {t:?}"
            ))),
            None => Err(CalcError::ParseError("Unclosed parenthesis".into())),
        }
    }
}
