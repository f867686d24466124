//! S-expression lexer and parser for atoms
//!
//! Grammar:
//!
//! ```text
//! atom     := symbol | variable | '(' atom* ')'
//! variable := '$' name
//! symbol   := name not starting with '$'
//! name     := run of characters other than whitespace, '(', ')' and ';'
//! ```
//!
//! `;` starts a comment running to the end of the line. Positions in errors
//! are 1-based. Expressions nest at most `MAX_NESTING_DEPTH` levels deep.

use std::fmt;

use itertools::Itertools;

use crate::backend::models::Atom;

/// Deepest expression nesting the parser accepts
///
/// Unification, substitution and printing recurse over atoms, so bounding
/// parsed input keeps all of them within the stack.
pub const MAX_NESTING_DEPTH: usize = 1000;

/// Line and column of a character in the input, both 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty input")]
    EmptyInput,

    #[error("unexpected end of input: unmatched '(' at {open}")]
    UnexpectedEof { open: Position },

    #[error("unmatched ')' at {position}")]
    UnmatchedClose { position: Position },

    #[error("'$' without a variable name at {position}")]
    EmptyVariable { position: Position },

    #[error("expected a single atom, found more input at {position}")]
    TrailingInput { position: Position },

    #[error("'!' at {position} is not followed by a query")]
    DanglingQueryMarker { position: Position },

    #[error("expression at {position} nests deeper than {max} levels", max = MAX_NESTING_DEPTH)]
    TooDeep { position: Position },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    LParen,
    RParen,
    Symbol(String),
    Variable(String),
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Symbol(s) => write!(f, "{}", s),
            Token::Variable(v) => write!(f, "${}", v),
            Token::Eof => write!(f, "EOF"),
        }
    }
}

fn is_delimiter(ch: char) -> bool {
    ch.is_whitespace() || ch == '(' || ch == ')' || ch == ';'
}

/// Hand-written lexer tracking line and column
pub struct Lexer {
    input: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn current(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.current()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(ch) = self.current() {
            if ch.is_whitespace() {
                self.advance();
            } else if ch == ';' {
                while let Some(ch) = self.advance() {
                    if ch == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn read_name(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current() {
            if is_delimiter(ch) {
                break;
            }
            result.push(ch);
            self.advance();
        }
        result
    }

    /// Next token and the position it starts at
    pub fn next_token(&mut self) -> Result<(Token, Position), ParseError> {
        self.skip_whitespace_and_comments();
        let position = self.position();

        let token = match self.current() {
            None => Token::Eof,
            Some('(') => {
                self.advance();
                Token::LParen
            }
            Some(')') => {
                self.advance();
                Token::RParen
            }
            Some('$') => {
                self.advance();
                let name = self.read_name();
                if name.is_empty() {
                    return Err(ParseError::EmptyVariable { position });
                }
                Token::Variable(name)
            }
            Some(_) => Token::Symbol(self.read_name()),
        };
        Ok((token, position))
    }

    /// Every token up to and including `Eof`
    pub fn tokenize(&mut self) -> Result<Vec<(Token, Position)>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            let (token, position) = self.next_token()?;
            let done = token == Token::Eof;
            tokens.push((token, position));
            if done {
                break;
            }
        }
        Ok(tokens)
    }
}

/// Hand-written recursive-descent parser over a token stream
pub struct Parser {
    tokens: Vec<(Token, Position)>,
    pos: usize,
}

impl Parser {
    /// `tokens` should end with `Eof`, as `Lexer::tokenize` produces
    pub fn new(tokens: Vec<(Token, Position)>) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn current(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .map(|(token, _)| token)
            .unwrap_or(&Token::Eof)
    }

    fn position(&self) -> Position {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|(_, position)| *position)
            .unwrap_or(Position { line: 1, column: 1 })
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    pub fn at_end(&self) -> bool {
        self.current() == &Token::Eof
    }

    /// Parse one atom starting at the current token
    pub fn parse_atom(&mut self) -> Result<Atom, ParseError> {
        self.parse_nested(0)
    }

    /// `depth` is the number of enclosing open expressions
    fn parse_nested(&mut self, depth: usize) -> Result<Atom, ParseError> {
        let position = self.position();
        match self.current() {
            Token::LParen => {
                if depth >= MAX_NESTING_DEPTH {
                    return Err(ParseError::TooDeep { position });
                }
                self.advance();
                let mut items = Vec::new();
                loop {
                    match self.current() {
                        Token::RParen => {
                            self.advance();
                            break;
                        }
                        Token::Eof => return Err(ParseError::UnexpectedEof { open: position }),
                        _ => items.push(self.parse_nested(depth + 1)?),
                    }
                }
                Ok(Atom::Expression(items))
            }
            Token::RParen => Err(ParseError::UnmatchedClose { position }),
            Token::Symbol(s) => {
                let atom = Atom::Symbol(s.clone());
                self.advance();
                Ok(atom)
            }
            Token::Variable(v) => {
                let atom = Atom::Variable(v.clone());
                self.advance();
                Ok(atom)
            }
            Token::Eof => Err(ParseError::EmptyInput),
        }
    }

    /// Parse atoms until end of input
    pub fn parse(&mut self) -> Result<Vec<Atom>, ParseError> {
        let mut atoms = Vec::new();
        while !self.at_end() {
            atoms.push(self.parse_atom()?);
        }
        Ok(atoms)
    }
}

/// A top-level item of a program: an atom to add, or a query to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Assert(Atom),
    Query(Atom),
}

/// Parse exactly one atom
pub fn parse(text: &str) -> Result<Atom, ParseError> {
    let mut parser = Parser::new(Lexer::new(text).tokenize()?);
    if parser.at_end() {
        return Err(ParseError::EmptyInput);
    }
    let atom = parser.parse_atom()?;
    let position = parser.position();
    match parser.current() {
        Token::Eof => Ok(atom),
        Token::RParen => Err(ParseError::UnmatchedClose { position }),
        _ => Err(ParseError::TrailingInput { position }),
    }
}

/// Parse every top-level atom; any error fails the whole input
pub fn parse_multiple(text: &str) -> Result<Vec<Atom>, ParseError> {
    Parser::new(Lexer::new(text).tokenize()?).parse()
}

/// Parse a program: `!atom` is a query, any other top-level atom is asserted
pub fn parse_program(text: &str) -> Result<Vec<Statement>, ParseError> {
    let mut parser = Parser::new(Lexer::new(text).tokenize()?);
    let mut statements = Vec::new();
    while !parser.at_end() {
        if matches!(parser.current(), Token::Symbol(s) if s == "!") {
            let position = parser.position();
            parser.advance();
            if parser.at_end() {
                return Err(ParseError::DanglingQueryMarker { position });
            }
            statements.push(Statement::Query(parser.parse_atom()?));
        } else {
            statements.push(Statement::Assert(parser.parse_atom()?));
        }
    }
    Ok(statements)
}

pub fn try_parse(text: &str) -> Option<Atom> {
    parse(text).ok()
}

/// Canonical text of an atom, accepted back by `parse`
pub fn to_sexpr(atom: &Atom) -> String {
    atom.to_sexpr()
}

/// Render results in list notation: `[a, (b c)]`
pub fn format_results(atoms: &[Atom]) -> String {
    format!("[{}]", atoms.iter().join(", "))
}

/// Whether input typed so far forms whole atoms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completeness {
    /// Parentheses balance; the text is ready to parse
    Complete,
    /// An expression is still open
    Incomplete,
    /// No amount of further input can fix it
    Invalid,
}

pub fn check_completeness(text: &str) -> Completeness {
    let tokens = match Lexer::new(text).tokenize() {
        Ok(tokens) => tokens,
        Err(_) => return Completeness::Invalid,
    };
    let mut depth = 0usize;
    for (token, _) in &tokens {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return Completeness::Invalid,
            },
            _ => {}
        }
    }
    if depth > 0 {
        Completeness::Incomplete
    } else {
        Completeness::Complete
    }
}
