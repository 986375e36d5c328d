//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the top-level parsing
//! entry points. The parser pulls tokens from the lexer one at a time,
//! keeping a single token of lookahead, and uses operator-precedence
//! climbing for binary expressions.

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::ast::TopLevel,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position, Span, MK_SPAN, MK_TOKEN,
};

use super::{
    decl::{parse_fn_definition, parse_import, parse_top_level_expr},
    lookups::{create_precedence_lookups, PrecedenceLookup},
};

/// The main parser structure that maintains parsing state.
///
/// This struct owns the lexer and the current token, and holds the binary
/// operator precedence table consulted while parsing expressions.
pub struct Parser {
    /// The token source
    lexer: Lexer,
    /// The token currently being looked at
    current: Token,
    /// Whether `current` has been read from the lexer yet
    primed: bool,
    /// End of the most recently consumed token
    last_end: Position,
    /// Precedence of every accepted binary operator
    precedence_lookup: PrecedenceLookup,
}

impl Parser {
    /// Creates a new Parser with the default operator table.
    ///
    /// No token is read until the parser is first used, so creating a parser
    /// over an interactive stream does not block.
    pub fn new(lexer: Lexer) -> Self {
        let file = lexer.file();
        let mut parser = Parser {
            lexer,
            current: MK_TOKEN!(TokenKind::EOF, String::from("EOF"), MK_SPAN!(0, 0, file)),
            primed: false,
            last_end: Position(0, Rc::clone(&file)),
            precedence_lookup: HashMap::new(),
        };
        create_precedence_lookups(&mut parser);

        parser
    }

    pub fn from_source(source: String, file: Option<String>) -> Self {
        Parser::new(Lexer::from_source(source, file))
    }

    /// Replaces the current token with the next one from the lexer.
    ///
    /// A lexical error leaves an EOF token behind so that parsing stops.
    fn read_token(&mut self) -> Result<Token, Error> {
        self.primed = true;

        let next = match self.lexer.next_token() {
            Ok(token) => token,
            Err(error) => {
                let offset = error.get_position().0;
                self.current = MK_TOKEN!(
                    TokenKind::EOF,
                    String::from("EOF"),
                    MK_SPAN!(offset, offset, self.lexer.file())
                );
                return Err(error);
            }
        };

        next.debug();
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Returns the current token without advancing.
    pub fn current_token(&mut self) -> Result<&Token, Error> {
        if !self.primed {
            self.read_token()?;
        }

        Ok(&self.current)
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&mut self) -> Result<TokenKind, Error> {
        Ok(self.current_token()?.kind)
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Result<Token, Error> {
        self.current_token()?;
        self.last_end = self.current.span.end.clone();

        self.read_token()
    }

    /// Expects a token of the specified kind, with a custom error.
    ///
    /// # Arguments
    ///
    /// * `expected_kind` - The expected TokenKind
    /// * `error` - Builds the error from the text of the offending token
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) and advances if the current token matches, otherwise returns the Error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: fn(String) -> ErrorImpl,
    ) -> Result<Token, Error> {
        let token = self.current_token()?;

        if token.kind != expected_kind {
            Err(Error::new(
                error(token.value.clone()),
                token.span.start.clone(),
            ))
        } else {
            self.advance()
        }
    }

    /// Expects a token of the specified kind, reporting it as an unexpected token otherwise.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, |token| ErrorImpl::UnexpectedToken { token })
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&mut self) -> Result<bool, Error> {
        Ok(self.current_token_kind()? != TokenKind::EOF)
    }

    /// Discards the current token.
    ///
    /// Used by callers to recover after a syntax error.
    pub fn skip_token(&mut self) -> Result<(), Error> {
        self.advance().map(|_| ())
    }

    /// Returns a reference to the operator precedence table.
    pub fn get_precedence_lookup(&self) -> &PrecedenceLookup {
        &self.precedence_lookup
    }

    /// Registers a binary operator.
    ///
    /// # Arguments
    ///
    /// * `operator` - The operator character
    /// * `precedence` - Higher binds tighter; zero or less disables the operator
    pub fn binop(&mut self, operator: char, precedence: i32) {
        self.precedence_lookup.insert(operator, precedence);
    }

    /// Precedence of the current token as a binary operator.
    ///
    /// Returns `None` when the current token is not a registered operator
    /// with a positive precedence.
    pub fn get_token_precedence(&mut self) -> Result<Option<i32>, Error> {
        let TokenKind::Char(operator) = self.current_token_kind()? else {
            return Ok(None);
        };

        Ok(self
            .precedence_lookup
            .get(&operator)
            .copied()
            .filter(|precedence| *precedence > 0))
    }

    /// End of the last consumed token.
    pub fn end_position(&self) -> Position {
        self.last_end.clone()
    }

    /// Span from `start` to the end of the last consumed token.
    pub fn span_from(&self, start: Position) -> Span {
        Span {
            start,
            end: self.last_end.clone(),
        }
    }

    /// Parses the next top-level construct.
    ///
    /// Top-level semicolons are skipped. Returns `Ok(None)` at the end of
    /// the input.
    pub fn parse_top_level(&mut self) -> Result<Option<TopLevel>, Error> {
        loop {
            let item = match self.current_token_kind()? {
                TokenKind::EOF => return Ok(None),
                TokenKind::Char(';') => {
                    self.advance()?;
                    continue;
                }
                TokenKind::Fn => TopLevel::Definition(parse_fn_definition(self)?),
                TokenKind::Import => TopLevel::Import(parse_import(self)?),
                _ => TopLevel::Expression(parse_top_level_expr(self)?),
            };

            return Ok(Some(item));
        }
    }
}

/// Parses a whole source text into its top-level constructs.
///
/// Parsing stops at the first error.
///
/// # Arguments
///
/// * `source` - The program text
/// * `file` - Optional name of the input, used in positions
pub fn parse(source: String, file: Option<String>) -> Result<Vec<TopLevel>, Error> {
    let mut parser = Parser::from_source(source, file);
    let mut body = vec![];

    while let Some(item) = parser.parse_top_level()? {
        log::debug!("parsed {}", item);
        body.push(item);
    }

    Ok(body)
}
