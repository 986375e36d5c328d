use std::{
    cell::RefCell,
    io::{self, BufRead},
    iter,
    rc::Rc,
};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_SPAN, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type CharStream = Box<dyn Iterator<Item = char>>;

/// Slot for the read error that ended a [`line_chars`] stream.
pub type ReadFailure = Rc<RefCell<Option<io::Error>>>;

/// Streams `reader` line by line as characters.
///
/// Each line is handed out as soon as it is read, so constructs typed at a
/// terminal are handled before the next line arrives. A read error (such as
/// invalid UTF-8) ends the stream and is stored in `failure`, so the caller
/// can tell it apart from a clean end of input.
pub fn line_chars<R: BufRead + 'static>(reader: R, failure: ReadFailure) -> CharStream {
    Box::new(
        reader
            .lines()
            .map_while(move |line| match line {
                Ok(line) => Some(line),
                Err(error) => {
                    log::debug!("input stream failed: {}", error);
                    *failure.borrow_mut() = Some(error);
                    None
                }
            })
            .flat_map(|line| line.chars().chain(iter::once('\n')).collect::<Vec<char>>()),
    )
}

/// Single-pass tokenizer over a character stream.
///
/// The lexer keeps exactly one character of lookahead between calls to
/// [`Lexer::next_token`], so it can sit directly on top of an interactive
/// stream without buffering the whole input.
pub struct Lexer {
    chars: CharStream,
    /// The lookahead character, `None` once the stream is exhausted
    last_char: Option<char>,
    /// Byte offset of `last_char`
    pos: u32,
    /// Byte offset of the character after `last_char`
    next_pos: u32,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(chars: CharStream, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            chars,
            // Primes the first read without touching the stream yet
            last_char: Some(' '),
            pos: 0,
            next_pos: 0,
            file: file_name,
        }
    }

    pub fn from_source(source: String, file: Option<String>) -> Lexer {
        let chars = source.chars().collect::<Vec<char>>();
        Lexer::new(Box::new(chars.into_iter()), file)
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    pub fn get_position(&self) -> Position {
        Position(self.pos, Rc::clone(&self.file))
    }

    fn advance(&mut self) {
        self.pos = self.next_pos;
        self.last_char = self.chars.next();

        if let Some(c) = self.last_char {
            self.next_pos += c.len_utf8() as u32;
        }
    }

    fn span_from(&self, start: u32) -> Span {
        MK_SPAN!(start, self.pos, self.file)
    }

    /// Reads the next token from the stream.
    ///
    /// Comments and whitespace are skipped. Once the stream is exhausted every
    /// call returns an EOF token.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        loop {
            while self.last_char.is_some_and(is_whitespace) {
                self.advance();
            }

            let start = self.pos;

            let Some(c) = self.last_char else {
                return Ok(MK_TOKEN!(
                    TokenKind::EOF,
                    String::from("EOF"),
                    self.span_from(start)
                ));
            };

            if c.is_ascii_alphabetic() {
                return Ok(self.lex_identifier(start));
            }

            if c.is_ascii_digit() || c == '.' {
                return Ok(self.lex_number(start));
            }

            if c == '/' {
                self.advance();

                match self.last_char {
                    Some('/') => {
                        self.skip_line_comment();
                        continue;
                    }
                    Some('*') => {
                        self.skip_block_comment(start)?;
                        continue;
                    }
                    _ => {
                        return Ok(MK_TOKEN!(
                            TokenKind::Char('/'),
                            String::from("/"),
                            self.span_from(start)
                        ))
                    }
                }
            }

            self.advance();
            return Ok(MK_TOKEN!(
                TokenKind::Char(c),
                c.to_string(),
                self.span_from(start)
            ));
        }
    }

    fn lex_identifier(&mut self, start: u32) -> Token {
        let mut identifier = String::new();

        while let Some(c) = self.last_char.filter(|c| c.is_ascii_alphanumeric()) {
            identifier.push(c);
            self.advance();
        }

        let kind = RESERVED_LOOKUP
            .get(identifier.as_str())
            .copied()
            .unwrap_or(TokenKind::Identifier);

        MK_TOKEN!(kind, identifier, self.span_from(start))
    }

    fn lex_number(&mut self, start: u32) -> Token {
        let mut number = String::new();

        while let Some(c) = self.last_char.filter(|c| c.is_ascii_digit() || *c == '.') {
            number.push(c);
            self.advance();
        }

        MK_TOKEN!(TokenKind::Number, number, self.span_from(start))
    }

    fn skip_line_comment(&mut self) {
        while !matches!(self.last_char, None | Some('\n') | Some('\r')) {
            self.advance();
        }
    }

    /// Skips a block comment, the lookahead being the `*` of the opening `/*`.
    fn skip_block_comment(&mut self, start: u32) -> Result<(), Error> {
        self.advance();

        loop {
            match self.last_char {
                None => {
                    return Err(Error::new(
                        ErrorImpl::UnterminatedComment,
                        Position(start, Rc::clone(&self.file)),
                    ))
                }
                Some('*') => {
                    self.advance();
                    if self.last_char == Some('/') {
                        self.advance();
                        return Ok(());
                    }
                }
                Some(_) => self.advance(),
            }
        }
    }
}

/// ASCII whitespace, vertical tab included.
fn is_whitespace(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0b'
}

/// Converts the text of a number token to its value.
///
/// Number tokens accept any run of digits and dots, so only the longest
/// leading `digits[.digits]` prefix is converted, and text without such a
/// prefix (like `.` or `..`) is `0.0`.
pub fn parse_number_literal(text: &str) -> f64 {
    let integer_end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());

    let mut end = integer_end;
    if text[integer_end..].starts_with('.') {
        let fraction = &text[integer_end + 1..];
        end = integer_end
            + 1
            + fraction
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(fraction.len());
    }

    text[..end].parse().unwrap_or(0.0)
}

/// Reads every token of `source`, ending with the EOF token.
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::from_source(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token()?;
        let at_eof = token.kind == TokenKind::EOF;
        tokens.push(token);

        if at_eof {
            return Ok(tokens);
        }
    }
}
