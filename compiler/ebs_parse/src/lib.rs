//! Recursive descent parser for EBS scripts.
//!
//! Parsing makes two passes over the token list:
//! 1. [`hoist`] collects the signature of every top-level named block, so a
//!    call can be checked against a block declared further down the file.
//! 2. The grammar builds the [`Program`]: named blocks go into the lookup
//!    table, everything else into the ordered top-level statement list.
//!
//! The first syntax error aborts the parse; partial trees are discarded.

mod cursor;
mod error;
mod grammar;
mod hoist;
mod options;

pub use cursor::Cursor;
pub use error::{ParseError, SyntaxError};
pub use options::ParseOptions;

use ebs_ir::{Program, Span, Token, TokenKind};
use rustc_hash::FxHashMap;

use hoist::Signature;

/// Parse a script from source text with default options.
pub fn parse(name: &str, source: &str) -> Result<Program, SyntaxError> {
    parse_with(name, source, &ParseOptions::default())
}

/// Parse a script from source text.
pub fn parse_with(
    name: &str,
    source: &str,
    options: &ParseOptions,
) -> Result<Program, SyntaxError> {
    let tokens = ebs_lexer::tokenize(source)?;
    Ok(parse_tokens(name, source, &tokens, options)?)
}

/// Parse an already lexed token list.
///
/// `source` is the text the tokens were lexed from; opaque statement
/// payloads are sliced out of it.
pub fn parse_tokens(
    name: &str,
    source: &str,
    tokens: &[Token],
    options: &ParseOptions,
) -> Result<Program, ParseError> {
    if !matches!(tokens.last(), Some(t) if t.kind == TokenKind::Eof) {
        return Err(ParseError {
            line: 1,
            column: 1,
            span: Span::DUMMY,
            found: "end of input".to_string(),
            message: "token list must end with an end-of-file token".to_string(),
        });
    }

    let mut parser = Parser::new(tokens, source, options);
    parser.signatures = parser.collect_signatures()?;
    let program = parser.parse_program(name)?;
    tracing::debug!(
        program = name,
        blocks = program.blocks.len(),
        statements = program.statements.len(),
        "parsed program"
    );
    Ok(program)
}

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    source: &'a str,
    options: &'a ParseOptions,
    /// Top-level named block signatures from the hoisting pass.
    signatures: FxHashMap<String, Signature>,
    /// Nesting depth of braced blocks; named blocks are only legal at 0.
    block_depth: u32,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token], source: &'a str, options: &'a ParseOptions) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            source,
            options,
            signatures: FxHashMap::default(),
            block_depth: 0,
        }
    }

    fn parse_program(&mut self, name: &str) -> Result<Program, ParseError> {
        let mut program = Program::new(name);
        while !self.cursor.is_at_end() {
            if self.at_declaration() {
                let block = self.parse_named_block()?;
                program.blocks.insert(block.name.clone(), block);
            } else {
                program.statements.push(self.parse_statement()?);
            }
        }
        Ok(program)
    }

    // Cursor delegation

    #[inline]
    fn current(&self) -> &'a Token {
        self.cursor.current()
    }

    #[inline]
    fn current_kind(&self) -> &'a TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn current_line(&self) -> u32 {
        self.cursor.current().line
    }

    #[inline]
    fn peek_kind(&self, n: usize) -> &'a TokenKind {
        self.cursor.peek_kind(n)
    }

    #[inline]
    fn check(&self, kind: &TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn advance(&mut self) -> &'a Token {
        self.cursor.advance()
    }

    /// Consume the current token if it is `kind`.
    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or fail with "expected `what`".
    fn expect(&mut self, kind: &TokenKind, what: &str) -> Result<&'a Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error(format!("expected {what}")))
        }
    }

    /// Consume an identifier.
    fn expect_ident(&mut self, what: &str) -> Result<String, ParseError> {
        match self.current_kind() {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.error(format!("expected {what}"))),
        }
    }

    /// A block or built-in name, possibly dotted. The first part may be a
    /// type keyword when a `.` follows, as in `array.sort` or `map.keys`.
    fn expect_call_name(&mut self, what: &str) -> Result<String, ParseError> {
        let mut name = match self.current_kind() {
            TokenKind::Type(keyword) if self.peek_kind(1) == &TokenKind::Dot => {
                let name = keyword.as_str().to_string();
                self.advance();
                name
            }
            _ => self.expect_ident(what)?,
        };
        while self.eat(&TokenKind::Dot) {
            name.push('.');
            name.push_str(&self.expect_word("name after '.'")?);
        }
        Ok(name)
    }

    /// Consume an identifier or a keyword used as a name (field names,
    /// property names, exception labels).
    fn expect_word(&mut self, what: &str) -> Result<String, ParseError> {
        match self.current_kind().word() {
            Some(word) => {
                let word = word.to_string();
                self.advance();
                Ok(word)
            }
            None => Err(self.error(format!("expected {what}"))),
        }
    }

    /// Error at the current token.
    #[cold]
    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::at(self.current(), message)
    }
}
