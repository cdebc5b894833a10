//! The token source contract consumed by the parser, and the
//! vector-backed stream that implements it.

use crate::errors::errors::Error;

use super::tokens::{Token, TokenKind};

/// Cursor over a token sequence.
///
/// The parser only ever looks at `current_token`, one token ahead.
pub trait TokenSource {
    /// The token under the cursor. At end of input this is the `TOK_EOF` token.
    fn current_token(&self) -> &Token;
    /// Moves the cursor one token forward. Never moves past `TOK_EOF`.
    fn advance(&mut self);
    /// Consumes and returns the current token if it has the given kind.
    fn expect(&mut self, kind: TokenKind) -> Result<Token, Error>;
    /// Consumes and returns the current token if its kind is one of `kinds`.
    fn expect_one_of(&mut self, kinds: &[TokenKind]) -> Result<Token, Error>;
    /// Whether the cursor sits on `TOK_EOF`.
    fn is_eof(&self) -> bool;

    fn current_kind(&self) -> TokenKind {
        self.current_token().kind
    }
}

pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
    eof: Token,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        // A stream that does not end in EOF gets one synthesised after its last token.
        let eof = match tokens.last() {
            Some(last) if last.kind == TokenKind::EOF => last.clone(),
            Some(last) => Token {
                kind: TokenKind::EOF,
                text: String::from("EOF"),
                location: last.location,
            },
            None => Token {
                kind: TokenKind::EOF,
                text: String::from("EOF"),
                location: crate::CodeLoc::start(),
            },
        };

        TokenStream {
            tokens,
            pos: 0,
            eof,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }
}

impl TokenSource for TokenStream {
    fn current_token(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() && !self.is_eof() {
            self.pos += 1;
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, Error> {
        self.expect_one_of(&[kind])
    }

    fn expect_one_of(&mut self, kinds: &[TokenKind]) -> Result<Token, Error> {
        let token = self.current_token().clone();
        if !kinds.contains(&token.kind) {
            return Err(Error::unexpected(kinds, token.kind, token.location));
        }

        self.advance();
        Ok(token)
    }

    fn is_eof(&self) -> bool {
        self.current_kind() == TokenKind::EOF
    }
}
