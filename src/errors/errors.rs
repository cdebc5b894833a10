use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, CodeLoc};

/// A fatal front-end error: the first failure aborts the whole parse.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    location: CodeLoc,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, location: CodeLoc) -> Self {
        Error {
            internal_error: error_impl,
            location,
        }
    }

    /// Builds the syntax error for a token of kind `actual` where one of `expected` was required.
    pub fn unexpected(expected: &[TokenKind], actual: TokenKind, location: CodeLoc) -> Self {
        let internal_error = if actual == TokenKind::EOF {
            ErrorImpl::UnexpectedEndOfInput {
                expected: expected.to_vec(),
            }
        } else {
            ErrorImpl::UnexpectedToken {
                expected: expected.to_vec(),
                actual,
            }
        };

        Error::new(internal_error, location)
    }

    pub fn get_location(&self) -> CodeLoc {
        self.location
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Whether this error is a grammar violation (as opposed to a lexical one).
    pub fn is_syntax_error(&self) -> bool {
        !matches!(self.internal_error, ErrorImpl::UnrecognisedToken { .. })
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedEndOfInput { .. } => "UnexpectedEndOfInput",
            ErrorImpl::MissingFunctionDef { .. } => "MissingFunctionDef",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { .. } => {
                ErrorTip::Suggestion(self.internal_error.to_string())
            }
            ErrorImpl::UnexpectedEndOfInput { expected } => ErrorTip::Suggestion(format!(
                "input ended while expecting one of {{{}}}, is a closing brace missing?",
                join_kinds(expected)
            )),
            ErrorImpl::MissingFunctionDef { found } => ErrorTip::Suggestion(format!(
                "a program must contain at least one function, found {} instead",
                found
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, at {}", self.internal_error, self.location)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token kind {actual}, expected one of {{{}}}", join_kinds(.expected))]
    UnexpectedToken {
        expected: Vec<TokenKind>,
        actual: TokenKind,
    },
    #[error("unexpected end of input, expected one of {{{}}}", join_kinds(.expected))]
    UnexpectedEndOfInput { expected: Vec<TokenKind> },
    #[error("a program must contain at least one function, found {found}")]
    MissingFunctionDef { found: TokenKind },
}

fn join_kinds(kinds: &[TokenKind]) -> String {
    kinds
        .iter()
        .map(|kind| kind.to_string())
        .collect::<Vec<String>>()
        .join(", ")
}
