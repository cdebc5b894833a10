//! Error types and error handling for the front-end.
//!
//! This module defines the error types produced while turning source text
//! into an AST. It includes:
//!
//! - Error structures carrying the `CodeLoc` of the failure
//! - Lexical and syntax error variants
//! - Error names and suggestions for the command line renderer

pub mod errors;
