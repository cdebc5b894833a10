//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the predictive recursive-descent parser that turns a
//! token stream into the node arena of one translation unit. It looks at a
//! single token of lookahead and chooses between alternatives purely by
//! selection-set membership:
//!
//! - Function definitions, parameters and statements (`stmt`)
//! - Expressions from ternary down to atomic level (`expr`)
//! - Type names (`types`)
//! - Ordered dispatch tables for statement and atomic alternatives (`lookups`)
//!
//! The first syntax error aborts the parse; no partial tree is returned.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
