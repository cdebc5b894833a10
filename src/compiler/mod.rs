//! Lowering module for the compiler.
//!
//! This module turns an annotated AST into textual LLVM-style IR. It handles:
//!
//! - One instruction variant per operation, each rendering one IR line and one trace line
//! - Lowering of expressions, including left-to-right folding of operator chains
//! - Lowering of statements and control flow into labelled blocks
//! - Runtime support for the `print` builtin and string constants

pub mod compiler;
pub mod expr;
pub mod instructions;
pub mod stdlib;
pub mod stmt;

#[cfg(test)]
mod tests;
