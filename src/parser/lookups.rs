use crate::{ast::nodes::NodeType, errors::errors::Error, lexer::tokens::TokenKind};

use super::{expr::*, parser::Parser, stmt::*};

pub type StmtHandler = fn(&mut Parser) -> Result<(), Error>;
pub type AtomicHandler = fn(&mut Parser) -> Result<(), Error>;

// Ordered alternatives of a statement. The first whose selection set holds
// the lookahead wins; the sets are pairwise disjoint so order only matters
// for readability.
pub const STMT_LOOKUP: &[(NodeType, StmtHandler)] = &[
    (NodeType::VarDecl, parse_var_decl_stmt),
    (NodeType::AssignStmt, parse_assign_stmt),
    (NodeType::ReturnStmt, parse_return_stmt),
    (NodeType::IfStmt, parse_if_stmt),
    (NodeType::WhileLoop, parse_while_loop),
    (NodeType::DoWhileLoop, parse_do_while_loop),
    (NodeType::ForLoop, parse_for_loop),
    (NodeType::SwitchCaseStmt, parse_switch_case_stmt),
    (NodeType::AnonymousBlock, parse_anonymous_block),
    (NodeType::FunctionCall, parse_call_stmt),
];

// Atomic alternatives that open a child production. Identifier references
// and parenthesized expressions are handled inline by `parse_atomic_expr`.
pub const ATOMIC_LOOKUP: &[(NodeType, AtomicHandler)] = &[
    (NodeType::Literal, parse_literal),
    (NodeType::FunctionCall, parse_fct_call),
    (NodeType::PrintCall, parse_print_call),
];

/// Picks the handler whose production begins with `kind`.
pub fn lookup<H: Copy>(table: &[(NodeType, H)], kind: TokenKind) -> Option<H> {
    table
        .iter()
        .find(|(node_type, _)| node_type.begins_with(kind))
        .map(|(_, handler)| *handler)
}
