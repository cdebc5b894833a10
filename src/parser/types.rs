use crate::{
    ast::nodes::{DataType, NodeKind, NodeType},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

pub fn parse_type(parser: &mut Parser) -> Result<(), Error> {
    let node = parser.enter_node(NodeKind::Type {
        data_type: DataType::Int,
    });

    let token = parser.expect_one_of(NodeType::Type.selection_set())?;
    let data_type = match token.kind {
        TokenKind::TypeDouble => DataType::Double,
        TokenKind::TypeString => DataType::String,
        TokenKind::TypeBool => DataType::Bool,
        _ => DataType::Int,
    };
    parser.set_kind(node, NodeKind::Type { data_type });

    parser.exit_node(node);
    Ok(())
}
