use crate::{
    ast::nodes::{AdditiveOp, EqualityOp, LiteralType, MultiplicativeOp, NodeKind, NodeType},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{
    lookups::{lookup, ATOMIC_LOOKUP},
    parser::Parser,
};

/// `equalityExpr [? equalityExpr : equalityExpr]`
///
/// Branches are equality-level, so a ternary only nests inside parentheses.
pub fn parse_ternary_expr(parser: &mut Parser) -> Result<(), Error> {
    let node = parser.enter_node(NodeKind::TernaryExpr { expanded: false });

    parse_equality_expr(parser)?;

    if parser.current_token_kind() == TokenKind::Question {
        parser.set_kind(node, NodeKind::TernaryExpr { expanded: true });
        parser.advance();
        parse_equality_expr(parser)?;
        parser.expect(TokenKind::Colon)?;
        parse_equality_expr(parser)?;
    }

    parser.exit_node(node);
    Ok(())
}

/// `additiveExpr [(== | !=) additiveExpr]`
pub fn parse_equality_expr(parser: &mut Parser) -> Result<(), Error> {
    let node = parser.enter_node(NodeKind::EqualityExpr { op: None });

    parse_additive_expr(parser)?;

    let op = match parser.current_token_kind() {
        TokenKind::Equal => Some(EqualityOp::Eq),
        TokenKind::NotEqual => Some(EqualityOp::Neq),
        _ => None,
    };
    if op.is_some() {
        parser.set_kind(node, NodeKind::EqualityExpr { op });
        parser.advance();
        parse_additive_expr(parser)?;
    }

    parser.exit_node(node);
    Ok(())
}

/// Flat chain of multiplicative operands joined by `+` and `-`.
pub fn parse_additive_expr(parser: &mut Parser) -> Result<(), Error> {
    let node = parser.enter_node(NodeKind::AdditiveExpr { operators: vec![] });
    let mut operators = vec![];

    parse_multiplicative_expr(parser)?;
    loop {
        let op = match parser.current_token_kind() {
            TokenKind::Plus => AdditiveOp::Plus,
            TokenKind::Minus => AdditiveOp::Minus,
            _ => break,
        };
        operators.push(op);
        parser.advance();
        parse_multiplicative_expr(parser)?;
    }

    parser.set_kind(node, NodeKind::AdditiveExpr { operators });
    parser.exit_node(node);
    Ok(())
}

/// Flat chain of atomic operands joined by `*` and `/`.
pub fn parse_multiplicative_expr(parser: &mut Parser) -> Result<(), Error> {
    let node = parser.enter_node(NodeKind::MultiplicativeExpr { operators: vec![] });
    let mut operators = vec![];

    parse_atomic_expr(parser)?;
    loop {
        let op = match parser.current_token_kind() {
            TokenKind::Mul => MultiplicativeOp::Mul,
            TokenKind::Div => MultiplicativeOp::Div,
            _ => break,
        };
        operators.push(op);
        parser.advance();
        parse_atomic_expr(parser)?;
    }

    parser.set_kind(node, NodeKind::MultiplicativeExpr { operators });
    parser.exit_node(node);
    Ok(())
}

/// Literal, call, print, identifier reference or `( ternaryExpr )`.
pub fn parse_atomic_expr(parser: &mut Parser) -> Result<(), Error> {
    let node = parser.enter_node(NodeKind::AtomicExpr { variable: None });

    let kind = parser.current_token_kind();
    if let Some(handler) = lookup(ATOMIC_LOOKUP, kind) {
        handler(parser)?;
    } else if kind == TokenKind::Identifier {
        let variable = parser.expect(TokenKind::Identifier)?.text;
        parser.set_kind(
            node,
            NodeKind::AtomicExpr {
                variable: Some(variable),
            },
        );
    } else if kind == TokenKind::LParen {
        parser.advance();
        parse_ternary_expr(parser)?;
        parser.expect(TokenKind::RParen)?;
    } else {
        let token = parser.current_token();
        return Err(Error::unexpected(
            NodeType::AtomicExpr.selection_set(),
            token.kind,
            token.location,
        ));
    }

    parser.exit_node(node);
    Ok(())
}

pub fn parse_literal(parser: &mut Parser) -> Result<(), Error> {
    let node = parser.enter_node(NodeKind::Literal {
        literal_type: LiteralType::Int,
        value: String::new(),
    });

    let token = parser.expect_one_of(NodeType::Literal.selection_set())?;
    let (literal_type, value) = match token.kind {
        TokenKind::DoubleLit => (LiteralType::Double, token.text),
        TokenKind::StringLit => {
            let text = token.text.as_str();
            let unquoted = text
                .strip_prefix('"')
                .and_then(|inner| inner.strip_suffix('"'))
                .unwrap_or(text);
            (LiteralType::String, unquoted.to_string())
        }
        TokenKind::True => (LiteralType::Bool, String::from("true")),
        TokenKind::False => (LiteralType::Bool, String::from("false")),
        _ => (LiteralType::Int, token.text),
    };
    parser.set_kind(
        node,
        NodeKind::Literal {
            literal_type,
            value,
        },
    );

    parser.exit_node(node);
    Ok(())
}

/// `call identifier ( [argList] )`
pub fn parse_fct_call(parser: &mut Parser) -> Result<(), Error> {
    let node = parser.enter_node(NodeKind::FunctionCall {
        identifier: String::new(),
    });

    parser.expect(TokenKind::Call)?;
    let identifier = parser.expect(TokenKind::Identifier)?.text;
    parser.set_kind(node, NodeKind::FunctionCall { identifier });

    parser.expect(TokenKind::LParen)?;
    if parser.at(NodeType::ArgList) {
        parse_arg_lst(parser)?;
    }
    parser.expect(TokenKind::RParen)?;

    parser.exit_node(node);
    Ok(())
}

/// `print ( ternaryExpr )`
pub fn parse_print_call(parser: &mut Parser) -> Result<(), Error> {
    let node = parser.enter_node(NodeKind::PrintCall);

    parser.expect(TokenKind::Print)?;
    parser.expect(TokenKind::LParen)?;
    parse_ternary_expr(parser)?;
    parser.expect(TokenKind::RParen)?;

    parser.exit_node(node);
    Ok(())
}

/// Arguments are atomic expressions separated by `;`.
pub fn parse_arg_lst(parser: &mut Parser) -> Result<(), Error> {
    let node = parser.enter_node(NodeKind::ArgList);

    parse_atomic_expr(parser)?;
    while parser.current_token_kind() == TokenKind::Semicolon {
        parser.advance();
        parse_atomic_expr(parser)?;
    }

    parser.exit_node(node);
    Ok(())
}
