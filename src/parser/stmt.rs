use crate::{
    ast::nodes::{NodeKind, NodeType},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{
    expr::{parse_atomic_expr, parse_fct_call, parse_literal, parse_ternary_expr},
    lookups::{lookup, STMT_LOOKUP},
    parser::Parser,
    types::parse_type,
};

/// `type identifier := ( [paramList] ) { stmtList }`
pub fn parse_fct_def(parser: &mut Parser) -> Result<(), Error> {
    let node = parser.enter_node(NodeKind::FunctionDef {
        identifier: String::new(),
    });

    parse_type(parser)?;
    let identifier = parser.expect(TokenKind::Identifier)?.text;
    parser.set_kind(node, NodeKind::FunctionDef { identifier });

    parser.expect(TokenKind::Colon)?;
    parser.expect(TokenKind::Assign)?;
    parser.expect(TokenKind::LParen)?;
    if parser.at(NodeType::ParamList) {
        parse_param_lst(parser)?;
    }
    parser.expect(TokenKind::RParen)?;

    parser.expect(TokenKind::LBrace)?;
    parse_stmt_lst(parser)?;
    parser.expect(TokenKind::RBrace)?;

    parser.exit_node(node);
    Ok(())
}

pub fn parse_param_lst(parser: &mut Parser) -> Result<(), Error> {
    let node = parser.enter_node(NodeKind::ParamList);

    parse_param(parser)?;
    while parser.current_token_kind() == TokenKind::Semicolon {
        parser.advance();
        parse_param(parser)?;
    }

    parser.exit_node(node);
    Ok(())
}

/// `type identifier [= atomicExpr]`
pub fn parse_param(parser: &mut Parser) -> Result<(), Error> {
    let node = parser.enter_node(NodeKind::Param {
        name: String::new(),
    });

    parse_type(parser)?;
    let name = parser.expect(TokenKind::Identifier)?.text;
    parser.set_kind(node, NodeKind::Param { name });

    if parser.current_token_kind() == TokenKind::Assign {
        parser.advance();
        parse_atomic_expr(parser)?;
    }

    parser.exit_node(node);
    Ok(())
}

pub fn parse_stmt_lst(parser: &mut Parser) -> Result<(), Error> {
    let node = parser.enter_node(NodeKind::StmtList);

    while parser.at(NodeType::Stmt) {
        parse_stmt(parser)?;
    }

    parser.exit_node(node);
    Ok(())
}

/// Dispatches on the lookahead. A token that begins no alternative leaves
/// the statement empty rather than failing.
pub fn parse_stmt(parser: &mut Parser) -> Result<(), Error> {
    let node = parser.enter_node(NodeKind::Stmt);

    if let Some(handler) = lookup(STMT_LOOKUP, parser.current_token_kind()) {
        handler(parser)?;
    }

    parser.exit_node(node);
    Ok(())
}

/// `type identifier = ternaryExpr ;`
pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<(), Error> {
    let node = parser.enter_node(NodeKind::VarDecl {
        name: String::new(),
    });

    parse_type(parser)?;
    let name = parser.expect(TokenKind::Identifier)?.text;
    parser.set_kind(node, NodeKind::VarDecl { name });

    parser.expect(TokenKind::Assign)?;
    parse_ternary_expr(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    parser.exit_node(node);
    Ok(())
}

pub fn parse_assign_stmt(parser: &mut Parser) -> Result<(), Error> {
    let node = parser.enter_node(NodeKind::AssignStmt);

    parse_assign_expr(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    parser.exit_node(node);
    Ok(())
}

/// `[identifier =] ternaryExpr`. A leading identifier always makes this an
/// assignment.
pub fn parse_assign_expr(parser: &mut Parser) -> Result<(), Error> {
    let node = parser.enter_node(NodeKind::AssignExpr { variable: None });

    if parser.current_token_kind() == TokenKind::Identifier {
        let variable = parser.expect(TokenKind::Identifier)?.text;
        parser.set_kind(
            node,
            NodeKind::AssignExpr {
                variable: Some(variable),
            },
        );
        parser.expect(TokenKind::Assign)?;
    }
    parse_ternary_expr(parser)?;

    parser.exit_node(node);
    Ok(())
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<(), Error> {
    let node = parser.enter_node(NodeKind::ReturnStmt);

    parser.expect(TokenKind::Ret)?;
    parse_ternary_expr(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    parser.exit_node(node);
    Ok(())
}

/// `if ( ternaryExpr ) ifBody [elseStmt]`
pub fn parse_if_stmt(parser: &mut Parser) -> Result<(), Error> {
    let node = parser.enter_node(NodeKind::IfStmt);

    parser.expect(TokenKind::If)?;
    parser.expect(TokenKind::LParen)?;
    parse_ternary_expr(parser)?;
    parser.expect(TokenKind::RParen)?;
    parse_if_body(parser)?;

    if parser.at(NodeType::ElseStmt) {
        parse_else_stmt(parser)?;
    }

    parser.exit_node(node);
    Ok(())
}

pub fn parse_if_body(parser: &mut Parser) -> Result<(), Error> {
    let node = parser.enter_node(NodeKind::IfBody);

    parser.expect(TokenKind::LBrace)?;
    parse_stmt_lst(parser)?;
    parser.expect(TokenKind::RBrace)?;

    parser.exit_node(node);
    Ok(())
}

/// `else ifStmt` or `else ifBody`
pub fn parse_else_stmt(parser: &mut Parser) -> Result<(), Error> {
    let node = parser.enter_node(NodeKind::ElseStmt { contains_if: false });

    parser.expect(TokenKind::Else)?;
    if parser.at(NodeType::IfStmt) {
        parser.set_kind(node, NodeKind::ElseStmt { contains_if: true });
        parse_if_stmt(parser)?;
    } else if parser.at(NodeType::IfBody) {
        parse_if_body(parser)?;
    } else {
        let token = parser.current_token();
        return Err(Error::unexpected(
            &[TokenKind::If, TokenKind::LBrace],
            token.kind,
            token.location,
        ));
    }

    parser.exit_node(node);
    Ok(())
}

pub fn parse_while_loop(parser: &mut Parser) -> Result<(), Error> {
    let node = parser.enter_node(NodeKind::WhileLoop);

    parser.expect(TokenKind::While)?;
    parser.expect(TokenKind::LParen)?;
    parse_ternary_expr(parser)?;
    parser.expect(TokenKind::RParen)?;
    parser.expect(TokenKind::LBrace)?;
    parse_stmt_lst(parser)?;
    parser.expect(TokenKind::RBrace)?;

    parser.exit_node(node);
    Ok(())
}

/// `do { stmtList } while ( ternaryExpr ) ;`
pub fn parse_do_while_loop(parser: &mut Parser) -> Result<(), Error> {
    let node = parser.enter_node(NodeKind::DoWhileLoop);

    parser.expect(TokenKind::Do)?;
    parser.expect(TokenKind::LBrace)?;
    parse_stmt_lst(parser)?;
    parser.expect(TokenKind::RBrace)?;
    parser.expect(TokenKind::While)?;
    parser.expect(TokenKind::LParen)?;
    parse_ternary_expr(parser)?;
    parser.expect(TokenKind::RParen)?;
    parser.expect(TokenKind::Semicolon)?;

    parser.exit_node(node);
    Ok(())
}

/// `for ( varDecl ternaryExpr ; assignExpr ) { stmtList }`, where the
/// declaration brings its own semicolon.
pub fn parse_for_loop(parser: &mut Parser) -> Result<(), Error> {
    let node = parser.enter_node(NodeKind::ForLoop);

    parser.expect(TokenKind::For)?;
    parser.expect(TokenKind::LParen)?;
    parse_var_decl_stmt(parser)?;
    parse_ternary_expr(parser)?;
    parser.expect(TokenKind::Semicolon)?;
    parse_assign_expr(parser)?;
    parser.expect(TokenKind::RParen)?;
    parser.expect(TokenKind::LBrace)?;
    parse_stmt_lst(parser)?;
    parser.expect(TokenKind::RBrace)?;

    parser.exit_node(node);
    Ok(())
}

/// `switch ( ternaryExpr ) { caseBlock+ [defaultBlock] }`
pub fn parse_switch_case_stmt(parser: &mut Parser) -> Result<(), Error> {
    let node = parser.enter_node(NodeKind::SwitchCaseStmt);

    parser.expect(TokenKind::Switch)?;
    parser.expect(TokenKind::LParen)?;
    parse_ternary_expr(parser)?;
    parser.expect(TokenKind::RParen)?;
    parser.expect(TokenKind::LBrace)?;

    loop {
        parse_case_block(parser)?;
        if !parser.at(NodeType::CaseBlock) {
            break;
        }
    }

    if parser.at(NodeType::DefaultBlock) {
        parse_default_block(parser)?;
    }

    parser.expect(TokenKind::RBrace)?;

    parser.exit_node(node);
    Ok(())
}

pub fn parse_case_block(parser: &mut Parser) -> Result<(), Error> {
    let node = parser.enter_node(NodeKind::CaseBlock);

    parser.expect(TokenKind::Case)?;
    parse_literal(parser)?;
    parser.expect(TokenKind::Colon)?;
    parse_stmt_lst(parser)?;

    parser.exit_node(node);
    Ok(())
}

pub fn parse_default_block(parser: &mut Parser) -> Result<(), Error> {
    let node = parser.enter_node(NodeKind::DefaultBlock);

    parser.expect(TokenKind::Default)?;
    parser.expect(TokenKind::Colon)?;
    parse_stmt_lst(parser)?;

    parser.exit_node(node);
    Ok(())
}

pub fn parse_anonymous_block(parser: &mut Parser) -> Result<(), Error> {
    let node = parser.enter_node(NodeKind::AnonymousBlock);

    parser.expect(TokenKind::LBrace)?;
    parse_stmt_lst(parser)?;
    parser.expect(TokenKind::RBrace)?;

    parser.exit_node(node);
    Ok(())
}

/// `call identifier ( [argList] ) ;` used as a statement. The call node sits
/// directly under the statement node.
pub fn parse_call_stmt(parser: &mut Parser) -> Result<(), Error> {
    parse_fct_call(parser)?;
    parser.expect(TokenKind::Semicolon)?;
    Ok(())
}
