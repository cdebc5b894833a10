//! Unit tests for the parser module.
//!
//! This module contains tests for parsing:
//! - Function definitions, parameters and defaults
//! - Statements, including the empty statement
//! - Expression chains and the ternary
//! - Control flow and switch/case
//! - Syntax errors and the construction-stack discipline

use super::{
    parser::{parse, Parser},
    stmt::parse_stmt,
};
use crate::{
    ast::{
        ast::Ast,
        nodes::{AdditiveOp, DataType, LiteralType, MultiplicativeOp, NodeKind, NodeType},
        printer::unparse,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{lexer::tokenize, stream::TokenStream, tokens::TokenKind},
    CodeLoc,
};

fn parse_source(source: &str) -> Result<Ast, Error> {
    parse(tokenize(source).unwrap())
}

fn parse_body(body: &str) -> Result<Ast, Error> {
    parse_source(&format!("int main := () {{ {} }}", body))
}

#[test]
fn test_parse_minimal_function() {
    let ast = parse_source("int main := () { return 0; }").unwrap();
    let root = ast.root().unwrap();

    assert_eq!(ast.node_type(root), NodeType::Entry);
    let function = ast.child(root, 0).unwrap();
    assert_eq!(
        ast.kind(function),
        &NodeKind::FunctionDef {
            identifier: "main".into()
        }
    );
    assert_eq!(ast.location(function), CodeLoc::new(1, 1));
    assert_eq!(ast.child_of_type(function, NodeType::ParamList), None);
    assert_eq!(ast.find_all(NodeType::ReturnStmt).len(), 1);
}

#[test]
fn test_parse_multiple_functions() {
    let source = "int one := () { return 1; }\ndouble two := () { return 2.0; }";
    let ast = parse_source(source).unwrap();
    let functions = ast.find_all(NodeType::FunctionDef);

    assert_eq!(functions.len(), 2);
    assert_eq!(ast.location(functions[1]), CodeLoc::new(2, 1));
    let return_type = ast.child(functions[1], 0).unwrap();
    assert_eq!(
        ast.kind(return_type),
        &NodeKind::Type {
            data_type: DataType::Double
        }
    );
}

#[test]
fn test_parse_params_with_default() {
    let ast = parse_source("int f := (int a; double b = 1.5) { return a; }").unwrap();
    let params = ast.find_all(NodeType::Param);

    assert_eq!(params.len(), 2);
    assert_eq!(ast.kind(params[0]), &NodeKind::Param { name: "a".into() });
    assert_eq!(ast.children(params[0]).len(), 1);
    assert_eq!(ast.children(params[1]).len(), 2);
    let default = ast.child(params[1], 1).unwrap();
    assert_eq!(ast.node_type(default), NodeType::AtomicExpr);
}

#[test]
fn test_parent_links_match_children() {
    let ast = parse_body("int x = 1; while (x != 3) { x = x + 1; }").unwrap();

    for id in ast.pre_order() {
        for child in ast.children(id) {
            assert_eq!(ast.parent(*child), Some(id));
        }
    }
    assert_eq!(ast.pre_order().len(), ast.len());
}

#[test]
fn test_additive_chain_is_flat() {
    let ast = parse_body("return a - b - c;").unwrap();
    let additive = ast.find_all(NodeType::AdditiveExpr)[0];

    assert_eq!(
        ast.kind(additive),
        &NodeKind::AdditiveExpr {
            operators: vec![AdditiveOp::Minus, AdditiveOp::Minus]
        }
    );
    let operands: Vec<String> = ast
        .children(additive)
        .iter()
        .map(|operand| {
            let atomic = ast.child(*operand, 0).unwrap();
            match ast.kind(atomic) {
                NodeKind::AtomicExpr {
                    variable: Some(variable),
                } => variable.clone(),
                other => panic!("unexpected operand {:?}", other),
            }
        })
        .collect();
    assert_eq!(operands, vec!["a", "b", "c"]);
}

#[test]
fn test_multiplicative_binds_tighter() {
    let ast = parse_body("return a + b * c / d;").unwrap();
    let additive = ast.find_all(NodeType::AdditiveExpr)[0];

    assert_eq!(ast.children(additive).len(), 2);
    let right = ast.child(additive, 1).unwrap();
    assert_eq!(
        ast.kind(right),
        &NodeKind::MultiplicativeExpr {
            operators: vec![MultiplicativeOp::Mul, MultiplicativeOp::Div]
        }
    );
    assert_eq!(ast.children(right).len(), 3);
}

#[test]
fn test_ternary_does_not_nest() {
    let error = parse_body("return x ? y : z ? w : v;").unwrap_err();

    assert!(matches!(
        error.get_internal_error(),
        ErrorImpl::UnexpectedToken {
            actual: TokenKind::Question,
            ..
        }
    ));

    let ast = parse_body("return x ? y : (z ? w : v);").unwrap();
    let ternaries: Vec<_> = ast
        .find_all(NodeType::TernaryExpr)
        .into_iter()
        .filter(|id| ast.kind(*id) == &NodeKind::TernaryExpr { expanded: true })
        .collect();
    assert_eq!(ternaries.len(), 2);
}

#[test]
fn test_missing_rparen() {
    let error = parse_source("int main := ( {\n  return 0;\n}").unwrap_err();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnexpectedToken {
            expected: vec![TokenKind::RParen],
            actual: TokenKind::LBrace,
        }
    );
    assert_eq!(error.get_location(), CodeLoc::new(1, 15));
    assert_eq!(
        error.to_string(),
        "unexpected token kind TOK_LBRACE, expected one of {TOK_RPAREN}, at L1C15"
    );
}

#[test]
fn test_unexpected_end_of_input() {
    let error = parse_source("int main := () { return 0;").unwrap_err();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnexpectedEndOfInput {
            expected: vec![TokenKind::RBrace]
        }
    );
}

#[test]
fn test_missing_function_def() {
    let error = parse_source("return 1;").unwrap_err();
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::MissingFunctionDef {
            found: TokenKind::Ret
        }
    );

    let error = parse(vec![]).unwrap_err();
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::MissingFunctionDef {
            found: TokenKind::EOF
        }
    );
}

#[test]
fn test_switch_case_default() {
    let ast = parse_body("switch (x) { case 1: print(x); default: print(0); }").unwrap();
    let switch = ast.find_all(NodeType::SwitchCaseStmt)[0];
    let blocks: Vec<NodeType> = ast
        .children(switch)
        .iter()
        .map(|child| ast.node_type(*child))
        .collect();

    assert_eq!(
        blocks,
        vec![
            NodeType::TernaryExpr,
            NodeType::CaseBlock,
            NodeType::DefaultBlock
        ]
    );
}

#[test]
fn test_switch_requires_case() {
    let error = parse_body("switch (x) { default: print(0); }").unwrap_err();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnexpectedToken {
            expected: vec![TokenKind::Case],
            actual: TokenKind::Default,
        }
    );
}

#[test]
fn test_case_lists_end_at_next_case() {
    let ast = parse_body("switch (x) { case 1: print(1); print(2); case \"two\": print(3); }").unwrap();
    let cases = ast.find_all(NodeType::CaseBlock);

    assert_eq!(cases.len(), 2);
    let first_list = ast.child(cases[0], 1).unwrap();
    assert_eq!(ast.children(first_list).len(), 2);
    let label = ast.child(cases[1], 0).unwrap();
    assert_eq!(
        ast.kind(label),
        &NodeKind::Literal {
            literal_type: LiteralType::String,
            value: "two".into()
        }
    );
}

#[test]
fn test_else_if_chain() {
    let ast = parse_body("if (a) { } else if (b) { } else { }").unwrap();
    let elses = ast.find_all(NodeType::ElseStmt);

    assert_eq!(elses.len(), 2);
    assert_eq!(ast.kind(elses[0]), &NodeKind::ElseStmt { contains_if: true });
    assert_eq!(ast.kind(elses[1]), &NodeKind::ElseStmt { contains_if: false });
}

#[test]
fn test_else_requires_if_or_block() {
    let error = parse_body("if (a) { } else return 1;").unwrap_err();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnexpectedToken {
            expected: vec![TokenKind::If, TokenKind::LBrace],
            actual: TokenKind::Ret,
        }
    );
}

#[test]
fn test_loops() {
    let ast = parse_body(
        "for (int i = 0; i != 10; i = i + 1) { print(i); } do { x = x - 1; } while (x != 0);",
    )
    .unwrap();
    let for_loop = ast.find_all(NodeType::ForLoop)[0];
    let parts: Vec<NodeType> = ast
        .children(for_loop)
        .iter()
        .map(|child| ast.node_type(*child))
        .collect();

    assert_eq!(
        parts,
        vec![
            NodeType::VarDecl,
            NodeType::TernaryExpr,
            NodeType::AssignExpr,
            NodeType::StmtList
        ]
    );
    assert_eq!(ast.find_all(NodeType::DoWhileLoop).len(), 1);
}

#[test]
fn test_call_statement_and_arguments() {
    let ast = parse_body("call f(1; x; (a + b); call g());").unwrap();
    let calls = ast.find_all(NodeType::FunctionCall);

    assert_eq!(calls.len(), 2);
    let stmt = ast.parent(calls[0]).unwrap();
    assert_eq!(ast.node_type(stmt), NodeType::Stmt);
    let args = ast.child(calls[0], 0).unwrap();
    assert_eq!(ast.children(args).len(), 4);
    assert!(ast
        .children(args)
        .iter()
        .all(|arg| ast.node_type(*arg) == NodeType::AtomicExpr));
    assert!(ast.children(calls[1]).is_empty());
}

#[test]
fn test_call_arguments_are_atomic() {
    let error = parse_body("call f(a + b);").unwrap_err();

    assert!(matches!(
        error.get_internal_error(),
        ErrorImpl::UnexpectedToken {
            actual: TokenKind::Plus,
            ..
        }
    ));
}

#[test]
fn test_assignment_requires_assign_after_identifier() {
    let error = parse_body("x;").unwrap_err();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnexpectedToken {
            expected: vec![TokenKind::Assign],
            actual: TokenKind::Semicolon,
        }
    );
}

#[test]
fn test_expression_statement_without_target() {
    let ast = parse_body("print(\"hi\");").unwrap();
    let assign = ast.find_all(NodeType::AssignExpr)[0];

    assert_eq!(ast.kind(assign), &NodeKind::AssignExpr { variable: None });
    assert_eq!(ast.find_all(NodeType::PrintCall).len(), 1);
}

#[test]
fn test_atomic_requires_alternative() {
    let error = parse_body("return ;").unwrap_err();

    match error.get_internal_error() {
        ErrorImpl::UnexpectedToken { expected, actual } => {
            assert_eq!(*actual, TokenKind::Semicolon);
            assert_eq!(expected.as_slice(), NodeType::AtomicExpr.selection_set());
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_literals() {
    let ast = parse_body("int a = 1; double b = 2.5; string c = \"x y\"; bool d = false;").unwrap();
    let literals: Vec<NodeKind> = ast
        .find_all(NodeType::Literal)
        .iter()
        .map(|id| ast.kind(*id).clone())
        .collect();

    assert_eq!(
        literals,
        vec![
            NodeKind::Literal {
                literal_type: LiteralType::Int,
                value: "1".into()
            },
            NodeKind::Literal {
                literal_type: LiteralType::Double,
                value: "2.5".into()
            },
            NodeKind::Literal {
                literal_type: LiteralType::String,
                value: "x y".into()
            },
            NodeKind::Literal {
                literal_type: LiteralType::Bool,
                value: "false".into()
            },
        ]
    );
}

#[test]
fn test_empty_block_and_nested_block() {
    let ast = parse_body("{ { } }").unwrap();

    assert_eq!(ast.find_all(NodeType::AnonymousBlock).len(), 2);
    let function = ast.find_all(NodeType::FunctionDef)[0];
    let body = ast.child_of_type(function, NodeType::StmtList).unwrap();
    assert_eq!(ast.children(body).len(), 1);
}

#[test]
fn test_unparse_reproduces_source() {
    let source = "int f := ( int a ; int b = 2 ) { int c = a * b ; \
                  if ( c == 4 ) { print ( \"four\" ) ; } else { c = call f ( 1 ) ; } \
                  return c != 0 ? c : ( a ? 1 : 2 ) ; }";
    let ast = parse_source(source).unwrap();

    let words: Vec<&str> = source.split_whitespace().collect();
    assert_eq!(unparse(&ast), words.join(" "));
}

#[test]
#[should_panic(expected = "structural invariant violation")]
fn test_exit_wrong_node_panics() {
    let mut parser = Parser::new(TokenStream::new(vec![]));
    let outer = parser.enter_node(NodeKind::Entry);
    let _inner = parser.enter_node(NodeKind::StmtList);

    parser.exit_node(outer);
}

#[test]
fn test_stack_balanced_after_enter_exit() {
    let mut parser = Parser::new(TokenStream::new(vec![]));
    let outer = parser.enter_node(NodeKind::Entry);
    let inner = parser.enter_node(NodeKind::StmtList);

    assert_eq!(parser.depth(), 2);
    parser.exit_node(inner);
    parser.exit_node(outer);
    assert_eq!(parser.depth(), 0);
    assert_eq!(parser.ast().children(outer), &[inner]);
}

#[test]
fn test_stmt_without_matching_alternative_is_empty() {
    let mut parser = Parser::new(TokenStream::new(tokenize("}").unwrap()));

    parse_stmt(&mut parser).unwrap();

    let ast = parser.ast();
    let stmt = ast.root().unwrap();
    assert_eq!(ast.len(), 1);
    assert_eq!(ast.node_type(stmt), NodeType::Stmt);
    assert!(ast.children(stmt).is_empty());
    assert_eq!(parser.current_token_kind(), TokenKind::RBrace);
    assert_eq!(parser.depth(), 0);
}

#[test]
fn test_stmt_selection_set_is_union_of_alternatives() {
    let alternatives = [
        NodeType::VarDecl,
        NodeType::AssignStmt,
        NodeType::ReturnStmt,
        NodeType::IfStmt,
        NodeType::WhileLoop,
        NodeType::DoWhileLoop,
        NodeType::ForLoop,
        NodeType::SwitchCaseStmt,
        NodeType::AnonymousBlock,
        NodeType::FunctionCall,
    ];

    for kind in NodeType::Stmt.selection_set() {
        assert!(
            alternatives.iter().any(|alt| alt.begins_with(*kind)),
            "{} begins no statement alternative",
            kind
        );
    }
}
