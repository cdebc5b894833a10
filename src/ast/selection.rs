//! Selection sets: the token kinds that may begin each production.
//!
//! The parser never looks further than the current token, so every choice
//! between alternatives goes through `NodeType::begins_with`.

use crate::lexer::tokens::TokenKind;

use super::nodes::NodeType;

const TYPE: &[TokenKind] = &[
    TokenKind::TypeInt,
    TokenKind::TypeDouble,
    TokenKind::TypeString,
    TokenKind::TypeBool,
];

const LITERAL: &[TokenKind] = &[
    TokenKind::IntLit,
    TokenKind::DoubleLit,
    TokenKind::StringLit,
    TokenKind::True,
    TokenKind::False,
];

const ATOMIC: &[TokenKind] = &[
    TokenKind::IntLit,
    TokenKind::DoubleLit,
    TokenKind::StringLit,
    TokenKind::True,
    TokenKind::False,
    TokenKind::Call,
    TokenKind::Print,
    TokenKind::Identifier,
    TokenKind::LParen,
];

// A statement starting with `call` is the bare call alternative.
const ASSIGN_STMT: &[TokenKind] = &[
    TokenKind::IntLit,
    TokenKind::DoubleLit,
    TokenKind::StringLit,
    TokenKind::True,
    TokenKind::False,
    TokenKind::Print,
    TokenKind::Identifier,
    TokenKind::LParen,
];

// Exactly the union of the alternatives' sets, so `parse_stmt_lst` never
// enters an empty statement from source text.
const STMT: &[TokenKind] = &[
    TokenKind::TypeInt,
    TokenKind::TypeDouble,
    TokenKind::TypeString,
    TokenKind::TypeBool,
    TokenKind::IntLit,
    TokenKind::DoubleLit,
    TokenKind::StringLit,
    TokenKind::True,
    TokenKind::False,
    TokenKind::Print,
    TokenKind::Identifier,
    TokenKind::LParen,
    TokenKind::Ret,
    TokenKind::If,
    TokenKind::While,
    TokenKind::Do,
    TokenKind::For,
    TokenKind::Switch,
    TokenKind::LBrace,
    TokenKind::Call,
];

impl NodeType {
    /// The FIRST set of this production.
    pub fn selection_set(&self) -> &'static [TokenKind] {
        match self {
            NodeType::Entry
            | NodeType::FunctionDef
            | NodeType::ParamList
            | NodeType::Param
            | NodeType::VarDecl
            | NodeType::Type => TYPE,
            NodeType::ArgList
            | NodeType::AssignExpr
            | NodeType::TernaryExpr
            | NodeType::EqualityExpr
            | NodeType::AdditiveExpr
            | NodeType::MultiplicativeExpr
            | NodeType::AtomicExpr => ATOMIC,
            NodeType::AssignStmt => ASSIGN_STMT,
            NodeType::StmtList | NodeType::Stmt => STMT,
            NodeType::ReturnStmt => &[TokenKind::Ret],
            NodeType::IfStmt => &[TokenKind::If],
            NodeType::IfBody | NodeType::AnonymousBlock => &[TokenKind::LBrace],
            NodeType::ElseStmt => &[TokenKind::Else],
            NodeType::WhileLoop => &[TokenKind::While],
            NodeType::DoWhileLoop => &[TokenKind::Do],
            NodeType::ForLoop => &[TokenKind::For],
            NodeType::SwitchCaseStmt => &[TokenKind::Switch],
            NodeType::CaseBlock => &[TokenKind::Case],
            NodeType::DefaultBlock => &[TokenKind::Default],
            NodeType::FunctionCall => &[TokenKind::Call],
            NodeType::PrintCall => &[TokenKind::Print],
            NodeType::Literal => LITERAL,
        }
    }

    pub fn begins_with(&self, kind: TokenKind) -> bool {
        self.selection_set().contains(&kind)
    }
}
