use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::CodeLoc;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("int", TokenKind::TypeInt);
        map.insert("double", TokenKind::TypeDouble);
        map.insert("string", TokenKind::TypeString);
        map.insert("bool", TokenKind::TypeBool);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("call", TokenKind::Call);
        map.insert("print", TokenKind::Print);
        map.insert("return", TokenKind::Ret);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("do", TokenKind::Do);
        map.insert("for", TokenKind::For);
        map.insert("switch", TokenKind::Switch);
        map.insert("case", TokenKind::Case);
        map.insert("default", TokenKind::Default);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Identifier,

    IntLit,
    DoubleLit,
    StringLit,

    LParen,
    RParen,
    LBrace,
    RBrace,

    Assign,     // =
    Equal,      // ==
    NotEqual,   // !=
    Question,   // ?
    Semicolon,
    Colon,

    Plus,
    Minus,
    Mul,
    Div,

    // Reserved
    TypeInt,
    TypeDouble,
    TypeString,
    TypeBool,
    True,
    False,
    Call,
    Print,
    Ret,
    If,
    Else,
    While,
    Do,
    For,
    Switch,
    Case,
    Default,
}

impl TokenKind {
    /// The `TOK_*` name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::EOF => "TOK_EOF",
            TokenKind::Identifier => "TOK_IDENTIFIER",
            TokenKind::IntLit => "TOK_INT_LIT",
            TokenKind::DoubleLit => "TOK_DOUBLE_LIT",
            TokenKind::StringLit => "TOK_STRING_LIT",
            TokenKind::LParen => "TOK_LPAREN",
            TokenKind::RParen => "TOK_RPAREN",
            TokenKind::LBrace => "TOK_LBRACE",
            TokenKind::RBrace => "TOK_RBRACE",
            TokenKind::Assign => "TOK_ASSIGN",
            TokenKind::Equal => "TOK_EQUAL",
            TokenKind::NotEqual => "TOK_NOT_EQUAL",
            TokenKind::Question => "TOK_QUESTION_MARK",
            TokenKind::Semicolon => "TOK_SEMICOLON",
            TokenKind::Colon => "TOK_COLON",
            TokenKind::Plus => "TOK_PLUS",
            TokenKind::Minus => "TOK_MINUS",
            TokenKind::Mul => "TOK_MUL",
            TokenKind::Div => "TOK_DIV",
            TokenKind::TypeInt => "TOK_TYPE_INT",
            TokenKind::TypeDouble => "TOK_TYPE_DOUBLE",
            TokenKind::TypeString => "TOK_TYPE_STRING",
            TokenKind::TypeBool => "TOK_TYPE_BOOL",
            TokenKind::True => "TOK_TRUE",
            TokenKind::False => "TOK_FALSE",
            TokenKind::Call => "TOK_CALL",
            TokenKind::Print => "TOK_PRINT",
            TokenKind::Ret => "TOK_RET",
            TokenKind::If => "TOK_IF",
            TokenKind::Else => "TOK_ELSE",
            TokenKind::While => "TOK_WHILE",
            TokenKind::Do => "TOK_DO",
            TokenKind::For => "TOK_FOR",
            TokenKind::Switch => "TOK_SWITCH",
            TokenKind::Case => "TOK_CASE",
            TokenKind::Default => "TOK_DEFAULT",
        }
    }

    /// Source spelling for fixed tokens, `None` for identifiers and literals.
    pub fn spelling(&self) -> Option<&'static str> {
        let spelling = match self {
            TokenKind::EOF
            | TokenKind::Identifier
            | TokenKind::IntLit
            | TokenKind::DoubleLit
            | TokenKind::StringLit => return None,
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Assign => "=",
            TokenKind::Equal => "==",
            TokenKind::NotEqual => "!=",
            TokenKind::Question => "?",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Mul => "*",
            TokenKind::Div => "/",
            TokenKind::TypeInt => "int",
            TokenKind::TypeDouble => "double",
            TokenKind::TypeString => "string",
            TokenKind::TypeBool => "bool",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Call => "call",
            TokenKind::Print => "print",
            TokenKind::Ret => "return",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::Do => "do",
            TokenKind::For => "for",
            TokenKind::Switch => "switch",
            TokenKind::Case => "case",
            TokenKind::Default => "default",
        };

        Some(spelling)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A lexed token. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: CodeLoc,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::Identifier
            | TokenKind::IntLit
            | TokenKind::DoubleLit
            | TokenKind::StringLit => {
                write!(f, "{} {} ({})", self.location, self.kind, self.text)
            }
            _ => write!(f, "{} {}", self.location, self.kind),
        }
    }
}
