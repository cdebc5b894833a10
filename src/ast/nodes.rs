//! Node variants, one per grammar production.
//!
//! `NodeKind` carries the production-specific fields, `NodeType` is its
//! fieldless discriminant used for selection-set lookups and diagnostics.

use std::fmt::Display;

/// Primitive data types of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Int,
    Double,
    String,
    Bool,
}

impl DataType {
    /// The LLVM IR type this data type lowers to.
    pub fn ir_type(&self) -> &'static str {
        match self {
            DataType::Int => "i32",
            DataType::Double => "double",
            DataType::String => "ptr",
            DataType::Bool => "i1",
        }
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, DataType::Double)
    }

    pub fn spelling(&self) -> &'static str {
        match self {
            DataType::Int => "int",
            DataType::Double => "double",
            DataType::String => "string",
            DataType::Bool => "bool",
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.spelling())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralType {
    Int,
    Double,
    String,
    Bool,
}

impl LiteralType {
    pub fn data_type(&self) -> DataType {
        match self {
            LiteralType::Int => DataType::Int,
            LiteralType::Double => DataType::Double,
            LiteralType::String => DataType::String,
            LiteralType::Bool => DataType::Bool,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EqualityOp {
    Eq,
    Neq,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdditiveOp {
    Plus,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiplicativeOp {
    Mul,
    Div,
}

/// Production-specific payload of a node.
///
/// Operator chains (`AdditiveExpr`, `MultiplicativeExpr`) are flat: N operand
/// children and N-1 operators, applied strictly left to right.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Entry,
    FunctionDef { identifier: String },
    ParamList,
    Param { name: String },
    ArgList,
    VarDecl { name: String },
    AssignStmt,
    /// `variable` is set when the expression is an assignment `x = expr`.
    AssignExpr { variable: Option<String> },
    ReturnStmt,
    StmtList,
    Stmt,
    IfStmt,
    IfBody,
    /// `contains_if` is set for `else if`.
    ElseStmt { contains_if: bool },
    WhileLoop,
    DoWhileLoop,
    ForLoop,
    SwitchCaseStmt,
    CaseBlock,
    DefaultBlock,
    AnonymousBlock,
    FunctionCall { identifier: String },
    PrintCall,
    TernaryExpr { expanded: bool },
    EqualityExpr { op: Option<EqualityOp> },
    AdditiveExpr { operators: Vec<AdditiveOp> },
    MultiplicativeExpr { operators: Vec<MultiplicativeOp> },
    /// `variable` is set for a bare identifier reference.
    AtomicExpr { variable: Option<String> },
    Literal { literal_type: LiteralType, value: String },
    Type { data_type: DataType },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Entry,
    FunctionDef,
    ParamList,
    Param,
    ArgList,
    VarDecl,
    AssignStmt,
    AssignExpr,
    ReturnStmt,
    StmtList,
    Stmt,
    IfStmt,
    IfBody,
    ElseStmt,
    WhileLoop,
    DoWhileLoop,
    ForLoop,
    SwitchCaseStmt,
    CaseBlock,
    DefaultBlock,
    AnonymousBlock,
    FunctionCall,
    PrintCall,
    TernaryExpr,
    EqualityExpr,
    AdditiveExpr,
    MultiplicativeExpr,
    AtomicExpr,
    Literal,
    Type,
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Entry => NodeType::Entry,
            NodeKind::FunctionDef { .. } => NodeType::FunctionDef,
            NodeKind::ParamList => NodeType::ParamList,
            NodeKind::Param { .. } => NodeType::Param,
            NodeKind::ArgList => NodeType::ArgList,
            NodeKind::VarDecl { .. } => NodeType::VarDecl,
            NodeKind::AssignStmt => NodeType::AssignStmt,
            NodeKind::AssignExpr { .. } => NodeType::AssignExpr,
            NodeKind::ReturnStmt => NodeType::ReturnStmt,
            NodeKind::StmtList => NodeType::StmtList,
            NodeKind::Stmt => NodeType::Stmt,
            NodeKind::IfStmt => NodeType::IfStmt,
            NodeKind::IfBody => NodeType::IfBody,
            NodeKind::ElseStmt { .. } => NodeType::ElseStmt,
            NodeKind::WhileLoop => NodeType::WhileLoop,
            NodeKind::DoWhileLoop => NodeType::DoWhileLoop,
            NodeKind::ForLoop => NodeType::ForLoop,
            NodeKind::SwitchCaseStmt => NodeType::SwitchCaseStmt,
            NodeKind::CaseBlock => NodeType::CaseBlock,
            NodeKind::DefaultBlock => NodeType::DefaultBlock,
            NodeKind::AnonymousBlock => NodeType::AnonymousBlock,
            NodeKind::FunctionCall { .. } => NodeType::FunctionCall,
            NodeKind::PrintCall => NodeType::PrintCall,
            NodeKind::TernaryExpr { .. } => NodeType::TernaryExpr,
            NodeKind::EqualityExpr { .. } => NodeType::EqualityExpr,
            NodeKind::AdditiveExpr { .. } => NodeType::AdditiveExpr,
            NodeKind::MultiplicativeExpr { .. } => NodeType::MultiplicativeExpr,
            NodeKind::AtomicExpr { .. } => NodeType::AtomicExpr,
            NodeKind::Literal { .. } => NodeType::Literal,
            NodeKind::Type { .. } => NodeType::Type,
        }
    }
}

impl Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
