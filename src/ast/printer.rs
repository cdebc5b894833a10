//! Tree rendering: an indented node listing for humans, and a
//! re-serialization back into source text.

use super::{
    ast::{Ast, NodeId},
    nodes::{AdditiveOp, EqualityOp, LiteralType, MultiplicativeOp, NodeKind, NodeType},
};

/// One line per node in pre-order, indented by depth.
pub fn dump(ast: &Ast) -> String {
    let mut out = String::new();
    if let Some(root) = ast.root() {
        dump_node(ast, root, 0, &mut out);
    }
    out
}

fn dump_node(ast: &Ast, id: NodeId, depth: usize, out: &mut String) {
    let node = ast.node(id);
    let details = match &node.kind {
        NodeKind::FunctionDef { identifier } | NodeKind::FunctionCall { identifier } => {
            format!(" {}", identifier)
        }
        NodeKind::Param { name } | NodeKind::VarDecl { name } => format!(" {}", name),
        NodeKind::AssignExpr {
            variable: Some(variable),
        } => format!(" {} =", variable),
        NodeKind::ElseStmt { contains_if: true } => String::from(" if"),
        NodeKind::TernaryExpr { expanded: true } => String::from(" ?:"),
        NodeKind::EqualityExpr { op: Some(op) } => format!(" {}", equality_spelling(*op)),
        NodeKind::AdditiveExpr { operators } if !operators.is_empty() => format!(
            " [{}]",
            operators
                .iter()
                .map(|op| additive_spelling(*op))
                .collect::<Vec<&str>>()
                .join(", ")
        ),
        NodeKind::MultiplicativeExpr { operators } if !operators.is_empty() => format!(
            " [{}]",
            operators
                .iter()
                .map(|op| multiplicative_spelling(*op))
                .collect::<Vec<&str>>()
                .join(", ")
        ),
        NodeKind::AtomicExpr {
            variable: Some(variable),
        } => format!(" {}", variable),
        NodeKind::Literal {
            literal_type,
            value,
        } => format!(" {} {}", literal_type.data_type(), literal_text(*literal_type, value)),
        NodeKind::Type { data_type } => format!(" {}", data_type),
        _ => String::new(),
    };

    out.push_str(&format!(
        "{}{}{} @ {}\n",
        "  ".repeat(depth),
        node.node_type(),
        details,
        node.location
    ));

    for child in node.children() {
        dump_node(ast, *child, depth + 1, out);
    }
}

/// Writes the tree back out as source, one space between tokens.
pub fn unparse(ast: &Ast) -> String {
    let mut tokens = vec![];
    if let Some(root) = ast.root() {
        unparse_node(ast, root, &mut tokens);
    }
    tokens.join(" ")
}

fn unparse_node(ast: &Ast, id: NodeId, out: &mut Vec<String>) {
    let children = ast.children(id);

    match ast.kind(id) {
        NodeKind::Entry | NodeKind::StmtList => {
            for child in children {
                unparse_node(ast, *child, out);
            }
        }
        NodeKind::FunctionDef { identifier } => {
            unparse_node(ast, children[0], out);
            out.extend([identifier.clone(), ":=".into(), "(".into()]);
            if let Some(params) = ast.child_of_type(id, NodeType::ParamList) {
                unparse_node(ast, params, out);
            }
            out.extend([")".into(), "{".into()]);
            unparse_children_of_type(ast, id, NodeType::StmtList, out);
            out.push("}".into());
        }
        NodeKind::ParamList | NodeKind::ArgList => {
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    out.push(";".into());
                }
                unparse_node(ast, *child, out);
            }
        }
        NodeKind::Param { name } => {
            unparse_node(ast, children[0], out);
            out.push(name.clone());
            if let Some(default) = children.get(1) {
                out.push("=".into());
                unparse_node(ast, *default, out);
            }
        }
        NodeKind::VarDecl { name } => {
            unparse_node(ast, children[0], out);
            out.extend([name.clone(), "=".into()]);
            unparse_node(ast, children[1], out);
            out.push(";".into());
        }
        NodeKind::AssignStmt => {
            unparse_node(ast, children[0], out);
            out.push(";".into());
        }
        NodeKind::AssignExpr { variable } => {
            if let Some(variable) = variable {
                out.extend([variable.clone(), "=".into()]);
            }
            unparse_node(ast, children[0], out);
        }
        NodeKind::ReturnStmt => {
            out.push("return".into());
            unparse_node(ast, children[0], out);
            out.push(";".into());
        }
        NodeKind::Stmt => {
            if let Some(child) = children.first() {
                unparse_node(ast, *child, out);
                if ast.node_type(*child) == NodeType::FunctionCall {
                    out.push(";".into());
                }
            }
        }
        NodeKind::IfStmt => {
            out.extend(["if".into(), "(".into()]);
            unparse_node(ast, children[0], out);
            out.push(")".into());
            for child in &children[1..] {
                unparse_node(ast, *child, out);
            }
        }
        NodeKind::IfBody | NodeKind::AnonymousBlock => {
            out.push("{".into());
            unparse_node(ast, children[0], out);
            out.push("}".into());
        }
        NodeKind::ElseStmt { .. } => {
            out.push("else".into());
            unparse_node(ast, children[0], out);
        }
        NodeKind::WhileLoop => {
            out.extend(["while".into(), "(".into()]);
            unparse_node(ast, children[0], out);
            out.extend([")".into(), "{".into()]);
            unparse_node(ast, children[1], out);
            out.push("}".into());
        }
        NodeKind::DoWhileLoop => {
            out.extend(["do".into(), "{".into()]);
            unparse_node(ast, children[0], out);
            out.extend(["}".into(), "while".into(), "(".into()]);
            unparse_node(ast, children[1], out);
            out.extend([")".into(), ";".into()]);
        }
        NodeKind::ForLoop => {
            out.extend(["for".into(), "(".into()]);
            unparse_node(ast, children[0], out);
            unparse_node(ast, children[1], out);
            out.push(";".into());
            unparse_node(ast, children[2], out);
            out.extend([")".into(), "{".into()]);
            unparse_node(ast, children[3], out);
            out.push("}".into());
        }
        NodeKind::SwitchCaseStmt => {
            out.extend(["switch".into(), "(".into()]);
            unparse_node(ast, children[0], out);
            out.extend([")".into(), "{".into()]);
            for child in &children[1..] {
                unparse_node(ast, *child, out);
            }
            out.push("}".into());
        }
        NodeKind::CaseBlock => {
            out.push("case".into());
            unparse_node(ast, children[0], out);
            out.push(":".into());
            unparse_node(ast, children[1], out);
        }
        NodeKind::DefaultBlock => {
            out.extend(["default".into(), ":".into()]);
            unparse_node(ast, children[0], out);
        }
        NodeKind::FunctionCall { identifier } => {
            out.extend(["call".into(), identifier.clone(), "(".into()]);
            if let Some(args) = children.first() {
                unparse_node(ast, *args, out);
            }
            out.push(")".into());
        }
        NodeKind::PrintCall => {
            out.extend(["print".into(), "(".into()]);
            unparse_node(ast, children[0], out);
            out.push(")".into());
        }
        NodeKind::TernaryExpr { .. } => {
            unparse_node(ast, children[0], out);
            if children.len() == 3 {
                out.push("?".into());
                unparse_node(ast, children[1], out);
                out.push(":".into());
                unparse_node(ast, children[2], out);
            }
        }
        NodeKind::EqualityExpr { op } => {
            unparse_node(ast, children[0], out);
            if let (Some(op), Some(rhs)) = (op, children.get(1)) {
                out.push(equality_spelling(*op).into());
                unparse_node(ast, *rhs, out);
            }
        }
        NodeKind::AdditiveExpr { operators } => {
            let spelled = operators.iter().map(|op| additive_spelling(*op));
            unparse_chain(ast, children, spelled, out);
        }
        NodeKind::MultiplicativeExpr { operators } => {
            let spelled = operators.iter().map(|op| multiplicative_spelling(*op));
            unparse_chain(ast, children, spelled, out);
        }
        NodeKind::AtomicExpr { variable } => match (variable, children.first()) {
            (Some(variable), _) => out.push(variable.clone()),
            (None, Some(child)) if ast.node_type(*child) == NodeType::TernaryExpr => {
                out.push("(".into());
                unparse_node(ast, *child, out);
                out.push(")".into());
            }
            (None, Some(child)) => unparse_node(ast, *child, out),
            (None, None) => {}
        },
        NodeKind::Literal {
            literal_type,
            value,
        } => out.push(literal_text(*literal_type, value)),
        NodeKind::Type { data_type } => out.push(data_type.spelling().into()),
    }
}

fn unparse_children_of_type(ast: &Ast, id: NodeId, node_type: NodeType, out: &mut Vec<String>) {
    for child in ast.children(id) {
        if ast.node_type(*child) == node_type {
            unparse_node(ast, *child, out);
        }
    }
}

fn unparse_chain<'a>(
    ast: &Ast,
    operands: &[NodeId],
    operators: impl Iterator<Item = &'a str>,
    out: &mut Vec<String>,
) {
    unparse_node(ast, operands[0], out);
    for (op, operand) in operators.zip(&operands[1..]) {
        out.push(op.to_string());
        unparse_node(ast, *operand, out);
    }
}

fn literal_text(literal_type: LiteralType, value: &str) -> String {
    match literal_type {
        LiteralType::String => format!("\"{}\"", value),
        _ => value.to_string(),
    }
}

fn equality_spelling(op: EqualityOp) -> &'static str {
    match op {
        EqualityOp::Eq => "==",
        EqualityOp::Neq => "!=",
    }
}

fn additive_spelling(op: AdditiveOp) -> &'static str {
    match op {
        AdditiveOp::Plus => "+",
        AdditiveOp::Minus => "-",
    }
}

fn multiplicative_spelling(op: MultiplicativeOp) -> &'static str {
    match op {
        MultiplicativeOp::Mul => "*",
        MultiplicativeOp::Div => "/",
    }
}
