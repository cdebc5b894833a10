use crate::ast::{
    ast::{Ast, NodeId},
    nodes::{AdditiveOp, DataType, EqualityOp, LiteralType, MultiplicativeOp, NodeKind},
};

use super::{
    compiler::{is_pass_through, Compiler},
    instructions::{InstructionKind, Operand},
    stdlib::format_string_name,
};

/// Lowers an expression node and returns the operand holding its value.
///
/// Pass-through nodes emit nothing and forward their child's operand.
/// Every other node emits the instructions computing its annotated result.
pub fn gen_expression(compiler: &mut Compiler, id: NodeId) -> Operand {
    let ast = compiler.ast;

    if is_pass_through(ast, id) {
        let child = ast.children(id)[0];
        return gen_expression(compiler, child);
    }

    match ast.kind(id) {
        NodeKind::AssignExpr { variable } => {
            let value = gen_expression(compiler, ast.children(id)[0]);
            if variable.is_some() {
                let slot = compiler.annotated_slot(id).to_string();
                compiler.emit(
                    id,
                    InstructionKind::Store {
                        value: value.clone(),
                        slot,
                    },
                );
            }
            value
        }
        NodeKind::TernaryExpr { .. } => gen_ternary(compiler, id),
        NodeKind::EqualityExpr { op: Some(op) } => {
            let children = ast.children(id);
            let lhs = gen_expression(compiler, children[0]);
            let rhs = gen_expression(compiler, children[1]);
            let result = compiler.annotated_operand(id);

            let kind = match op {
                EqualityOp::Eq => InstructionKind::Equal {
                    result: result.name.clone(),
                    lhs,
                    rhs,
                },
                EqualityOp::Neq => InstructionKind::NotEqual {
                    result: result.name.clone(),
                    lhs,
                    rhs,
                },
            };
            compiler.emit(id, kind);
            result
        }
        NodeKind::AdditiveExpr { operators } => {
            let ops: Vec<ChainOp> = operators
                .iter()
                .map(|op| match op {
                    AdditiveOp::Plus => ChainOp::Plus,
                    AdditiveOp::Minus => ChainOp::Minus,
                })
                .collect();
            gen_chain(compiler, id, &ops)
        }
        NodeKind::MultiplicativeExpr { operators } => {
            let ops: Vec<ChainOp> = operators
                .iter()
                .map(|op| match op {
                    MultiplicativeOp::Mul => ChainOp::Mul,
                    MultiplicativeOp::Div => ChainOp::Div,
                })
                .collect();
            gen_chain(compiler, id, &ops)
        }
        NodeKind::AtomicExpr {
            variable: Some(_), ..
        } => {
            let result = compiler.annotated_operand(id);
            let slot = compiler.annotated_slot(id).to_string();
            compiler.emit(
                id,
                InstructionKind::Load {
                    result: result.name.clone(),
                    ty: result.ty,
                    slot,
                },
            );
            result
        }
        NodeKind::Literal {
            literal_type,
            value,
        } => {
            let operand = compiler.annotated_operand(id);
            if *literal_type == LiteralType::String {
                compiler.add_string_constant(&operand.name, value);
            }
            operand
        }
        NodeKind::FunctionCall { identifier } => {
            let args = match ast.child(id, 0) {
                Some(arg_list) => ast
                    .children(arg_list)
                    .iter()
                    .map(|arg| gen_expression(compiler, *arg))
                    .collect(),
                None => vec![],
            };
            let result = compiler.annotated_operand(id);

            compiler.emit(
                id,
                InstructionKind::Call {
                    result: result.name.clone(),
                    return_type: result.ty,
                    callee: identifier.clone(),
                    args,
                },
            );
            result
        }
        NodeKind::PrintCall => {
            let mut value = gen_expression(compiler, ast.children(id)[0]);
            let format = format_string_name(value.ty);

            // Variadic arguments are at least `int` wide.
            if value.ty == DataType::Bool {
                let widened = Operand::new(compiler.fresh_tmp("zext"), DataType::Int);
                compiler.emit(
                    id,
                    InstructionKind::Zext {
                        result: widened.name.clone(),
                        value,
                    },
                );
                value = widened;
            }

            let result = compiler.annotated_operand(id);
            compiler.mark_print_used();
            compiler.emit(
                id,
                InstructionKind::Print {
                    result: result.name.clone(),
                    format,
                    value,
                },
            );
            result
        }
        other => panic!(
            "{} at {} does not produce a value",
            other.node_type(),
            ast.location(id)
        ),
    }
}

/// `cond ? a : b`. Branches without calls are both evaluated and one is
/// picked with `select`; otherwise only the taken branch runs and a `phi`
/// joins the two values.
fn gen_ternary(compiler: &mut Compiler, id: NodeId) -> Operand {
    let ast = compiler.ast;
    let children = ast.children(id);
    let condition = gen_expression(compiler, children[0]);

    if children[1..].iter().any(|branch| has_side_effects(ast, *branch)) {
        return gen_ternary_branches(compiler, id, condition);
    }

    let lhs = gen_expression(compiler, children[1]);
    let rhs = gen_expression(compiler, children[2]);
    let result = compiler.annotated_operand(id);

    compiler.emit(
        id,
        InstructionKind::Select {
            result: result.name.clone(),
            condition,
            lhs,
            rhs,
        },
    );
    result
}

fn gen_ternary_branches(compiler: &mut Compiler, id: NodeId, condition: Operand) -> Operand {
    let ast = compiler.ast;
    let children = ast.children(id);
    let then_label = compiler.fresh_label("ternary.then");
    let else_label = compiler.fresh_label("ternary.else");
    let end_label = compiler.fresh_label("ternary.end");

    compiler.emit(
        id,
        InstructionKind::CondBranch {
            condition,
            then_label: then_label.clone(),
            else_label: else_label.clone(),
        },
    );

    let mut incoming = vec![];
    for (label, branch) in [(then_label, children[1]), (else_label, children[2])] {
        compiler.start_block(id, &label);
        let value = gen_expression(compiler, branch);
        incoming.push((value, compiler.current_block().to_string()));
        compiler.emit(
            id,
            InstructionKind::Branch {
                target: end_label.clone(),
            },
        );
    }

    compiler.start_block(id, &end_label);
    let result = compiler.annotated_operand(id);
    compiler.emit(
        id,
        InstructionKind::Phi {
            result: result.name.clone(),
            ty: result.ty,
            incoming,
        },
    );
    result
}

fn has_side_effects(ast: &Ast, id: NodeId) -> bool {
    matches!(
        ast.kind(id),
        NodeKind::FunctionCall { .. } | NodeKind::PrintCall
    ) || ast
        .children(id)
        .iter()
        .any(|child| has_side_effects(ast, *child))
}

#[derive(Debug, Clone, Copy)]
enum ChainOp {
    Plus,
    Minus,
    Mul,
    Div,
}

impl ChainOp {
    fn name(&self) -> &'static str {
        match self {
            ChainOp::Plus => "add",
            ChainOp::Minus => "sub",
            ChainOp::Mul => "mul",
            ChainOp::Div => "div",
        }
    }

    fn instruction(&self, result: String, lhs: Operand, rhs: Operand) -> InstructionKind {
        match self {
            ChainOp::Plus => InstructionKind::Plus { result, lhs, rhs },
            ChainOp::Minus => InstructionKind::Minus { result, lhs, rhs },
            ChainOp::Mul => InstructionKind::Mul { result, lhs, rhs },
            ChainOp::Div => InstructionKind::Div { result, lhs, rhs },
        }
    }
}

/// Folds `o0 op1 o1 op2 o2 ...` left to right. Only the last step writes the
/// node's annotated result; earlier steps write fresh temporaries typed like
/// their left operand.
fn gen_chain(compiler: &mut Compiler, id: NodeId, ops: &[ChainOp]) -> Operand {
    let ast = compiler.ast;
    let operands = ast.children(id);
    let result = compiler.annotated_operand(id);
    let mut acc = gen_expression(compiler, operands[0]);

    for (i, (op, operand)) in ops.iter().zip(&operands[1..]).enumerate() {
        let rhs = gen_expression(compiler, *operand);
        let target = if i + 1 == ops.len() {
            result.clone()
        } else {
            Operand::new(compiler.fresh_tmp(op.name()), acc.ty)
        };

        compiler.emit(id, op.instruction(target.name.clone(), acc, rhs));
        acc = target;
    }

    acc
}
