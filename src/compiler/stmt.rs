use crate::ast::{
    ast::NodeId,
    nodes::{DataType, NodeKind, NodeType},
};

use super::{
    compiler::{Compiler, IrFunction},
    expr::gen_expression,
    instructions::{InstructionKind, Operand},
};

/// Lowers one function definition.
///
/// Incoming parameters are spilled into their annotated storage slots so the
/// body can treat them like any other variable.
pub fn gen_function(compiler: &mut Compiler, id: NodeId) -> IrFunction {
    let ast = compiler.ast;
    let name = match ast.kind(id) {
        NodeKind::FunctionDef { identifier } => identifier.clone(),
        other => panic!("expected a function definition, found {}", other.node_type()),
    };
    let return_type = type_of(compiler, ast.children(id)[0]);

    compiler.emit(
        id,
        InstructionKind::Label {
            name: String::from("entry"),
        },
    );

    let mut params = vec![];
    if let Some(param_list) = ast.child_of_type(id, NodeType::ParamList) {
        for param in ast.children(param_list) {
            let NodeKind::Param { name } = ast.kind(*param) else {
                continue;
            };
            let ty = type_of(compiler, ast.children(*param)[0]);
            let incoming = Operand::new(format!("%{}", name), ty);
            let slot = compiler.annotation(*param).value.clone();

            compiler.emit_alloca(*param, slot.clone(), ty);
            compiler.emit(
                *param,
                InstructionKind::Store {
                    value: incoming.clone(),
                    slot,
                },
            );
            params.push(incoming);
        }
    }

    if let Some(body) = ast.child_of_type(id, NodeType::StmtList) {
        gen_statement(compiler, body);
    }

    IrFunction {
        name,
        return_type,
        params,
        instructions: compiler.finish_function(id),
    }
}

fn type_of(compiler: &Compiler, id: NodeId) -> DataType {
    match compiler.ast.kind(id) {
        NodeKind::Type { data_type } => *data_type,
        other => panic!("expected a type, found {}", other.node_type()),
    }
}

/// Lowers a statement-level node into straight-line code and labelled blocks.
pub fn gen_statement(compiler: &mut Compiler, id: NodeId) {
    let ast = compiler.ast;
    let children = ast.children(id);

    match ast.kind(id) {
        NodeKind::StmtList | NodeKind::Stmt | NodeKind::AnonymousBlock | NodeKind::IfBody => {
            for child in children {
                gen_statement(compiler, *child);
            }
        }
        NodeKind::VarDecl { .. } => {
            let annotation = compiler.annotation(id);
            let slot = annotation.value.clone();

            compiler.emit_alloca(id, slot.clone(), annotation.ty);
            let value = gen_expression(compiler, children[1]);
            compiler.emit(id, InstructionKind::Store { value, slot });
        }
        NodeKind::AssignStmt => {
            gen_expression(compiler, children[0]);
        }
        NodeKind::FunctionCall { .. } => {
            gen_expression(compiler, id);
        }
        NodeKind::ReturnStmt => {
            let value = gen_expression(compiler, children[0]);
            compiler.emit(id, InstructionKind::Return { value });
        }
        NodeKind::IfStmt => gen_if(compiler, id),
        NodeKind::ElseStmt { .. } => gen_statement(compiler, children[0]),
        NodeKind::WhileLoop => {
            let cond_label = compiler.fresh_label("while.cond");
            let body_label = compiler.fresh_label("while.body");
            let end_label = compiler.fresh_label("while.end");

            compiler.start_block(id, &cond_label);
            let condition = gen_expression(compiler, children[0]);
            compiler.emit(
                id,
                InstructionKind::CondBranch {
                    condition,
                    then_label: body_label.clone(),
                    else_label: end_label.clone(),
                },
            );

            compiler.start_block(id, &body_label);
            gen_statement(compiler, children[1]);
            branch_if_open(compiler, id, &cond_label);

            compiler.start_block(id, &end_label);
        }
        NodeKind::DoWhileLoop => {
            let body_label = compiler.fresh_label("do.body");
            let cond_label = compiler.fresh_label("do.cond");
            let end_label = compiler.fresh_label("do.end");

            compiler.start_block(id, &body_label);
            gen_statement(compiler, children[0]);

            compiler.start_block(id, &cond_label);
            let condition = gen_expression(compiler, children[1]);
            compiler.emit(
                id,
                InstructionKind::CondBranch {
                    condition,
                    then_label: body_label,
                    else_label: end_label.clone(),
                },
            );

            compiler.start_block(id, &end_label);
        }
        NodeKind::ForLoop => {
            let cond_label = compiler.fresh_label("for.cond");
            let body_label = compiler.fresh_label("for.body");
            let inc_label = compiler.fresh_label("for.inc");
            let end_label = compiler.fresh_label("for.end");

            gen_statement(compiler, children[0]);

            compiler.start_block(id, &cond_label);
            let condition = gen_expression(compiler, children[1]);
            compiler.emit(
                id,
                InstructionKind::CondBranch {
                    condition,
                    then_label: body_label.clone(),
                    else_label: end_label.clone(),
                },
            );

            compiler.start_block(id, &body_label);
            gen_statement(compiler, children[3]);

            compiler.start_block(id, &inc_label);
            gen_expression(compiler, children[2]);
            branch_if_open(compiler, id, &cond_label);

            compiler.start_block(id, &end_label);
        }
        NodeKind::SwitchCaseStmt => gen_switch(compiler, id),
        other => panic!(
            "{} at {} is not a statement",
            other.node_type(),
            ast.location(id)
        ),
    }
}

/// `if (c) { .. } [else ..]`, where an `else if` lowers as a nested if inside
/// the else block.
fn gen_if(compiler: &mut Compiler, id: NodeId) {
    let ast = compiler.ast;
    let children = ast.children(id);
    let else_stmt = ast.child_of_type(id, NodeType::ElseStmt);

    let then_label = compiler.fresh_label("if.then");
    let else_label = else_stmt.map(|_| compiler.fresh_label("if.else"));
    let end_label = compiler.fresh_label("if.end");

    let condition = gen_expression(compiler, children[0]);
    compiler.emit(
        id,
        InstructionKind::CondBranch {
            condition,
            then_label: then_label.clone(),
            else_label: else_label.clone().unwrap_or_else(|| end_label.clone()),
        },
    );

    compiler.start_block(id, &then_label);
    gen_statement(compiler, children[1]);
    branch_if_open(compiler, id, &end_label);

    if let (Some(else_stmt), Some(else_label)) = (else_stmt, else_label) {
        compiler.start_block(id, &else_label);
        gen_statement(compiler, else_stmt);
        branch_if_open(compiler, id, &end_label);
    }

    compiler.start_block(id, &end_label);
}

fn branch_if_open(compiler: &mut Compiler, id: NodeId, target: &str) {
    if !compiler.is_terminated() {
        compiler.emit(
            id,
            InstructionKind::Branch {
                target: target.to_string(),
            },
        );
    }
}

/// Cases never fall through: every case and the default block branch to the
/// end of the switch.
fn gen_switch(compiler: &mut Compiler, id: NodeId) {
    let ast = compiler.ast;
    let children = ast.children(id);
    let end_label = compiler.fresh_label("switch.end");

    let value = gen_expression(compiler, children[0]);

    let mut cases = vec![];
    let mut default = None;
    for block in &children[1..] {
        match ast.kind(*block) {
            NodeKind::CaseBlock => {
                let label = compiler.fresh_label("switch.case");
                let literal = compiler.annotated_operand(ast.children(*block)[0]);
                cases.push((literal.name, label.clone(), *block));
            }
            NodeKind::DefaultBlock => {
                default = Some((compiler.fresh_label("switch.default"), *block));
            }
            _ => {}
        }
    }

    let default_label = default
        .as_ref()
        .map(|(label, _)| label.clone())
        .unwrap_or_else(|| end_label.clone());
    compiler.emit(
        id,
        InstructionKind::Switch {
            value,
            default_label,
            cases: cases
                .iter()
                .map(|(case, label, _)| (case.clone(), label.clone()))
                .collect(),
        },
    );

    let blocks = cases
        .into_iter()
        .map(|(_, label, block)| (label, block))
        .chain(default);
    for (label, block) in blocks {
        compiler.start_block(block, &label);
        if let Some(stmt_list) = ast.child_of_type(block, NodeType::StmtList) {
            gen_statement(compiler, stmt_list);
        }
        branch_if_open(compiler, block, &end_label);
    }

    compiler.start_block(id, &end_label);
}
