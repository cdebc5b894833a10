//! Unit tests for IR lowering.
//!
//! The trees are annotated by a small stand-in for the external resolution
//! pass: every value-producing node gets a type and a sequential `%N` name,
//! every variable a `%<name>.addr` slot, and every string literal a
//! `@.str.N` constant.

use std::collections::HashMap;

use super::{
    compiler::{compile, Compiler, IrModule},
    expr::gen_expression,
    instructions::{Instruction, InstructionKind, Operand},
};
use crate::{
    ast::{
        ast::{Annotation, Ast, NodeId},
        nodes::{AdditiveOp, DataType, LiteralType, NodeKind, NodeType},
    },
    lexer::lexer::tokenize,
    parser::parser::parse,
    CodeLoc,
};

struct Resolver {
    scopes: Vec<HashMap<String, (String, DataType)>>,
    functions: HashMap<String, DataType>,
    next_value: usize,
    next_string: usize,
}

fn type_of(ast: &Ast, id: NodeId) -> DataType {
    match ast.kind(id) {
        NodeKind::Type { data_type } => *data_type,
        other => panic!("not a type: {:?}", other),
    }
}

impl Resolver {
    fn fresh(&mut self) -> String {
        let name = format!("%{}", self.next_value);
        self.next_value += 1;
        name
    }

    fn lookup(&self, name: &str) -> (String, DataType) {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .cloned()
            .unwrap_or_else(|| panic!("unresolved variable {}", name))
    }

    fn scoped(&mut self, ast: &mut Ast, children: &[NodeId]) {
        self.scopes.push(HashMap::new());
        for child in children {
            self.resolve(ast, *child);
        }
        self.scopes.pop();
    }

    fn produce(&mut self, ast: &mut Ast, id: NodeId, ty: DataType) -> Option<DataType> {
        let value = self.fresh();
        ast.annotate(id, Annotation::new(ty, value));
        Some(ty)
    }

    fn forward(&mut self, ast: &mut Ast, id: NodeId, child: NodeId) -> Option<DataType> {
        self.resolve(ast, child);
        let annotation = ast.annotation(child).cloned()?;
        ast.annotate(id, Annotation::new(annotation.ty, annotation.value));
        Some(annotation.ty)
    }

    fn resolve(&mut self, ast: &mut Ast, id: NodeId) -> Option<DataType> {
        let children = ast.children(id).to_vec();

        match ast.kind(id).clone() {
            NodeKind::FunctionDef { .. } => {
                self.next_value = 0;
                self.scoped(ast, &children);
                None
            }
            NodeKind::AnonymousBlock
            | NodeKind::IfBody
            | NodeKind::ForLoop
            | NodeKind::CaseBlock
            | NodeKind::DefaultBlock => {
                self.scoped(ast, &children);
                None
            }
            NodeKind::Param { name } | NodeKind::VarDecl { name } => {
                for child in &children[1..] {
                    self.resolve(ast, *child);
                }
                let ty = type_of(ast, children[0]);
                let slot = format!("%{}.addr", name);
                self.scopes
                    .last_mut()
                    .unwrap()
                    .insert(name, (slot.clone(), ty));
                ast.annotate(id, Annotation::new(ty, slot));
                None
            }
            NodeKind::AssignExpr { variable } => {
                let ty = self.resolve(ast, children[0]).unwrap();
                let value = ast.result_value_name(children[0]).unwrap().to_string();
                let mut annotation = Annotation::new(ty, value);
                if let Some(variable) = variable {
                    annotation = annotation.with_slot(self.lookup(&variable).0);
                }
                ast.annotate(id, annotation);
                Some(ty)
            }
            NodeKind::TernaryExpr { expanded: true } => {
                for child in &children {
                    self.resolve(ast, *child);
                }
                let ty = ast.resolved_type(children[1]).unwrap();
                self.produce(ast, id, ty)
            }
            NodeKind::EqualityExpr { op: Some(_) } => {
                for child in &children {
                    self.resolve(ast, *child);
                }
                self.produce(ast, id, DataType::Bool)
            }
            NodeKind::AdditiveExpr { operators } if !operators.is_empty() => {
                self.chain(ast, id, &children)
            }
            NodeKind::MultiplicativeExpr { operators } if !operators.is_empty() => {
                self.chain(ast, id, &children)
            }
            NodeKind::TernaryExpr { .. }
            | NodeKind::EqualityExpr { .. }
            | NodeKind::AdditiveExpr { .. }
            | NodeKind::MultiplicativeExpr { .. }
            | NodeKind::AtomicExpr { variable: None } => self.forward(ast, id, children[0]),
            NodeKind::AtomicExpr {
                variable: Some(variable),
            } => {
                let (slot, ty) = self.lookup(&variable);
                let value = self.fresh();
                ast.annotate(id, Annotation::new(ty, value).with_slot(slot));
                Some(ty)
            }
            NodeKind::Literal {
                literal_type,
                value,
            } => {
                let value = match literal_type {
                    LiteralType::String => {
                        self.next_string += 1;
                        format!("@.str.{}", self.next_string - 1)
                    }
                    _ => value,
                };
                let ty = literal_type.data_type();
                ast.annotate(id, Annotation::new(ty, value));
                Some(ty)
            }
            NodeKind::FunctionCall { identifier } => {
                for child in &children {
                    self.resolve(ast, *child);
                }
                let ty = self.functions[&identifier];
                self.produce(ast, id, ty)
            }
            NodeKind::PrintCall => {
                self.resolve(ast, children[0]);
                self.produce(ast, id, DataType::Int)
            }
            _ => {
                for child in &children {
                    self.resolve(ast, *child);
                }
                None
            }
        }
    }

    fn chain(&mut self, ast: &mut Ast, id: NodeId, children: &[NodeId]) -> Option<DataType> {
        for child in children {
            self.resolve(ast, *child);
        }
        let ty = ast.resolved_type(children[0]).unwrap();
        self.produce(ast, id, ty)
    }
}

fn annotated(source: &str) -> Ast {
    let mut ast = parse(tokenize(source).unwrap()).unwrap();
    let mut resolver = Resolver {
        scopes: vec![],
        functions: HashMap::new(),
        next_value: 0,
        next_string: 0,
    };

    for function in ast.find_all(NodeType::FunctionDef) {
        if let NodeKind::FunctionDef { identifier } = ast.kind(function) {
            let ty = type_of(&ast, ast.children(function)[0]);
            resolver.functions.insert(identifier.clone(), ty);
        }
    }
    if let Some(root) = ast.root() {
        resolver.resolve(&mut ast, root);
    }
    ast
}

fn lower(source: &str) -> IrModule {
    compile(&annotated(source))
}

fn ir_lines(module: &IrModule, function: &str) -> Vec<String> {
    module
        .function(function)
        .unwrap()
        .instructions
        .iter()
        .map(|instruction| instruction.dump_ir())
        .collect()
}

#[test]
fn test_plus_renders_ir_and_trace() {
    let mut ast = Ast::new();
    let loc = CodeLoc::new(3, 10);
    let id = ast.add_node(
        NodeKind::AdditiveExpr {
            operators: vec![AdditiveOp::Plus],
        },
        loc,
        None,
    );
    let instruction = Instruction::new(
        id,
        loc,
        InstructionKind::Plus {
            result: "%3".into(),
            lhs: Operand::new("%1", DataType::Int),
            rhs: Operand::new("%2", DataType::Int),
        },
    );

    assert_eq!(instruction.dump_ir(), "%3 = add i32 %1, %2");
    assert_eq!(instruction.trace(), "L3C10: binary operation: add expression");
    assert!(!instruction.is_terminator());
}

#[test]
fn test_lower_annotated_additive_node() {
    let mut ast = Ast::new();
    let loc = CodeLoc::new(1, 8);
    let additive = ast.add_node(
        NodeKind::AdditiveExpr {
            operators: vec![AdditiveOp::Plus],
        },
        loc,
        None,
    );
    for (name, value) in [("a", "%1"), ("b", "%2")] {
        let mul = ast.add_node(
            NodeKind::MultiplicativeExpr { operators: vec![] },
            loc,
            Some(additive),
        );
        let atomic = ast.add_node(
            NodeKind::AtomicExpr {
                variable: Some(name.into()),
            },
            loc,
            Some(mul),
        );
        ast.annotate(
            atomic,
            Annotation::new(DataType::Int, value).with_slot(format!("%{}.addr", name)),
        );
    }
    ast.annotate(additive, Annotation::new(DataType::Int, "%3"));

    let mut compiler = Compiler::new(&ast);
    let result = gen_expression(&mut compiler, additive);
    let ir: Vec<String> = compiler
        .instructions()
        .iter()
        .map(|instruction| instruction.dump_ir())
        .collect();

    assert_eq!(result, Operand::new("%3", DataType::Int));
    assert_eq!(
        ir,
        vec![
            "%1 = load i32, ptr %a.addr",
            "%2 = load i32, ptr %b.addr",
            "%3 = add i32 %1, %2"
        ]
    );
    assert_eq!(
        compiler.instructions()[2].trace(),
        "L1C8: binary operation: add expression"
    );
}

#[test]
fn test_subtraction_chain_folds_left() {
    let module = lower("int f := (int a; int b; int c) { return a - b - c; }");

    assert_eq!(
        module.dump_ir(),
        "define i32 @f(i32 %a, i32 %b, i32 %c) {\n\
         entry:\n  \
         %a.addr = alloca i32\n  \
         %b.addr = alloca i32\n  \
         %c.addr = alloca i32\n  \
         store i32 %a, ptr %a.addr\n  \
         store i32 %b, ptr %b.addr\n  \
         store i32 %c, ptr %c.addr\n  \
         %0 = load i32, ptr %a.addr\n  \
         %1 = load i32, ptr %b.addr\n  \
         %sub.tmp0 = sub i32 %0, %1\n  \
         %2 = load i32, ptr %c.addr\n  \
         %3 = sub i32 %sub.tmp0, %2\n  \
         ret i32 %3\n\
         }\n"
    );
}

#[test]
fn test_floating_point_mnemonics() {
    let module = lower(
        "double f := (double a) { return a * 2.0 + 1.5; }\n\
         bool g := (double a) { return a != 2.0; }",
    );

    let f = ir_lines(&module, "f");
    assert!(f.contains(&String::from("%1 = fmul double %0, 2.0")));
    assert!(f.contains(&String::from("%2 = fadd double %1, 1.5")));

    let g = ir_lines(&module, "g");
    assert!(g.contains(&String::from("%1 = fcmp one double %0, 2.0")));
    assert!(g.contains(&String::from("ret i1 %1")));
}

#[test]
fn test_integer_comparison_and_division() {
    let module = lower("bool f := (int a; int b) { return a / b == 2; }");
    let f = ir_lines(&module, "f");

    assert!(f.contains(&String::from("%2 = sdiv i32 %0, %1")));
    assert!(f.contains(&String::from("%3 = icmp eq i32 %2, 2")));
}

#[test]
fn test_ternary_lowers_to_select() {
    let module = lower("int f := (bool c; int a) { return c ? a : 0; }");
    let f = ir_lines(&module, "f");

    assert_eq!(
        &f[f.len() - 4..],
        &[
            "%0 = load i1, ptr %c.addr",
            "%1 = load i32, ptr %a.addr",
            "%2 = select i1 %0, i32 %1, i32 0",
            "ret i32 %2",
        ]
    );
    assert!(module
        .trace()
        .iter()
        .any(|line| line.ends_with(": ternary operation: select expression")));
}

#[test]
fn test_ternary_with_calls_runs_one_branch() {
    let module = lower("int f := (bool c) { return c ? print(1) : print(2); }");

    assert_eq!(
        ir_lines(&module, "f"),
        vec![
            "entry:",
            "%c.addr = alloca i1",
            "store i1 %c, ptr %c.addr",
            "%0 = load i1, ptr %c.addr",
            "br i1 %0, label %ternary.then.0, label %ternary.else.1",
            "ternary.then.0:",
            "%1 = call i32 (ptr, ...) @printf(ptr @.fmt.int, i32 1)",
            "br label %ternary.end.2",
            "ternary.else.1:",
            "%2 = call i32 (ptr, ...) @printf(ptr @.fmt.int, i32 2)",
            "br label %ternary.end.2",
            "ternary.end.2:",
            "%3 = phi i32 [ %1, %ternary.then.0 ], [ %2, %ternary.else.1 ]",
            "ret i32 %3",
        ]
    );
    assert!(module
        .trace()
        .iter()
        .any(|line| line.ends_with(": ternary operation: phi expression")));
}

#[test]
fn test_nested_ternary_phi_uses_inner_end_block() {
    let module = lower("int f := (bool c) { return c ? (c ? print(1) : print(2)) : 0; }");
    let f = ir_lines(&module, "f");

    assert!(f.contains(&String::from(
        "%4 = phi i32 [ %2, %ternary.then.3 ], [ %3, %ternary.else.4 ]"
    )));
    assert!(f.contains(&String::from(
        "%5 = phi i32 [ %4, %ternary.end.5 ], [ 0, %ternary.else.1 ]"
    )));
}

#[test]
fn test_allocas_live_in_entry_block() {
    let module = lower(
        "int f := (int n) { while (n != 0) { int y = 1; n = n - y; } return n; }",
    );
    let f = ir_lines(&module, "f");
    let first_block = f[1..]
        .iter()
        .position(|line| line.ends_with(':'))
        .unwrap()
        + 1;

    assert_eq!(f[0], "entry:");
    assert_eq!(&f[1..3], &["%n.addr = alloca i32", "%y.addr = alloca i32"]);
    assert!(f[first_block..].iter().all(|line| !line.contains(" = alloca ")));
    assert!(f[first_block..].contains(&String::from("store i32 1, ptr %y.addr")));
}

#[test]
fn test_print_widens_bool() {
    let module = lower("int main := (bool b) { print(b); return 0; }");
    let main = ir_lines(&module, "main");

    assert!(main.contains(&String::from("%zext.tmp0 = zext i1 %0 to i32")));
    assert!(main.contains(&String::from(
        "%1 = call i32 (ptr, ...) @printf(ptr @.fmt.bool, i32 %zext.tmp0)"
    )));
    assert!(module
        .trace()
        .iter()
        .any(|line| line.ends_with(": conversion: zext expression")));
}

#[test]
fn test_if_else_blocks() {
    let module = lower("int f := (bool c) { if (c) { return 1; } else { return 2; } }");

    assert_eq!(
        ir_lines(&module, "f"),
        vec![
            "entry:",
            "%c.addr = alloca i1",
            "store i1 %c, ptr %c.addr",
            "%0 = load i1, ptr %c.addr",
            "br i1 %0, label %if.then.0, label %if.else.1",
            "if.then.0:",
            "ret i32 1",
            "if.else.1:",
            "ret i32 2",
            "if.end.2:",
            "unreachable",
        ]
    );
}

#[test]
fn test_while_loop() {
    let module = lower("int f := (int n) { int i = 0; while (i != n) { i = i + 1; } return i; }");

    assert_eq!(
        ir_lines(&module, "f"),
        vec![
            "entry:",
            "%n.addr = alloca i32",
            "%i.addr = alloca i32",
            "store i32 %n, ptr %n.addr",
            "store i32 0, ptr %i.addr",
            "br label %while.cond.0",
            "while.cond.0:",
            "%0 = load i32, ptr %i.addr",
            "%1 = load i32, ptr %n.addr",
            "%2 = icmp ne i32 %0, %1",
            "br i1 %2, label %while.body.1, label %while.end.2",
            "while.body.1:",
            "%3 = load i32, ptr %i.addr",
            "%4 = add i32 %3, 1",
            "store i32 %4, ptr %i.addr",
            "br label %while.cond.0",
            "while.end.2:",
            "%5 = load i32, ptr %i.addr",
            "ret i32 %5",
        ]
    );
}

#[test]
fn test_switch_cases_do_not_fall_through() {
    let module = lower(
        "int f := (int x) { switch (x) { case 1: return 10; case 2: x = 5; default: return 0; } return x; }",
    );
    let f = ir_lines(&module, "f");
    let start = f
        .iter()
        .position(|line| line.starts_with("switch"))
        .unwrap();

    assert_eq!(
        &f[start..],
        &[
            "switch i32 %0, label %switch.default.3 [ i32 1, label %switch.case.1 i32 2, label %switch.case.2 ]",
            "switch.case.1:",
            "ret i32 10",
            "switch.case.2:",
            "store i32 5, ptr %x.addr",
            "br label %switch.end.0",
            "switch.default.3:",
            "ret i32 0",
            "switch.end.0:",
            "%1 = load i32, ptr %x.addr",
            "ret i32 %1",
        ]
    );
}

#[test]
fn test_switch_without_default_targets_end() {
    let module = lower("int f := (int x) { switch (x) { case 1: x = 2; } return x; }");
    let f = ir_lines(&module, "f");

    assert!(f.contains(&String::from(
        "switch i32 %0, label %switch.end.0 [ i32 1, label %switch.case.1 ]"
    )));
}

#[test]
fn test_print_uses_printf_support() {
    let module = lower("int main := () { print(\"hi\"); return 0; }");

    assert_eq!(module.globals[0], "declare i32 @printf(ptr, ...)");
    assert!(module
        .globals
        .contains(&String::from("@.str.0 = private unnamed_addr constant [3 x i8] c\"hi\\00\"")));
    assert!(ir_lines(&module, "main").contains(&String::from(
        "%0 = call i32 (ptr, ...) @printf(ptr @.fmt.string, ptr @.str.0)"
    )));
    assert!(module
        .trace()
        .iter()
        .any(|line| line.ends_with(": builtin call: print expression")));
}

#[test]
fn test_no_print_no_globals() {
    let module = lower("int main := () { return 0; }");

    assert!(module.globals.is_empty());
    assert!(module.dump_ir().starts_with("define i32 @main() {"));
}

#[test]
fn test_function_call() {
    let module = lower(
        "int sq := (int a) { return a * a; }\n\
         int main := () { return call sq(3); }",
    );

    assert!(ir_lines(&module, "main").contains(&String::from("%0 = call i32 @sq(i32 3)")));
    assert!(module.trace().contains(&String::from("L2C25: call: sq expression")));
}

#[test]
fn test_missing_return_ends_unreachable() {
    let module = lower("int f := () { int x = 1; }");
    let f = ir_lines(&module, "f");

    assert_eq!(f.last().unwrap(), "unreachable");
}

#[test]
fn test_code_after_return_gets_its_own_block() {
    let module = lower("int f := () { return 1; return 2; }");

    assert_eq!(
        ir_lines(&module, "f"),
        vec!["entry:", "ret i32 1", "dead.0:", "ret i32 2"]
    );
}

#[test]
fn test_one_trace_line_per_instruction() {
    let module = lower("int f := (int n) { for (int i = 0; i != n; i = i + 1) { print(i); } return n; }");
    let trace = module.trace();

    assert_eq!(trace.len(), module.instructions().count());
    assert!(trace
        .iter()
        .all(|line| line.starts_with('L') && line.ends_with(" expression")));
}

#[test]
#[should_panic(expected = "missing annotation on AdditiveExpr")]
fn test_missing_annotation_panics() {
    let ast = parse(tokenize("int f := () { return 1 + 2; }").unwrap()).unwrap();
    compile(&ast);
}
