//! Main compiler module.
//!
//! This module contains the core Compiler structure and drives lowering of an
//! annotated AST into textual LLVM-style IR. It owns the per-function
//! instruction buffer, block termination state and the fresh-name counters.

use tracing::{debug, info};

use crate::{
    ast::{
        ast::{Annotation, Ast, NodeId},
        nodes::{DataType, NodeKind},
    },
};

use super::{
    instructions::{Instruction, InstructionKind, Operand},
    stdlib::{print_support, string_constant},
    stmt::gen_function,
};

/// One lowered function definition.
#[derive(Debug, Clone, PartialEq)]
pub struct IrFunction {
    pub name: String,
    pub return_type: DataType,
    pub params: Vec<Operand>,
    pub instructions: Vec<Instruction>,
}

impl IrFunction {
    pub fn dump_ir(&self) -> String {
        let params = self
            .params
            .iter()
            .map(|param| param.typed())
            .collect::<Vec<String>>()
            .join(", ");

        let mut out = format!(
            "define {} @{}({}) {{\n",
            self.return_type.ir_type(),
            self.name,
            params
        );
        for instruction in &self.instructions {
            match instruction.kind {
                InstructionKind::Label { .. } => out.push_str(&instruction.dump_ir()),
                _ => out.push_str(&format!("  {}", instruction.dump_ir())),
            }
            out.push('\n');
        }
        out.push('}');
        out
    }
}

/// The lowered translation unit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IrModule {
    /// Module-level declarations and constants, rendered before any function
    pub globals: Vec<String>,
    pub functions: Vec<IrFunction>,
}

impl IrModule {
    pub fn dump_ir(&self) -> String {
        let mut sections = vec![];
        if !self.globals.is_empty() {
            sections.push(self.globals.join("\n"));
        }
        sections.extend(self.functions.iter().map(|function| function.dump_ir()));

        let mut out = sections.join("\n\n");
        out.push('\n');
        out
    }

    /// One diagnostic line per instruction, in emission order.
    pub fn trace(&self) -> Vec<String> {
        self.instructions().map(|instruction| instruction.trace()).collect()
    }

    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.functions
            .iter()
            .flat_map(|function| function.instructions.iter())
    }

    pub fn function(&self, name: &str) -> Option<&IrFunction> {
        self.functions.iter().find(|function| function.name == name)
    }
}

/// The main compiler structure that holds the state of the lowering pass.
///
/// # Type Parameters
///
/// * `'a` - Lifetime of the annotated tree being lowered
pub struct Compiler<'a> {
    /// The annotated abstract syntax tree being lowered
    pub ast: &'a Ast,

    /// Instructions of the function currently being lowered
    instructions: Vec<Instruction>,
    /// Stack slots of the current function, placed at the top of `entry`
    allocas: Vec<Instruction>,
    /// Label of the block instructions are currently appended to
    current_block: String,
    /// Whether the current block already ended with a terminator
    terminated: bool,
    label_counter: usize,
    tmp_counter: usize,

    /// Whether any `print` was lowered, so `printf` support must be emitted
    uses_print: bool,
    /// Module-level constants backing string literals
    string_constants: Vec<String>,
}

impl<'a> Compiler<'a> {
    pub fn new(ast: &'a Ast) -> Self {
        Compiler {
            ast,
            instructions: vec![],
            allocas: vec![],
            current_block: String::new(),
            terminated: false,
            label_counter: 0,
            tmp_counter: 0,
            uses_print: false,
            string_constants: vec![],
        }
    }

    /// Appends an instruction to the current function.
    ///
    /// Code that follows a terminator gets a fresh block of its own so the
    /// emitted IR always has one terminator per block.
    pub fn emit(&mut self, source: NodeId, kind: InstructionKind) {
        let location = self.ast.location(source);
        let is_label = matches!(kind, InstructionKind::Label { .. });

        if self.terminated && !is_label {
            let name = self.fresh_label("dead");
            self.push(Instruction::new(source, location, InstructionKind::Label { name }));
        }

        self.push(Instruction::new(source, location, kind));
    }

    fn push(&mut self, instruction: Instruction) {
        debug!("{}", instruction.trace());
        self.terminated = instruction.is_terminator();
        if let InstructionKind::Label { name } = &instruction.kind {
            self.current_block = name.clone();
        }
        self.instructions.push(instruction);
    }

    /// Reserves a stack slot in the entry block, wherever the declaration is.
    pub fn emit_alloca(&mut self, source: NodeId, slot: String, ty: DataType) {
        let instruction = Instruction::new(
            source,
            self.ast.location(source),
            InstructionKind::Alloca { slot, ty },
        );
        debug!("{}", instruction.trace());
        self.allocas.push(instruction);
    }

    pub fn current_block(&self) -> &str {
        &self.current_block
    }

    /// Opens the block `name`, branching into it if the current block is still open.
    pub fn start_block(&mut self, source: NodeId, name: &str) {
        if !self.terminated {
            self.emit(
                source,
                InstructionKind::Branch {
                    target: name.to_string(),
                },
            );
        }
        self.emit(
            source,
            InstructionKind::Label {
                name: name.to_string(),
            },
        );
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn fresh_label(&mut self, prefix: &str) -> String {
        let label = format!("{}.{}", prefix, self.label_counter);
        self.label_counter += 1;
        label
    }

    /// A fresh name for an intermediate result of an operator chain.
    pub fn fresh_tmp(&mut self, op: &str) -> String {
        let tmp = format!("%{}.tmp{}", op, self.tmp_counter);
        self.tmp_counter += 1;
        tmp
    }

    /// The annotation of a value-producing node.
    ///
    /// # Panics
    ///
    /// Panics when the node was not annotated; lowering assumes a fully
    /// resolved tree.
    pub fn annotation(&self, id: NodeId) -> &'a Annotation {
        let ast: &'a Ast = self.ast;
        match ast.annotation(id) {
            Some(annotation) => annotation,
            None => panic!(
                "missing annotation on {} at {}",
                ast.node_type(id),
                ast.location(id)
            ),
        }
    }

    /// The node's annotated result as an operand.
    pub fn annotated_operand(&self, id: NodeId) -> Operand {
        let annotation = self.annotation(id);
        Operand::new(annotation.value.clone(), annotation.ty)
    }

    /// The storage slot a reference or assignment resolves to.
    pub fn annotated_slot(&self, id: NodeId) -> &'a str {
        match self.annotation(id).slot.as_deref() {
            Some(slot) => slot,
            None => panic!(
                "missing storage slot on {} at {}",
                self.ast.node_type(id),
                self.ast.location(id)
            ),
        }
    }

    pub fn mark_print_used(&mut self) {
        self.uses_print = true;
    }

    pub fn add_string_constant(&mut self, name: &str, text: &str) {
        let constant = string_constant(name, text);
        if !self.string_constants.contains(&constant) {
            self.string_constants.push(constant);
        }
    }

    /// Instructions emitted so far for the current function.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Hands out the finished instruction buffer and resets per-function state.
    pub fn finish_function(&mut self, source: NodeId) -> Vec<Instruction> {
        if !self.terminated {
            self.emit(source, InstructionKind::Unreachable);
        }

        let mut instructions = std::mem::take(&mut self.instructions);
        let entry = instructions
            .iter()
            .position(|instruction| matches!(instruction.kind, InstructionKind::Label { .. }))
            .map_or(0, |label| label + 1);
        let body = instructions.split_off(entry);
        instructions.append(&mut self.allocas);
        instructions.extend(body);

        self.current_block.clear();
        self.terminated = false;
        self.label_counter = 0;
        self.tmp_counter = 0;
        instructions
    }

    fn into_module(self, functions: Vec<IrFunction>) -> IrModule {
        let mut globals = vec![];
        if self.uses_print {
            globals.extend(print_support());
        }
        globals.extend(self.string_constants);

        IrModule { globals, functions }
    }
}

/// Lowers every function definition of an annotated tree.
///
/// # Panics
///
/// Panics when a value-producing node lacks its annotation.
pub fn compile(ast: &Ast) -> IrModule {
    let mut compiler = Compiler::new(ast);
    let mut functions = vec![];

    if let Some(root) = ast.root() {
        for child in ast.children(root) {
            if let NodeKind::FunctionDef { .. } = ast.kind(*child) {
                functions.push(gen_function(&mut compiler, *child));
            }
        }
    }

    let module = compiler.into_module(functions);
    info!(
        functions = module.functions.len(),
        instructions = module.instructions().count(),
        "lowered translation unit"
    );
    module
}

/// Whether the node forwards its single child's value without computing anything.
/// An atomic expression forwards unless it references a variable.
pub fn is_pass_through(ast: &Ast, id: NodeId) -> bool {
    match ast.kind(id) {
        NodeKind::TernaryExpr { expanded } => !expanded,
        NodeKind::EqualityExpr { op } => op.is_none(),
        NodeKind::AdditiveExpr { operators } => operators.is_empty(),
        NodeKind::MultiplicativeExpr { operators } => operators.is_empty(),
        NodeKind::AtomicExpr { variable } => variable.is_none(),
        _ => false,
    }
}
