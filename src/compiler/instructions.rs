//! IR instructions. Each variant renders itself as one line of textual IR and
//! one diagnostic trace line; nothing else in the lowering pass inspects the
//! rendered text.

use std::fmt::Display;

use crate::{
    ast::{ast::NodeId, nodes::DataType},
    CodeLoc,
};

/// An already-computed value: its IR name (or constant) and its type.
#[derive(Debug, Clone, PartialEq)]
pub struct Operand {
    pub name: String,
    pub ty: DataType,
}

impl Operand {
    pub fn new(name: impl Into<String>, ty: DataType) -> Self {
        Operand {
            name: name.into(),
            ty,
        }
    }

    /// `<type> <name>`, as written in argument positions.
    pub fn typed(&self) -> String {
        format!("{} {}", self.ty.ir_type(), self.name)
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InstructionKind {
    Plus {
        result: String,
        lhs: Operand,
        rhs: Operand,
    },
    Minus {
        result: String,
        lhs: Operand,
        rhs: Operand,
    },
    Mul {
        result: String,
        lhs: Operand,
        rhs: Operand,
    },
    Div {
        result: String,
        lhs: Operand,
        rhs: Operand,
    },
    Equal {
        result: String,
        lhs: Operand,
        rhs: Operand,
    },
    NotEqual {
        result: String,
        lhs: Operand,
        rhs: Operand,
    },
    Select {
        result: String,
        condition: Operand,
        lhs: Operand,
        rhs: Operand,
    },
    /// Joins the values flowing in from each predecessor block.
    Phi {
        result: String,
        ty: DataType,
        incoming: Vec<(Operand, String)>,
    },
    /// Widens an `i1` to `i32`.
    Zext {
        result: String,
        value: Operand,
    },
    Call {
        result: String,
        return_type: DataType,
        callee: String,
        args: Vec<Operand>,
    },
    Print {
        result: String,
        format: String,
        value: Operand,
    },
    Alloca {
        slot: String,
        ty: DataType,
    },
    Store {
        value: Operand,
        slot: String,
    },
    Load {
        result: String,
        ty: DataType,
        slot: String,
    },
    Return {
        value: Operand,
    },
    Branch {
        target: String,
    },
    CondBranch {
        condition: Operand,
        then_label: String,
        else_label: String,
    },
    Switch {
        value: Operand,
        default_label: String,
        cases: Vec<(String, String)>,
    },
    Label {
        name: String,
    },
    Unreachable,
}

impl InstructionKind {
    /// Whether this instruction ends a basic block.
    pub fn is_terminator(&self) -> bool {
        matches!(
            self,
            InstructionKind::Return { .. }
                | InstructionKind::Branch { .. }
                | InstructionKind::CondBranch { .. }
                | InstructionKind::Switch { .. }
                | InstructionKind::Unreachable
        )
    }

    pub fn result(&self) -> Option<&str> {
        match self {
            InstructionKind::Plus { result, .. }
            | InstructionKind::Minus { result, .. }
            | InstructionKind::Mul { result, .. }
            | InstructionKind::Div { result, .. }
            | InstructionKind::Equal { result, .. }
            | InstructionKind::NotEqual { result, .. }
            | InstructionKind::Select { result, .. }
            | InstructionKind::Phi { result, .. }
            | InstructionKind::Zext { result, .. }
            | InstructionKind::Call { result, .. }
            | InstructionKind::Print { result, .. }
            | InstructionKind::Load { result, .. } => Some(result),
            InstructionKind::Alloca { slot, .. } => Some(slot),
            _ => None,
        }
    }

    /// Human-readable operation kind used in trace lines.
    pub fn trace_kind(&self) -> String {
        match self {
            InstructionKind::Plus { .. } => String::from("binary operation: add"),
            InstructionKind::Minus { .. } => String::from("binary operation: sub"),
            InstructionKind::Mul { .. } => String::from("binary operation: mul"),
            InstructionKind::Div { .. } => String::from("binary operation: div"),
            InstructionKind::Equal { .. } => String::from("comparison: eq"),
            InstructionKind::NotEqual { .. } => String::from("comparison: ne"),
            InstructionKind::Select { .. } => String::from("ternary operation: select"),
            InstructionKind::Phi { .. } => String::from("ternary operation: phi"),
            InstructionKind::Zext { .. } => String::from("conversion: zext"),
            InstructionKind::Call { callee, .. } => format!("call: {}", callee),
            InstructionKind::Print { .. } => String::from("builtin call: print"),
            InstructionKind::Alloca { .. } => String::from("variable: alloca"),
            InstructionKind::Store { .. } => String::from("variable: store"),
            InstructionKind::Load { .. } => String::from("variable: load"),
            InstructionKind::Return { .. } => String::from("control flow: return"),
            InstructionKind::Branch { .. } => String::from("control flow: branch"),
            InstructionKind::CondBranch { .. } => {
                String::from("control flow: conditional branch")
            }
            InstructionKind::Switch { .. } => String::from("control flow: switch"),
            InstructionKind::Label { .. } => String::from("control flow: label"),
            InstructionKind::Unreachable => String::from("control flow: unreachable"),
        }
    }

    /// One line of textual IR, without indentation.
    pub fn dump_ir(&self) -> String {
        match self {
            InstructionKind::Plus { result, lhs, rhs } => {
                binary(result, arithmetic("add", "fadd", lhs.ty), lhs, rhs)
            }
            InstructionKind::Minus { result, lhs, rhs } => {
                binary(result, arithmetic("sub", "fsub", lhs.ty), lhs, rhs)
            }
            InstructionKind::Mul { result, lhs, rhs } => {
                binary(result, arithmetic("mul", "fmul", lhs.ty), lhs, rhs)
            }
            InstructionKind::Div { result, lhs, rhs } => {
                binary(result, arithmetic("sdiv", "fdiv", lhs.ty), lhs, rhs)
            }
            InstructionKind::Equal { result, lhs, rhs } => {
                binary(result, arithmetic("icmp eq", "fcmp oeq", lhs.ty), lhs, rhs)
            }
            InstructionKind::NotEqual { result, lhs, rhs } => {
                binary(result, arithmetic("icmp ne", "fcmp one", lhs.ty), lhs, rhs)
            }
            InstructionKind::Select {
                result,
                condition,
                lhs,
                rhs,
            } => format!(
                "{} = select i1 {}, {}, {}",
                result,
                condition,
                lhs.typed(),
                rhs.typed()
            ),
            InstructionKind::Phi {
                result,
                ty,
                incoming,
            } => format!(
                "{} = phi {} {}",
                result,
                ty.ir_type(),
                incoming
                    .iter()
                    .map(|(value, label)| format!("[ {}, %{} ]", value, label))
                    .collect::<Vec<String>>()
                    .join(", ")
            ),
            InstructionKind::Zext { result, value } => {
                format!("{} = zext {} to i32", result, value.typed())
            }
            InstructionKind::Call {
                result,
                return_type,
                callee,
                args,
            } => format!(
                "{} = call {} @{}({})",
                result,
                return_type.ir_type(),
                callee,
                args.iter()
                    .map(|arg| arg.typed())
                    .collect::<Vec<String>>()
                    .join(", ")
            ),
            InstructionKind::Print {
                result,
                format,
                value,
            } => format!(
                "{} = call i32 (ptr, ...) @printf(ptr {}, {})",
                result,
                format,
                value.typed()
            ),
            InstructionKind::Alloca { slot, ty } => format!("{} = alloca {}", slot, ty.ir_type()),
            InstructionKind::Store { value, slot } => {
                format!("store {}, ptr {}", value.typed(), slot)
            }
            InstructionKind::Load { result, ty, slot } => {
                format!("{} = load {}, ptr {}", result, ty.ir_type(), slot)
            }
            InstructionKind::Return { value } => format!("ret {}", value.typed()),
            InstructionKind::Branch { target } => format!("br label %{}", target),
            InstructionKind::CondBranch {
                condition,
                then_label,
                else_label,
            } => format!(
                "br i1 {}, label %{}, label %{}",
                condition, then_label, else_label
            ),
            InstructionKind::Switch {
                value,
                default_label,
                cases,
            } => {
                let targets = cases
                    .iter()
                    .map(|(case, label)| format!("{} {}, label %{}", value.ty.ir_type(), case, label))
                    .collect::<Vec<String>>();
                format!(
                    "switch {}, label %{} [ {} ]",
                    value.typed(),
                    default_label,
                    targets.join(" ")
                )
            }
            InstructionKind::Label { name } => format!("{}:", name),
            InstructionKind::Unreachable => String::from("unreachable"),
        }
    }
}

fn arithmetic(integer: &'static str, floating: &'static str, ty: DataType) -> &'static str {
    if ty.is_floating() {
        floating
    } else {
        integer
    }
}

// The rendered operand type is always the left operand's.
fn binary(result: &str, mnemonic: &str, lhs: &Operand, rhs: &Operand) -> String {
    format!("{} = {} {}, {}", result, mnemonic, lhs.typed(), rhs)
}

/// One lowered operation together with the node it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub source: NodeId,
    pub location: CodeLoc,
    pub kind: InstructionKind,
}

impl Instruction {
    pub fn new(source: NodeId, location: CodeLoc, kind: InstructionKind) -> Self {
        Instruction {
            source,
            location,
            kind,
        }
    }

    pub fn dump_ir(&self) -> String {
        self.kind.dump_ir()
    }

    /// `<location>: <kind> expression`
    pub fn trace(&self) -> String {
        format!("{}: {} expression", self.location, self.kind.trace_kind())
    }

    pub fn is_terminator(&self) -> bool {
        self.kind.is_terminator()
    }
}
