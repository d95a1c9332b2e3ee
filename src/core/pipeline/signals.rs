//! Execute-stage operation selection.
//!
//! Maps an opcode to the ALU operation it needs and to the operand that
//! feeds the ALU's second input.

use crate::isa::Opcode;

/// ALU operation types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    /// Integer addition.
    #[default]
    Add,
    /// Integer subtraction.
    Sub,
    /// Integer multiply (low 32 bits).
    Mul,
    /// Integer divide (signed, truncating).
    Div,
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
    /// Bitwise XOR.
    Xor,
}

/// Source of the ALU's second operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpBSrc {
    /// The value read from `rs2`.
    Reg2,
    /// The instruction literal.
    Imm,
}

impl AluOp {
    /// ALU operation and second-operand source for opcodes computed by the
    /// ALU. Memory, control and MOVC opcodes return `None`.
    pub fn for_opcode(op: Opcode) -> Option<(AluOp, OpBSrc)> {
        let sel = match op {
            Opcode::Add => (AluOp::Add, OpBSrc::Reg2),
            Opcode::Sub => (AluOp::Sub, OpBSrc::Reg2),
            Opcode::Mul => (AluOp::Mul, OpBSrc::Reg2),
            Opcode::Div => (AluOp::Div, OpBSrc::Reg2),
            Opcode::And => (AluOp::And, OpBSrc::Reg2),
            Opcode::Or => (AluOp::Or, OpBSrc::Reg2),
            Opcode::Xor => (AluOp::Xor, OpBSrc::Reg2),
            Opcode::Addl => (AluOp::Add, OpBSrc::Imm),
            Opcode::Subl => (AluOp::Sub, OpBSrc::Imm),
            Opcode::Cmp => (AluOp::Sub, OpBSrc::Reg2),
            Opcode::Cml => (AluOp::Sub, OpBSrc::Imm),
            _ => return None,
        };
        Some(sel)
    }
}
