//! Decoded APEX instruction.
//!
//! Field meaning depends on the opcode class:
//!
//! | Class                     | `rd`      | `rs1`        | `rs2`      | `imm`        |
//! |---------------------------|-----------|--------------|------------|--------------|
//! | ADD SUB MUL DIV AND OR XOR| dest      | src          | src        | unused       |
//! | MOVC                      | dest      | unused       | unused     | value        |
//! | ADDL SUBL                 | dest      | src          | unused     | operand      |
//! | LOAD                      | dest      | base         | unused     | offset       |
//! | LOADP                     | dest      | base (+4)    | unused     | offset       |
//! | STORE                     | unused    | data         | base       | offset       |
//! | STOREP                    | unused    | data         | base (+4)  | offset       |
//! | JUMP                      | unused    | base         | unused     | offset       |
//! | JALR                      | link      | base         | unused     | offset       |
//! | BZ BNZ BP BNP BN BNN      | unused    | unused       | unused     | pc offset    |
//! | CMP                       | unused    | src          | src        | unused       |
//! | CML                       | unused    | src          | unused     | literal      |
//! | HALT NOP                  | unused    | unused       | unused     | unused       |

use std::fmt;

use super::Opcode;

/// One decoded instruction. Immutable once loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub rd: usize,
    pub rs1: usize,
    pub rs2: usize,
    pub imm: i32,
}

impl Instruction {
    /// Builds an instruction with every register field and the literal set
    /// explicitly. Unused fields should be zero.
    pub fn new(opcode: Opcode, rd: usize, rs1: usize, rs2: usize, imm: i32) -> Self {
        Self {
            opcode,
            rd,
            rs1,
            rs2,
            imm,
        }
    }

    /// An instruction without operands (`HALT`, `NOP`).
    pub fn bare(opcode: Opcode) -> Self {
        Self::new(opcode, 0, 0, 0, 0)
    }

    /// Registers Decode must find ready before the instruction can issue.
    pub fn sources(&self) -> [Option<usize>; 2] {
        match self.opcode {
            op if op.is_register_arith() => [Some(self.rs1), Some(self.rs2)],
            Opcode::Cmp | Opcode::Store | Opcode::Storep => [Some(self.rs1), Some(self.rs2)],
            Opcode::Load
            | Opcode::Loadp
            | Opcode::Addl
            | Opcode::Subl
            | Opcode::Jump
            | Opcode::Jalr
            | Opcode::Cml => [Some(self.rs1), None],
            _ => [None, None],
        }
    }

    /// Registers Writeback commits for this instruction.
    pub fn destinations(&self) -> [Option<usize>; 2] {
        destinations(self.opcode, self.rd, self.rs1, self.rs2)
    }

    /// Register indices named by the instruction, used to validate a program
    /// against the register file size.
    pub fn registers(&self) -> impl Iterator<Item = usize> {
        let [s1, s2] = self.sources();
        let [d1, d2] = self.destinations();
        [s1, s2, d1, d2].into_iter().flatten()
    }
}

/// Destination registers for an opcode given its register fields.
///
/// Shared by [`Instruction`] and the stage latch, which carries the same
/// fields after decode.
pub fn destinations(opcode: Opcode, rd: usize, rs1: usize, rs2: usize) -> [Option<usize>; 2] {
    match opcode {
        op if op.is_register_arith() => [Some(rd), None],
        Opcode::Movc | Opcode::Addl | Opcode::Subl | Opcode::Load | Opcode::Jalr => {
            [Some(rd), None]
        }
        Opcode::Loadp => [Some(rd), Some(rs1)],
        Opcode::Storep => [Some(rs2), None],
        _ => [None, None],
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.opcode;
        match op {
            _ if op.is_register_arith() => {
                write!(f, "{},R{},R{},R{}", op, self.rd, self.rs1, self.rs2)
            }
            Opcode::Movc => write!(f, "{},R{},#{}", op, self.rd, self.imm),
            Opcode::Addl | Opcode::Subl | Opcode::Load | Opcode::Loadp | Opcode::Jalr => {
                write!(f, "{},R{},R{},#{}", op, self.rd, self.rs1, self.imm)
            }
            Opcode::Store | Opcode::Storep => {
                write!(f, "{},R{},R{},#{}", op, self.rs1, self.rs2, self.imm)
            }
            Opcode::Jump | Opcode::Cml => write!(f, "{},R{},#{}", op, self.rs1, self.imm),
            Opcode::Cmp => write!(f, "{},R{},R{}", op, self.rs1, self.rs2),
            _ if op.is_conditional_branch() => write!(f, "{},#{}", op, self.imm),
            _ => write!(f, "{}", op),
        }
    }
}
