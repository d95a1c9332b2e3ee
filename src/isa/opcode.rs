//! APEX opcodes.
//!
//! Opcodes fall into five classes: register-register arithmetic, move and
//! immediate arithmetic, memory, control flow, and compare. The predicates on
//! [`Opcode`] answer the class questions the pipeline asks (does it set the
//! condition codes, does it wait for them, does it hold Execute for several
//! cycles) so no stage has to compare opcode names.

use std::fmt;
use std::str::FromStr;

/// One APEX opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Xor,
    Movc,
    Addl,
    Subl,
    Load,
    Loadp,
    Store,
    Storep,
    Jump,
    Jalr,
    Bz,
    Bnz,
    Bp,
    Bnp,
    Bn,
    Bnn,
    Halt,
    Nop,
    Cmp,
    Cml,
}

impl Opcode {
    /// Mnemonic as written in program text.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::Div => "DIV",
            Opcode::And => "AND",
            Opcode::Or => "OR",
            Opcode::Xor => "XOR",
            Opcode::Movc => "MOVC",
            Opcode::Addl => "ADDL",
            Opcode::Subl => "SUBL",
            Opcode::Load => "LOAD",
            Opcode::Loadp => "LOADP",
            Opcode::Store => "STORE",
            Opcode::Storep => "STOREP",
            Opcode::Jump => "JUMP",
            Opcode::Jalr => "JALR",
            Opcode::Bz => "BZ",
            Opcode::Bnz => "BNZ",
            Opcode::Bp => "BP",
            Opcode::Bnp => "BNP",
            Opcode::Bn => "BN",
            Opcode::Bnn => "BNN",
            Opcode::Halt => "HALT",
            Opcode::Nop => "NOP",
            Opcode::Cmp => "CMP",
            Opcode::Cml => "CML",
        }
    }

    /// Register-register arithmetic and logic: `OP rd, rs1, rs2`.
    pub fn is_register_arith(self) -> bool {
        matches!(
            self,
            Opcode::Add
                | Opcode::Sub
                | Opcode::Mul
                | Opcode::Div
                | Opcode::And
                | Opcode::Or
                | Opcode::Xor
        )
    }

    /// Register-immediate arithmetic: `ADDL` and `SUBL`.
    pub fn is_immediate_arith(self) -> bool {
        matches!(self, Opcode::Addl | Opcode::Subl)
    }

    pub fn is_load(self) -> bool {
        matches!(self, Opcode::Load | Opcode::Loadp)
    }

    pub fn is_store(self) -> bool {
        matches!(self, Opcode::Store | Opcode::Storep)
    }

    pub fn is_compare(self) -> bool {
        matches!(self, Opcode::Cmp | Opcode::Cml)
    }

    /// Branches that read the condition codes.
    pub fn is_conditional_branch(self) -> bool {
        matches!(
            self,
            Opcode::Bz | Opcode::Bnz | Opcode::Bp | Opcode::Bnp | Opcode::Bn | Opcode::Bnn
        )
    }

    /// Instructions that redirect the program counter unconditionally.
    pub fn is_jump(self) -> bool {
        matches!(self, Opcode::Jump | Opcode::Jalr)
    }

    /// Instructions whose completion the condition-code validity bit waits on.
    ///
    /// MOVC computes its flags in Execute too, but never invalidates them, so
    /// a branch right behind a MOVC does not stall.
    pub fn is_flag_producer(self) -> bool {
        matches!(
            self,
            Opcode::Add
                | Opcode::Sub
                | Opcode::Mul
                | Opcode::Div
                | Opcode::Addl
                | Opcode::Subl
                | Opcode::Cmp
                | Opcode::Cml
        )
    }

    /// Instructions that write Z/N/P in Execute.
    pub fn updates_flags(self) -> bool {
        self.is_flag_producer() || self == Opcode::Movc
    }

    /// Instructions that may hold Execute for more than one cycle.
    pub fn is_multi_cycle(self) -> bool {
        matches!(self, Opcode::Mul | Opcode::Div)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Error returned for an unknown mnemonic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOpcode(pub String);

impl fmt::Display for UnknownOpcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown opcode '{}'", self.0)
    }
}

impl std::error::Error for UnknownOpcode {}

impl FromStr for Opcode {
    type Err = UnknownOpcode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = match s.trim().to_ascii_uppercase().as_str() {
            "ADD" => Opcode::Add,
            "SUB" => Opcode::Sub,
            "MUL" => Opcode::Mul,
            "DIV" => Opcode::Div,
            "AND" => Opcode::And,
            "OR" => Opcode::Or,
            "XOR" | "EX-OR" => Opcode::Xor,
            "MOVC" => Opcode::Movc,
            "ADDL" => Opcode::Addl,
            "SUBL" => Opcode::Subl,
            "LOAD" => Opcode::Load,
            "LOADP" => Opcode::Loadp,
            "STORE" => Opcode::Store,
            "STOREP" => Opcode::Storep,
            "JUMP" => Opcode::Jump,
            "JALR" => Opcode::Jalr,
            "BZ" => Opcode::Bz,
            "BNZ" => Opcode::Bnz,
            "BP" => Opcode::Bp,
            "BNP" => Opcode::Bnp,
            "BN" => Opcode::Bn,
            "BNN" => Opcode::Bnn,
            "HALT" => Opcode::Halt,
            "NOP" => Opcode::Nop,
            "CMP" => Opcode::Cmp,
            "CML" => Opcode::Cml,
            _ => return Err(UnknownOpcode(s.trim().to_string())),
        };
        Ok(op)
    }
}
