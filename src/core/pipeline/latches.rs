//! Pipeline latch structures for inter-stage communication.
//!
//! Each of the five stages owns one [`StageLatch`] holding the instruction
//! it will process on its next turn. The latch is a single record for every
//! opcode class; which fields carry meaning depends on the class:
//!
//! | Class              | `rs1_value`      | `rs2_value`      | `result`             | `memory_address` |
//! |--------------------|------------------|------------------|----------------------|------------------|
//! | register arith     | operand a        | operand b        | ALU output           | -                |
//! | ADDL SUBL          | operand a        | -                | ALU output           | -                |
//! | MOVC               | -                | -                | literal              | -                |
//! | LOAD               | base             | -                | loaded word          | base + offset    |
//! | LOADP              | base, then +4    | -                | loaded word          | base + offset    |
//! | STORE              | data             | base             | -                    | base + offset    |
//! | STOREP             | data             | base, then +4    | -                    | base + offset    |
//! | JUMP               | base             | -                | target               | -                |
//! | JALR               | base             | -                | link (pc + 4)        | -                |
//! | conditional branch | -                | -                | target when taken    | -                |
//! | CMP CML            | operand a        | operand b        | difference           | -                |
//! | HALT NOP           | -                | -                | -                    | -                |
//!
//! A latch with `empty` set has no effect on anything. A latch with `stalled`
//! set holds an instruction that could not advance this cycle; the upstream
//! stage must not overwrite it.

use crate::isa::{instruction, Instruction, Opcode};

/// Content of one pipeline stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageLatch {
    /// Program counter of the occupying instruction.
    pub pc: u32,
    /// Opcode of the occupying instruction.
    pub opcode: Opcode,
    /// Destination register index.
    pub rd: usize,
    /// First source register index.
    pub rs1: usize,
    /// Second source register index.
    pub rs2: usize,
    /// Signed literal.
    pub imm: i32,
    /// Value read from `rs1` in Decode.
    pub rs1_value: i32,
    /// Value read from `rs2` in Decode.
    pub rs2_value: i32,
    /// ALU output, loaded word, link value or branch target.
    pub result: i32,
    /// Effective data memory address.
    pub memory_address: i32,
    /// No instruction occupies the stage.
    pub empty: bool,
    /// The occupying instruction could not advance this cycle.
    pub stalled: bool,
}

impl Default for StageLatch {
    /// An empty latch (a bubble).
    fn default() -> Self {
        Self {
            pc: 0,
            opcode: Opcode::Nop,
            rd: 0,
            rs1: 0,
            rs2: 0,
            imm: 0,
            rs1_value: 0,
            rs2_value: 0,
            result: 0,
            memory_address: 0,
            empty: true,
            stalled: false,
        }
    }
}

impl StageLatch {
    /// Fills a latch from a freshly fetched instruction.
    pub fn from_instruction(pc: u32, inst: &Instruction) -> Self {
        Self {
            pc,
            opcode: inst.opcode,
            rd: inst.rd,
            rs1: inst.rs1,
            rs2: inst.rs2,
            imm: inst.imm,
            empty: false,
            ..Self::default()
        }
    }

    /// The instruction this latch carries.
    pub fn instruction(&self) -> Instruction {
        Instruction::new(self.opcode, self.rd, self.rs1, self.rs2, self.imm)
    }

    /// Registers this instruction will write at Writeback.
    pub fn destinations(&self) -> [Option<usize>; 2] {
        instruction::destinations(self.opcode, self.rd, self.rs1, self.rs2)
    }

    /// Returns `true` if the latch holds an instruction that writes `reg`.
    pub fn writes(&self, reg: usize) -> bool {
        !self.empty && self.destinations().contains(&Some(reg))
    }

    /// Returns `true` if the latch holds a flag-producing instruction.
    pub fn produces_flags(&self) -> bool {
        !self.empty && self.opcode.is_flag_producer()
    }
}

/// The five stage latches, in pipeline order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Latches {
    pub fetch: StageLatch,
    pub decode: StageLatch,
    pub execute: StageLatch,
    pub memory: StageLatch,
    pub writeback: StageLatch,
}

impl Latches {
    /// Iterates over `(stage name, latch)` pairs in pipeline order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &StageLatch)> {
        [
            ("Fetch", &self.fetch),
            ("Decode/RF", &self.decode),
            ("Execute", &self.execute),
            ("Memory", &self.memory),
            ("Writeback", &self.writeback),
        ]
        .into_iter()
    }
}
