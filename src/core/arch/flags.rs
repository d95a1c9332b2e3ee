//! Condition codes.
//!
//! Z, N and P are written in Execute from the signed result of a flag-setting
//! instruction. The validity bit is cleared while a flag producer is between
//! Execute and Writeback, and conditional branches wait in Decode until it is
//! set again.

use crate::isa::Opcode;

/// Zero, negative and positive flags plus their validity bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionCodes {
    pub zero: bool,
    pub negative: bool,
    pub positive: bool,
    pub valid: bool,
}

impl Default for ConditionCodes {
    /// All flags clear and valid, so a branch before any flag producer
    /// resolves immediately.
    fn default() -> Self {
        Self {
            zero: false,
            negative: false,
            positive: false,
            valid: true,
        }
    }
}

impl ConditionCodes {
    /// Sets Z/N/P from a signed result. Exactly one flag ends up set.
    pub fn update(&mut self, result: i32) {
        self.zero = result == 0;
        self.negative = result < 0;
        self.positive = result > 0;
    }

    /// Evaluates a conditional branch against the current flags.
    ///
    /// # Returns
    ///
    /// `true` if `op` is a conditional branch whose condition holds; `false`
    /// for any other opcode.
    pub fn branch_taken(&self, op: Opcode) -> bool {
        match op {
            Opcode::Bz => self.zero,
            Opcode::Bnz => !self.zero,
            Opcode::Bp => self.positive,
            Opcode::Bnp => !self.positive,
            Opcode::Bn => self.negative,
            Opcode::Bnn => !self.negative,
            _ => false,
        }
    }

    /// Prints the flags in P, N, Z order.
    pub fn dump(&self) {
        println!(
            "Flags: P = {}, N = {}, Z = {} (valid = {})",
            self.positive as u8, self.negative as u8, self.zero as u8, self.valid
        );
    }
}
