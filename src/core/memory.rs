//! Code and data memories.
//!
//! Code memory holds the loaded program and is read only by Fetch. Data
//! memory is a flat, word-addressed, zero-initialized array touched only by
//! the Memory stage.

use crate::common::{SimError, SimResult};
use crate::isa::Instruction;

/// Read-only instruction store addressed by program counter.
#[derive(Debug, Clone)]
pub struct CodeMemory {
    instructions: Vec<Instruction>,
    base: u32,
    width: u32,
}

impl CodeMemory {
    /// Places `instructions` at consecutive addresses starting at `base`.
    pub fn new(instructions: Vec<Instruction>, base: u32, width: u32) -> Self {
        Self {
            instructions,
            base,
            width,
        }
    }

    /// Returns the instruction at `pc`, or `None` when `pc` lies outside the
    /// program or between two instruction slots.
    pub fn fetch(&self, pc: u32) -> Option<&Instruction> {
        let offset = pc.checked_sub(self.base)?;
        if offset % self.width != 0 {
            return None;
        }
        self.instructions.get((offset / self.width) as usize)
    }

    /// Number of instructions in the program.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Address of the first instruction.
    pub fn base(&self) -> u32 {
        self.base
    }

    /// Address of instruction `index`.
    pub fn pc_of(&self, index: usize) -> u32 {
        self.base
            .wrapping_add((index as u32).wrapping_mul(self.width))
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }
}

/// Word-addressed data memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataMemory {
    words: Vec<i32>,
}

impl DataMemory {
    /// Creates `size` words of zeroed memory.
    pub fn new(size: usize) -> Self {
        Self {
            words: vec![0; size],
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn index(&self, pc: u32, address: i32) -> SimResult<usize> {
        usize::try_from(address)
            .ok()
            .filter(|&idx| idx < self.words.len())
            .ok_or_else(|| SimError::DataAddressOutOfRange {
                pc,
                address,
                size: self.words.len(),
            })
    }

    /// Fails if `address` lies outside data memory.
    pub fn check(&self, pc: u32, address: i32) -> SimResult<()> {
        self.index(pc, address).map(|_| ())
    }

    /// Reads the word at `address` on behalf of the instruction at `pc`.
    pub fn read(&self, pc: u32, address: i32) -> SimResult<i32> {
        let idx = self.index(pc, address)?;
        Ok(self.words[idx])
    }

    /// Writes the word at `address` on behalf of the instruction at `pc`.
    pub fn write(&mut self, pc: u32, address: i32, value: i32) -> SimResult<()> {
        let idx = self.index(pc, address)?;
        self.words[idx] = value;
        Ok(())
    }

    /// All words, in address order.
    pub fn words(&self) -> &[i32] {
        &self.words
    }

    /// Prints the first `count` words.
    pub fn dump(&self, count: usize) {
        println!("============== STATE OF DATA MEMORY =============");
        for (addr, value) in self.words.iter().take(count).enumerate() {
            println!("|\tMEM[{:02}]\t|\tData Value = {}\t|", addr, value);
        }
    }
}
