//! APEX Register File.
//!
//! Signed integer registers with a parallel ready vector. A register is not
//! ready while an instruction between Decode and Writeback will still write
//! it; Decode must stall rather than read such a register. No register is
//! hardwired: R0 is an ordinary register in APEX.

/// Integer register file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFile {
    values: Vec<i32>,
    ready: Vec<bool>,
}

impl RegisterFile {
    /// Creates a register file with every register zero and ready.
    ///
    /// # Arguments
    ///
    /// * `count` - Number of registers
    pub fn new(count: usize) -> Self {
        Self {
            values: vec![0; count],
            ready: vec![true; count],
        }
    }

    /// Number of registers.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Reads a register value.
    ///
    /// Indices are validated against the register file when the CPU is
    /// built, so the pipeline never reads past the end.
    pub fn read(&self, idx: usize) -> i32 {
        self.values[idx]
    }

    /// Writes a register value. Readiness is managed separately.
    pub fn write(&mut self, idx: usize, val: i32) {
        self.values[idx] = val;
    }

    /// Returns `true` if no in-flight instruction still owes `idx` a value.
    pub fn is_ready(&self, idx: usize) -> bool {
        self.ready[idx]
    }

    /// Marks `idx` as awaiting a write from an in-flight instruction.
    pub fn mark_pending(&mut self, idx: usize) {
        self.ready[idx] = false;
    }

    /// Marks `idx` as holding its final value.
    pub fn mark_ready(&mut self, idx: usize) {
        self.ready[idx] = true;
    }

    /// All register values, in index order.
    pub fn values(&self) -> &[i32] {
        &self.values
    }

    /// Prints every register with its value and readiness.
    pub fn dump(&self) {
        println!("============== STATE OF ARCHITECTURAL REGISTER FILE ==========");
        for (idx, (value, ready)) in self.values.iter().zip(&self.ready).enumerate() {
            let status = if *ready { "VALID" } else { "NOT VALID" };
            println!("|\tREG[{:02}]\t|\tValue = {:<10}\t|\tStatus = {}\t|", idx, value, status);
        }
    }
}
