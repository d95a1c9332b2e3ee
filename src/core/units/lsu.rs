//! Load/Store Unit (LSU) Helpers.
//!
//! Address arithmetic for the memory instructions, performed in Execute so
//! that the Memory stage only has to touch data memory.

use crate::common::constants::POST_INCREMENT;

/// Load/Store Unit for APEX memory instructions.
pub struct Lsu;

impl Lsu {
    /// Computes the effective word address of a load or store.
    ///
    /// # Arguments
    ///
    /// * `base` - Value of the base register
    /// * `offset` - Instruction literal
    ///
    /// # Returns
    ///
    /// `base + offset`, wrapping on overflow. Range checking happens when
    /// data memory is accessed.
    pub fn effective_address(base: i32, offset: i32) -> i32 {
        base.wrapping_add(offset)
    }

    /// Value LOADP and STOREP write back to their base register.
    pub fn post_increment(base: i32) -> i32 {
        base.wrapping_add(POST_INCREMENT)
    }
}
