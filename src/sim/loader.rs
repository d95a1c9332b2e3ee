//! Program Loader.
//!
//! Reads APEX program text into decoded instructions. The format is one
//! instruction per line with comma-separated fields: an opcode mnemonic,
//! registers written `R<n>`, and literals written `#<n>` in signed decimal.
//!
//! ```text
//! MOVC,R1,#10
//! ADD,R2,R1,R1
//! STORE,R2,R0,#4
//! BZ,#-8
//! HALT
//! ```
//!
//! Blank lines are skipped.

use std::fs;
use std::path::Path;

use log::info;

use crate::common::{ParseError, SimError, SimResult};
use crate::isa::{Instruction, Opcode};

/// Field layout of one opcode class in program text.
#[derive(Clone, Copy)]
enum Form {
    /// `OP`
    Bare,
    /// `OP,#imm`
    Imm,
    /// `OP,Rd,#imm`
    RdImm,
    /// `OP,Rs1,#imm`
    Rs1Imm,
    /// `OP,Rs1,Rs2`
    Rs1Rs2,
    /// `OP,Rd,Rs1,Rs2`
    RdRs1Rs2,
    /// `OP,Rd,Rs1,#imm`
    RdRs1Imm,
    /// `OP,Rs1,Rs2,#imm`
    Rs1Rs2Imm,
}

impl Form {
    fn of(op: Opcode) -> Self {
        match op {
            _ if op.is_register_arith() => Form::RdRs1Rs2,
            _ if op.is_conditional_branch() => Form::Imm,
            Opcode::Movc => Form::RdImm,
            Opcode::Addl | Opcode::Subl | Opcode::Load | Opcode::Loadp | Opcode::Jalr => {
                Form::RdRs1Imm
            }
            Opcode::Store | Opcode::Storep => Form::Rs1Rs2Imm,
            Opcode::Jump | Opcode::Cml => Form::Rs1Imm,
            Opcode::Cmp => Form::Rs1Rs2,
            _ => Form::Bare,
        }
    }

    fn operand_count(self) -> usize {
        match self {
            Form::Bare => 0,
            Form::Imm => 1,
            Form::RdImm | Form::Rs1Imm | Form::Rs1Rs2 => 2,
            Form::RdRs1Rs2 | Form::RdRs1Imm | Form::Rs1Rs2Imm => 3,
        }
    }
}

/// Parses a register operand such as `R7`.
fn parse_register(line: usize, token: &str) -> Result<usize, ParseError> {
    token
        .strip_prefix(['R', 'r'])
        .and_then(|digits| digits.parse::<usize>().ok())
        .ok_or_else(|| ParseError::new(line, format!("expected register, found '{}'", token)))
}

/// Parses a literal operand such as `#-4`.
fn parse_literal(line: usize, token: &str) -> Result<i32, ParseError> {
    token
        .strip_prefix('#')
        .and_then(|digits| digits.parse::<i32>().ok())
        .ok_or_else(|| ParseError::new(line, format!("expected literal, found '{}'", token)))
}

/// Parses one non-blank line of program text.
///
/// # Arguments
///
/// * `line` - 1-based line number, for error reporting
/// * `text` - The line, without its terminator
pub fn parse_line(line: usize, text: &str) -> Result<Instruction, ParseError> {
    let mut fields = text.split(',').map(str::trim);
    let mnemonic = fields.next().unwrap_or_default();
    let opcode: Opcode = mnemonic
        .parse()
        .map_err(|e: crate::isa::opcode::UnknownOpcode| ParseError::new(line, e.to_string()))?;

    let operands: Vec<&str> = fields.collect();
    let form = Form::of(opcode);
    if operands.len() != form.operand_count() {
        return Err(ParseError::new(
            line,
            format!(
                "{} takes {} operand(s), found {}",
                opcode,
                form.operand_count(),
                operands.len()
            ),
        ));
    }

    let reg = |i: usize| parse_register(line, operands[i]);
    let lit = |i: usize| parse_literal(line, operands[i]);

    let inst = match form {
        Form::Bare => Instruction::bare(opcode),
        Form::Imm => Instruction::new(opcode, 0, 0, 0, lit(0)?),
        Form::RdImm => Instruction::new(opcode, reg(0)?, 0, 0, lit(1)?),
        Form::Rs1Imm => Instruction::new(opcode, 0, reg(0)?, 0, lit(1)?),
        Form::Rs1Rs2 => Instruction::new(opcode, 0, reg(0)?, reg(1)?, 0),
        Form::RdRs1Rs2 => Instruction::new(opcode, reg(0)?, reg(1)?, reg(2)?, 0),
        Form::RdRs1Imm => Instruction::new(opcode, reg(0)?, reg(1)?, 0, lit(2)?),
        Form::Rs1Rs2Imm => Instruction::new(opcode, 0, reg(0)?, reg(1)?, lit(2)?),
    };
    Ok(inst)
}

/// Parses a whole program.
///
/// # Returns
///
/// The instructions in file order, or the first malformed line.
pub fn parse_program(text: &str) -> Result<Vec<Instruction>, ParseError> {
    text.lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(idx, l)| parse_line(idx + 1, l.trim()))
        .collect()
}

/// Reads and parses a program file.
pub fn load_program(path: impl AsRef<Path>) -> SimResult<Vec<Instruction>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let program = parse_program(&text).map_err(|source| SimError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!("parsed {} instruction(s) from {}", program.len(), path.display());
    Ok(program)
}
