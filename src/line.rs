//! Parsed source lines and `.entry` records, as the first pass leaves them.

use string_cache::DefaultAtom;

use crate::opcode::Opcode;
use crate::operand::{Operand, OperandSlot};

pub type LineNumber = u32;

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct SourceLine {
  pub number      : LineNumber,
  pub text        : String,
  /// `None` for directives, comments, and blank lines.
  pub opcode      : Option<Opcode>,
  pub source      : OperandSlot,
  pub destination : OperandSlot,
  pub is_error    : bool,
}

impl SourceLine {
  /// A line without an instruction.
  pub fn new(number: LineNumber, text: &str) -> SourceLine {
    SourceLine {
      number,
      text        : text.to_string(),
      opcode      : None,
      source      : Operand::Absent.into(),
      destination : Operand::Absent.into(),
      is_error    : false,
    }
  }

  pub fn instruction(
    number      : LineNumber,
    text        : &str,
    opcode      : Opcode,
    source      : Operand,
    destination : Operand
  ) -> SourceLine {
    SourceLine {
      opcode      : Some(opcode),
      source      : source.into(),
      destination : destination.into(),
      ..SourceLine::new(number, text)
    }
  }

  /// Marks a line the first pass already found fault with.
  pub fn with_error(mut self) -> SourceLine {
    self.is_error = true;
    self
  }

  /// The operand slots in emission order, source first.
  pub fn operands(&self) -> impl Iterator<Item = &OperandSlot> {
    vec![&self.source, &self.destination].into_iter()
  }
}

/// A `.entry NAME` directive, recorded by the first pass for checking here.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct EntryRecord {
  pub line : LineNumber,
  pub name : DefaultAtom,
}

impl EntryRecord {
  pub fn new(line: LineNumber, name: &str) -> EntryRecord {
    EntryRecord { line, name: DefaultAtom::from(name) }
  }
}
