/*!
  Operands as the first pass hands them to us.

  Each operand shape carries exactly the data it needs: an immediate carries its value, a label
  reference carries the label name and the address it resolves to, an indexed reference carries
  the label plus its offset, and a register carries its number. An operand that is not there is
  `Operand::Absent` rather than an empty label.
*/

use std::fmt::{Display, Formatter};

use num_enum::{IntoPrimitive, TryFromPrimitive};
use string_cache::DefaultAtom;
use strum_macros::Display as StrumDisplay;

use crate::address::{Address, AddressNumberType};

/// The addressing mode identifiers as they appear in the instruction word.
#[derive(
  StrumDisplay, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,             Eq,            PartialEq, Debug, Hash
)]
#[repr(u8)]
pub enum AddressingMode {
  Immediate = 0,
  Direct    = 1,
  Indexed   = 2,
  Register  = 3,
}

impl AddressingMode {
  pub fn id(&self) -> u8 {
    Into::<u8>::into(*self)
  }
}

/// A reference to a label, and the address it resolved to once the second pass has seen it.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct LabelRef {
  pub name     : DefaultAtom,
  pub resolved : Option<Address>,
}

impl LabelRef {
  pub fn new(name: &str) -> LabelRef {
    LabelRef {
      name: DefaultAtom::from(name),
      resolved: None
    }
  }

  /// The resolved address number, or 0 if the label never resolved.
  pub fn value(&self) -> AddressNumberType {
    self.resolved.map_or(0, |address| address.number())
  }

  pub fn is_external(&self) -> bool {
    self.resolved.map_or(false, |address| address.is_external())
  }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Operand {
  Absent,
  /// `#value`
  Immediate(i32),
  /// `LABEL`
  Direct(LabelRef),
  /// `LABEL[index]`
  Indexed {
    label : LabelRef,
    index : i32
  },
  /// `rN`
  Register(u8),
}

impl Operand {
  pub fn direct(name: &str) -> Operand {
    Operand::Direct(LabelRef::new(name))
  }

  pub fn indexed(name: &str, index: i32) -> Operand {
    Operand::Indexed { label: LabelRef::new(name), index }
  }

  /// `None` for an absent operand.
  pub fn mode(&self) -> Option<AddressingMode> {
    match self {
      Operand::Absent          => None,
      Operand::Immediate(_)    => Some(AddressingMode::Immediate),
      Operand::Direct(_)       => Some(AddressingMode::Direct),
      Operand::Indexed { .. }  => Some(AddressingMode::Indexed),
      Operand::Register(_)     => Some(AddressingMode::Register),
    }
  }

  /// The mode identifier for the instruction word. An absent operand contributes 0.
  pub fn mode_id(&self) -> u8 {
    self.mode().map_or(0, |mode| mode.id())
  }

  pub fn is_present(&self) -> bool {
    *self != Operand::Absent
  }

  pub fn register(&self) -> Option<u8> {
    match self {
      Operand::Register(number) => Some(*number),
      _ => None
    }
  }

  pub fn label(&self) -> Option<&LabelRef> {
    match self {
      | Operand::Direct(label)
      | Operand::Indexed { label, .. } => Some(label),
      _ => None
    }
  }

  pub fn label_mut(&mut self) -> Option<&mut LabelRef> {
    match self {
      | Operand::Direct(label)
      | Operand::Indexed { label, .. } => Some(label),
      _ => None
    }
  }
}

impl Display for Operand {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Operand::Absent => Ok(()),
      Operand::Immediate(value) => {
        write!(f, "#{}", value)
      }
      Operand::Direct(label) => {
        write!(f, "{}", label.name)
      }
      Operand::Indexed { label, index } => {
        write!(f, "{}[{}]", label.name, index)
      }
      Operand::Register(number) => {
        write!(f, "r{}", number)
      }
    }
  }
}

/**
  An operand in its place on a source line. `emitted_at` is the address of the word the operand
  was written to, recorded for the listing writers. It is kept apart from the label's resolved
  address: one is where the operand *is*, the other is what it *refers to*.
*/
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct OperandSlot {
  pub operand    : Operand,
  pub emitted_at : Option<AddressNumberType>,
}

impl From<Operand> for OperandSlot {
  fn from(operand: Operand) -> OperandSlot {
    OperandSlot { operand, emitted_at: None }
  }
}
