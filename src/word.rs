/*!
  Encoding and decoding of machine words.

  The machine has a 14 bit word. The low two bits of every word are the relocation tag (the
  "era" bits), and the remaining 12 bits are a payload whose layout depends on the role the word
  plays:

  ```text
    Instruction:  [Unused:4][Opcode:4][SrcMode:2][DestMode:2][Era:2]
    Operand:      [Value:12]                                 [Era:2]
    Registers:    [Unused:6]      [SrcReg:3][DestReg:3]      [Era:2]
    Index:        [Offset:12]                                [Era:2]
  ```

  Values that do not fit their field are truncated to the field width, so negative immediates
  and offsets end up in two's complement.
*/

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::Display as StrumDisplay;

use crate::opcode::Opcode;

// If you change these you must also change the field layout in the module docs.
pub type WordValue = u16;
pub const WORD_BITS: u32 = 14;
pub const WORD_MASK: WordValue = (1 << WORD_BITS) - 1;
pub const ERA_BITS: u32 = 2;
pub const PAYLOAD_MASK: WordValue = WORD_MASK >> ERA_BITS;

const DEST_MODE_SHIFT: u32 = 2;
const SRC_MODE_SHIFT: u32 = 4;
const OPCODE_SHIFT: u32 = 6;
const MODE_MASK: WordValue = 0b11;
const OPCODE_MASK: WordValue = 0b1111;

const DEST_REGISTER_SHIFT: u32 = 2;
const SRC_REGISTER_SHIFT: u32 = 5;
const REGISTER_MASK: WordValue = 0b111;

/// The relocation tag of a word.
#[derive(
  StrumDisplay, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,             Eq,            PartialEq, Debug, Hash
)]
#[repr(u8)]
pub enum Era {
  /// The payload is final.
  Absolute    = 0,
  /// The payload is an address in another module and is patched by the linker.
  External    = 1,
  /// The payload is a local address and shifts if the module is loaded elsewhere.
  Relocatable = 2,
}

/// A single 14 bit machine word.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Word(WordValue);

impl Word {
  /// A word with the given tag and payload. The payload is truncated to 12 bits.
  pub fn new(era: Era, payload: i32) -> Word {
    let payload = (payload as WordValue) & PAYLOAD_MASK;
    Word((payload << ERA_BITS) | Into::<u8>::into(era) as WordValue)
  }

  /// A raw data word. The whole value, tag bits included, is the datum.
  pub fn data(value: i32) -> Word {
    Word((value as WordValue) & WORD_MASK)
  }

  /// The instruction word for `opcode` with the given addressing mode identifiers.
  pub fn instruction(opcode: Opcode, source_mode: u8, destination_mode: u8) -> Word {
    let payload =
        ((destination_mode as WordValue & MODE_MASK) << (DEST_MODE_SHIFT - ERA_BITS))
      | ((source_mode      as WordValue & MODE_MASK) << (SRC_MODE_SHIFT  - ERA_BITS))
      | ((opcode.code()    as WordValue & OPCODE_MASK) << (OPCODE_SHIFT  - ERA_BITS));
    Word::new(Era::Absolute, payload as i32)
  }

  /// A register word. A lone register operand fills only its own half.
  pub fn registers(source: Option<u8>, destination: Option<u8>) -> Word {
    let source      = source.unwrap_or(0) as WordValue & REGISTER_MASK;
    let destination = destination.unwrap_or(0) as WordValue & REGISTER_MASK;
    let payload =
        (destination << (DEST_REGISTER_SHIFT - ERA_BITS))
      | (source      << (SRC_REGISTER_SHIFT  - ERA_BITS));
    Word::new(Era::Absolute, payload as i32)
  }

  /// The word following an indexed operand, holding its offset.
  pub fn index(offset: i32) -> Word {
    Word::new(Era::Absolute, offset)
  }

  pub fn value(&self) -> WordValue {
    self.0
  }

  /// `None` for the one bit pattern that is not a valid tag. Only data words can have it.
  pub fn era(&self) -> Option<Era> {
    Era::try_from((self.0 & 0b11) as u8).ok()
  }

  pub fn payload(&self) -> WordValue {
    self.0 >> ERA_BITS
  }
}

impl Display for Word {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{:014b}", self.0)
  }
}


/// The fields of an instruction word.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct InstructionFields {
  pub opcode           : Opcode,
  pub source_mode      : u8,
  pub destination_mode : u8,
}

impl InstructionFields {
  /// Returns `None` if the word is not tagged absolute. Every opcode field value is a valid
  /// opcode, so any absolute word decodes.
  pub fn decode(word: Word) -> Option<InstructionFields> {
    if word.era() != Some(Era::Absolute) {
      return None;
    }
    let raw = word.value();
    let opcode = Opcode::try_from(((raw >> OPCODE_SHIFT) & OPCODE_MASK) as u8).ok()?;

    Some(InstructionFields {
      opcode,
      source_mode      : ((raw >> SRC_MODE_SHIFT)  & MODE_MASK) as u8,
      destination_mode : ((raw >> DEST_MODE_SHIFT) & MODE_MASK) as u8,
    })
  }
}


/// The fields of a register word.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct RegisterFields {
  pub source      : u8,
  pub destination : u8,
}

impl RegisterFields {
  pub fn decode(word: Word) -> RegisterFields {
    let raw = word.value();
    RegisterFields {
      source      : ((raw >> SRC_REGISTER_SHIFT)  & REGISTER_MASK) as u8,
      destination : ((raw >> DEST_REGISTER_SHIFT) & REGISTER_MASK) as u8,
    }
  }
}
