/*!
  Opcodes of the machine.

  As in C, enum values are represented by consecutive natural numbers and can be treated as
  numeric types, so the order the mnemonics are listed below *is* the opcode field of the
  instruction word. The `strum` derives give us mnemonic <-> text, and `num_enum` gives us
  opcode number <-> variant for decoding.
*/

use std::str::FromStr;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::{Display as StrumDisplay, EnumString};

#[derive(
  StrumDisplay, EnumString, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,       Eq,               PartialEq,     Debug, Hash
)]
#[repr(u8)]
pub enum Opcode {
  // Two operands //
  #[strum(serialize = "mov")] Mov,  // mov src, dest
  #[strum(serialize = "cmp")] Cmp,  // cmp src, dest
  #[strum(serialize = "add")] Add,  // add src, dest
  #[strum(serialize = "sub")] Sub,  // sub src, dest
  // One operand //
  #[strum(serialize = "not")] Not,  // not dest
  #[strum(serialize = "clr")] Clr,  // clr dest
  // Two operands //
  #[strum(serialize = "lea")] Lea,  // lea src, dest
  // One operand //
  #[strum(serialize = "inc")] Inc,  // inc dest
  #[strum(serialize = "dec")] Dec,  // dec dest
  #[strum(serialize = "jmp")] Jmp,  // jmp dest
  #[strum(serialize = "bne")] Bne,  // bne dest
  #[strum(serialize = "red")] Red,  // red dest
  #[strum(serialize = "prn")] Prn,  // prn dest
  #[strum(serialize = "jsr")] Jsr,  // jsr dest
  // No operands //
  #[strum(serialize = "rts")] Rts,  // rts
  #[strum(serialize = "hlt")] Hlt,  // hlt
}

impl Opcode {
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }

  /// True if `name` is spelled exactly like one of the mnemonics.
  pub fn is_mnemonic(name: &str) -> bool {
    Opcode::from_str(name).is_ok()
  }
}


#[cfg(test)]
mod tests {
  use std::convert::TryFrom;

  use super::*;

  #[test]
  fn codes_follow_declaration_order() {
    assert_eq!(Opcode::Mov.code(), 0);
    assert_eq!(Opcode::Lea.code(), 6);
    assert_eq!(Opcode::Hlt.code(), 15);
    assert_eq!(Opcode::try_from(12u8).ok(), Some(Opcode::Prn));
    assert!(Opcode::try_from(16u8).is_err());
  }

  #[test]
  fn mnemonic_text() {
    assert_eq!(Opcode::from_str("jsr").ok(), Some(Opcode::Jsr));
    assert_eq!(Opcode::Bne.to_string(), "bne");
    assert!(Opcode::is_mnemonic("mov"));
    assert!(!Opcode::is_mnemonic("MOV"));
    assert!(!Opcode::is_mnemonic("move"));
  }
}
