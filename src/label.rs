/*!
  Syntactic rules for label and register names.

  The first pass reports illegal label names as it meets them. The second pass only needs to know
  *whether* a name is legal, so that an undefined label that was already reported as malformed is
  not reported a second time.
*/

use nom::{
  character::complete::{alphanumeric0, char as one_char, one_of},
  combinator::all_consuming,
  error::ErrorKind,
  sequence::preceded,
  IResult
};
use thiserror::Error;

use crate::config::{AssemblerConfig, REGISTER_COUNT};
use crate::opcode::Opcode;

type ParseResult<'a, O> = IResult<&'a str, O, (&'a str, ErrorKind)>;

#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum LabelError {
  #[error("Label is too long. Max label name length is {max}.")]
  TooLong { max: usize },
  #[error("Label name is empty.")]
  Empty,
  #[error("Label must start at the start of the line.")]
  LeadingWhitespace,
  #[error("\"{0}\" is illegal label - use letters and numbers only.")]
  NotAlphanumeric(String),
  #[error("\"{0}\" is illegal label - first char must be a letter.")]
  NotLetterInitial(String),
  #[error("\"{0}\" is illegal label - don't use a name of a register.")]
  RegisterName(String),
  #[error("\"{0}\" is illegal label - don't use a name of a command.")]
  MnemonicName(String),
}

fn register_p(text: &str) -> ParseResult<char> {
  all_consuming(preceded(one_char('r'), one_of("0123456789")))(text)
}

fn alphanumeric_p(text: &str) -> ParseResult<&str> {
  all_consuming(alphanumeric0)(text)
}

/// Parses a register name `rN`, returning `N` if it is below `register_count`. No count can
/// go past the `REGISTER_COUNT` registers a register word has room for.
pub fn parse_register(text: &str, register_count: u8) -> Option<u8> {
  let (_rest, digit) = register_p(text).ok()?;
  let number = digit.to_digit(10)? as u8;
  match number < register_count.min(REGISTER_COUNT) {
    true  => Some(number),
    false => None
  }
}

/**
  Checks `name` against the label rules, in the order the front end reports them: length,
  emptiness, leading whitespace, alphanumeric body, letter-initial, not a register, not a
  mnemonic.
*/
pub fn check_label(name: &str, config: &AssemblerConfig) -> Result<(), LabelError> {
  if name.len() > config.max_label_length {
    return Err(LabelError::TooLong { max: config.max_label_length });
  }

  let first = match name.chars().next() {
    Some(c) => c,
    None    => return Err(LabelError::Empty)
  };

  if first.is_whitespace() {
    return Err(LabelError::LeadingWhitespace);
  }

  if alphanumeric_p(&name[first.len_utf8()..]).is_err() {
    return Err(LabelError::NotAlphanumeric(name.to_string()));
  }

  if !first.is_ascii_alphabetic() {
    return Err(LabelError::NotLetterInitial(name.to_string()));
  }

  if parse_register(name, config.usable_registers()).is_some() {
    return Err(LabelError::RegisterName(name.to_string()));
  }

  if Opcode::is_mnemonic(name) {
    return Err(LabelError::MnemonicName(name.to_string()));
  }

  Ok(())
}

pub fn is_legal_label(name: &str, config: &AssemblerConfig) -> bool {
  check_label(name, config).is_ok()
}
