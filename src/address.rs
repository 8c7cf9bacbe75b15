//! An `Either`-like type that holds the address of a label in one of the three places a label can
//! live: the code segment, the data segment, or another module entirely.

use std::fmt::{Display, Formatter};

// `AddressNumberType` is `usize`, as it is naturally an index into the memory image.
pub type AddressNumberType = usize;

/**
  The address of a label together with its classification. A label is exactly one of code, data,
  or external, so the classification lives in the variant rather than in a pair of flags.

  Data addresses start out relative to the start of the data segment. They become absolute when
  the symbol table is finalized, which shifts them past the end of the code segment.
*/
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum Address {
  /// An address in the code segment.
  Code(AddressNumberType),
  /// An address in the data segment.
  Data(AddressNumberType),
  /// Declared with `.extern`. The number is a placeholder to be patched by the linker.
  External(AddressNumberType),
}

impl Address {
  /// The numeric address, whatever segment it belongs to.
  pub fn number(&self) -> AddressNumberType {
    match self {
      | Address::Code(n)
      | Address::Data(n)
      | Address::External(n) => *n
    }
  }

  pub fn is_data(&self) -> bool {
    match self {
      Address::Data(_) => true,
      _ => false
    }
  }

  pub fn is_external(&self) -> bool {
    match self {
      Address::External(_) => true,
      _ => false
    }
  }

  /// Moves a data address past a code segment of `code_length` words. Code and external
  /// addresses are returned unchanged.
  pub(crate) fn relocated(self, code_length: AddressNumberType) -> Address {
    match self {
      Address::Data(n) => Address::Data(n + code_length),
      other            => other
    }
  }
}


impl Display for Address {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Address::Code(n) => {
        write!(f, "CODE[{}]", n)
      },
      Address::Data(n) => {
        write!(f, "DATA[{}]", n)
      },
      Address::External(_) => {
        write!(f, "EXTERN")
      }
    }
  }
}
