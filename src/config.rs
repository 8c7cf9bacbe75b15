//! Tunable limits of the assembler. The defaults describe the 14-bit machine.

use crate::address::AddressNumberType;

/// The address the first code word is loaded at.
pub const FIRST_ADDRESS: AddressNumberType = 100;
/// A 12 bit payload addresses this many words.
pub const ADDRESS_SPACE: usize = 1 << 12;
/// The first 100 words of the address space are reserved.
pub const MAX_IMAGE_WORDS: usize = ADDRESS_SPACE - FIRST_ADDRESS;
pub const MAX_LABEL_LENGTH: usize = 31;
/// Registers are `r0` through `r7`. A register word has 3 bits per register, so there can be no
/// more than this.
pub const REGISTER_COUNT: u8 = 1 << 3;

/// The number of words that fit between `first_address` and the end of the address space.
pub fn room_above(first_address: AddressNumberType) -> usize {
  ADDRESS_SPACE.saturating_sub(first_address)
}

/// What to do with words that do not fit in the memory image.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum OverflowPolicy {
  /// Drop them silently. This is what the classic tool does.
  Truncate,
  /// Drop them and report a capacity error, which fails the assembly.
  Reject,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct AssemblerConfig {
  pub first_address    : AddressNumberType,
  pub capacity         : usize,
  pub max_label_length : usize,
  pub register_count   : u8,
  pub overflow         : OverflowPolicy,
}

impl Default for AssemblerConfig {
  fn default() -> AssemblerConfig {
    AssemblerConfig {
      first_address    : FIRST_ADDRESS,
      capacity         : MAX_IMAGE_WORDS,
      max_label_length : MAX_LABEL_LENGTH,
      register_count   : REGISTER_COUNT,
      overflow         : OverflowPolicy::Truncate,
    }
  }
}

impl AssemblerConfig {
  /**
    Moves the load address of the first word. A capacity that filled the rest of the address
    space follows the move; any other capacity is cut down to what still fits, so no load address
    outgrows the 12 bit payload.
  */
  pub fn with_first_address(mut self, first_address: AddressNumberType) -> AssemblerConfig {
    let filled_address_space = self.capacity == room_above(self.first_address);

    self.first_address = first_address;
    self.capacity = match filled_address_space {
      true  => room_above(first_address),
      false => self.capacity.min(room_above(first_address))
    };
    self
  }

  /// Sets the capacity, at most the room left above the first address.
  pub fn with_capacity(mut self, capacity: usize) -> AssemblerConfig {
    self.capacity = capacity.min(room_above(self.first_address));
    self
  }

  pub fn with_max_label_length(mut self, max_label_length: usize) -> AssemblerConfig {
    self.max_label_length = max_label_length;
    self
  }

  /// Sets how many registers there are, at most `REGISTER_COUNT`.
  pub fn with_register_count(mut self, register_count: u8) -> AssemblerConfig {
    self.register_count = register_count.min(REGISTER_COUNT);
    self
  }

  pub fn with_overflow(mut self, overflow: OverflowPolicy) -> AssemblerConfig {
    self.overflow = overflow;
    self
  }

  /// The registers that can actually be encoded, even if `register_count` was set by hand.
  pub fn usable_registers(&self) -> u8 {
    self.register_count.min(REGISTER_COUNT)
  }

  /// The capacity that can actually be addressed, even if `capacity` was set by hand.
  pub fn usable_capacity(&self) -> usize {
    self.capacity.min(room_above(self.first_address))
  }
}
