/*!
  The memory image: an append-only run of words, code first and data after, with a fixed
  capacity. What happens to words past the capacity is decided by the `OverflowPolicy`.
*/

use std::fmt::{Display, Formatter};

use prettytable::{format as TableFormat, Table};
use thiserror::Error;

use crate::address::AddressNumberType;
use crate::config::{AssemblerConfig, OverflowPolicy};
use crate::word::Word;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Error)]
#[error("memory image is full ({capacity} words)")]
pub struct CapacityExceeded {
  pub capacity: usize,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct MemoryImage {
  words         : Vec<Word>,
  capacity      : usize,
  first_address : AddressNumberType,
  overflow      : OverflowPolicy,
  dropped       : usize,
}

impl MemoryImage {

  pub fn new(config: &AssemblerConfig) -> MemoryImage {
    MemoryImage {
      words         : Vec::new(),
      capacity      : config.usable_capacity(),
      first_address : config.first_address,
      overflow      : config.overflow,
      dropped       : 0,
    }
  }

  /**
    Appends a word. A full image keeps its length either way; under `OverflowPolicy::Truncate` the
    word vanishes without complaint, under `OverflowPolicy::Reject` the caller is told.
  */
  pub fn push(&mut self, word: Word) -> Result<(), CapacityExceeded> {
    if self.is_full() {
      self.dropped += 1;
      return match self.overflow {
        OverflowPolicy::Truncate => Ok(()),
        OverflowPolicy::Reject   => Err(CapacityExceeded { capacity: self.capacity })
      };
    }

    #[cfg(feature = "trace_encoding")]
    tracing::trace!(address = self.next_address(), word = %word, "emit");

    self.words.push(word);
    Ok(())
  }

  /// The address the next word will be loaded at.
  pub fn next_address(&self) -> AddressNumberType {
    self.first_address + self.words.len()
  }

  pub fn words(&self) -> &[Word] {
    &self.words
  }

  pub fn len(&self) -> usize {
    self.words.len()
  }

  pub fn is_empty(&self) -> bool {
    self.words.is_empty()
  }

  pub fn is_full(&self) -> bool {
    self.words.len() >= self.capacity
  }

  pub fn capacity(&self) -> usize {
    self.capacity
  }

  /// How many pushes found the image full.
  pub fn dropped(&self) -> usize {
    self.dropped
  }

  /// Pairs each word with its load address.
  pub fn iter(&self) -> impl Iterator<Item = (AddressNumberType, Word)> + '_ {
    let first_address = self.first_address;
    self.words
        .iter()
        .enumerate()
        .map(move |(i, word)| (first_address + i, *word))
  }
}

impl Display for MemoryImage {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Address", ubl->"Word", ubl->"Era"]);

    for (address, word) in self.iter() {
      let era = match word.era() {
        Some(era) => era.to_string(),
        None      => "-".to_string()
      };
      table.add_row(row![r->format!("{:04}", address), word, era]);
    }

    write!(f, "{}", table)
  }
}

lazy_static! {
  pub(crate) static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::word::Era;

  fn tiny(overflow: OverflowPolicy) -> MemoryImage {
    MemoryImage::new(&AssemblerConfig::default().with_capacity(2).with_overflow(overflow))
  }

  #[test]
  fn addresses_start_at_first_address() {
    let mut image = MemoryImage::new(&AssemblerConfig::default());
    assert_eq!(image.next_address(), 100);
    image.push(Word::data(1)).unwrap();
    image.push(Word::data(2)).unwrap();
    assert_eq!(image.next_address(), 102);

    let addresses: Vec<AddressNumberType> = image.iter().map(|(a, _)| a).collect();
    assert_eq!(addresses, vec![100, 101]);
  }

  #[test]
  fn load_addresses_stay_in_the_address_space() {
    let config = AssemblerConfig { first_address: 4094, ..AssemblerConfig::default() };
    let mut image = MemoryImage::new(&config);
    for value in 0..4 {
      image.push(Word::data(value)).unwrap();
    }
    assert_eq!(image.capacity(), 2);
    assert_eq!(image.len(), 2);
    assert_eq!(image.iter().last().map(|(address, _)| address), Some(4095));
  }

  #[test]
  fn full_image_truncates_silently() {
    let mut image = tiny(OverflowPolicy::Truncate);
    image.push(Word::data(1)).unwrap();
    image.push(Word::data(2)).unwrap();
    assert!(image.is_full());

    assert_eq!(image.push(Word::new(Era::Absolute, 3)), Ok(()));
    assert_eq!(image.len(), 2);
    assert_eq!(image.dropped(), 1);
  }

  #[test]
  fn full_image_rejects() {
    let mut image = tiny(OverflowPolicy::Reject);
    image.push(Word::data(1)).unwrap();
    image.push(Word::data(2)).unwrap();

    assert_eq!(image.push(Word::data(3)), Err(CapacityExceeded { capacity: 2 }));
    assert_eq!(image.len(), 2);
    assert_eq!(image.words(), &[Word::data(1), Word::data(2)]);
  }
}
