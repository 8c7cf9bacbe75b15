use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

use bimap::BiMap;
use prettytable::Table;
use string_cache::DefaultAtom;
use thiserror::Error;

use crate::address::{Address, AddressNumberType};
use crate::image::TABLE_DISPLAY_FORMAT;

/**
  A symbol table maps label names to their addresses. Names are interned, and each name is bound
  to a slot in an insertion-ordered vector of symbols, so iteration follows declaration order.

  The table carries the stage of the assembly in its type. The first pass builds a
  `SymbolTable<Pending>`, whose data addresses are still relative to the start of the data
  segment. `finalize` consumes it and hands back a `SymbolTable<Finalized>`, which is the only kind
  the second pass accepts. Data addresses are therefore shifted exactly once, and never before the
  length of the code segment is known.
*/
#[derive(Debug)]
pub struct SymbolTable<S = Finalized> {
  slots   : BiMap<DefaultAtom, usize>,
  symbols : Vec<Symbol>,
  stage   : PhantomData<S>,
}

/// Data addresses are segment-relative.
#[derive(Debug)]
pub enum Pending {}

/// Data addresses have been moved past the code segment.
#[derive(Debug)]
pub enum Finalized {}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Symbol {
  pub name    : DefaultAtom,
  pub address : Address,
}

#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum SymbolError {
  #[error("The label \"{name}\" is already defined.")]
  Duplicate {
    name    : DefaultAtom,
    address : Address
  },
}

impl SymbolTable<Pending> {

  pub fn new() -> SymbolTable<Pending> {
    SymbolTable {
      slots   : BiMap::new(),
      symbols : Vec::new(),
      stage   : PhantomData,
    }
  }

  /// Adds a symbol. A name can only be defined once; the existing definition wins.
  pub fn insert(&mut self, name: &str, address: Address) -> Result<(), SymbolError> {
    let name = DefaultAtom::from(name);
    let slot = self.symbols.len();

    match self.slots.insert_no_overwrite(name.clone(), slot) {
      Ok(()) => {
        self.symbols.push(Symbol { name, address });
        Ok(())
      }
      Err(_) => Err(SymbolError::Duplicate { name, address })
    }
  }

  /**
    Moves every data address past a code segment of `instruction_length` words, making it an
    address in the unified address space where data follows code. Code and external addresses
    are left alone.
  */
  pub fn finalize(self, instruction_length: AddressNumberType) -> SymbolTable<Finalized> {
    let symbols: Vec<Symbol> =
      self.symbols
          .into_iter()
          .map(|symbol| Symbol {
            address: symbol.address.relocated(instruction_length),
            ..symbol
          })
          .collect();

    tracing::debug!(
      instruction_length,
      data_labels = symbols.iter().filter(|s| s.address.is_data()).count(),
      "finalized data label addresses"
    );

    SymbolTable {
      slots   : self.slots,
      symbols,
      stage   : PhantomData,
    }
  }
}

impl<S> SymbolTable<S> {

  pub fn get(&self, name: &str) -> Option<&Symbol> {
    self.slots
        .get_by_left(&DefaultAtom::from(name))
        .map(|slot| &self.symbols[*slot])
  }

  pub fn get_address(&self, name: &str) -> Option<Address> {
    self.get(name).map(|symbol| symbol.address)
  }

  pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
    self.symbols.iter()
  }

  pub fn len(&self) -> usize {
    self.symbols.len()
  }

  pub fn is_empty(&self) -> bool {
    self.symbols.is_empty()
  }
}

impl Default for SymbolTable<Pending> {
  fn default() -> SymbolTable<Pending> {
    SymbolTable::new()
  }
}

impl<S> Display for SymbolTable<S> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Label", ubl->"Address"]);

    for symbol in &self.symbols {
      table.add_row(row![r->symbol.name, symbol.address]);
    }

    write!(f, "{}", table)
  }
}
