/*!
  The second pass, from first-pass results to a finished memory image.

  The pipeline is this:
  ```text
  FirstPass -> [`SymbolTable::finalize`] -> [`count_illegal_entries`] ->⋯

  ⋯-> for each line [`encode_line`] -> [`append_data`] -> Assembly
  ```
  Nothing stops at the first error. Every entry record and every line is looked at, so a single
  run reports everything that is wrong with the program. The only verdict is the error count:
  an `Assembly` with a non-zero count must not be written out.
*/

use string_cache::DefaultAtom;

use crate::address::AddressNumberType;
use crate::config::{AssemblerConfig, OverflowPolicy};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::encoder::encode_line;
use crate::entry::count_illegal_entries;
use crate::image::MemoryImage;
use crate::line::{EntryRecord, SourceLine};
use crate::symbol::{Finalized, Pending, SymbolTable};
use crate::word::Word;

/// Everything the first pass knows when it is done.
#[derive(Debug)]
pub struct FirstPass {
  pub symbols           : SymbolTable<Pending>,
  pub lines             : Vec<SourceLine>,
  /// The final instruction counter. It counts from the first load address, so it is also the
  /// address the data segment starts at.
  pub instruction_count : AddressNumberType,
  /// How many of `data` make up the data segment.
  pub data_count        : usize,
  pub data              : Vec<i32>,
  pub entries           : Vec<EntryRecord>,
}

/// The result of `assemble`.
#[derive(Debug)]
pub struct Assembly {
  pub image       : MemoryImage,
  pub symbols     : SymbolTable<Finalized>,
  pub lines       : Vec<SourceLine>,
  pub entries     : Vec<EntryRecord>,
  pub diagnostics : Diagnostics,
  pub error_count : usize,
}

impl Assembly {
  /// True if the image is authoritative and may be written out.
  pub fn is_ok(&self) -> bool {
    self.error_count == 0
  }

  /// Every use of an external label, as `(label, address of the word referring to it)`, in
  /// the order the words were emitted.
  pub fn external_references(&self) -> Vec<(DefaultAtom, AddressNumberType)> {
    self.lines
        .iter()
        .flat_map(|line| line.operands())
        .filter_map(|slot| {
          let label = slot.operand.label()?;
          match label.is_external() {
            true  => slot.emitted_at.map(|address| (label.name.clone(), address)),
            false => None
          }
        })
        .collect()
  }

  /// Every exported label with its final address, in the order of the first `.entry` naming it.
  /// Records that name no label, or an external one, are left out.
  pub fn entry_exports(&self) -> Vec<(DefaultAtom, AddressNumberType)> {
    let mut exports: Vec<(DefaultAtom, AddressNumberType)> = Vec::new();

    for entry in &self.entries {
      if exports.iter().any(|(name, _)| *name == entry.name) {
        continue;
      }
      match self.symbols.get(&entry.name) {
        Some(symbol) if !symbol.address.is_external() => {
          exports.push((entry.name.clone(), symbol.address.number()));
        }
        _ => {}
      }
    }

    exports
  }
}

/// Appends the first `data_count` data values to the image, each masked to the word width.
/// Values past the capacity are not stored; the image counts them as dropped.
pub fn append_data(image: &mut MemoryImage, data: &[i32], data_count: usize) {
  for value in data.iter().take(data_count) {
    let _ = image.push(Word::data(*value));
  }
}

/**
  Runs the second pass over the output of the first.

  The error count is the number of illegal entry records, plus the number of lines that failed to
  encode, plus one if words were dropped under `OverflowPolicy::Reject`.
*/
pub fn assemble(first_pass: FirstPass, config: &AssemblerConfig) -> Assembly {
  let FirstPass { symbols, mut lines, instruction_count, data_count, data, entries } = first_pass;

  let symbols = symbols.finalize(instruction_count);
  let mut diagnostics = Diagnostics::new();
  let mut image = MemoryImage::new(config);

  let mut error_count = count_illegal_entries(&entries, &symbols, &mut diagnostics);

  for line in lines.iter_mut() {
    if !encode_line(line, &mut image, &symbols, config, &mut diagnostics) {
      error_count += 1;
    }
  }
  let code_words = image.len();

  append_data(&mut image, &data, data_count);

  if image.dropped() > 0 {
    match config.overflow {
      OverflowPolicy::Reject => {
        diagnostics.report(None, DiagnosticKind::CapacityExceeded {
          capacity : image.capacity(),
          dropped  : image.dropped()
        });
        error_count += 1;
      }
      OverflowPolicy::Truncate => {
        tracing::debug!(dropped = image.dropped(), "memory image full; words truncated");
      }
    }
  }

  tracing::debug!(
    code_words,
    data_words = image.len() - code_words,
    error_count,
    "second pass complete"
  );

  Assembly { image, symbols, lines, entries, diagnostics, error_count }
}
