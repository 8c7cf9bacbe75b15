use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::line::EntryRecord;
use crate::symbol::{Finalized, SymbolTable};

/// Checks every `.entry` record against the symbol table and returns how many are illegal: those
/// naming no label, and those naming an external label. Every record is checked.
pub fn count_illegal_entries(
  entries     : &[EntryRecord],
  symbols     : &SymbolTable<Finalized>,
  diagnostics : &mut Diagnostics
) -> usize {
  let mut illegal = 0;

  for entry in entries {
    match symbols.get(&entry.name) {
      Some(symbol) if symbol.address.is_external() => {
        diagnostics.report_at(entry.line, DiagnosticKind::ExternalEntry(entry.name.clone()));
        illegal += 1;
      }
      Some(_) => {}
      None => {
        diagnostics.report_at(entry.line, DiagnosticKind::NoSuchLabel(entry.name.clone()));
        illegal += 1;
      }
    }
  }

  tracing::debug!(entries = entries.len(), illegal, "validated entry records");
  illegal
}
