use crate::config::AssemblerConfig;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::label::is_legal_label;
use crate::line::LineNumber;
use crate::operand::Operand;
use crate::symbol::{Finalized, SymbolTable};

/**
  Resolves a label operand to the final address of its label. A register operand resolves if the
  machine has that register, and other operands resolve trivially.

  An undefined label is reported, unless its name is not even a legal label: the first pass has
  already complained about that, and one complaint per mistake is enough. Either way the result
  is `false` and the operand stays unresolved.
*/
pub fn resolve_operand(
  operand     : &mut Operand,
  line        : LineNumber,
  symbols     : &SymbolTable<Finalized>,
  config      : &AssemblerConfig,
  diagnostics : &mut Diagnostics
) -> bool {
  if let Operand::Register(number) = *operand {
    if number >= config.usable_registers() {
      diagnostics.report_at(line, DiagnosticKind::NoSuchRegister(number));
      return false;
    }
  }

  let label = match operand.label_mut() {
    Some(label) => label,
    None        => return true
  };

  match symbols.get_address(&label.name) {
    Some(address) => {
      label.resolved = Some(address);
      true
    }

    None => {
      if is_legal_label(&label.name, config) {
        diagnostics.report_at(line, DiagnosticKind::NoSuchLabel(label.name.clone()));
      }
      false
    }
  }
}
