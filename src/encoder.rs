/*!
  Turns source lines into machine words.

  A line becomes one instruction word followed by its operand words:

  ```text
    reg, reg        -> [instruction][registers]
    otherwise, for each present operand, source first:
      immediate     -> [value, A]
      direct        -> [address, R or E]
      indexed       -> [address, R or E][offset, A]
      register      -> [register in its own half, A]
  ```

  The words a line occupies depend only on the shape of its operands, never on whether its labels
  resolved, so a bad line still takes up the space it would have taken and the addresses of every
  later line stay put.
*/

use crate::config::AssemblerConfig;
use crate::diagnostics::Diagnostics;
use crate::image::MemoryImage;
use crate::line::SourceLine;
use crate::operand::{Operand, OperandSlot};
use crate::resolve::resolve_operand;
use crate::symbol::{Finalized, SymbolTable};
use crate::word::{Era, Word};

/// The relocation tag of a non-register operand word.
pub fn operand_era(operand: &Operand) -> Era {
  match operand {
    | Operand::Direct(label)
    | Operand::Indexed { label, .. } if label.is_external() => Era::External,
    | Operand::Direct(_)
    | Operand::Indexed { .. } => Era::Relocatable,
    _ => Era::Absolute
  }
}

/// The word for an operand on its own. A register fills the half of the register word that
/// belongs to its position.
pub fn operand_word(operand: &Operand, is_destination: bool) -> Word {
  match operand {
    Operand::Register(number) => {
      match is_destination {
        true  => Word::registers(None, Some(*number)),
        false => Word::registers(Some(*number), None)
      }
    }

    Operand::Immediate(value) => Word::new(Era::Absolute, *value),

    | Operand::Direct(label)
    | Operand::Indexed { label, .. } => Word::new(operand_era(operand), label.value() as i32),

    Operand::Absent => Word::default()
  }
}

/// Pushes a word, ignoring a full image. The image keeps count of what it dropped.
fn emit(image: &mut MemoryImage, word: Word) {
  if let Err(error) = image.push(word) {
    tracing::trace!(%error, "word dropped");
  }
}

fn emit_operand(image: &mut MemoryImage, slot: &mut OperandSlot, is_destination: bool) {
  if !slot.operand.is_present() {
    return;
  }

  slot.emitted_at = Some(image.next_address());
  emit(image, operand_word(&slot.operand, is_destination));

  if let Operand::Indexed { index, .. } = &slot.operand {
    emit(image, Word::index(*index));
  }
}

/**
  Resolves the operands of `line` and appends its words to `image`. Lines that are already in
  error, and lines without an instruction, are skipped.

  Returns `false` if an operand failed to resolve. The line is then marked as an error, but its
  words are still emitted so the word count stays right.
*/
pub fn encode_line(
  line        : &mut SourceLine,
  image       : &mut MemoryImage,
  symbols     : &SymbolTable<Finalized>,
  config      : &AssemblerConfig,
  diagnostics : &mut Diagnostics
) -> bool {
  let opcode = match line.opcode {
    Some(opcode) if !line.is_error => opcode,
    _ => return true
  };

  // Both operands are resolved even if the first fails, so both get reported.
  let source_ok =
    resolve_operand(&mut line.source.operand, line.number, symbols, config, diagnostics);
  let destination_ok =
    resolve_operand(&mut line.destination.operand, line.number, symbols, config, diagnostics);
  let resolved = source_ok && destination_ok;
  if !resolved {
    line.is_error = true;
  }

  #[cfg(feature = "trace_encoding")]
  tracing::trace!(line = line.number, text = %line.text.trim(), "encoding");

  emit(
    image,
    Word::instruction(opcode, line.source.operand.mode_id(), line.destination.operand.mode_id())
  );

  match (line.source.operand.register(), line.destination.operand.register()) {
    (Some(source), Some(destination)) => {
      emit(image, Word::registers(Some(source), Some(destination)));
    }

    _ => {
      emit_operand(image, &mut line.source, false);
      emit_operand(image, &mut line.destination, true);
    }
  }

  resolved
}
