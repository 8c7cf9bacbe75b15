//! Errors found during the second pass. Rendering them for the user is someone else's business;
//! here they are collected as values and logged.

use std::fmt::{Display, Formatter};

use string_cache::DefaultAtom;
use thiserror::Error;

use crate::line::LineNumber;

#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum DiagnosticKind {
  /// A label operand or `.entry` target that is not in the symbol table.
  #[error("No such label as \"{0}\".")]
  NoSuchLabel(DefaultAtom),
  /// A register operand past the last register.
  #[error("No such register as \"r{0}\".")]
  NoSuchRegister(u8),
  /// An `.entry` target declared with `.extern`.
  #[error("The parameter for .entry can't be an external label.")]
  ExternalEntry(DefaultAtom),
  /// Words that did not fit in the memory image.
  #[error("The program does not fit in {capacity} words of memory; {dropped} words were dropped.")]
  CapacityExceeded {
    capacity : usize,
    dropped  : usize
  },
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Diagnostic {
  /// `None` for errors that belong to the whole program rather than a line.
  pub line : Option<LineNumber>,
  pub kind : DiagnosticKind,
}

impl Display for Diagnostic {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self.line {
      Some(line) => write!(f, "Error on line {}: {}", line, self.kind),
      None       => write!(f, "Error: {}", self.kind)
    }
  }
}

/// Collects diagnostics in the order they are reported.
#[derive(Clone, Default, Debug)]
pub struct Diagnostics {
  reported: Vec<Diagnostic>,
}

impl Diagnostics {
  pub fn new() -> Diagnostics {
    Diagnostics::default()
  }

  pub fn report(&mut self, line: Option<LineNumber>, kind: DiagnosticKind) {
    let diagnostic = Diagnostic { line, kind };
    tracing::error!(line = ?diagnostic.line, "{}", diagnostic.kind);
    self.reported.push(diagnostic);
  }

  pub fn report_at(&mut self, line: LineNumber, kind: DiagnosticKind) {
    self.report(Some(line), kind);
  }

  pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
    self.reported.iter()
  }

  pub fn len(&self) -> usize {
    self.reported.len()
  }

  pub fn is_empty(&self) -> bool {
    self.reported.is_empty()
  }
}
