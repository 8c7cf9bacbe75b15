/*!
  The second pass of a two-pass assembler for a 14 bit word machine.

  The first pass has already read the source, built a symbol table, and parsed every line into an
  opcode and typed operands. This crate finishes the job: it moves data labels past the code
  segment, checks `.entry` exports, resolves every label operand to an address, and encodes each
  line into machine words with the right addressing modes and relocation tags. The result is an
  in-memory image, code followed by data, together with an error count that says whether the
  image may be written out.

  ```text
    Instruction:  [Unused:4][Opcode:4][SrcMode:2][DestMode:2][Era:2]
  ```
  See [`word`] for the other word layouts.
*/

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

pub mod address;
pub mod assembler;
pub mod config;
pub mod diagnostics;
pub mod encoder;
pub mod entry;
pub mod image;
pub mod label;
pub mod line;
pub mod opcode;
pub mod operand;
pub mod resolve;
pub mod symbol;
pub mod word;

pub use address::{Address, AddressNumberType};
pub use assembler::{assemble, Assembly, FirstPass};
pub use config::{AssemblerConfig, OverflowPolicy};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use image::MemoryImage;
pub use line::{EntryRecord, LineNumber, SourceLine};
pub use opcode::Opcode;
pub use operand::{AddressingMode, LabelRef, Operand, OperandSlot};
pub use symbol::{Finalized, Pending, Symbol, SymbolError, SymbolTable};
pub use word::{Era, Word};
