use std::process::ExitCode;

use tracing::Level;

use asm14::{
  assemble, Address, AssemblerConfig, EntryRecord, FirstPass, Opcode, Operand, SourceLine,
  SymbolError, SymbolTable
};

/*
  The first pass would produce this from:

  ```text
       .entry LENGTH
       .extern W
  MAIN: mov r3, LENGTH
  LOOP: jmp L1[1]
        prn #-5
        bne W
        sub r1, r4
        bne L3
  END:  hlt
  STR:  .string "ab"
  LENGTH: .data 6,-9
  L1:   .data 15
  L3:   .data 22
  ```
*/
fn demo_program() -> Result<FirstPass, SymbolError> {
  let mut symbols = SymbolTable::new();
  symbols.insert("MAIN",   Address::Code(100))?;
  symbols.insert("LOOP",   Address::Code(103))?;
  symbols.insert("END",    Address::Code(114))?;
  symbols.insert("STR",    Address::Data(0))?;
  symbols.insert("LENGTH", Address::Data(3))?;
  symbols.insert("L1",     Address::Data(5))?;
  symbols.insert("L3",     Address::Data(6))?;
  symbols.insert("W",      Address::External(0))?;

  let lines = vec![
    SourceLine::new(1, "     .entry LENGTH"),
    SourceLine::new(2, "     .extern W"),
    SourceLine::instruction(
      3, "MAIN: mov r3, LENGTH", Opcode::Mov, Operand::Register(3), Operand::direct("LENGTH")
    ),
    SourceLine::instruction(
      4, "LOOP: jmp L1[1]", Opcode::Jmp, Operand::Absent, Operand::indexed("L1", 1)
    ),
    SourceLine::instruction(
      5, "      prn #-5", Opcode::Prn, Operand::Absent, Operand::Immediate(-5)
    ),
    SourceLine::instruction(
      6, "      bne W", Opcode::Bne, Operand::Absent, Operand::direct("W")
    ),
    SourceLine::instruction(
      7, "      sub r1, r4", Opcode::Sub, Operand::Register(1), Operand::Register(4)
    ),
    SourceLine::instruction(
      8, "      bne L3", Opcode::Bne, Operand::Absent, Operand::direct("L3")
    ),
    SourceLine::instruction(
      9, "END:  hlt", Opcode::Hlt, Operand::Absent, Operand::Absent
    ),
    SourceLine::new(10, "STR:  .string \"ab\""),
    SourceLine::new(11, "LENGTH: .data 6,-9"),
    SourceLine::new(12, "L1:   .data 15"),
    SourceLine::new(13, "L3:   .data 22"),
  ];

  let data = vec!['a' as i32, 'b' as i32, 0, 6, -9, 15, 22];

  Ok(FirstPass {
    symbols,
    lines,
    instruction_count : 115,
    data_count        : data.len(),
    data,
    entries           : vec![EntryRecord::new(1, "LENGTH")],
  })
}

fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_writer(std::io::stderr)
    .init();

  let first_pass = match demo_program() {
    Ok(first_pass) => first_pass,
    Err(e) => {
      tracing::error!("{}", e);
      return ExitCode::FAILURE;
    }
  };

  let assembly = assemble(first_pass, &AssemblerConfig::default());

  println!("# Symbols\n{}", assembly.symbols);
  println!("# Memory Image\n{}", assembly.image);

  for (label, address) in assembly.entry_exports() {
    println!("entry  {} {:04}", label, address);
  }
  for (label, address) in assembly.external_references() {
    println!("extern {} {:04}", label, address);
  }

  match assembly.is_ok() {
    true  => ExitCode::SUCCESS,
    false => {
      for diagnostic in assembly.diagnostics.iter() {
        eprintln!("{}", diagnostic);
      }
      ExitCode::FAILURE
    }
  }
}
