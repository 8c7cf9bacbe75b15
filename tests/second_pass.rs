use asm14::word::{InstructionFields, RegisterFields};
use asm14::{
  assemble, Address, AssemblerConfig, DiagnosticKind, EntryRecord, Era, FirstPass, Opcode,
  Operand, OverflowPolicy, SourceLine, SymbolTable, Word
};

fn first_pass(symbols: SymbolTable<asm14::Pending>, lines: Vec<SourceLine>) -> FirstPass {
  FirstPass {
    symbols,
    lines,
    instruction_count : 50,
    data_count        : 0,
    data              : vec![],
    entries           : vec![],
  }
}

#[test]
fn label_source_register_destination() {
  let mut symbols = SymbolTable::new();
  symbols.insert("LOOP", Address::Code(100)).unwrap();
  let lines = vec![SourceLine::instruction(
    1, "mov LOOP, r3", Opcode::Mov, Operand::direct("LOOP"), Operand::Register(3)
  )];

  let assembly = assemble(first_pass(symbols, lines), &AssemblerConfig::default());

  assert!(assembly.is_ok());
  assert_eq!(assembly.error_count, 0);

  let words = assembly.image.words();
  let fields = InstructionFields::decode(words[0]).unwrap();
  assert_eq!(fields.opcode, Opcode::Mov);
  assert_eq!(fields.source_mode, 1);
  assert_eq!(fields.destination_mode, 3);

  assert_eq!(words[1].payload(), 100);
  assert_eq!(words[1].era(), Some(Era::Relocatable));

  assert_eq!(RegisterFields::decode(words[2]).destination, 3);
  assert_eq!(words.len(), 3);
}

#[test]
fn external_entry_is_rejected() {
  let mut symbols = SymbolTable::new();
  symbols.insert("EXT1", Address::External(0)).unwrap();
  let mut pass = first_pass(symbols, vec![]);
  pass.entries = vec![EntryRecord::new(2, "EXT1")];

  let assembly = assemble(pass, &AssemblerConfig::default());

  assert!(!assembly.is_ok());
  assert_eq!(assembly.error_count, 1);
  assert!(assembly.image.is_empty());
  let diagnostic = assembly.diagnostics.iter().next().unwrap();
  assert_eq!(diagnostic.line, Some(2));
  assert_eq!(diagnostic.kind, DiagnosticKind::ExternalEntry("EXT1".into()));
}

#[test]
fn data_follows_code() {
  let mut symbols = SymbolTable::new();
  symbols.insert("MAIN", Address::Code(100)).unwrap();
  symbols.insert("NUMS", Address::Data(0)).unwrap();
  symbols.insert("LAST", Address::Data(2)).unwrap();
  let lines = vec![
    SourceLine::instruction(
      1, "MAIN: lea NUMS, r1", Opcode::Lea, Operand::direct("NUMS"), Operand::Register(1)
    ),
    SourceLine::instruction(
      2, "      dec LAST", Opcode::Dec, Operand::Absent, Operand::direct("LAST")
    ),
    SourceLine::instruction(3, "      hlt", Opcode::Hlt, Operand::Absent, Operand::Absent),
    SourceLine::new(4, "NUMS: .data 7, -1, 300"),
  ];
  let pass = FirstPass {
    symbols,
    lines,
    instruction_count : 106,
    data_count        : 3,
    data              : vec![7, -1, 300],
    entries           : vec![EntryRecord::new(0, "NUMS"), EntryRecord::new(5, "NUMS")],
  };

  let assembly = assemble(pass, &AssemblerConfig::default());
  assert!(assembly.is_ok());

  // Data labels are shifted past the 6 code words.
  assert_eq!(assembly.symbols.get_address("NUMS"), Some(Address::Data(106)));
  assert_eq!(assembly.symbols.get_address("LAST"), Some(Address::Data(108)));
  assert_eq!(assembly.symbols.get_address("MAIN"), Some(Address::Code(100)));

  let words = assembly.image.words();
  assert_eq!(words.len(), 9);
  assert_eq!(words[1], Word::new(Era::Relocatable, 106));
  assert_eq!(words[4], Word::new(Era::Relocatable, 108));
  assert_eq!(&words[6..], &[Word::data(7), Word::data(-1), Word::data(300)]);
  assert_eq!(words[7].value(), 0x3FFF);

  let exports: Vec<(String, usize)> =
    assembly.entry_exports().into_iter().map(|(l, a)| (l.to_string(), a)).collect();
  assert_eq!(exports, vec![("NUMS".to_string(), 106)]);
}

#[test]
fn externals_are_listed_where_they_are_used() {
  let mut symbols = SymbolTable::new();
  symbols.insert("W", Address::External(17)).unwrap();
  symbols.insert("K", Address::Code(100)).unwrap();
  let lines = vec![
    SourceLine::instruction(1, "K: jsr W", Opcode::Jsr, Operand::Absent, Operand::direct("W")),
    SourceLine::instruction(
      2, "   mov W[2], K", Opcode::Mov, Operand::indexed("W", 2), Operand::direct("K")
    ),
  ];

  let assembly = assemble(first_pass(symbols, lines), &AssemblerConfig::default());
  assert!(assembly.is_ok());

  let words = assembly.image.words();
  assert_eq!(words[1], Word::new(Era::External, 17));
  assert_eq!(words[3], Word::new(Era::External, 17));
  assert_eq!(words[4], Word::new(Era::Absolute, 2));
  assert_eq!(words[5], Word::new(Era::Relocatable, 100));

  let externals: Vec<(String, usize)> =
    assembly.external_references().into_iter().map(|(l, a)| (l.to_string(), a)).collect();
  assert_eq!(externals, vec![("W".to_string(), 101), ("W".to_string(), 103)]);
}

#[test]
fn errors_accumulate_and_addresses_stay_consistent() {
  let mut symbols = SymbolTable::new();
  symbols.insert("HERE", Address::Code(100)).unwrap();
  let lines = vec![
    SourceLine::instruction(
      1, "cmp MISSING, GONE", Opcode::Cmp, Operand::direct("MISSING"), Operand::direct("GONE")
    ),
    SourceLine::instruction(2, "bad line", Opcode::Inc, Operand::Absent, Operand::Register(1))
      .with_error(),
    SourceLine::instruction(3, "jmp HERE", Opcode::Jmp, Operand::Absent, Operand::direct("HERE")),
  ];
  let mut pass = first_pass(symbols, lines);
  pass.entries = vec![EntryRecord::new(4, "NOBODY")];

  let assembly = assemble(pass, &AssemblerConfig::default());

  // One bad entry, one bad line. The line flagged by the first pass is not counted again.
  assert_eq!(assembly.error_count, 2);
  assert_eq!(assembly.diagnostics.len(), 3);
  assert!(assembly.lines[0].is_error);

  // The failed line still takes its three words, so `jmp HERE` lands at 103.
  assert_eq!(assembly.image.len(), 5);
  assert_eq!(assembly.lines[2].destination.emitted_at, Some(104));
}

#[test]
fn full_image_truncates_silently_by_default() {
  let symbols = SymbolTable::new();
  let lines = vec![
    SourceLine::instruction(1, "prn #1", Opcode::Prn, Operand::Absent, Operand::Immediate(1)),
    SourceLine::instruction(2, "prn #2", Opcode::Prn, Operand::Absent, Operand::Immediate(2)),
  ];
  let mut pass = first_pass(symbols, lines);
  pass.data = vec![1, 2, 3];
  pass.data_count = 3;

  let config = AssemblerConfig::default().with_capacity(4);
  let assembly = assemble(pass, &config);

  assert!(assembly.is_ok());
  assert_eq!(assembly.image.len(), 4);
  assert_eq!(assembly.image.dropped(), 3);
}

#[test]
fn full_image_can_be_an_error() {
  let symbols = SymbolTable::new();
  let lines = vec![
    SourceLine::instruction(1, "prn #1", Opcode::Prn, Operand::Absent, Operand::Immediate(1)),
  ];
  let mut pass = first_pass(symbols, lines);
  pass.data = vec![1, 2, 3];
  pass.data_count = 3;

  let config = AssemblerConfig::default().with_capacity(3).with_overflow(OverflowPolicy::Reject);
  let assembly = assemble(pass, &config);

  assert!(!assembly.is_ok());
  assert_eq!(assembly.error_count, 1);
  assert_eq!(assembly.image.len(), 3);
  assert_eq!(
    assembly.diagnostics.iter().next().map(|d| d.kind.clone()),
    Some(DiagnosticKind::CapacityExceeded { capacity: 3, dropped: 2 })
  );
}

#[test]
fn register_past_the_register_field_is_an_error() {
  let lines = vec![
    SourceLine::instruction(1, "inc r9", Opcode::Inc, Operand::Absent, Operand::Register(9)),
    SourceLine::instruction(
      2, "mov r7, r8", Opcode::Mov, Operand::Register(7), Operand::Register(8)
    ),
  ];
  let config = AssemblerConfig::default().with_register_count(10);

  let assembly = assemble(first_pass(SymbolTable::new(), lines), &config);

  assert!(!assembly.is_ok());
  assert_eq!(assembly.error_count, 2);
  let kinds: Vec<DiagnosticKind> = assembly.diagnostics.iter().map(|d| d.kind.clone()).collect();
  assert_eq!(kinds, vec![DiagnosticKind::NoSuchRegister(9), DiagnosticKind::NoSuchRegister(8)]);
}

#[test]
fn late_first_address_keeps_addresses_in_twelve_bits() {
  let lines = vec![
    SourceLine::instruction(1, "prn #1", Opcode::Prn, Operand::Absent, Operand::Immediate(1)),
    SourceLine::instruction(2, "prn #2", Opcode::Prn, Operand::Absent, Operand::Immediate(2)),
  ];
  let config = AssemblerConfig::default()
    .with_first_address(4093)
    .with_overflow(OverflowPolicy::Reject);

  let assembly = assemble(first_pass(SymbolTable::new(), lines), &config);

  assert_eq!(assembly.image.capacity(), 3);
  assert_eq!(assembly.image.iter().last().map(|(address, _)| address), Some(4095));
  assert!(!assembly.is_ok());
  assert_eq!(
    assembly.diagnostics.iter().next().map(|d| d.kind.clone()),
    Some(DiagnosticKind::CapacityExceeded { capacity: 3, dropped: 1 })
  );
}

#[test]
fn only_data_count_values_are_appended() {
  let mut pass = first_pass(SymbolTable::new(), vec![]);
  pass.data = vec![4, 5, 6];
  pass.data_count = 2;

  let assembly = assemble(pass, &AssemblerConfig::default());
  assert_eq!(assembly.image.words(), &[Word::data(4), Word::data(5)]);
}
