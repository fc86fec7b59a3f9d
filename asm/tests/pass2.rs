use pasm::{Error, Field, Pass1, Pass2, Word};

fn assemble(src: &str, placeholders: bool) -> (Pass1, Pass2) {
    let pass1 = Pass1::run(src.lines());
    let pass2 = Pass2::run(&pass1.ic, &pass1.symtab, &pass1.littab, placeholders);
    for word in &pass2.words {
        println!("{}", word);
    }
    (pass1, pass2)
}

fn inst(lc: u16, opcode: u8, reg: u8, addr: i32) -> Word {
    Word::Inst {
        lc,
        opcode,
        reg,
        field: Field::Value(addr),
    }
}

#[test]
fn storage_expands_to_zero_words() {
    let (pass1, pass2) = assemble("START 100\nMOVER AREG, X\nX DS 10\nEND\n", false);
    assert!(pass1.errors.is_empty());
    assert!(pass2.errors.is_empty());
    assert_eq!(pass2.words.len(), 11);
    assert_eq!(pass2.words[0], inst(100, 4, 1, 101));
    for (k, word) in pass2.words[1..].iter().enumerate() {
        assert_eq!(*word, Word::Data { lc: 101 + k as u16, value: 0 });
    }
}

#[test]
fn forward_reference_address() {
    let (_, pass2) = assemble("START 200\nBC ANY, NEXT\nREAD A\nNEXT STOP\nA DS 1\nEND\n", false);
    assert!(pass2.errors.is_empty());
    assert_eq!(pass2.words[0], inst(200, 7, 6, 202));
    assert_eq!(pass2.words[1], inst(201, 9, 0, 203));
    assert_eq!(pass2.words[2], inst(202, 0, 0, 0));
}

#[test]
fn literal_addresses() {
    let src = "\
START 201
MOVER AREG ='5'
MOVEM AREG X
MOVER BREG ='2'
LTORG
NEXT ADD AREG ='1'
SUB BREG ='2'
BC LT NEXT
MULT CREG ='4'
STOP
X DS 1
END
";
    let (_, pass2) = assemble(src, false);
    assert!(pass2.errors.is_empty());

    // One word per location, no gaps
    let lcs: Vec<u16> = pass2.words.iter().map(|w| w.lc()).collect();
    assert_eq!(lcs, (201..=214).collect::<Vec<u16>>());

    assert_eq!(pass2.words[0], inst(201, 4, 1, 204));
    assert_eq!(pass2.words[1], inst(202, 5, 1, 211));
    assert_eq!(pass2.words[3], Word::Data { lc: 204, value: 5 });
    assert_eq!(pass2.words[6], inst(207, 2, 2, 213));
    assert_eq!(pass2.words[7], inst(208, 7, 1, 206));
    assert_eq!(pass2.words[13], Word::Data { lc: 214, value: 4 });

    assert_eq!(pass2.words[0].to_string(), " 201 04 1 204");
    assert_eq!(pass2.words[3].format(false), "00 0 005");
}

#[test]
fn unresolved_symbol_sentinel() {
    let (_, pass2) = assemble("START 0\nREAD X\nPRINT Y\nY DS 1\nEND\n", false);
    assert!(matches!(&pass2.errors[..], [(1, Error::UnresolvedSymbol(name))] if name == "X"));
    assert_eq!(
        pass2.words[0],
        Word::Inst {
            lc: 0,
            opcode: 9,
            reg: 0,
            field: Field::Unresolved
        }
    );
    assert_eq!(pass2.words[0].to_string(), "   0 09 0 ***");
    // The run goes on past the error
    assert_eq!(pass2.words[1], inst(1, 10, 0, 2));
}

#[test]
fn unresolved_literal_sentinel() {
    let (_, pass2) = assemble("START 0\nMOVER AREG ='3'\n", false);
    assert!(matches!(&pass2.errors[..], [(1, Error::UnresolvedLiteral(text))] if text == "='3'"));
    assert_eq!(pass2.words.len(), 1);
}

#[test]
fn placeholders() {
    let (_, pass2) = assemble("START 5\nSTOP\nORIGIN 9\nEND\n", true);
    assert_eq!(
        pass2.words,
        vec![
            Word::Placeholder { lc: 5 },
            inst(5, 0, 0, 0),
            Word::Placeholder { lc: 9 },
            Word::Placeholder { lc: 9 },
        ]
    );
    assert_eq!(pass2.words[0].format(false), "-- - ---");

    let (_, pass2) = assemble("START 5\nSTOP\nORIGIN 9\nEND\n", false);
    assert_eq!(pass2.words, vec![inst(5, 0, 0, 0)]);
}

#[test]
fn operands_fill_their_slot() {
    let (pass1, pass2) = assemble("START 0\nMOVER X, AREG\nMOVER AREG, X\nX DS 1\nEND\n", false);
    assert_eq!(pass1.errors.len(), 2);
    assert!(pass2.errors.is_empty());
    assert_eq!(pass2.words[0], inst(0, 4, 0, 0));
    assert_eq!(pass2.words[1], inst(1, 4, 1, 2));
}

#[test]
fn storage_stops_at_top_of_memory() {
    let (_, pass2) = assemble("START 65534\nX DS 4\nEND\n", false);
    let lcs: Vec<u16> = pass2.words.iter().map(|w| w.lc()).collect();
    assert_eq!(lcs, vec![65534, 65535]);
}

#[test]
fn literal_past_memory_is_unresolved() {
    let (_, pass2) = assemble("START 65535\nADD AREG ='1'\nLTORG\nSUB AREG ='2'\nEND\n", false);
    assert!(matches!(&pass2.errors[..], [(1, Error::UnresolvedLiteral(text))] if text == "='1'"));
    assert_eq!(
        pass2.words,
        vec![Word::Inst {
            lc: 65535,
            opcode: 1,
            reg: 1,
            field: Field::Unresolved
        }]
    );
}
