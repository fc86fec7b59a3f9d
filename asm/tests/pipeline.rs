use pasm::{Assembly, Config, Error, Output};

const SOURCE: &str = "\
MACRO
ONE &O, &N, &E=AREG
MOVER &E, &O
ADD &E, &N
MOVEM &E, &O
MEND

MACRO
TWO &T, &W, &O=DREG
MOVER &O, &T
ADD &O, &W
MOVEM &O, &T
MEND

START
READ O
READ T
ONE O, 9
TWO T, 7
ONE O, 9, &E=CREG
STOP
O DS 1
T DS 1
END
";

fn run(src: &str, config: &Config) -> Assembly {
    let asm = Assembly::run(src, config);
    for diag in &asm.diags {
        println!("{:>2}: {} | {}", diag.line, diag.error, diag.text);
    }
    print!("{}", asm.listing(true));
    asm
}

#[test]
fn macro_program() {
    let asm = run(SOURCE, &Config::default());
    assert!(asm.diags.is_empty());
    assert!(!asm.has_error());

    assert_eq!(asm.pass1.symtab.addr("O"), Some(12));
    assert_eq!(asm.pass1.symtab.addr("T"), Some(13));
    assert_eq!(
        asm.listing(false),
        "\
09 0 012
09 0 013
04 1 012
01 1 009
05 1 012
04 4 013
01 4 007
05 4 013
04 3 012
01 3 009
05 3 012
00 0 000
00 0 000
00 0 000
"
    );
}

#[test]
fn diagnostics_point_at_call_site() {
    let src = "\
MACRO
LOADX &R
MOVER &R, X
MEND
START 0
LOADX AREG, Q=1
END
";
    let asm = run(src, &Config::default());
    assert_eq!(asm.diags.len(), 2);

    let first = &asm.diags[0];
    assert_eq!(first.line, 5);
    assert!(matches!(&first.error, Error::Macro(mpp::Error::InvalidKeywordArgument(arg)) if arg == "Q=1"));
    assert_eq!(first.text, "LOADX AREG, Q=1");

    let second = &asm.diags[1];
    assert_eq!(second.line, 5);
    assert!(matches!(&second.error, Error::UnresolvedSymbol(name) if name == "X"));
    assert_eq!(second.text, "MOVER AREG X");
    assert!(asm.has_error());
    assert!(asm.listing(false).contains("04 1 ***"));
}

#[test]
fn missing_end_is_a_warning() {
    let asm = run("START 0\nSTOP\n", &Config::default());
    assert!(matches!(&asm.diags[..], [d] if matches!(d.error, Error::MissingEnd)));
    assert!(!asm.has_error());
}

#[test]
fn output_config() {
    let config = Config {
        output: Output {
            location: false,
            placeholders: true,
        },
        ..Config::default()
    };
    let asm = run("START 5\nSTOP\nEND\n", &config);
    assert_eq!(
        asm.listing(config.output.location),
        "-- - ---\n00 0 000\n-- - ---\n"
    );
}

#[test]
fn syntax_config() {
    let config = Config::parse("syntax:\n  start: DEFINE\n  end: ENDDEF\n").unwrap();
    let src = "DEFINE\nTWICE &A\nADD AREG &A\nADD AREG &A\nENDDEF\nSTART 0\nTWICE 3\nEND\n";
    let asm = run(src, &config);
    assert!(asm.diags.is_empty());
    assert_eq!(asm.listing(false), "01 1 003\n01 1 003\n");
}
