use color_print::cprintln;

use crate::ic::Record;
use crate::pass2::Word;
use crate::Assembly;

/// Machine code text, one word per line.
pub fn listing(words: &[Word], location: bool) -> String {
    let mut out = String::new();
    for word in words {
        out.push_str(&word.format(location));
        out.push('\n');
    }
    out
}

/// Intermediate code text, one record per line.
pub fn intermediate(ic: &[Record]) -> String {
    let mut out = String::new();
    for rec in ic {
        out.push_str(&rec.to_string());
        out.push('\n');
    }
    out
}

/// Pool table text: pool number and the literal index it starts at.
pub fn pool_table(pools: &[usize]) -> String {
    let mut out = String::new();
    for (k, start) in pools.iter().enumerate() {
        out.push_str(&format!("{:>4}  {:>4}\n", k, start));
    }
    out
}

fn section(title: &str) {
    cprintln!("+-[<cyan>{}</>]{}", title, "-".repeat(60 - title.len()));
}

pub fn print_dump(asm: &Assembly) {
    section("MNT");
    print!("{}", asm.expansion.mnt);
    section("MDT");
    print!("{}", asm.expansion.mdt);

    section("SYMTAB");
    print!("{}", asm.pass1.symtab);
    section("LITTAB");
    print!("{}", asm.pass1.littab);
    section("POOLTAB");
    print!("{}", pool_table(asm.pass1.littab.pool_table()));

    section("IC");
    print!("{}", intermediate(&asm.pass1.ic));
    section("CODE");
    for word in &asm.pass2.words {
        match word {
            Word::Inst { .. } => cprintln!("<green>{}</>", word),
            Word::Data { .. } => cprintln!("<yellow>{}</>", word),
            Word::Placeholder { .. } => cprintln!("<blue>{}</>", word),
        }
    }
    println!("+{}", "-".repeat(65));
}
