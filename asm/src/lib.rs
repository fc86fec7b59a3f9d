pub mod config;
pub mod error;
pub mod ic;
pub mod literal;
pub mod parser;
pub mod pass1;
pub mod pass2;
pub mod report;
pub mod symbol;

pub use config::{Config, Output};
pub use error::Error;
pub use ic::{Operand, Record, Stmt};
pub use literal::{LitTab, Literal};
pub use pass1::Pass1;
pub use pass2::{Field, Pass2, Word};
pub use symbol::{SymTab, Symbol};

/// A diagnostic attached to a source line.
#[derive(Debug)]
pub struct Diag {
    /// Source line index (0-based)
    pub line: usize,
    /// Text the diagnostic refers to: the source line, or the expanded line
    /// for errors found by the assembler
    pub text: String,
    pub error: Error,
}

/// Everything one run of the toolchain produces.
#[derive(Debug)]
pub struct Assembly {
    pub expansion: mpp::Expansion,
    pub pass1: Pass1,
    pub pass2: Pass2,
    /// Diagnostics of all stages in source order. The per-stage error lists
    /// are moved here.
    pub diags: Vec<Diag>,
}

impl Assembly {
    /// Macro processor, then pass 1, then pass 2.
    pub fn run(src: &str, config: &Config) -> Self {
        let mut expansion = mpp::process(src, &config.syntax);
        let mut pass1 = Pass1::run(expansion.iter());
        let mut pass2 = Pass2::run(
            &pass1.ic,
            &pass1.symtab,
            &pass1.littab,
            config.output.placeholders,
        );

        let source: Vec<&str> = src.lines().collect();
        let mut diags: Vec<Diag> = std::mem::take(&mut expansion.errors)
            .into_iter()
            .map(|(line, err)| Diag {
                line,
                text: source.get(line).unwrap_or(&"").to_string(),
                error: err.into(),
            })
            .collect();

        let passes = std::mem::take(&mut pass1.errors)
            .into_iter()
            .chain(std::mem::take(&mut pass2.errors));
        for (idx, error) in passes {
            let (line, text) = match expansion.lines.get(idx) {
                Some(l) => (l.origin, l.text.clone()),
                None => (source.len().saturating_sub(1), String::new()),
            };
            diags.push(Diag { line, text, error });
        }
        diags.sort_by_key(|d| d.line);

        Assembly {
            expansion,
            pass1,
            pass2,
            diags,
        }
    }

    pub fn has_error(&self) -> bool {
        self.diags.iter().any(|d| !d.error.is_warning())
    }

    /// Machine code text.
    pub fn listing(&self, location: bool) -> String {
        report::listing(&self.pass2.words, location)
    }
}
