mod error;
mod expand;
mod scanner;
mod syntax;
mod table;

pub use error::Error;
pub use expand::{replay, Binding};
pub use syntax::{words, Syntax};
pub use table::{MacroDef, Mdt, Mnt, Param};

/// A line of expanded source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Source line it came from; every line of one expansion shares its call site
    pub origin: usize,
    pub text: String,
}

/// Output of one run of the macro processor.
#[derive(Debug, Default)]
pub struct Expansion {
    pub mnt: Mnt,
    pub mdt: Mdt,
    pub lines: Vec<Line>,
    /// Diagnostics with their source line index
    pub errors: Vec<(usize, Error)>,
}

impl Expansion {
    /// Expanded source text, one line per entry.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for line in &self.lines {
            text.push_str(&line.text);
            text.push('\n');
        }
        text
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.text.as_str())
    }
}

/// Collect every macro definition in `src` and expand every call.
///
/// Definitions are collected before any call is expanded, so a call may
/// precede the definition of its macro. Bodies are replayed as-is apart from
/// parameter substitution; a macro name inside a body is not expanded again.
pub fn process(src: &str, syntax: &Syntax) -> Expansion {
    let scan = scanner::scan(src, syntax);
    let mut errors = scan.errors;
    let mut lines = vec![];

    for (origin, raw) in scan.rest {
        match expand::expand_line(&raw, &scan.mnt, &scan.mdt, syntax) {
            Some((body, errs)) => {
                errors.extend(errs.into_iter().map(|e| (origin, e)));
                lines.extend(body.into_iter().map(|text| Line { origin, text }));
            }
            None => lines.push(Line { origin, text: raw }),
        }
    }
    errors.sort_by_key(|(line, _)| *line);

    Expansion {
        mnt: scan.mnt,
        mdt: scan.mdt,
        lines,
        errors,
    }
}
