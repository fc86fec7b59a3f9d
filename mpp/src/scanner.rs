use tracing::{debug, trace};

use crate::error::Error;
use crate::syntax::{words, Syntax};
use crate::table::{MacroDef, Mdt, Mnt, Param};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    Header,
    Body,
}

/// Result of collecting macro definitions from a source.
#[derive(Debug, Default)]
pub(crate) struct Scan {
    pub mnt: Mnt,
    pub mdt: Mdt,
    /// Lines outside of any definition, tagged with their source line index
    pub rest: Vec<(usize, String)>,
    pub errors: Vec<(usize, Error)>,
}

pub(crate) fn scan(src: &str, syntax: &Syntax) -> Scan {
    let mut out = Scan::default();
    let mut state = State::Outside;
    // Header line and name of the definition being read.
    // The body of a rejected duplicate is not recorded.
    let mut header = 0;
    let mut name = String::new();
    let mut recording = false;

    for (idx, raw) in src.lines().enumerate() {
        let ws = words(raw);

        match state {
            State::Outside => {
                if ws.first().is_some_and(|w| syntax.is_start(w)) {
                    state = State::Header;
                    header = idx;
                    name.clear();
                    recording = false;
                } else {
                    out.rest.push((idx, raw.to_string()));
                }
            }
            State::Header => {
                let Some((head, params)) = ws.split_first() else {
                    continue;
                };
                if syntax.is_end(head) {
                    out.errors
                        .push((header, Error::MissingMacroName(syntax.start.clone())));
                    state = State::Outside;
                    continue;
                }
                let def = MacroDef {
                    name: head.to_string(),
                    params: params.iter().map(|p| Param::parse(p)).collect(),
                    mdt_index: out.mdt.len(),
                    line: idx,
                };
                debug!(name = %def.name, params = def.params.len(), mdt = def.mdt_index, "macro defined");
                name = head.to_string();
                recording = out.mnt.insert(def).is_none();
                if !recording {
                    out.errors.push((idx, Error::DuplicateMacro(name.clone())));
                }
                state = State::Body;
            }
            State::Body => {
                let Some(head) = ws.first() else {
                    continue;
                };
                if syntax.is_end(head) {
                    if recording {
                        out.mdt.push(syntax.end.clone());
                    }
                    state = State::Outside;
                } else if recording {
                    trace!(line = idx, "body: {}", raw.trim());
                    out.mdt.push(raw.trim().to_string());
                }
            }
        }
    }

    match state {
        State::Outside => {}
        State::Header => out
            .errors
            .push((header, Error::MissingMacroName(syntax.start.clone()))),
        State::Body => {
            if recording {
                out.mdt.push(syntax.end.clone());
            }
            out.errors.push((header, Error::UnterminatedMacro(name)));
        }
    }

    out
}
