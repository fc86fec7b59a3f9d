use arch::{Arg, Mnemonic};
use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::error::Error;
use crate::ic::{Operand, Record, Stmt};
use crate::literal::LitTab;
use crate::symbol::{SymTab, Symbol};

// ----------------------------------------------------------------------------
// Machine word

/// Address or value field of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Field {
    Value(i32),
    /// Sentinel for a symbol or literal that never got an address
    Unresolved,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Value(v) => write!(f, "{:03}", v),
            Field::Unresolved => write!(f, "***"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Word {
    Inst {
        lc: u16,
        opcode: u8,
        /// Register or condition code
        reg: u8,
        field: Field,
    },
    Data {
        lc: u16,
        value: i32,
    },
    /// Stands in for a directive; occupies no memory
    Placeholder {
        lc: u16,
    },
}

impl Word {
    pub fn lc(&self) -> u16 {
        match self {
            Word::Inst { lc, .. } | Word::Data { lc, .. } | Word::Placeholder { lc } => *lc,
        }
    }

    /// `opcode reg address`, optionally prefixed by the location.
    pub fn format(&self, location: bool) -> String {
        let body = match self {
            Word::Inst {
                opcode, reg, field, ..
            } => format!("{:02} {} {}", opcode, reg, field),
            Word::Data { value, .. } => format!("00 0 {}", Field::Value(*value)),
            Word::Placeholder { .. } => "-- - ---".to_string(),
        };
        if location {
            format!("{:>4} {}", self.lc(), body)
        } else {
            body
        }
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(true))
    }
}

// ----------------------------------------------------------------------------
// Pass 2

#[derive(Debug, Default)]
pub struct Pass2 {
    pub words: Vec<Word>,
    /// Diagnostics with their (expanded) line index
    pub errors: Vec<(usize, Error)>,
}

impl Pass2 {
    /// Generate one word per memory location from the finished intermediate
    /// code. Directives produce a placeholder when `placeholders` is set.
    ///
    /// Records past the end of memory produce no word; pass 1 has already
    /// reported them.
    pub fn run(ic: &[Record], symtab: &SymTab, littab: &LitTab, placeholders: bool) -> Self {
        let mut pass = Pass2::default();
        for rec in ic {
            match (&rec.stmt, u16::try_from(rec.lc).ok()) {
                (Stmt::Storage(size), _) => {
                    let words = (0..u32::from(*size))
                        .map_while(|offset| {
                            rec.lc
                                .checked_add(offset)
                                .and_then(|lc| u16::try_from(lc).ok())
                        })
                        .map(|lc| Word::Data { lc, value: 0 });
                    pass.words.extend(words);
                }
                (_, None) => {}
                (Stmt::Directive(..), Some(lc)) => {
                    if placeholders {
                        pass.words.push(Word::Placeholder { lc });
                    }
                }
                (Stmt::Constant(value), Some(lc)) => {
                    pass.words.push(Word::Data { lc, value: *value })
                }
                (Stmt::Imperative(m, operands), Some(lc)) => {
                    let word = pass.inst(rec.line, lc, *m, operands, symtab, littab);
                    pass.words.push(word);
                }
            }
        }
        debug!(words = pass.words.len(), errors = pass.errors.len(), "pass 2 done");
        pass
    }

    /// Operands fill the field of their slot. An operand of the wrong kind
    /// leaves its field zero; pass 1 has already reported it.
    fn inst(
        &mut self,
        line: usize,
        lc: u16,
        m: Mnemonic,
        operands: &[Operand],
        symtab: &SymTab,
        littab: &LitTab,
    ) -> Word {
        let mut reg = 0;
        let mut field = Field::Value(0);
        for (slot, operand) in m.arg_field().into_iter().zip(operands) {
            match (slot, *operand) {
                (Arg::Reg, Operand::Register(r)) => reg = r.code(),
                (Arg::Cond, Operand::Condition(c)) => reg = c.code(),
                (Arg::Mem, Operand::Constant(v)) => field = Field::Value(v),
                (Arg::Mem, Operand::Symbol(idx)) => field = self.symbol(line, idx, symtab),
                (Arg::Mem, Operand::Literal(idx)) => field = self.literal(line, idx, littab),
                _ => {}
            }
        }
        Word::Inst {
            lc,
            opcode: m.into(),
            reg,
            field,
        }
    }

    fn symbol(&mut self, line: usize, idx: usize, symtab: &SymTab) -> Field {
        match symtab.get(idx) {
            Some((_, Symbol { addr: Some(addr), .. })) => Field::Value(*addr as i32),
            Some((name, _)) => {
                self.errors
                    .push((line, Error::UnresolvedSymbol(name.to_string())));
                Field::Unresolved
            }
            None => {
                self.errors
                    .push((line, Error::UnresolvedSymbol(format!("#{}", idx))));
                Field::Unresolved
            }
        }
    }

    fn literal(&mut self, line: usize, idx: usize, littab: &LitTab) -> Field {
        match littab.get(idx) {
            Some(lit) => match lit.addr {
                Some(addr) => Field::Value(addr as i32),
                None => {
                    self.errors
                        .push((line, Error::UnresolvedLiteral(lit.text.clone())));
                    Field::Unresolved
                }
            },
            None => {
                self.errors
                    .push((line, Error::UnresolvedLiteral(format!("#{}", idx))));
                Field::Unresolved
            }
        }
    }
}
