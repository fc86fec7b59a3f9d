use arch::{Cond, Declarative, Directive, Mnemonic, OpKind, Reg};
use serde::Serialize;
use std::fmt;

// ----------------------------------------------------------------------------
// Operand

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operand {
    Constant(i32),
    Register(Reg),
    Condition(Cond),
    /// Symbol table index
    Symbol(usize),
    /// Literal table index
    Literal(usize),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Constant(v) => write!(f, "(C,{})", v),
            Operand::Register(r) => write!(f, "(RG,{:02})", r.code()),
            Operand::Condition(c) => write!(f, "(CC,{:02})", c.code()),
            Operand::Symbol(idx) => write!(f, "(S,{:02})", idx),
            Operand::Literal(idx) => write!(f, "(L,{:02})", idx),
        }
    }
}

// ----------------------------------------------------------------------------
// Statement

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Stmt {
    Directive(Directive, Vec<Operand>),
    Imperative(Mnemonic, Vec<Operand>),
    /// `DS n`
    Storage(u16),
    /// `DC v`, or a pooled literal
    Constant(i32),
}

impl Stmt {
    pub fn op(&self) -> OpKind {
        match self {
            Stmt::Directive(d, _) => OpKind::Ad(*d),
            Stmt::Imperative(m, _) => OpKind::Is(*m),
            Stmt::Storage(_) => OpKind::Dl(Declarative::DS),
            Stmt::Constant(_) => OpKind::Dl(Declarative::DC),
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.op())?;
        match self {
            Stmt::Directive(_, operands) | Stmt::Imperative(_, operands) => {
                for operand in operands {
                    write!(f, " {}", operand)?;
                }
                Ok(())
            }
            Stmt::Storage(n) => write!(f, " {}", Operand::Constant(*n as i32)),
            Stmt::Constant(v) => write!(f, " {}", Operand::Constant(*v)),
        }
    }
}

// ----------------------------------------------------------------------------
// Intermediate record

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Location counter when the record was emitted. May lie past the end of
    /// memory after an overflow.
    pub lc: u32,
    /// Index of the expanded source line
    pub line: usize,
    pub stmt: Stmt,
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>4} {}", self.lc, self.stmt)
    }
}
