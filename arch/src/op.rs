use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumString};

// ----------------------------------------------------------------------------
// Imperative statements (IS)

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    TryFromPrimitive,
    IntoPrimitive,
    EnumString,
    Display,
)]
#[repr(u8)]
pub enum Mnemonic {
    STOP = 0,
    ADD,
    SUB,
    MULT,
    MOVER,
    MOVEM,
    COMP,
    BC,
    DIV,
    READ,
    PRINT,
}

/// Operand slot of an imperative statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg {
    Reg,
    Cond,
    Mem,
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Reg => write!(f, "register"),
            Arg::Cond => write!(f, "condition code"),
            Arg::Mem => write!(f, "memory operand"),
        }
    }
}

impl Mnemonic {
    /// Operand slots in source order.
    pub fn arg_field(&self) -> Vec<Arg> {
        use Mnemonic::*;
        match self {
            STOP => vec![],
            ADD => vec![Arg::Reg, Arg::Mem],
            SUB => vec![Arg::Reg, Arg::Mem],
            MULT => vec![Arg::Reg, Arg::Mem],
            MOVER => vec![Arg::Reg, Arg::Mem],
            MOVEM => vec![Arg::Reg, Arg::Mem],
            COMP => vec![Arg::Reg, Arg::Mem],
            BC => vec![Arg::Cond, Arg::Mem],
            DIV => vec![Arg::Reg, Arg::Mem],
            READ => vec![Arg::Mem],
            PRINT => vec![Arg::Mem],
        }
    }
}

// ----------------------------------------------------------------------------
// Assembler directives (AD)

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    TryFromPrimitive,
    IntoPrimitive,
    EnumString,
    Display,
)]
#[repr(u8)]
pub enum Directive {
    START = 1,
    END,
    ORIGIN,
    EQU,
    LTORG,
}

// ----------------------------------------------------------------------------
// Declarative statements (DL)

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    TryFromPrimitive,
    IntoPrimitive,
    EnumString,
    Display,
)]
#[repr(u8)]
pub enum Declarative {
    DC = 1,
    DS,
}

// ----------------------------------------------------------------------------
// Any mnemonic

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Class {
    IS,
    AD,
    DL,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpKind {
    Is(Mnemonic),
    Ad(Directive),
    Dl(Declarative),
}

impl OpKind {
    pub fn parse(s: &str) -> Result<Self, String> {
        let upper = s.to_ascii_uppercase();
        if let Ok(m) = upper.parse::<Mnemonic>() {
            return Ok(OpKind::Is(m));
        }
        if let Ok(d) = upper.parse::<Directive>() {
            return Ok(OpKind::Ad(d));
        }
        if let Ok(d) = upper.parse::<Declarative>() {
            return Ok(OpKind::Dl(d));
        }
        Err(format!("Undefined Op: {s}"))
    }

    pub fn class(&self) -> Class {
        match self {
            OpKind::Is(_) => Class::IS,
            OpKind::Ad(_) => Class::AD,
            OpKind::Dl(_) => Class::DL,
        }
    }

    pub fn code(&self) -> u8 {
        match *self {
            OpKind::Is(m) => m.into(),
            OpKind::Ad(d) => d.into(),
            OpKind::Dl(d) => d.into(),
        }
    }
}

impl From<Mnemonic> for OpKind {
    fn from(m: Mnemonic) -> Self {
        OpKind::Is(m)
    }
}

impl From<Directive> for OpKind {
    fn from(d: Directive) -> Self {
        OpKind::Ad(d)
    }
}

impl From<Declarative> for OpKind {
    fn from(d: Declarative) -> Self {
        OpKind::Dl(d)
    }
}

/// Intermediate code notation, e.g. `(IS,04)`.
impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{:02})", self.class(), self.code())
    }
}

#[test]
fn test() {
    assert_eq!(OpKind::parse("mover"), Ok(OpKind::Is(Mnemonic::MOVER)));
    assert_eq!(OpKind::parse("LTORG"), Ok(OpKind::Ad(Directive::LTORG)));
    assert_eq!(OpKind::parse("ds"), Ok(OpKind::Dl(Declarative::DS)));
    assert!(OpKind::parse("hoge").is_err());
    assert!(OpKind::parse("AREG").is_err());

    assert_eq!(OpKind::from(Mnemonic::PRINT).code(), 10);
    assert_eq!(OpKind::from(Mnemonic::STOP).to_string(), "(IS,00)");
    assert_eq!(OpKind::from(Directive::EQU).to_string(), "(AD,04)");
    assert_eq!(OpKind::from(Declarative::DS).to_string(), "(DL,02)");
    assert_eq!(Mnemonic::BC.arg_field(), vec![Arg::Cond, Arg::Mem]);
    assert_eq!(Arg::Mem.to_string(), "memory operand");
}
