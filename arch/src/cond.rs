use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Condition codes accepted by `BC`.
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
pub enum Cond {
    LT = 1,
    LE,
    EQ,
    GT,
    GE,
    ANY,
}

impl Cond {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_ascii_uppercase().parse::<Self>() {
            Ok(a) => Ok(a),
            Err(_) => Err(format!("Unknown condition: {s}")),
        }
    }

    pub fn code(self) -> u8 {
        self.into()
    }
}

#[test]
fn test() {
    assert_eq!(Cond::parse("lt").map(Cond::code), Ok(1));
    assert_eq!(Cond::parse("ANY").map(Cond::code), Ok(6));
    assert!(Cond::parse("AREG").is_err());
}
