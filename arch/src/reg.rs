use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

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
pub enum Reg {
    AREG = 1,
    BREG,
    CREG,
    DREG,
}

impl Reg {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_ascii_uppercase().parse::<Self>() {
            Ok(a) => Ok(a),
            Err(_) => Err(format!("Unknown reg name: {s}")),
        }
    }

    pub fn code(self) -> u8 {
        self.into()
    }
}

#[test]
fn test() {
    assert_eq!(Reg::parse("areg"), Ok(Reg::AREG));
    assert_eq!(Reg::parse("DREG").map(Reg::code), Ok(4));
    assert!(Reg::parse("hoge").is_err());
    assert_eq!(Reg::try_from(2).ok(), Some(Reg::BREG));
    assert_eq!(Reg::CREG.to_string(), "CREG");
}
