//! VRRP virtual router identifier.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// VRRP group id (1-255).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct VrId(u8);

impl VrId {
    pub fn new(id: u8) -> Result<Self, ParseError> {
        if id == 0 {
            Err(ParseError::InvalidVrId(id.to_string()))
        } else {
            Ok(VrId(id))
        }
    }

    pub const fn as_u8(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for VrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VrId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id: u8 = s
            .parse()
            .map_err(|_| ParseError::InvalidVrId(s.to_string()))?;
        VrId::new(id)
    }
}

impl TryFrom<u8> for VrId {
    type Error = ParseError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        VrId::new(id)
    }
}

impl From<VrId> for u8 {
    fn from(id: VrId) -> u8 {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vrid_bounds() {
        assert!("1".parse::<VrId>().is_ok());
        assert!("255".parse::<VrId>().is_ok());
        assert!("0".parse::<VrId>().is_err());
        assert!("256".parse::<VrId>().is_err());
        assert!("one".parse::<VrId>().is_err());
    }
}
