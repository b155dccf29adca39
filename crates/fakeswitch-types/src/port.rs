//! Port role and port-name helpers.

use crate::ParseError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Layer 2/3 role of a switch port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortMode {
    /// Untagged member of a single VLAN.
    Access,
    /// Tagged member of several VLANs.
    Trunk,
    /// Layer 3 interface.
    Routed,
}

impl fmt::Display for PortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PortMode::Access => "access",
            PortMode::Trunk => "trunk",
            PortMode::Routed => "routed",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for PortMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "access" => Ok(PortMode::Access),
            "trunk" => Ok(PortMode::Trunk),
            "routed" => Ok(PortMode::Routed),
            _ => Err(ParseError::InvalidPortMode(s.to_string())),
        }
    }
}

static FIRST_DIGIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d").expect("Invalid regex pattern"));

/// Splits a port name at its first digit.
///
/// Returns `None` when the name carries no digit at all.
///
/// ```
/// use fakeswitch_types::split_port_name;
///
/// assert_eq!(split_port_name("gi0/3"), Some(("gi", "0/3")));
/// assert_eq!(split_port_name("ethernet 1/1"), Some(("ethernet ", "1/1")));
/// assert_eq!(split_port_name("mgmt"), None);
/// ```
pub fn split_port_name(name: &str) -> Option<(&str, &str)> {
    let start = FIRST_DIGIT_RE.find(name)?.start();
    Some(name.split_at(start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_port_name() {
        assert_eq!(
            split_port_name("GigabitEthernet0/3"),
            Some(("GigabitEthernet", "0/3"))
        );
        assert_eq!(split_port_name("ve 100"), Some(("ve ", "100")));
        assert_eq!(split_port_name("1/1"), Some(("", "1/1")));
        assert_eq!(split_port_name(""), None);
    }

    #[test]
    fn test_port_mode_parse() {
        assert_eq!("TRUNK".parse::<PortMode>().unwrap(), PortMode::Trunk);
        assert_eq!(PortMode::Routed.to_string(), "routed");
        assert!("hybrid".parse::<PortMode>().is_err());
    }
}
