//! Interface address type with subnet arithmetic.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// An address assigned to an interface, written in CIDR notation.
///
/// Unlike a route prefix, the host bits are kept: `10.0.0.5/24` is the
/// address `10.0.0.5` living in the subnet `10.0.0.0/24`.
///
/// # Examples
///
/// ```
/// use fakeswitch_types::IpNetwork;
///
/// let net: IpNetwork = "10.0.0.5/24".parse().unwrap();
/// assert_eq!(net.ip().to_string(), "10.0.0.5");
/// assert_eq!(net.network().to_string(), "10.0.0.0");
/// assert!(net.contains(&"10.0.0.200".parse().unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IpNetwork {
    ip: IpAddr,
    prefix_len: u8,
}

impl IpNetwork {
    /// Creates a new interface network.
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix length is invalid for the address family
    /// (>32 for IPv4, >128 for IPv6).
    pub fn new(ip: IpAddr, prefix_len: u8) -> Result<Self, ParseError> {
        let max_len = match ip {
            IpAddr::V4(_) => 32,
            IpAddr::V6(_) => 128,
        };

        if prefix_len > max_len {
            return Err(ParseError::InvalidIpNetwork(format!(
                "prefix length {} exceeds maximum {} for address type",
                prefix_len, max_len
            )));
        }

        Ok(IpNetwork { ip, prefix_len })
    }

    /// Returns the configured address, host bits included.
    pub const fn ip(&self) -> IpAddr {
        self.ip
    }

    /// Returns the prefix length in bits.
    pub const fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    pub const fn is_ipv4(&self) -> bool {
        self.ip.is_ipv4()
    }

    /// Returns the subnet address (host bits cleared).
    pub fn network(&self) -> IpAddr {
        match self.ip {
            IpAddr::V4(v4) => {
                IpAddr::V4(Ipv4Addr::from(u32::from(v4) & v4_mask(self.prefix_len)))
            }
            IpAddr::V6(v6) => {
                IpAddr::V6(Ipv6Addr::from(u128::from(v6) & v6_mask(self.prefix_len)))
            }
        }
    }

    /// Returns true if `addr` lies inside this subnet.
    ///
    /// Addresses of the other family are never contained.
    pub fn contains(&self, addr: &IpAddr) -> bool {
        match (self.ip, addr) {
            (IpAddr::V4(own), IpAddr::V4(other)) => {
                let mask = v4_mask(self.prefix_len);
                u32::from(own) & mask == u32::from(*other) & mask
            }
            (IpAddr::V6(own), IpAddr::V6(other)) => {
                let mask = v6_mask(self.prefix_len);
                u128::from(own) & mask == u128::from(*other) & mask
            }
            _ => false,
        }
    }

    /// Returns true if both networks carry exactly the same address.
    pub fn same_ip(&self, other: &IpNetwork) -> bool {
        self.ip == other.ip
    }
}

fn v4_mask(prefix_len: u8) -> u32 {
    if prefix_len == 0 {
        0
    } else {
        u32::MAX << (32 - u32::from(prefix_len))
    }
}

fn v6_mask(prefix_len: u8) -> u128 {
    if prefix_len == 0 {
        0
    } else {
        u128::MAX << (128 - u32::from(prefix_len))
    }
}

impl fmt::Display for IpNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.ip, self.prefix_len)
    }
}

impl FromStr for IpNetwork {
    type Err = ParseError;

    /// Parses `addr/len`; a bare address is taken as a host network.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr_str, len_str) = match s.rsplit_once('/') {
            Some((addr, len)) => (addr, Some(len)),
            None => (s, None),
        };

        let ip: IpAddr = addr_str
            .parse()
            .map_err(|_| ParseError::InvalidIpAddress(addr_str.to_string()))?;

        let prefix_len = match len_str {
            Some(len) => len
                .parse::<u8>()
                .map_err(|_| ParseError::InvalidIpNetwork(s.to_string()))?,
            None if ip.is_ipv4() => 32,
            None => 128,
        };

        IpNetwork::new(ip, prefix_len)
    }
}

impl TryFrom<String> for IpNetwork {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<IpNetwork> for String {
    fn from(net: IpNetwork) -> String {
        net.to_string()
    }
}
