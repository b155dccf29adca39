//! Network primitives shared by the switch configuration model and the shell.
//!
//! - [`IpNetwork`]: an interface address together with its prefix length
//!   (`10.0.0.1/24`), with subnet containment checks
//! - [`VlanId`]: IEEE 802.1Q VLAN identifiers
//! - [`VrId`]: VRRP virtual router identifiers
//! - [`PortMode`] and [`split_port_name`]: switchport roles and the
//!   alphabetic/numeric split used for abbreviated interface names

mod ip;
mod port;
mod vlan;
mod vrrp;

pub use ip::IpNetwork;
pub use port::{split_port_name, PortMode};
pub use vlan::VlanId;
pub use vrrp::VrId;

pub use std::net::IpAddr;

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid IP address format: {0}")]
    InvalidIpAddress(String),

    #[error("invalid IP network format: {0}")]
    InvalidIpNetwork(String),

    #[error("invalid VLAN ID: {0} (must be 1-4094)")]
    InvalidVlanId(String),

    #[error("invalid VRRP group id: {0} (must be 1-255)")]
    InvalidVrId(String),

    #[error("invalid port mode: {0}")]
    InvalidPortMode(String),

    #[error("unknown entity kind: {0}")]
    InvalidEntityKind(String),
}
