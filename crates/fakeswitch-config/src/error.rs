//! Error types for configuration model operations.
//!
//! All errors implement `std::error::Error` via `thiserror`.

use fakeswitch_types::{IpAddr, ParseError, VlanId, VrId};
use thiserror::Error;

/// Result type alias for configuration model operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised when a mutation would break a model invariant.
///
/// A failed mutation leaves the model untouched.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A port with the same name is already present.
    #[error("Port '{name}' already exists")]
    DuplicatePort {
        /// The port name.
        name: String,
    },

    /// A VLAN with the same number is already present.
    #[error("VLAN {number} already exists")]
    DuplicateVlan {
        /// The VLAN number.
        number: VlanId,
    },

    /// Port lookup failed.
    #[error("Port '{name}' not found")]
    PortNotFound {
        /// The port name.
        name: String,
    },

    /// VLAN lookup failed.
    #[error("VLAN {number} not found")]
    VlanNotFound {
        /// The VLAN number.
        number: VlanId,
    },

    /// VRF lookup failed.
    #[error("VRF '{name}' not found")]
    VrfNotFound {
        /// The VRF name.
        name: String,
    },

    /// The operation needs a virtual (VLAN) interface.
    #[error("Port '{name}' is not a virtual interface")]
    NotAVirtualInterface {
        /// The port name.
        name: String,
    },

    /// VRRP group lookup failed.
    #[error("VRRP group {group} not found on port '{port}'")]
    VrrpGroupNotFound {
        /// The virtual interface name.
        port: String,
        /// The group id.
        group: VrId,
    },

    /// The exact address is already configured on the port.
    #[error("Address {ip} is already configured")]
    DuplicateIp {
        /// The duplicated address.
        ip: IpAddr,
    },

    /// The address falls into a subnet owned by another port.
    #[error("Address {ip} overlaps a subnet of port '{owner}'")]
    SubnetOverlap {
        /// The rejected address.
        ip: IpAddr,
        /// The port owning the subnet.
        owner: String,
    },

    /// A second primary address was requested in an existing subnet.
    #[error("Address {ip} would be a second primary address in its subnet")]
    OnePrimaryPerSubnet {
        /// The rejected address.
        ip: IpAddr,
    },

    /// A secondary address was requested in a subnet without a primary.
    #[error("Secondary address {ip} has no primary address in its subnet")]
    SecondaryWithoutPrimary {
        /// The rejected address.
        ip: IpAddr,
    },

    /// A primary address still has secondaries in its subnet.
    #[error("Primary address {ip} still has secondary addresses in its subnet")]
    SecondaryBeforePrimary {
        /// The primary address that could not be removed.
        ip: IpAddr,
    },

    /// A switch definition could not be turned into a configuration.
    #[error("Invalid switch definition for {field}: {message}")]
    InvalidDefinition {
        /// The offending field.
        field: String,
        /// Error message.
        message: String,
    },

    /// A value could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A YAML switch definition could not be read.
    #[error("Invalid YAML switch definition: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ConfigError {
    /// Creates a port not found error.
    pub fn port_not_found(name: impl Into<String>) -> Self {
        Self::PortNotFound { name: name.into() }
    }

    /// Creates an invalid definition error.
    pub fn invalid_definition(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true if the error comes from IP address assignment rules.
    pub fn is_address_conflict(&self) -> bool {
        matches!(
            self,
            ConfigError::DuplicateIp { .. }
                | ConfigError::SubnetOverlap { .. }
                | ConfigError::OnePrimaryPerSubnet { .. }
                | ConfigError::SecondaryWithoutPrimary { .. }
                | ConfigError::SecondaryBeforePrimary { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::port_not_found("ethernet 1/1");
        assert_eq!(err.to_string(), "Port 'ethernet 1/1' not found");
    }

    #[test]
    fn test_overlap_display() {
        let err = ConfigError::SubnetOverlap {
            ip: "10.0.0.1".parse().unwrap(),
            owner: "ve 100".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Address 10.0.0.1 overlaps a subnet of port 've 100'"
        );
    }

    #[test]
    fn test_is_address_conflict() {
        let ip: IpAddr = "10.0.0.1".parse().unwrap();
        assert!(ConfigError::DuplicateIp { ip }.is_address_conflict());
        assert!(ConfigError::SecondaryBeforePrimary { ip }.is_address_conflict());
        assert!(!ConfigError::port_not_found("x").is_address_conflict());
    }
}
