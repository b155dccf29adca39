//! Error types for command processing.
//!
//! Every variant renders as the exact text the emulated device prints.
//! Multi-line messages are written one line at a time by the session.

use fakeswitch_config::ConfigError;
use fakeswitch_types::ParseError;
use thiserror::Error;

/// Result type alias for command handlers.
pub type CommandResult<T> = Result<T, CommandError>;

/// A command that was refused by the shell.
///
/// Processing stops at the first error; the configuration is left as it was
/// before the command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("IP/Port: Errno(6) Duplicate ip address")]
    DuplicateIp,

    #[error("IP/Port: Errno(7) Primary address must be configured before secondary address")]
    SecondaryWithoutPrimary,

    #[error("IP/Port: Errno(11) ip subnet overlap with another interface")]
    SubnetOverlap,

    #[error("IP/Port: Errno(15) Can only assign one primary ip address per subnet")]
    OnePrimaryPerSubnet,

    #[error("IP/Port: Errno(18) Delete secondary address before deleting primary address")]
    SecondaryBeforePrimary,

    #[error("Error: Wrong Access List Name {name}")]
    WrongAccessList { name: String },

    #[error("Incomplete command.")]
    Incomplete,

    /// Unresolvable token; `rest` is the line from that token on.
    #[error("Invalid input -> {rest}\nType ? for a list")]
    InvalidInput { rest: String },

    #[error("Error - VRF({name}) does not exist or Route-Distinguisher not specified or Address Family not configured")]
    UnknownVrf { name: String },

    #[error("Error - invalid interface {text}")]
    InvalidInterface { text: String },

    #[error("Error - invalid virtual ethernet interface number.")]
    InvalidVirtualInterface,

    #[error("Error: vlan id {id} is outside of allowed max of 4094")]
    VlanOutOfRange { id: String },

    /// Model failure with no dedicated device message.
    #[error("Error - {0}")]
    Model(ConfigError),
}

impl CommandError {
    /// Invalid input starting at the given tokens.
    pub fn invalid_input<S: AsRef<str>>(tokens: &[S]) -> Self {
        let rest = tokens
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ");
        Self::InvalidInput { rest }
    }

    /// Returns true for errors raised by unresolvable input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, CommandError::InvalidInput { .. })
    }
}

impl From<ConfigError> for CommandError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::DuplicateIp { .. } => CommandError::DuplicateIp,
            ConfigError::SubnetOverlap { .. } => CommandError::SubnetOverlap,
            ConfigError::OnePrimaryPerSubnet { .. } => CommandError::OnePrimaryPerSubnet,
            ConfigError::SecondaryWithoutPrimary { .. } => CommandError::SecondaryWithoutPrimary,
            ConfigError::SecondaryBeforePrimary { .. } => CommandError::SecondaryBeforePrimary,
            ConfigError::VrfNotFound { name } => CommandError::UnknownVrf { name },
            ConfigError::PortNotFound { name } => CommandError::InvalidInterface { text: name },
            ConfigError::Parse(err) => err.into(),
            other => CommandError::Model(other),
        }
    }
}

impl From<ParseError> for CommandError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::InvalidVlanId(id) => CommandError::VlanOutOfRange { id },
            ParseError::InvalidIpAddress(rest)
            | ParseError::InvalidIpNetwork(rest)
            | ParseError::InvalidVrId(rest)
            | ParseError::InvalidPortMode(rest)
            | ParseError::InvalidEntityKind(rest) => CommandError::InvalidInput { rest },
        }
    }
}
