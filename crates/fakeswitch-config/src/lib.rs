//! In-memory configuration model of an emulated switch.
//!
//! - [`SwitchConfiguration`]: root aggregate owning ports, VLANs and VRFs,
//!   with the lookups and mutations the command shell relies on
//! - [`Port`] and [`PortKind`]: ports, virtual (VLAN) interfaces and
//!   aggregated bundles
//! - [`EntityFactory`]: overridable constructors for every entity kind
//! - [`SharedConfiguration`]: lock-protected handle shared between sessions
//! - [`SwitchDefinition`]: YAML description of a switch
//!
//! # Address rules
//!
//! Virtual interfaces hold primary and secondary addresses. The model keeps
//! at most one primary per subnet, refuses a secondary until the subnet has a
//! primary, refuses a subnet already owned by another interface, and keeps a
//! primary until every secondary of its subnet is gone. See
//! [`SwitchConfiguration::assign_ip`] and [`SwitchConfiguration::unassign_ip`].
//!
//! # Example
//!
//! ```
//! use fakeswitch_config::SwitchConfiguration;
//! use fakeswitch_types::VlanId;
//!
//! let mut config = SwitchConfiguration::builder("127.0.0.1", "my_switch")
//!     .ports(["ethernet 1/1", "ethernet 1/2"])
//!     .build()
//!     .unwrap();
//!
//! let ve = config.new_vlan_port(VlanId::new(100).unwrap(), "ve 100");
//! config.add_port(ve).unwrap();
//! config
//!     .assign_ip("ve 100", "10.0.0.1/24".parse().unwrap(), false)
//!     .unwrap();
//!
//! let (port, _) = config
//!     .get_port_and_ip_by_ip(&"10.0.0.42".parse().unwrap())
//!     .unwrap();
//! assert_eq!(port.name, "ve 100");
//! ```

pub mod definition;
pub mod error;
pub mod factory;
pub mod port;
pub mod shared;
pub mod switch;
pub mod types;

pub use definition::{PortDefinition, PortKindDefinition, SwitchDefinition, VlanDefinition};
pub use error::{ConfigError, ConfigResult};
pub use factory::{EntityFactory, EntityKind};
pub use port::{Aggregation, Port, PortKind, VirtualInterface};
pub use shared::SharedConfiguration;
pub use switch::{SwitchConfiguration, SwitchConfigurationBuilder};
pub use types::{Vlan, Vrf, Vrrp, DEFAULT_VRF_NAME};
