//! Declarative switch definitions
//!
//! Loads a switch layout (name, management address, ports, VLANs, VRFs) from
//! YAML and turns it into a [`SwitchConfiguration`]. Meant for harnesses that
//! start emulated switches; nothing is ever written back.
//!
//! ```yaml
//! name: my_switch
//! ip: 127.0.0.1
//! privileged_passwords: [Br0cad3]
//! ports:
//!   - name: ethernet 1/1
//!   - name: ethernet 1/2
//!     link_name: server1
//!     aggregation_membership: lag1
//!   - name: lag1
//!     kind: aggregated
//!   - name: ve 100
//!     kind: virtual_interface
//!     vlan_id: 100
//! vlans:
//!   - number: 100
//!     name: servers
//! vrfs: [CUST]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use fakeswitch_types::VlanId;

use crate::error::{ConfigError, ConfigResult};
use crate::factory::EntityFactory;
use crate::switch::SwitchConfiguration;

/// Kind of port to create
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortKindDefinition {
    #[default]
    Physical,
    VirtualInterface,
    Aggregated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortDefinition {
    pub name: String,

    #[serde(default)]
    pub kind: PortKindDefinition,

    /// Required for virtual interfaces
    #[serde(default)]
    pub vlan_id: Option<VlanId>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub link_name: Option<String>,

    #[serde(default)]
    pub aggregation_membership: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanDefinition {
    pub number: VlanId,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

/// A whole switch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchDefinition {
    pub name: String,

    #[serde(default = "default_ip")]
    pub ip: String,

    #[serde(default)]
    pub privileged_passwords: Vec<String>,

    #[serde(default)]
    pub auto_enabled: bool,

    #[serde(default)]
    pub ports: Vec<PortDefinition>,

    #[serde(default)]
    pub vlans: Vec<VlanDefinition>,

    #[serde(default)]
    pub vrfs: Vec<String>,
}

fn default_ip() -> String {
    "127.0.0.1".to_string()
}

impl SwitchDefinition {
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load a definition from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::invalid_definition(path.display().to_string(), e.to_string())
        })?;
        Self::from_yaml_str(&content)
    }

    /// Check cross references before anything is built
    pub fn validate(&self) -> ConfigResult<()> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::invalid_definition("name", "must not be empty"));
        }

        for port in &self.ports {
            match (port.kind, port.vlan_id) {
                (PortKindDefinition::VirtualInterface, None) => {
                    return Err(ConfigError::invalid_definition(
                        format!("ports.{}", port.name),
                        "virtual interface requires a vlan_id",
                    ));
                }
                (PortKindDefinition::Physical | PortKindDefinition::Aggregated, Some(_)) => {
                    return Err(ConfigError::invalid_definition(
                        format!("ports.{}", port.name),
                        "vlan_id is only valid on virtual interfaces",
                    ));
                }
                _ => {}
            }

            if let Some(bundle) = &port.aggregation_membership {
                let known = self.ports.iter().any(|other| {
                    &other.name == bundle && other.kind == PortKindDefinition::Aggregated
                });
                if !known {
                    return Err(ConfigError::invalid_definition(
                        format!("ports.{}", port.name),
                        format!("unknown aggregated port '{}'", bundle),
                    ));
                }
            }
        }

        Ok(())
    }

    /// Build the configuration, creating every entity through `factory`
    pub fn into_configuration(self, factory: EntityFactory) -> ConfigResult<SwitchConfiguration> {
        self.validate()?;

        let mut config = SwitchConfiguration::builder(self.ip, self.name)
            .privileged_passwords(self.privileged_passwords)
            .auto_enabled(self.auto_enabled)
            .objects_overrides(factory)
            .build()?;

        for definition in self.ports {
            let mut port = match (definition.kind, definition.vlan_id) {
                (PortKindDefinition::VirtualInterface, Some(vlan_id)) => {
                    config.new_vlan_port(vlan_id, &definition.name)
                }
                (PortKindDefinition::Aggregated, _) => {
                    config.new_aggregated_port(&definition.name)
                }
                _ => config.new_port(&definition.name),
            };
            port.description = definition.description;
            port.link_name = definition.link_name;
            port.aggregation_membership = definition.aggregation_membership;
            config.add_port(port)?;
        }

        for definition in self.vlans {
            let mut vlan = config.new_vlan(definition.number);
            vlan.name = definition.name;
            vlan.description = definition.description;
            config.add_vlan(vlan)?;
        }

        for name in &self.vrfs {
            let vrf = config.new_vrf(name);
            config.add_vrf(vrf);
        }

        info!(
            "Loaded switch {} with {} ports, {} VLANs",
            config.name,
            config.ports().len(),
            config.vlans().len()
        );
        Ok(config)
    }
}
