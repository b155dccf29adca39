//! Shell modes and their prompts

use std::fmt;

use fakeswitch_config::SwitchConfiguration;
use fakeswitch_types::{VlanId, VrId};

/// A configuration mode together with the entity it edits
///
/// Entities are referenced by key; the configuration itself lives behind
/// the shared lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    PrivilegedExec,
    GlobalConfig,
    VlanConfig { vlan: VlanId },
    InterfaceConfig { port: String },
    VirtualInterfaceConfig { port: String },
    VrrpConfig { port: String, group: VrId },
}

/// Mode without its payload, used to pick a command table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeKind {
    PrivilegedExec,
    GlobalConfig,
    VlanConfig,
    InterfaceConfig,
    VirtualInterfaceConfig,
    VrrpConfig,
}

impl ModeKind {
    pub const ALL: [ModeKind; 6] = [
        ModeKind::PrivilegedExec,
        ModeKind::GlobalConfig,
        ModeKind::VlanConfig,
        ModeKind::InterfaceConfig,
        ModeKind::VirtualInterfaceConfig,
        ModeKind::VrrpConfig,
    ];
}

impl Mode {
    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::PrivilegedExec => ModeKind::PrivilegedExec,
            Mode::GlobalConfig => ModeKind::GlobalConfig,
            Mode::VlanConfig { .. } => ModeKind::VlanConfig,
            Mode::InterfaceConfig { .. } => ModeKind::InterfaceConfig,
            Mode::VirtualInterfaceConfig { .. } => ModeKind::VirtualInterfaceConfig,
            Mode::VrrpConfig { .. } => ModeKind::VrrpConfig,
        }
    }

    /// Name of the port edited by this mode, if any
    pub fn port_name(&self) -> Option<&str> {
        match self {
            Mode::InterfaceConfig { port }
            | Mode::VirtualInterfaceConfig { port }
            | Mode::VrrpConfig { port, .. } => Some(port),
            _ => None,
        }
    }

    /// Prompt shown while this mode is active
    pub fn prompt(&self, config: &SwitchConfiguration) -> String {
        let name = &config.name;
        match self {
            Mode::PrivilegedExec => format!("SSH@{}#", name),
            Mode::GlobalConfig => format!("SSH@{}(config)#", name),
            Mode::VlanConfig { vlan } => format!("SSH@{}(config-vlan-{})#", name, vlan),
            Mode::InterfaceConfig { port } => {
                let number = config
                    .get_port(port)
                    .and_then(|p| p.number())
                    .unwrap_or(port.as_str());
                format!("SSH@{}(config-if-e1000-{})#", name, number)
            }
            Mode::VirtualInterfaceConfig { port } => {
                format!("SSH@{}(config-vif-{})#", name, vif_label(config, port))
            }
            Mode::VrrpConfig { port, group } => format!(
                "SSH@{}(config-vif-{}-vrid-{})#",
                name,
                vif_label(config, port),
                group
            ),
        }
    }
}

// VLAN id of the interface, or its name when it has gone away.
fn vif_label(config: &SwitchConfiguration, port: &str) -> String {
    config
        .get_port(port)
        .and_then(|p| p.as_virtual_interface())
        .map(|vif| vif.vlan_id.to_string())
        .unwrap_or_else(|| port.to_string())
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::PrivilegedExec => write!(f, "exec"),
            Mode::GlobalConfig => write!(f, "config"),
            Mode::VlanConfig { vlan } => write!(f, "config-vlan-{}", vlan),
            Mode::InterfaceConfig { port } => write!(f, "config-if[{}]", port),
            Mode::VirtualInterfaceConfig { port } => write!(f, "config-vif[{}]", port),
            Mode::VrrpConfig { port, group } => write!(f, "config-vif[{}]-vrid-{}", port, group),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config() -> SwitchConfiguration {
        let mut config = SwitchConfiguration::builder("127.0.0.1", "my_switch")
            .ports(["ethernet 1/3"])
            .build()
            .unwrap();
        let ve = config.new_vlan_port(VlanId::new(1000).unwrap(), "ve 1000");
        config.add_port(ve).unwrap();
        config
    }

    #[test]
    fn test_prompts() {
        let config = config();
        let cases = [
            (Mode::PrivilegedExec, "SSH@my_switch#"),
            (Mode::GlobalConfig, "SSH@my_switch(config)#"),
            (
                Mode::VlanConfig {
                    vlan: VlanId::new(123).unwrap(),
                },
                "SSH@my_switch(config-vlan-123)#",
            ),
            (
                Mode::InterfaceConfig {
                    port: "ethernet 1/3".to_string(),
                },
                "SSH@my_switch(config-if-e1000-1/3)#",
            ),
            (
                Mode::VirtualInterfaceConfig {
                    port: "ve 1000".to_string(),
                },
                "SSH@my_switch(config-vif-1000)#",
            ),
            (
                Mode::VrrpConfig {
                    port: "ve 1000".to_string(),
                    group: VrId::new(1).unwrap(),
                },
                "SSH@my_switch(config-vif-1000-vrid-1)#",
            ),
        ];

        for (mode, prompt) in cases {
            assert_eq!(mode.prompt(&config), prompt);
        }
    }

    #[test]
    fn test_kind_and_port() {
        let mode = Mode::VrrpConfig {
            port: "ve 5".to_string(),
            group: VrId::new(2).unwrap(),
        };
        assert_eq!(mode.kind(), ModeKind::VrrpConfig);
        assert_eq!(mode.port_name(), Some("ve 5"));
        assert_eq!(Mode::GlobalConfig.port_name(), None);
    }
}
