//! Shell behaviour settings

use serde::{Deserialize, Serialize};

use fakeswitch_config::ConfigResult;

/// What to do with a line that names no known command or keyword
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownCommandPolicy {
    /// Print `Invalid input -> ...` like the device
    #[default]
    Report,
    /// Print nothing
    Silent,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellSettings {
    #[serde(default)]
    pub unknown_command: UnknownCommandPolicy,
}

impl ShellSettings {
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn with_unknown_command(mut self, policy: UnknownCommandPolicy) -> Self {
        self.unknown_command = policy;
        self
    }
}
