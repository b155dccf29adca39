//! Test fixtures for common shell scenarios
//!
//! Provides a small Brocade lab switch and reusable scripted scenarios

use fakeswitch_config::{
    ConfigResult, EntityFactory, SharedConfiguration, SwitchConfiguration, SwitchDefinition,
};
use fakeswitch_shell::{Session, ShellSettings};
use fakeswitch_types::VlanId;

use crate::verification::{SessionVerifier, VerifyResult};

/// Hostname of the fixture switch
pub const SWITCH_NAME: &str = "my_switch";

/// YAML definition of the fixture switch
///
/// Four front-panel ports and two routed VLANs (1000 and 2000) with their
/// virtual interfaces.
pub const BROCADE_SWITCH_YAML: &str = r#"
name: my_switch
ip: 127.0.0.1
privileged_passwords: [Br0cad3]
ports:
  - name: ethernet 1/1
  - name: ethernet 1/2
  - name: ethernet 1/3
  - name: ethernet 1/4
  - name: ve 1000
    kind: virtual_interface
    vlan_id: 1000
  - name: ve 2000
    kind: virtual_interface
    vlan_id: 2000
vlans:
  - number: 1000
  - number: 2000
"#;

/// Fixture switch built with the given constructors
pub fn brocade_switch_with(factory: EntityFactory) -> ConfigResult<SwitchConfiguration> {
    let mut config =
        SwitchDefinition::from_yaml_str(BROCADE_SWITCH_YAML)?.into_configuration(factory)?;
    for (number, port) in [(1000, "ve 1000"), (2000, "ve 2000")] {
        if let Some(vlan) = config.get_vlan_mut(VlanId::new(number)?) {
            vlan.router_interface = Some(port.to_string());
        }
    }
    Ok(config)
}

/// Fixture switch with default constructors
pub fn brocade_switch() -> ConfigResult<SwitchConfiguration> {
    brocade_switch_with(EntityFactory::default())
}

pub fn shared_brocade_switch() -> ConfigResult<SharedConfiguration> {
    Ok(SharedConfiguration::new(brocade_switch()?))
}

/// New session on `config` with default settings
pub fn session(config: &SharedConfiguration) -> Session {
    Session::new(config.clone(), ShellSettings::default())
}

/// New session already moved through `lines`, each of which must be silent
pub fn session_in(config: &SharedConfiguration, lines: &[&str]) -> VerifyResult<Session> {
    let mut session = session(config);
    SessionVerifier::new(&mut session).assert_all_silent(lines)?;
    Ok(session)
}

/// One line of a scenario and the output it must produce
#[derive(Debug, Clone)]
pub struct Step {
    pub line: String,
    pub expected: Vec<String>,
}

/// Test scenario builder for multi-line shell exchanges
#[derive(Debug, Clone)]
pub struct TestScenario {
    /// Scenario name
    pub name: String,
    pub steps: Vec<Step>,
}

impl TestScenario {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// A line that prints nothing
    pub fn line(self, line: impl Into<String>) -> Self {
        self.line_expecting(line, &[])
    }

    /// A line and the exact output it prints
    pub fn line_expecting(mut self, line: impl Into<String>, expected: &[&str]) -> Self {
        self.steps.push(Step {
            line: line.into(),
            expected: expected.iter().map(|s| s.to_string()).collect(),
        });
        self
    }

    /// Play every step against `session`, stopping at the first mismatch
    pub fn run(&self, session: &mut Session) -> VerifyResult<()> {
        tracing::info!("Running scenario {}", self.name);
        let mut verifier = SessionVerifier::new(session);
        for step in &self.steps {
            let expected: Vec<&str> = step.expected.iter().map(String::as_str).collect();
            verifier.assert_output(&step.line, &expected)?;
        }
        Ok(())
    }
}
