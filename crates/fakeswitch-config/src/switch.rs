//! SwitchConfiguration - root aggregate of the emulated switch state

use tracing::{debug, info, instrument};

use fakeswitch_types::{split_port_name, IpAddr, IpNetwork, VlanId, VrId};

use crate::error::{ConfigError, ConfigResult};
use crate::factory::EntityFactory;
use crate::port::{Port, VirtualInterface};
use crate::types::{Vlan, Vrf, Vrrp, DEFAULT_VRF_NAME};

/// In-memory state of one switch
///
/// Collections keep insertion order. Port names and VLAN numbers are unique;
/// every mutation that would break this is rejected and leaves the state
/// untouched.
#[derive(Debug, Clone)]
pub struct SwitchConfiguration {
    /// Management address
    pub ip: String,
    /// Hostname shown in prompts
    pub name: String,
    pub privileged_passwords: Vec<String>,
    /// Sessions start in privileged mode without asking for a password
    pub auto_enabled: bool,
    pub locked: bool,
    vlans: Vec<Vlan>,
    ports: Vec<Port>,
    vrfs: Vec<Vrf>,
    factory: EntityFactory,
}

/// Builder for [`SwitchConfiguration`]
#[derive(Debug)]
pub struct SwitchConfigurationBuilder {
    ip: String,
    name: String,
    privileged_passwords: Vec<String>,
    auto_enabled: bool,
    ports: Vec<String>,
    factory: EntityFactory,
}

impl SwitchConfigurationBuilder {
    pub fn privileged_passwords(mut self, passwords: Vec<String>) -> Self {
        self.privileged_passwords = passwords;
        self
    }

    pub fn auto_enabled(mut self, auto_enabled: bool) -> Self {
        self.auto_enabled = auto_enabled;
        self
    }

    /// Physical ports created through the factory at build time
    pub fn ports<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ports = names.into_iter().map(Into::into).collect();
        self
    }

    /// Replace entity constructors
    pub fn objects_overrides(mut self, factory: EntityFactory) -> Self {
        self.factory = factory;
        self
    }

    /// Build the configuration
    ///
    /// Fails if the same physical port name was given twice.
    pub fn build(self) -> ConfigResult<SwitchConfiguration> {
        let mut config = SwitchConfiguration {
            ip: self.ip,
            name: self.name,
            privileged_passwords: self.privileged_passwords,
            auto_enabled: self.auto_enabled,
            locked: false,
            vlans: Vec::new(),
            ports: Vec::new(),
            vrfs: Vec::new(),
            factory: self.factory,
        };

        let default_vrf = config.new_vrf(DEFAULT_VRF_NAME);
        config.add_vrf(default_vrf);

        for name in &self.ports {
            let port = config.new_port(name);
            config.add_port(port)?;
        }

        info!(
            "Created switch configuration {} ({} ports)",
            config.name,
            config.ports.len()
        );
        Ok(config)
    }
}

impl SwitchConfiguration {
    /// Start building a configuration for the switch `name` reachable at `ip`
    pub fn builder(ip: impl Into<String>, name: impl Into<String>) -> SwitchConfigurationBuilder {
        SwitchConfigurationBuilder {
            ip: ip.into(),
            name: name.into(),
            privileged_passwords: Vec::new(),
            auto_enabled: false,
            ports: Vec::new(),
            factory: EntityFactory::default(),
        }
    }

    /// Configuration with default constructors and no ports
    pub fn new(ip: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            name: name.into(),
            privileged_passwords: Vec::new(),
            auto_enabled: false,
            locked: false,
            vlans: Vec::new(),
            ports: Vec::new(),
            vrfs: vec![Vrf::new(DEFAULT_VRF_NAME)],
            factory: EntityFactory::default(),
        }
    }

    pub fn factory(&self) -> &EntityFactory {
        &self.factory
    }

    // Construction goes through the factory only.

    pub fn new_vrf(&self, name: &str) -> Vrf {
        self.factory.vrf(name)
    }

    pub fn new_vlan(&self, number: VlanId) -> Vlan {
        self.factory.vlan(number)
    }

    pub fn new_port(&self, name: &str) -> Port {
        self.factory.port(name)
    }

    pub fn new_vlan_port(&self, vlan_id: VlanId, name: &str) -> Port {
        self.factory.vlan_port(vlan_id, name)
    }

    pub fn new_aggregated_port(&self, name: &str) -> Port {
        self.factory.aggregated_port(name)
    }

    pub fn new_vrrp(&self, group_id: VrId) -> Vrrp {
        self.factory.vrrp(group_id)
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    pub fn vlans(&self) -> &[Vlan] {
        &self.vlans
    }

    pub fn vrfs(&self) -> &[Vrf] {
        &self.vrfs
    }

    pub fn get_port(&self, name: &str) -> Option<&Port> {
        self.ports.iter().find(|port| port.name == name)
    }

    pub fn get_port_mut(&mut self, name: &str) -> Option<&mut Port> {
        self.ports.iter_mut().find(|port| port.name == name)
    }

    pub fn get_vlan(&self, number: VlanId) -> Option<&Vlan> {
        self.vlans.iter().find(|vlan| vlan.number == number)
    }

    pub fn get_vlan_mut(&mut self, number: VlanId) -> Option<&mut Vlan> {
        self.vlans.iter_mut().find(|vlan| vlan.number == number)
    }

    pub fn get_vlan_by_name(&self, name: &str) -> Option<&Vlan> {
        self.vlans
            .iter()
            .find(|vlan| vlan.name.as_deref() == Some(name))
    }

    /// Resolve an abbreviated port name
    ///
    /// `"gi0/3"` matches the first port whose lowercased name starts with
    /// `"gi"` and ends with `"0/3"`, in port order. Names without a digit
    /// never match.
    pub fn get_port_by_partial_name(&self, partial: &str) -> Option<&Port> {
        let partial = partial.to_lowercase();
        let (prefix, number) = split_port_name(&partial)?;
        let (prefix, number) = (prefix.trim(), number.trim());

        self.ports.iter().find(|port| {
            let name = port.name.to_lowercase();
            name.starts_with(prefix) && name.ends_with(number)
        })
    }

    /// The virtual interface routing `vlan_id`
    pub fn get_virtual_interface(&self, vlan_id: VlanId) -> Option<&Port> {
        self.ports.iter().find(|port| {
            port.as_virtual_interface()
                .is_some_and(|vif| vif.vlan_id == vlan_id)
        })
    }

    /// Find the interface address whose subnet contains `ip`
    ///
    /// Every virtual interface is scanned, primaries before secondaries.
    pub fn get_port_and_ip_by_ip(&self, ip: &IpAddr) -> Option<(&Port, IpNetwork)> {
        self.ports.iter().find_map(|port| {
            let vif = port.as_virtual_interface()?;
            vif.all_ips()
                .find(|network| network.contains(ip))
                .map(|network| (port, *network))
        })
    }

    #[instrument(skip(self, port), fields(port = %port.name, kind = port.kind.as_str()))]
    pub fn add_port(&mut self, port: Port) -> ConfigResult<()> {
        if self.get_port(&port.name).is_some() {
            return Err(ConfigError::DuplicatePort { name: port.name });
        }
        debug!("Adding port");
        self.ports.push(port);
        Ok(())
    }

    /// Remove a port, unbinding it from the VLAN it routes
    #[instrument(skip(self))]
    pub fn remove_port(&mut self, name: &str) -> ConfigResult<Port> {
        let index = self
            .ports
            .iter()
            .position(|port| port.name == name)
            .ok_or_else(|| ConfigError::port_not_found(name))?;

        for vlan in &mut self.vlans {
            if vlan.router_interface.as_deref() == Some(name) {
                vlan.router_interface = None;
            }
        }

        debug!("Removing port");
        Ok(self.ports.remove(index))
    }

    #[instrument(skip(self, vlan), fields(vlan = %vlan.number))]
    pub fn add_vlan(&mut self, vlan: Vlan) -> ConfigResult<()> {
        if self.get_vlan(vlan.number).is_some() {
            return Err(ConfigError::DuplicateVlan {
                number: vlan.number,
            });
        }
        info!("Adding VLAN");
        self.vlans.push(vlan);
        Ok(())
    }

    /// Remove a VLAN and every port reference to it
    #[instrument(skip(self))]
    pub fn remove_vlan(&mut self, number: VlanId) -> ConfigResult<Vlan> {
        let index = self
            .vlans
            .iter()
            .position(|vlan| vlan.number == number)
            .ok_or(ConfigError::VlanNotFound { number })?;

        for port in &mut self.ports {
            port.forget_vlan(number);
        }

        info!("Removing VLAN");
        Ok(self.vlans.remove(index))
    }

    /// Add a VRF; a VRF with the same name is kept as is
    pub fn add_vrf(&mut self, vrf: Vrf) {
        if self.get_vrf(&vrf.name).is_none() {
            info!("Adding VRF {}", vrf.name);
            self.vrfs.push(vrf);
        }
    }

    pub fn get_vrf(&self, name: &str) -> Option<&Vrf> {
        self.vrfs.iter().find(|vrf| vrf.name == name)
    }

    /// Remove a VRF and detach every port bound to it
    #[instrument(skip(self))]
    pub fn remove_vrf(&mut self, name: &str) -> ConfigResult<Vrf> {
        let index = self
            .vrfs
            .iter()
            .position(|vrf| vrf.name == name)
            .ok_or_else(|| ConfigError::VrfNotFound {
                name: name.to_string(),
            })?;

        let mut detached = 0;
        for port in &mut self.ports {
            if port.vrf.as_deref() == Some(name) {
                port.vrf = None;
                detached += 1;
            }
        }

        info!("Removing VRF, detached {} ports", detached);
        Ok(self.vrfs.remove(index))
    }

    /// Ports bundled into the aggregated port `name` with a live link
    pub fn aggregated_members(&self, name: &str) -> Vec<&Port> {
        self.ports
            .iter()
            .filter(|port| {
                port.aggregation_membership.as_deref() == Some(name) && port.link_name.is_some()
            })
            .collect()
    }

    fn virtual_interface_mut(&mut self, port_name: &str) -> ConfigResult<&mut VirtualInterface> {
        let port = self
            .get_port_mut(port_name)
            .ok_or_else(|| ConfigError::port_not_found(port_name))?;
        port.as_virtual_interface_mut()
            .ok_or_else(|| ConfigError::NotAVirtualInterface {
                name: port_name.to_string(),
            })
    }

    /// Port holding an address that shares a subnet with `network`
    ///
    /// Either an existing network contains the new address, or the new
    /// network contains an existing address.
    fn subnet_owner(&self, network: &IpNetwork) -> Option<&Port> {
        if let Some((port, _)) = self.get_port_and_ip_by_ip(&network.ip()) {
            return Some(port);
        }
        self.ports.iter().find(|port| {
            port.as_virtual_interface()
                .is_some_and(|vif| vif.all_ips().any(|existing| network.contains(&existing.ip())))
        })
    }

    /// Assign an address to a virtual interface
    ///
    /// An address whose subnet is not yet used anywhere becomes a primary.
    /// Inside a subnet already owned by the same port it can only be added
    /// as a secondary. Subnets owned by another port are refused, whichever
    /// of the two networks is the wider one.
    #[instrument(skip(self))]
    pub fn assign_ip(
        &mut self,
        port_name: &str,
        network: IpNetwork,
        secondary: bool,
    ) -> ConfigResult<()> {
        let ip = network.ip();
        let owner = self.subnet_owner(&network).map(|port| port.name.clone());

        let vif = self.virtual_interface_mut(port_name)?;

        match owner {
            None if secondary => Err(ConfigError::SecondaryWithoutPrimary { ip }),
            None => {
                debug!("Adding primary address");
                vif.add_ip(network);
                Ok(())
            }
            Some(owner) if owner != port_name => Err(ConfigError::SubnetOverlap { ip, owner }),
            Some(_) if vif.has_address(&ip) => Err(ConfigError::DuplicateIp { ip }),
            Some(_) if !secondary => Err(ConfigError::OnePrimaryPerSubnet { ip }),
            Some(_) => {
                debug!("Adding secondary address");
                vif.add_secondary_ip(network);
                Ok(())
            }
        }
    }

    /// Remove an address from a virtual interface
    ///
    /// A primary cannot go while secondaries remain in its subnet. Removing
    /// an address that is not configured is a no-op.
    #[instrument(skip(self))]
    pub fn unassign_ip(&mut self, port_name: &str, network: IpNetwork) -> ConfigResult<()> {
        let vif = self.virtual_interface_mut(port_name)?;

        if vif.remove_secondary_ip(&network).is_some() {
            debug!("Removed secondary address");
            return Ok(());
        }
        if vif.has_secondary_in(&network) {
            return Err(ConfigError::SecondaryBeforePrimary { ip: network.ip() });
        }
        if vif.remove_ip(&network).is_some() {
            debug!("Removed primary address");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn net(s: &str) -> IpNetwork {
        s.parse().unwrap()
    }

    fn vlan(id: u16) -> VlanId {
        VlanId::new(id).unwrap()
    }

    fn switch_with_ves() -> SwitchConfiguration {
        let mut config = SwitchConfiguration::builder("127.0.0.1", "my_switch")
            .ports(["ethernet 1/1", "ethernet 1/2"])
            .build()
            .unwrap();
        for id in [1000, 2000] {
            let port = config.new_vlan_port(vlan(id), &format!("ve {}", id));
            config.add_port(port).unwrap();
        }
        config
    }

    #[test]
    fn test_default_vrf_present() {
        let config = SwitchConfiguration::new("127.0.0.1", "sw");
        assert!(config.get_vrf(DEFAULT_VRF_NAME).is_some());

        let built = SwitchConfiguration::builder("127.0.0.1", "sw")
            .build()
            .unwrap();
        assert_eq!(built.vrfs().len(), 1);
    }

    #[test]
    fn test_builder_rejects_duplicate_ports() {
        let result = SwitchConfiguration::builder("127.0.0.1", "sw")
            .ports(["ethernet 1/1", "ethernet 1/1"])
            .build();
        assert!(matches!(result, Err(ConfigError::DuplicatePort { .. })));
    }

    #[test]
    fn test_partial_name() {
        let mut config = SwitchConfiguration::new("127.0.0.1", "sw");
        config.add_port(Port::physical("ABCxyz123")).unwrap();
        config.add_port(Port::physical("ethernet 1/12")).unwrap();
        config.add_port(Port::physical("ethernet 1/2")).unwrap();

        assert_eq!(
            config.get_port_by_partial_name("abc123").unwrap().name,
            "ABCxyz123"
        );
        assert_eq!(
            config.get_port_by_partial_name("abc23").unwrap().name,
            "ABCxyz123"
        );
        assert_eq!(
            config.get_port_by_partial_name("ABCXYZ123").unwrap().name,
            "ABCxyz123"
        );
        // first port in order whose name ends with the suffix
        assert_eq!(
            config.get_port_by_partial_name("ethe 1/2").unwrap().name,
            "ethernet 1/12"
        );
        assert!(config.get_port_by_partial_name("abc124").is_none());
        assert!(config.get_port_by_partial_name("xyz123").is_none());
        assert!(config.get_port_by_partial_name("abc").is_none());
    }

    #[test]
    fn test_two_primaries_in_disjoint_subnets() {
        let mut config = switch_with_ves();
        config.assign_ip("ve 1000", net("10.0.0.1/24"), false).unwrap();
        config.assign_ip("ve 1000", net("10.0.1.1/24"), false).unwrap();

        let (port, network) = config
            .get_port_and_ip_by_ip(&"10.0.1.77".parse().unwrap())
            .unwrap();
        assert_eq!(port.name, "ve 1000");
        assert_eq!(network, net("10.0.1.1/24"));
    }

    #[test]
    fn test_duplicate_ip_leaves_state() {
        let mut config = switch_with_ves();
        config.assign_ip("ve 1000", net("10.0.0.1/24"), false).unwrap();

        let err = config
            .assign_ip("ve 1000", net("10.0.0.1/24"), false)
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateIp { .. }));

        let err = config
            .assign_ip("ve 1000", net("10.0.0.1/24"), true)
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateIp { .. }));

        let vif = config
            .get_port("ve 1000")
            .unwrap()
            .as_virtual_interface()
            .unwrap();
        assert_eq!(vif.ips, vec![net("10.0.0.1/24")]);
        assert!(vif.secondary_ips.is_empty());
    }

    #[test]
    fn test_one_primary_per_subnet() {
        let mut config = switch_with_ves();
        config.assign_ip("ve 1000", net("10.0.0.1/24"), false).unwrap();
        let err = config
            .assign_ip("ve 1000", net("10.0.0.2/24"), false)
            .unwrap_err();
        assert!(matches!(err, ConfigError::OnePrimaryPerSubnet { .. }));
    }

    #[test]
    fn test_overlap_with_other_port() {
        let mut config = switch_with_ves();
        config.assign_ip("ve 1000", net("10.0.0.1/24"), false).unwrap();
        let err = config
            .assign_ip("ve 2000", net("10.0.0.2/24"), true)
            .unwrap_err();
        match err {
            ConfigError::SubnetOverlap { owner, .. } => assert_eq!(owner, "ve 1000"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_wider_subnet_added_second_overlaps() {
        let mut config = switch_with_ves();
        config.assign_ip("ve 1000", net("2.2.2.200/25"), false).unwrap();

        // 2.2.2.0/24 does not fall inside 2.2.2.128/25 but contains 2.2.2.200
        let err = config
            .assign_ip("ve 2000", net("2.2.2.1/24"), false)
            .unwrap_err();
        match err {
            ConfigError::SubnetOverlap { owner, .. } => assert_eq!(owner, "ve 1000"),
            other => panic!("unexpected error: {other}"),
        }
        let ve2000 = config.get_port("ve 2000").unwrap().as_virtual_interface().unwrap();
        assert!(ve2000.ips.is_empty());
    }

    #[test]
    fn test_wider_subnet_on_same_port() {
        let mut config = switch_with_ves();
        config.assign_ip("ve 1000", net("10.0.0.200/25"), false).unwrap();

        let err = config
            .assign_ip("ve 1000", net("10.0.0.1/24"), false)
            .unwrap_err();
        assert!(matches!(err, ConfigError::OnePrimaryPerSubnet { .. }));

        config.assign_ip("ve 1000", net("10.0.0.1/24"), true).unwrap();
        let vif = config.get_port("ve 1000").unwrap().as_virtual_interface().unwrap();
        assert_eq!(vif.ips, vec![net("10.0.0.200/25")]);
        assert_eq!(vif.secondary_ips, vec![net("10.0.0.1/24")]);
    }

    #[test]
    fn test_secondary_requires_primary() {
        let mut config = switch_with_ves();
        let err = config
            .assign_ip("ve 1000", net("10.0.0.2/24"), true)
            .unwrap_err();
        assert!(matches!(err, ConfigError::SecondaryWithoutPrimary { .. }));
    }

    #[test]
    fn test_secondary_before_primary_removal() {
        let mut config = switch_with_ves();
        config.assign_ip("ve 1000", net("10.0.0.1/24"), false).unwrap();
        config.assign_ip("ve 1000", net("10.0.0.2/24"), true).unwrap();

        let err = config
            .unassign_ip("ve 1000", net("10.0.0.1/24"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::SecondaryBeforePrimary { .. }));

        config.unassign_ip("ve 1000", net("10.0.0.2/24")).unwrap();
        config.unassign_ip("ve 1000", net("10.0.0.1/24")).unwrap();

        assert!(config
            .get_port_and_ip_by_ip(&"10.0.0.1".parse().unwrap())
            .is_none());
    }

    #[test]
    fn test_assign_ip_requires_virtual_interface() {
        let mut config = switch_with_ves();
        let err = config
            .assign_ip("ethernet 1/1", net("10.0.0.1/24"), false)
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotAVirtualInterface { .. }));

        let err = config
            .assign_ip("ve 9", net("10.0.0.1/24"), false)
            .unwrap_err();
        assert!(matches!(err, ConfigError::PortNotFound { .. }));
    }

    #[test]
    fn test_remove_vlan_clears_references() {
        let mut config = switch_with_ves();
        config.add_vlan(Vlan::new(vlan(10))).unwrap();
        assert!(matches!(
            config.add_vlan(Vlan::new(vlan(10))),
            Err(ConfigError::DuplicateVlan { .. })
        ));

        {
            let port = config.get_port_mut("ethernet 1/1").unwrap();
            port.set_access_vlan(vlan(10));
        }
        config.get_port_mut("ethernet 1/2").unwrap().add_trunk_vlan(vlan(10));

        let removed = config.remove_vlan(vlan(10)).unwrap();
        assert_eq!(removed.number, vlan(10));
        assert_eq!(config.get_port("ethernet 1/1").unwrap().access_vlan, None);
        assert!(config
            .get_port("ethernet 1/2")
            .unwrap()
            .trunk_vlans
            .as_ref()
            .unwrap()
            .is_empty());
        assert!(config.remove_vlan(vlan(10)).is_err());
    }

    #[test]
    fn test_remove_vrf_detaches_ports() {
        let mut config = switch_with_ves();
        config.add_vrf(Vrf::new("CUST"));
        config.add_vrf(Vrf::new("CUST"));
        assert_eq!(config.vrfs().len(), 2);

        config.get_port_mut("ve 1000").unwrap().vrf = Some("CUST".to_string());
        config.remove_vrf("CUST").unwrap();

        assert_eq!(config.get_port("ve 1000").unwrap().vrf, None);
        assert!(config.get_vrf("CUST").is_none());
    }

    #[test]
    fn test_remove_port_unbinds_vlan() {
        let mut config = switch_with_ves();
        let mut vlan_1000 = Vlan::new(vlan(1000));
        vlan_1000.router_interface = Some("ve 1000".to_string());
        config.add_vlan(vlan_1000).unwrap();

        let removed = config.remove_port("ve 1000").unwrap();
        assert_eq!(removed.name, "ve 1000");
        assert_eq!(config.get_vlan(vlan(1000)).unwrap().router_interface, None);
        assert!(config.get_virtual_interface(vlan(1000)).is_none());
        assert!(config.get_virtual_interface(vlan(2000)).is_some());
    }

    #[test]
    fn test_aggregated_members() {
        let mut config = switch_with_ves();
        let lag = config.new_aggregated_port("lag1");
        config.add_port(lag).unwrap();
        for (name, linked) in [("ethernet 1/1", true), ("ethernet 1/2", false)] {
            let port = config.get_port_mut(name).unwrap();
            port.aggregation_membership = Some("lag1".to_string());
            if linked {
                port.link_name = Some("server1".to_string());
            }
        }

        let members: Vec<&str> = config
            .aggregated_members("lag1")
            .iter()
            .map(|port| port.name.as_str())
            .collect();
        assert_eq!(members, vec!["ethernet 1/1"]);
    }

    #[test]
    fn test_factory_override_used_by_new_helpers() {
        let factory = EntityFactory::default().with_vrf(|name| Vrf::new(name.to_uppercase()));
        let config = SwitchConfiguration::builder("127.0.0.1", "sw")
            .objects_overrides(factory)
            .build()
            .unwrap();
        assert_eq!(config.new_vrf("cust").name, "CUST");
    }
}
