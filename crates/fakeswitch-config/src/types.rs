//! VLAN, VRF and VRRP entities

use fakeswitch_types::{IpAddr, VlanId, VrId};
use std::collections::BTreeMap;

/// Name of the VRF present on every switch
pub const DEFAULT_VRF_NAME: &str = "DEFAULT-LAN";

/// VLAN definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vlan {
    /// VLAN number
    pub number: VlanId,
    /// Configured name
    pub name: Option<String>,
    /// Free-form description
    pub description: Option<String>,
    /// Name of the virtual interface routing this VLAN
    pub router_interface: Option<String>,
}

impl Vlan {
    /// Create a new Vlan with no name
    pub fn new(number: VlanId) -> Self {
        Self {
            number,
            name: None,
            description: None,
            router_interface: None,
        }
    }

    /// Create a new named Vlan
    pub fn with_name(number: VlanId, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(number)
        }
    }
}

/// Routing context a port may be bound to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vrf {
    /// VRF name
    pub name: String,
}

impl Vrf {
    /// Create a new Vrf
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// VRRP group configured on a virtual interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vrrp {
    /// Group id
    pub group_id: VrId,
    /// Virtual addresses backed up by the group
    pub ip_addresses: Vec<IpAddr>,
    pub description: Option<String>,
    pub authentication: Option<String>,
    /// Hello interval in seconds
    pub timers_hello: Option<u32>,
    /// Hold (dead) interval in seconds
    pub timers_hold: Option<u32>,
    pub priority: Option<u8>,
    /// Priority decrement applied when a tracked port goes down
    pub track_priority: Option<u8>,
    /// Tracked port name -> priority decrement
    pub track: BTreeMap<String, String>,
    pub preempt: bool,
    pub preempt_delay_minimum: Option<u32>,
    pub activated: Option<bool>,
    pub advertising: Option<bool>,
}

impl Vrrp {
    /// Create a new Vrrp group with device defaults
    pub fn new(group_id: VrId) -> Self {
        Self {
            group_id,
            ip_addresses: Vec::new(),
            description: None,
            authentication: None,
            timers_hello: None,
            timers_hold: None,
            priority: None,
            track_priority: None,
            track: BTreeMap::new(),
            preempt: true,
            preempt_delay_minimum: None,
            activated: None,
            advertising: None,
        }
    }

    /// Add a virtual address, ignoring duplicates
    pub fn add_ip_address(&mut self, ip: IpAddr) -> bool {
        if self.ip_addresses.contains(&ip) {
            return false;
        }
        self.ip_addresses.push(ip);
        true
    }

    /// Remove a virtual address
    pub fn remove_ip_address(&mut self, ip: &IpAddr) -> bool {
        let before = self.ip_addresses.len();
        self.ip_addresses.retain(|existing| existing != ip);
        before != self.ip_addresses.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vlan_new() {
        let vlan = Vlan::with_name(VlanId::new(100).unwrap(), "servers");
        assert_eq!(vlan.number.as_u16(), 100);
        assert_eq!(vlan.name.as_deref(), Some("servers"));
        assert!(vlan.router_interface.is_none());
    }

    #[test]
    fn test_vrrp_defaults() {
        let vrrp = Vrrp::new(VrId::new(1).unwrap());
        assert!(vrrp.preempt);
        assert!(vrrp.ip_addresses.is_empty());
        assert_eq!(vrrp.priority, None);
    }

    #[test]
    fn test_vrrp_ip_addresses_are_a_set() {
        let mut vrrp = Vrrp::new(VrId::new(2).unwrap());
        let ip: IpAddr = "10.0.0.254".parse().unwrap();
        assert!(vrrp.add_ip_address(ip));
        assert!(!vrrp.add_ip_address(ip));
        assert_eq!(vrrp.ip_addresses.len(), 1);

        assert!(vrrp.remove_ip_address(&ip));
        assert!(!vrrp.remove_ip_address(&ip));
    }
}
