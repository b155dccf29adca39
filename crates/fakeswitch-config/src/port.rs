//! Switch port and its kind-specific extensions

use std::collections::{BTreeSet, HashMap};

use fakeswitch_types::{split_port_name, IpAddr, IpNetwork, PortMode, VlanId, VrId};

use crate::types::Vrrp;

/// Kind-specific data carried by a [`Port`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortKind {
    /// Front-panel port
    Physical,
    /// Routed interface bound to a VLAN (`ve <n>`)
    VirtualInterface(VirtualInterface),
    /// Link aggregation bundle
    Aggregated(Aggregation),
}

impl PortKind {
    /// Short tag used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            PortKind::Physical => "physical",
            PortKind::VirtualInterface(_) => "virtual-interface",
            PortKind::Aggregated(_) => "aggregated",
        }
    }
}

/// A switch port
///
/// The VRF is held by name; the owning configuration clears it when the
/// VRF goes away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    pub name: String,
    pub description: Option<String>,
    pub mode: Option<PortMode>,
    pub access_vlan: Option<VlanId>,
    pub trunk_vlans: Option<BTreeSet<VlanId>>,
    pub trunk_native_vlan: Option<VlanId>,
    pub trunk_encapsulation_mode: Option<String>,
    pub shutdown: Option<bool>,
    pub vrf: Option<String>,
    pub speed: Option<String>,
    pub auto_negotiation: Option<bool>,
    /// Name of the aggregated port this port is a member of
    pub aggregation_membership: Option<String>,
    /// Peer the port is cabled to, `None` when the link is down
    pub link_name: Option<String>,
    pub vendor_specific: HashMap<String, String>,
    pub kind: PortKind,
}

impl Port {
    fn with_kind(name: impl Into<String>, kind: PortKind) -> Self {
        Self {
            name: name.into(),
            description: None,
            mode: None,
            access_vlan: None,
            trunk_vlans: None,
            trunk_native_vlan: None,
            trunk_encapsulation_mode: None,
            shutdown: None,
            vrf: None,
            speed: None,
            auto_negotiation: None,
            aggregation_membership: None,
            link_name: None,
            vendor_specific: HashMap::new(),
            kind,
        }
    }

    /// Create a physical port
    pub fn physical(name: impl Into<String>) -> Self {
        Self::with_kind(name, PortKind::Physical)
    }

    /// Create a virtual interface bound to `vlan_id`
    pub fn virtual_interface(vlan_id: VlanId, name: impl Into<String>) -> Self {
        Self::with_kind(
            name,
            PortKind::VirtualInterface(VirtualInterface::new(vlan_id)),
        )
    }

    /// Create an aggregated port
    pub fn aggregated(name: impl Into<String>) -> Self {
        Self::with_kind(name, PortKind::Aggregated(Aggregation::default()))
    }

    /// Clear every configurable field, keeping the name, kind and link
    pub fn reset(&mut self) {
        self.description = None;
        self.mode = None;
        self.access_vlan = None;
        self.trunk_vlans = None;
        self.trunk_native_vlan = None;
        self.trunk_encapsulation_mode = None;
        self.shutdown = None;
        self.vrf = None;
        self.speed = None;
        self.auto_negotiation = None;
        self.aggregation_membership = None;
        self.vendor_specific.clear();
    }

    /// Numeric part of the name (`"1/3"` for `"ethernet 1/3"`)
    pub fn number(&self) -> Option<&str> {
        split_port_name(&self.name).map(|(_, number)| number)
    }

    /// Name shortened to `length` leading letters followed by the number
    pub fn get_subname(&self, length: usize) -> String {
        match split_port_name(&self.name) {
            Some((prefix, number)) => {
                let short: String = prefix.chars().take(length).collect();
                format!("{}{}", short, number)
            }
            None => self.name.chars().take(length).collect(),
        }
    }

    pub fn is_virtual_interface(&self) -> bool {
        matches!(self.kind, PortKind::VirtualInterface(_))
    }

    pub fn as_virtual_interface(&self) -> Option<&VirtualInterface> {
        match &self.kind {
            PortKind::VirtualInterface(vif) => Some(vif),
            _ => None,
        }
    }

    pub fn as_virtual_interface_mut(&mut self) -> Option<&mut VirtualInterface> {
        match &mut self.kind {
            PortKind::VirtualInterface(vif) => Some(vif),
            _ => None,
        }
    }

    pub fn as_aggregation(&self) -> Option<&Aggregation> {
        match &self.kind {
            PortKind::Aggregated(agg) => Some(agg),
            _ => None,
        }
    }

    pub fn as_aggregation_mut(&mut self) -> Option<&mut Aggregation> {
        match &mut self.kind {
            PortKind::Aggregated(agg) => Some(agg),
            _ => None,
        }
    }

    /// Make the port an untagged member of `vlan`
    pub fn set_access_vlan(&mut self, vlan: VlanId) {
        self.mode = Some(PortMode::Access);
        self.access_vlan = Some(vlan);
    }

    /// Add `vlan` to the tagged VLANs, switching the port to trunk mode
    pub fn add_trunk_vlan(&mut self, vlan: VlanId) {
        self.mode = Some(PortMode::Trunk);
        self.trunk_vlans.get_or_insert_with(BTreeSet::new).insert(vlan);
    }

    /// Remove `vlan` from the tagged VLANs
    pub fn remove_trunk_vlan(&mut self, vlan: VlanId) -> bool {
        match self.trunk_vlans.as_mut() {
            Some(vlans) => vlans.remove(&vlan),
            None => false,
        }
    }

    /// Drop every reference this port holds to `vlan`
    pub fn forget_vlan(&mut self, vlan: VlanId) {
        if self.access_vlan == Some(vlan) {
            self.access_vlan = None;
        }
        if self.trunk_native_vlan == Some(vlan) {
            self.trunk_native_vlan = None;
        }
        self.remove_trunk_vlan(vlan);
    }
}

/// Addressing, ACL and VRRP state of a virtual interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualInterface {
    pub vlan_id: VlanId,
    pub access_group_in: Option<String>,
    pub access_group_out: Option<String>,
    /// Primary addresses, at most one per subnet
    pub ips: Vec<IpNetwork>,
    /// Secondary addresses, each inside the subnet of a primary
    pub secondary_ips: Vec<IpNetwork>,
    /// Authentication shared by every VRRP group of the interface
    pub vrrp_common_authentication: Option<String>,
    pub vrrps: Vec<Vrrp>,
}

impl VirtualInterface {
    pub fn new(vlan_id: VlanId) -> Self {
        Self {
            vlan_id,
            access_group_in: None,
            access_group_out: None,
            ips: Vec::new(),
            secondary_ips: Vec::new(),
            vrrp_common_authentication: None,
            vrrps: Vec::new(),
        }
    }

    pub fn get_vrrp_group(&self, group: VrId) -> Option<&Vrrp> {
        self.vrrps.iter().find(|vrrp| vrrp.group_id == group)
    }

    pub fn get_vrrp_group_mut(&mut self, group: VrId) -> Option<&mut Vrrp> {
        self.vrrps.iter_mut().find(|vrrp| vrrp.group_id == group)
    }

    /// Attach a group unless one with the same id already exists
    pub fn add_vrrp_group(&mut self, vrrp: Vrrp) -> bool {
        if self.get_vrrp_group(vrrp.group_id).is_some() {
            return false;
        }
        self.vrrps.push(vrrp);
        true
    }

    pub fn remove_vrrp_group(&mut self, group: VrId) -> Option<Vrrp> {
        let index = self.vrrps.iter().position(|vrrp| vrrp.group_id == group)?;
        Some(self.vrrps.remove(index))
    }

    /// Add a primary address, replacing an entry with the same address
    pub fn add_ip(&mut self, network: IpNetwork) {
        match self.ips.iter_mut().find(|ip| ip.same_ip(&network)) {
            Some(existing) => *existing = network,
            None => self.ips.push(network),
        }
    }

    pub fn add_secondary_ip(&mut self, network: IpNetwork) {
        self.secondary_ips.push(network);
    }

    pub fn remove_ip(&mut self, network: &IpNetwork) -> Option<IpNetwork> {
        let index = self.ips.iter().position(|ip| ip.same_ip(network))?;
        Some(self.ips.remove(index))
    }

    pub fn remove_secondary_ip(&mut self, network: &IpNetwork) -> Option<IpNetwork> {
        let index = self
            .secondary_ips
            .iter()
            .position(|ip| ip.same_ip(network))?;
        Some(self.secondary_ips.remove(index))
    }

    /// True if `ip` is configured as a primary or secondary address
    pub fn has_address(&self, ip: &IpAddr) -> bool {
        self.all_ips().any(|net| net.ip() == *ip)
    }

    pub fn has_secondary(&self, ip: &IpAddr) -> bool {
        self.secondary_ips.iter().any(|net| net.ip() == *ip)
    }

    /// True if any secondary address lies inside `subnet`
    pub fn has_secondary_in(&self, subnet: &IpNetwork) -> bool {
        self.secondary_ips
            .iter()
            .any(|net| subnet.contains(&net.ip()))
    }

    /// Primary addresses followed by secondary addresses
    pub fn all_ips(&self) -> impl Iterator<Item = &IpNetwork> {
        self.ips.iter().chain(self.secondary_ips.iter())
    }
}

/// LACP settings of an aggregated port
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    pub lacp_active: bool,
    pub lacp_periodic: Option<String>,
}
