//! Pluggable constructors for configuration entities.
//!
//! Every entity the shell creates goes through an [`EntityFactory`] owned by
//! the [`SwitchConfiguration`](crate::SwitchConfiguration). Test harnesses
//! replace individual constructors to inject instrumented or simplified
//! entities without touching command handling.
//!
//! ```
//! use fakeswitch_config::{EntityFactory, EntityKind, Vrrp};
//!
//! let factory = EntityFactory::default().with_vrrp(|id| {
//!     let mut vrrp = Vrrp::new(id);
//!     vrrp.priority = Some(200);
//!     vrrp
//! });
//! assert!(factory.is_overridden(EntityKind::Vrrp));
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use fakeswitch_types::{ParseError, VlanId, VrId};

use crate::port::Port;
use crate::types::{Vlan, Vrf, Vrrp};

/// Entity kinds the factory knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Vrf,
    Vlan,
    Port,
    VlanPort,
    AggregatedPort,
    Vrrp,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Vrf => "VRF",
            EntityKind::Vlan => "Vlan",
            EntityKind::Port => "Port",
            EntityKind::VlanPort => "VlanPort",
            EntityKind::AggregatedPort => "AggregatedPort",
            EntityKind::Vrrp => "VRRP",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VRF" => Ok(EntityKind::Vrf),
            "Vlan" => Ok(EntityKind::Vlan),
            "Port" => Ok(EntityKind::Port),
            "VlanPort" => Ok(EntityKind::VlanPort),
            "AggregatedPort" => Ok(EntityKind::AggregatedPort),
            "VRRP" => Ok(EntityKind::Vrrp),
            _ => Err(ParseError::InvalidEntityKind(s.to_string())),
        }
    }
}

type VrfCtor = Arc<dyn Fn(&str) -> Vrf + Send + Sync>;
type VlanCtor = Arc<dyn Fn(VlanId) -> Vlan + Send + Sync>;
type PortCtor = Arc<dyn Fn(&str) -> Port + Send + Sync>;
type VlanPortCtor = Arc<dyn Fn(VlanId, &str) -> Port + Send + Sync>;
type VrrpCtor = Arc<dyn Fn(VrId) -> Vrrp + Send + Sync>;

/// Constructor table keyed by [`EntityKind`].
///
/// Cloning is cheap; constructors are shared.
#[derive(Clone)]
pub struct EntityFactory {
    vrf: VrfCtor,
    vlan: VlanCtor,
    port: PortCtor,
    vlan_port: VlanPortCtor,
    aggregated_port: PortCtor,
    vrrp: VrrpCtor,
    overridden: BTreeSet<EntityKind>,
}

impl Default for EntityFactory {
    fn default() -> Self {
        Self {
            vrf: Arc::new(|name: &str| Vrf::new(name)),
            vlan: Arc::new(Vlan::new),
            port: Arc::new(|name: &str| Port::physical(name)),
            vlan_port: Arc::new(|vlan_id, name: &str| Port::virtual_interface(vlan_id, name)),
            aggregated_port: Arc::new(|name: &str| Port::aggregated(name)),
            vrrp: Arc::new(Vrrp::new),
            overridden: BTreeSet::new(),
        }
    }
}

impl EntityFactory {
    pub fn with_vrf(mut self, ctor: impl Fn(&str) -> Vrf + Send + Sync + 'static) -> Self {
        self.vrf = Arc::new(ctor);
        self.overridden.insert(EntityKind::Vrf);
        self
    }

    pub fn with_vlan(mut self, ctor: impl Fn(VlanId) -> Vlan + Send + Sync + 'static) -> Self {
        self.vlan = Arc::new(ctor);
        self.overridden.insert(EntityKind::Vlan);
        self
    }

    pub fn with_port(mut self, ctor: impl Fn(&str) -> Port + Send + Sync + 'static) -> Self {
        self.port = Arc::new(ctor);
        self.overridden.insert(EntityKind::Port);
        self
    }

    pub fn with_vlan_port(
        mut self,
        ctor: impl Fn(VlanId, &str) -> Port + Send + Sync + 'static,
    ) -> Self {
        self.vlan_port = Arc::new(ctor);
        self.overridden.insert(EntityKind::VlanPort);
        self
    }

    pub fn with_aggregated_port(
        mut self,
        ctor: impl Fn(&str) -> Port + Send + Sync + 'static,
    ) -> Self {
        self.aggregated_port = Arc::new(ctor);
        self.overridden.insert(EntityKind::AggregatedPort);
        self
    }

    pub fn with_vrrp(mut self, ctor: impl Fn(VrId) -> Vrrp + Send + Sync + 'static) -> Self {
        self.vrrp = Arc::new(ctor);
        self.overridden.insert(EntityKind::Vrrp);
        self
    }

    /// Returns true if the constructor for `kind` was replaced.
    pub fn is_overridden(&self, kind: EntityKind) -> bool {
        self.overridden.contains(&kind)
    }

    /// Kinds whose constructor was replaced, in a stable order.
    pub fn overridden_kinds(&self) -> impl Iterator<Item = EntityKind> + '_ {
        self.overridden.iter().copied()
    }

    pub fn vrf(&self, name: &str) -> Vrf {
        (self.vrf)(name)
    }

    pub fn vlan(&self, number: VlanId) -> Vlan {
        (self.vlan)(number)
    }

    pub fn port(&self, name: &str) -> Port {
        (self.port)(name)
    }

    pub fn vlan_port(&self, vlan_id: VlanId, name: &str) -> Port {
        (self.vlan_port)(vlan_id, name)
    }

    pub fn aggregated_port(&self, name: &str) -> Port {
        (self.aggregated_port)(name)
    }

    pub fn vrrp(&self, group_id: VrId) -> Vrrp {
        (self.vrrp)(group_id)
    }
}

impl fmt::Debug for EntityFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityFactory")
            .field("overridden", &self.overridden)
            .finish_non_exhaustive()
    }
}
