//! Property-based tests for interface address assignment
//!
//! Random sequences of assign/unassign operations against two virtual
//! interfaces must never leave the model in a state that breaks the
//! addressing rules, and rejected operations must not change anything.

use fakeswitch_config::{SwitchConfiguration, VirtualInterface};
use fakeswitch_types::{IpNetwork, VlanId};
use proptest::prelude::*;

const PORTS: [&str; 2] = ["ve 10", "ve 20"];

#[derive(Debug, Clone)]
enum AddressOp {
    Assign {
        port: usize,
        network: IpNetwork,
        secondary: bool,
    },
    Unassign {
        port: usize,
        network: IpNetwork,
    },
}

/// Addresses in a handful of /24 subnets, so subnets are equal or disjoint
fn network() -> impl Strategy<Value = IpNetwork> {
    (0u8..4, 1u8..5).prop_map(|(subnet, host)| {
        format!("10.0.{}.{}/24", subnet, host)
            .parse()
            .expect("valid network")
    })
}

fn address_op() -> impl Strategy<Value = AddressOp> {
    prop_oneof![
        (0usize..2, network(), any::<bool>()).prop_map(|(port, network, secondary)| {
            AddressOp::Assign {
                port,
                network,
                secondary,
            }
        }),
        (0usize..2, network()).prop_map(|(port, network)| AddressOp::Unassign { port, network }),
    ]
}

fn switch() -> SwitchConfiguration {
    let mut config = SwitchConfiguration::new("127.0.0.1", "prop_switch");
    for (index, name) in PORTS.iter().enumerate() {
        let vlan = VlanId::new(10 * (index as u16 + 1)).expect("valid vlan");
        let port = config.new_vlan_port(vlan, name);
        config.add_port(port).expect("unique port");
    }
    config
}

fn interfaces(config: &SwitchConfiguration) -> Vec<(&str, &VirtualInterface)> {
    PORTS
        .iter()
        .filter_map(|name| {
            let port = config.get_port(name)?;
            Some((port.name.as_str(), port.as_virtual_interface()?))
        })
        .collect()
}

fn check_invariants(config: &SwitchConfiguration) -> Result<(), TestCaseError> {
    let vifs = interfaces(config);
    let mut owners = Vec::new();

    for (name, vif) in &vifs {
        for (i, a) in vif.ips.iter().enumerate() {
            for b in vif.ips.iter().skip(i + 1) {
                prop_assert!(
                    !a.contains(&b.ip()),
                    "{} has two primaries in one subnet: {} {}",
                    name,
                    a,
                    b
                );
            }
        }

        for secondary in &vif.secondary_ips {
            prop_assert!(
                vif.ips.iter().any(|primary| primary.contains(&secondary.ip())),
                "{} has secondary {} without primary",
                name,
                secondary
            );
        }

        for network in vif.all_ips() {
            owners.push((network.network(), *name));
        }
    }

    for (subnet, owner) in &owners {
        prop_assert!(
            owners
                .iter()
                .all(|(other_subnet, other)| other_subnet != subnet || other == owner),
            "subnet {} is shared between interfaces",
            subnet
        );
    }

    Ok(())
}

proptest! {
    /// Any operation sequence keeps the addressing rules
    #[test]
    fn prop_address_rules_hold(ops in prop::collection::vec(address_op(), 0..40)) {
        let mut config = switch();

        for op in ops {
            let before = config.ports().to_vec();
            let result = match &op {
                AddressOp::Assign { port, network, secondary } => {
                    config.assign_ip(PORTS[*port], *network, *secondary)
                }
                AddressOp::Unassign { port, network } => {
                    config.unassign_ip(PORTS[*port], *network)
                }
            };

            if result.is_err() {
                prop_assert_eq!(&before, &config.ports().to_vec(), "rejected {:?} changed state", op);
            }
            check_invariants(&config)?;
        }
    }

    /// An assigned address is always found again by address lookup
    #[test]
    fn prop_assigned_address_is_found(port in 0usize..2, network in network()) {
        let mut config = switch();
        config.assign_ip(PORTS[port], network, false).expect("first address");

        let (owner, found) = config
            .get_port_and_ip_by_ip(&network.ip())
            .expect("address lookup");
        prop_assert_eq!(owner.name.as_str(), PORTS[port]);
        prop_assert_eq!(found, network);
    }

    /// The same address can never be assigned twice
    #[test]
    fn prop_same_address_twice_is_rejected(network in network(), secondary in any::<bool>()) {
        let mut config = switch();
        config.assign_ip(PORTS[0], network, false).expect("first address");

        prop_assert!(config.assign_ip(PORTS[0], network, secondary).is_err());
        prop_assert!(config.assign_ip(PORTS[1], network, secondary).is_err());
    }
}
