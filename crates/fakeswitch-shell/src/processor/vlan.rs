//! VLAN configuration mode (`SSH@switch(config-vlan-<id>)#`)

use once_cell::sync::Lazy;
use tracing::info;

use fakeswitch_config::Port;
use fakeswitch_types::{PortMode, VlanId};

use super::{end, exit, CommandContext, ModeCommands, Transition};
use crate::error::{CommandError, CommandResult};
use crate::matcher::{Args, CommandTable, Keywords};
use crate::mode::Mode;

const MEMBER_KINDS: Keywords = Keywords::new(&["ethernet"]);
const ROUTER_KINDS: Keywords = Keywords::new(&["ve"]);

pub(super) static COMMANDS: Lazy<ModeCommands> = Lazy::new(|| ModeCommands {
    positive: CommandTable::builder()
        .command("untagged", untagged)
        .command("tagged", tagged)
        .command("router-interface", router_interface)
        .command("exit", exit)
        .command("end", end)
        .build(),
    negative: CommandTable::builder()
        .command("untagged", no_untagged)
        .command("tagged", no_tagged)
        .command("router-interface", no_router_interface)
        .build(),
});

fn current_vlan(ctx: &CommandContext<'_>) -> CommandResult<VlanId> {
    match ctx.mode {
        Mode::VlanConfig { vlan } => Ok(*vlan),
        other => Err(CommandError::invalid_input(&[other.to_string()])),
    }
}

/// Resolve `ethernet <p>` to a physical port
fn member_port<'c>(ctx: &'c mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<&'c mut Port> {
    args.keyword(0, &MEMBER_KINDS)?;
    let number = args.get(1)?;
    args.end(2)?;

    let text = format!("ethernet {}", number);
    let name = ctx
        .config
        .get_port_by_partial_name(&text)
        .filter(|port| !port.is_virtual_interface())
        .map(|port| port.name.clone())
        .ok_or(CommandError::InvalidInterface { text })?;

    ctx.port_by_name_mut(&name)
}

fn untagged(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    let vlan = current_vlan(ctx)?;
    let port = member_port(ctx, args)?;

    if port.mode == Some(PortMode::Trunk) {
        port.trunk_native_vlan = Some(vlan);
    } else {
        port.set_access_vlan(vlan);
    }
    Ok(Transition::Stay)
}

fn tagged(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    let vlan = current_vlan(ctx)?;
    let port = member_port(ctx, args)?;

    // An untagged access port keeps its VLAN as the native one.
    if port.mode == Some(PortMode::Access) {
        port.trunk_native_vlan = port.access_vlan.take();
    }
    port.add_trunk_vlan(vlan);
    Ok(Transition::Stay)
}

fn no_untagged(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    let vlan = current_vlan(ctx)?;
    let port = member_port(ctx, args)?;

    if port.access_vlan == Some(vlan) {
        port.access_vlan = None;
        port.mode = None;
    }
    if port.trunk_native_vlan == Some(vlan) {
        port.trunk_native_vlan = None;
    }
    Ok(Transition::Stay)
}

fn no_tagged(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    let vlan = current_vlan(ctx)?;
    let port = member_port(ctx, args)?;

    port.remove_trunk_vlan(vlan);
    if port.trunk_vlans.as_ref().is_some_and(|vlans| vlans.is_empty()) {
        port.trunk_vlans = None;
        port.mode = None;
        if let Some(native) = port.trunk_native_vlan.take() {
            port.set_access_vlan(native);
        }
    }
    Ok(Transition::Stay)
}

fn ve_name(args: &Args<'_>) -> CommandResult<String> {
    args.keyword(0, &ROUTER_KINDS)?;
    let number = args.get(1)?;
    args.end(2)?;

    if number.parse::<VlanId>().is_err() {
        return Err(CommandError::InvalidVirtualInterface);
    }
    Ok(format!("ve {}", number))
}

fn router_interface(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    let vlan = current_vlan(ctx)?;
    let name = ve_name(args)?;

    match ctx.config.get_port(&name) {
        Some(port) => {
            let bound_elsewhere = port
                .as_virtual_interface()
                .map_or(true, |vif| vif.vlan_id != vlan);
            if bound_elsewhere {
                return Err(CommandError::InvalidVirtualInterface);
            }
        }
        None => {
            let port = ctx.config.new_vlan_port(vlan, &name);
            ctx.config.add_port(port)?;
            info!("Created virtual interface {} for VLAN {}", name, vlan);
        }
    }

    if let Some(vlan) = ctx.config.get_vlan_mut(vlan) {
        vlan.router_interface = Some(name);
    }
    Ok(Transition::Stay)
}

fn no_router_interface(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    let vlan = current_vlan(ctx)?;
    let name = ve_name(args)?;

    if let Some(vlan) = ctx.config.get_vlan_mut(vlan) {
        if vlan.router_interface.as_deref() == Some(name.as_str()) {
            vlan.router_interface = None;
        }
    }
    Ok(Transition::Stay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fakeswitch_config::{SwitchConfiguration, Vlan};
    use pretty_assertions::assert_eq;

    fn config() -> SwitchConfiguration {
        let mut config = SwitchConfiguration::builder("127.0.0.1", "sw")
            .ports(["ethernet 1/1", "ethernet 1/2"])
            .build()
            .unwrap();
        for id in [10, 20] {
            config.add_vlan(Vlan::new(VlanId::new(id).unwrap())).unwrap();
        }
        config
    }

    fn run(config: &mut SwitchConfiguration, vlan: u16, line: &str) -> CommandResult<Transition> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let mode = Mode::VlanConfig {
            vlan: VlanId::new(vlan).unwrap(),
        };
        super::super::dispatch(&mut CommandContext::new(config, &mode), &tokens)
    }

    #[test]
    fn test_untagged_then_tagged() {
        let mut config = config();
        run(&mut config, 10, "untagged ethernet 1/1").unwrap();
        run(&mut config, 20, "tag eth 1/1").unwrap();

        let port = config.get_port("ethernet 1/1").unwrap();
        assert_eq!(port.mode, Some(PortMode::Trunk));
        assert_eq!(port.access_vlan, None);
        assert_eq!(port.trunk_native_vlan, VlanId::new(10).ok());

        run(&mut config, 20, "no tagged ethernet 1/1").unwrap();
        let port = config.get_port("ethernet 1/1").unwrap();
        assert_eq!(port.mode, Some(PortMode::Access));
        assert_eq!(port.access_vlan, VlanId::new(10).ok());
    }

    #[test]
    fn test_unknown_member() {
        let mut config = config();
        match run(&mut config, 10, "untagged ethernet 1/9") {
            Err(err) => assert_eq!(err.to_string(), "Error - invalid interface ethernet 1/9"),
            Ok(t) => panic!("unexpected: {:?}", t),
        }
        assert!(matches!(
            run(&mut config, 10, "untagged ethernet"),
            Err(CommandError::Incomplete)
        ));
    }

    #[test]
    fn test_router_interface() {
        let mut config = config();
        run(&mut config, 10, "router-interface ve 10").unwrap();

        let vlan = VlanId::new(10).unwrap();
        assert_eq!(
            config.get_vlan(vlan).unwrap().router_interface.as_deref(),
            Some("ve 10")
        );
        assert_eq!(config.get_virtual_interface(vlan).unwrap().name, "ve 10");

        assert!(matches!(
            run(&mut config, 20, "router-interface ve 10"),
            Err(CommandError::InvalidVirtualInterface)
        ));

        run(&mut config, 10, "no router-interface ve 10").unwrap();
        assert_eq!(config.get_vlan(vlan).unwrap().router_interface, None);
        assert!(config.get_port("ve 10").is_some());
    }
}
