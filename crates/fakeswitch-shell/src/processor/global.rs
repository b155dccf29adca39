//! Global configuration mode (`SSH@switch(config)#`)

use once_cell::sync::Lazy;
use tracing::info;

use fakeswitch_types::VlanId;

use super::{end, exit, CommandContext, ModeCommands, Transition};
use crate::error::{CommandError, CommandResult};
use crate::matcher::{Args, CommandTable, Keywords};
use crate::mode::Mode;

const INTERFACE_KINDS: Keywords = Keywords::new(&["ethernet", "ve"]);
const VLAN_OPTIONS: Keywords = Keywords::new(&["name"]);

pub(super) static COMMANDS: Lazy<ModeCommands> = Lazy::new(|| ModeCommands {
    positive: CommandTable::builder()
        .command("interface", interface)
        .command("vlan", vlan)
        .command("vrf", vrf)
        .command("exit", exit)
        .command("end", end)
        .build(),
    negative: CommandTable::builder()
        .command("vlan", no_vlan)
        .command("vrf", no_vrf)
        .build(),
});

/// Parse a VLAN number, telling apart garbage from out-of-range numbers
pub(super) fn parse_vlan(args: &Args<'_>, index: usize) -> CommandResult<VlanId> {
    let token = args.get(index)?;
    if token.parse::<u32>().is_err() {
        return Err(args.invalid(index));
    }
    Ok(token.parse::<VlanId>()?)
}

fn interface(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    let kind = args.keyword(0, &INTERFACE_KINDS)?;
    let number = args.get(1)?;
    args.end(2)?;

    match kind {
        "ethernet" => {
            let port = ctx
                .config
                .get_port_by_partial_name(&format!("ethernet {}", number))
                .filter(|port| !port.is_virtual_interface())
                .ok_or_else(|| CommandError::InvalidInterface {
                    text: format!("ethernet {}", number),
                })?;
            Ok(Transition::Enter(Mode::InterfaceConfig {
                port: port.name.clone(),
            }))
        }
        _ => {
            let port = ctx
                .config
                .get_port(&format!("ve {}", number))
                .filter(|port| port.is_virtual_interface())
                .ok_or(CommandError::InvalidVirtualInterface)?;
            Ok(Transition::Enter(Mode::VirtualInterfaceConfig {
                port: port.name.clone(),
            }))
        }
    }
}

fn vlan(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    let number = parse_vlan(args, 0)?;
    let name = match args.opt_keyword(1, &VLAN_OPTIONS)? {
        Some(_) => Some(args.get(2)?),
        None => None,
    };
    args.end(3)?;

    if ctx.config.get_vlan(number).is_none() {
        let vlan = ctx.config.new_vlan(number);
        ctx.config.add_vlan(vlan)?;
    }
    if let (Some(name), Some(vlan)) = (name, ctx.config.get_vlan_mut(number)) {
        vlan.name = Some(name.to_string());
    }

    Ok(Transition::Enter(Mode::VlanConfig { vlan: number }))
}

fn vrf(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    let name = args.get(0)?;
    args.end(1)?;

    let vrf = ctx.config.new_vrf(name);
    ctx.config.add_vrf(vrf);
    Ok(Transition::Stay)
}

fn no_vlan(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    let number = parse_vlan(args, 0)?;
    args.end(1)?;

    if ctx.config.get_vlan(number).is_some() {
        ctx.config.remove_vlan(number)?;
        info!("VLAN {} removed", number);
    }
    Ok(Transition::Stay)
}

fn no_vrf(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    let name = args.get(0)?;
    args.end(1)?;

    ctx.config.remove_vrf(name)?;
    Ok(Transition::Stay)
}
