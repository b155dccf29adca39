//! Virtual interface configuration mode (`SSH@switch(config-vif-<vlan>)#`)

use once_cell::sync::Lazy;
use tracing::{debug, info};

use fakeswitch_types::{IpNetwork, VrId};

use super::interface::{negative_commands, positive_commands};
use super::{CommandContext, ModeCommands, Transition};
use crate::error::{CommandError, CommandResult};
use crate::matcher::{Args, Keywords};
use crate::mode::Mode;

const IP_COMMANDS: Keywords = Keywords::new(&["address", "access-group", "vrrp-extended"]);
const ADDRESS_OPTIONS: Keywords = Keywords::new(&["secondary"]);
const DIRECTIONS: Keywords = Keywords::new(&["in", "out"]);
const VRRP_COMMANDS: Keywords = Keywords::new(&["vrid", "auth-type"]);
const AUTH_TYPES: Keywords = Keywords::new(&["simple-text-auth", "no-auth"]);

pub(super) static COMMANDS: Lazy<ModeCommands> = Lazy::new(|| ModeCommands {
    positive: positive_commands().command("ip", ip).build(),
    negative: negative_commands().command("ip", no_ip).build(),
});

fn port_name(ctx: &CommandContext<'_>) -> CommandResult<String> {
    ctx.mode
        .port_name()
        .map(str::to_string)
        .ok_or_else(|| CommandError::invalid_input(&[ctx.mode.to_string()]))
}

fn ip(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    match args.keyword(0, &IP_COMMANDS)? {
        "address" => ip_address(ctx, args),
        "access-group" => ip_access_group(ctx, args),
        _ => ip_vrrp_extended(ctx, args),
    }
}

fn no_ip(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    match args.keyword(0, &IP_COMMANDS)? {
        "address" => no_ip_address(ctx, args),
        "access-group" => no_ip_access_group(ctx, args),
        _ => no_ip_vrrp_extended(ctx, args),
    }
}

fn ip_address(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    let network: IpNetwork = args.parse(1)?;
    let secondary = args.opt_keyword(2, &ADDRESS_OPTIONS)?.is_some();
    args.end(3)?;

    let port = port_name(ctx)?;
    ctx.config.assign_ip(&port, network, secondary)?;
    debug!("Assigned {} to {}", network, port);
    Ok(Transition::Stay)
}

fn no_ip_address(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    let network: IpNetwork = args.parse(1)?;
    args.end(2)?;

    let port = port_name(ctx)?;
    ctx.config.unassign_ip(&port, network)?;
    Ok(Transition::Stay)
}

fn ip_access_group(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    let name = args.get(1)?;
    let direction = args.keyword(2, &DIRECTIONS)?;
    args.end(3)?;

    let vif = ctx.virtual_interface_mut()?;
    let slot = match direction {
        "in" => &mut vif.access_group_in,
        _ => &mut vif.access_group_out,
    };
    *slot = Some(name.to_string());
    Ok(Transition::Stay)
}

fn no_ip_access_group(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    let name = args.get(1)?;
    let wrong_name = || CommandError::WrongAccessList {
        name: name.to_string(),
    };
    let direction = match args.opt(2) {
        None => return Err(wrong_name()),
        Some(_) => args.keyword(2, &DIRECTIONS)?,
    };
    args.end(3)?;

    let vif = ctx.virtual_interface_mut()?;
    let slot = match direction {
        "in" => &mut vif.access_group_in,
        _ => &mut vif.access_group_out,
    };
    if slot.as_deref() != Some(name) {
        return Err(wrong_name());
    }
    *slot = None;
    Ok(Transition::Stay)
}

fn ip_vrrp_extended(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    match args.keyword(1, &VRRP_COMMANDS)? {
        "vrid" => {
            let group: VrId = args.parse(2)?;
            args.end(3)?;

            let port = port_name(ctx)?;
            let exists = ctx.virtual_interface_mut()?.get_vrrp_group(group).is_some();
            if !exists {
                let vrrp = ctx.config.new_vrrp(group);
                ctx.virtual_interface_mut()?.add_vrrp_group(vrrp);
                info!("Created VRRP group {} on {}", group, port);
            }
            Ok(Transition::Enter(Mode::VrrpConfig { port, group }))
        }
        _ => {
            let authentication = match args.keyword(2, &AUTH_TYPES)? {
                "simple-text-auth" => {
                    let secret = args.get(3)?;
                    args.end(4)?;
                    Some(secret.to_string())
                }
                _ => {
                    args.end(3)?;
                    None
                }
            };
            ctx.virtual_interface_mut()?.vrrp_common_authentication = authentication;
            Ok(Transition::Stay)
        }
    }
}

fn no_ip_vrrp_extended(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    match args.keyword(1, &VRRP_COMMANDS)? {
        "vrid" => {
            let group: VrId = args.parse(2)?;
            args.end(3)?;

            if ctx.virtual_interface_mut()?.remove_vrrp_group(group).is_some() {
                info!("Removed VRRP group {}", group);
            }
            Ok(Transition::Stay)
        }
        _ => {
            // Only the complete `auth-type simple-text-auth <secret>` form clears it.
            let complete = args.len() == 4
                && args.opt(2).is_some_and(|token| {
                    AUTH_TYPES.resolve(token) == Some("simple-text-auth")
                });
            if !complete {
                return Err(CommandError::Incomplete);
            }
            ctx.virtual_interface_mut()?.vrrp_common_authentication = None;
            Ok(Transition::Stay)
        }
    }
}
