//! Interface configuration mode (`SSH@switch(config-if-e1000-<n>)#`)
//!
//! The same commands are available on virtual interfaces, which extend these
//! tables with their `ip` entry.

use once_cell::sync::Lazy;
use tracing::info;

use super::{end, exit, CommandContext, ModeCommands, Transition};
use crate::error::{CommandError, CommandResult};
use crate::matcher::{Args, CommandTable, CommandTableBuilder, Keywords};

const VRF_OPTIONS: Keywords = Keywords::new(&["forwarding"]);

pub(super) static COMMANDS: Lazy<ModeCommands> = Lazy::new(|| ModeCommands {
    positive: positive_commands().build(),
    negative: negative_commands().build(),
});

pub(super) fn positive_commands() -> CommandTableBuilder {
    CommandTable::builder()
        .command("port-name", port_name)
        .command("enable", enable)
        .command("disable", disable)
        .command("vrf", vrf)
        .command("speed-duplex", speed_duplex)
        .command("exit", exit)
        .command("end", end)
}

pub(super) fn negative_commands() -> CommandTableBuilder {
    CommandTable::builder()
        .command("port-name", no_port_name)
        .command("vrf", no_vrf)
        .command("speed-duplex", no_speed_duplex)
}

fn port_name(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    let description = args.rest(0).ok_or(CommandError::Incomplete)?;
    ctx.port_mut()?.description = Some(description);
    Ok(Transition::Stay)
}

fn enable(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    args.end(0)?;
    ctx.port_mut()?.shutdown = Some(false);
    Ok(Transition::Stay)
}

fn disable(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    args.end(0)?;
    ctx.port_mut()?.shutdown = Some(true);
    Ok(Transition::Stay)
}

fn vrf(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    args.keyword(0, &VRF_OPTIONS)?;
    let name = args.get(1)?;
    args.end(2)?;

    if ctx.config.get_vrf(name).is_none() {
        return Err(CommandError::UnknownVrf {
            name: name.to_string(),
        });
    }

    let port = ctx.port_mut()?;
    port.vrf = Some(name.to_string());
    info!("Port {} bound to VRF {}", port.name, name);
    Ok(Transition::Stay)
}

fn speed_duplex(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    let value = args.get(0)?;
    args.end(1)?;

    let port = ctx.port_mut()?;
    if value == "auto" {
        port.speed = None;
        port.auto_negotiation = Some(true);
    } else {
        port.speed = Some(value.to_string());
        port.auto_negotiation = Some(false);
    }
    Ok(Transition::Stay)
}

fn no_port_name(ctx: &mut CommandContext<'_>, _: &Args<'_>) -> CommandResult<Transition> {
    ctx.port_mut()?.description = None;
    Ok(Transition::Stay)
}

fn no_vrf(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    args.keyword(0, &VRF_OPTIONS)?;
    let name = args.get(1)?;
    args.end(2)?;

    if ctx.config.get_vrf(name).is_none() {
        return Err(CommandError::UnknownVrf {
            name: name.to_string(),
        });
    }

    let port = ctx.port_mut()?;
    if port.vrf.as_deref() == Some(name) {
        port.vrf = None;
    }
    Ok(Transition::Stay)
}

fn no_speed_duplex(ctx: &mut CommandContext<'_>, _: &Args<'_>) -> CommandResult<Transition> {
    let port = ctx.port_mut()?;
    port.speed = None;
    port.auto_negotiation = None;
    Ok(Transition::Stay)
}
