//! VRRP group configuration mode (`SSH@switch(config-vif-<vlan>-vrid-<g>)#`)

use once_cell::sync::Lazy;

use fakeswitch_types::IpAddr;

use super::{end, exit, CommandContext, ModeCommands, Transition};
use crate::error::{CommandError, CommandResult};
use crate::matcher::{Args, CommandTable, Keywords};

const BACKUP_OPTIONS: Keywords = Keywords::new(&["priority"]);
const TRACK_OPTIONS: Keywords = Keywords::new(&["track-priority"]);
const ADVERTISE_OPTIONS: Keywords = Keywords::new(&["backup"]);
const TRACK_PORT_KINDS: Keywords = Keywords::new(&["ethernet"]);

pub(super) static COMMANDS: Lazy<ModeCommands> = Lazy::new(|| ModeCommands {
    positive: CommandTable::builder()
        .command("ip-address", ip_address)
        .command("backup", backup)
        .command("advertise", advertise)
        .command("hello-interval", hello_interval)
        .command("dead-interval", dead_interval)
        .command("non-preempt-mode", non_preempt_mode)
        .command("track-port", track_port)
        .command("activate", activate)
        .command("exit", exit)
        .command("end", end)
        .build(),
    negative: CommandTable::builder()
        .command("ip-address", no_ip_address)
        .command("backup", no_backup)
        .command("advertise", no_advertise)
        .command("non-preempt-mode", no_non_preempt_mode)
        .command("track-port", no_track_port)
        .command("activate", no_activate)
        .build(),
});

fn ip_address(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    let ip: IpAddr = args.parse(0)?;
    args.end(1)?;
    ctx.vrrp_mut()?.add_ip_address(ip);
    Ok(Transition::Stay)
}

fn no_ip_address(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    let ip: IpAddr = args.parse(0)?;
    args.end(1)?;
    ctx.vrrp_mut()?.remove_ip_address(&ip);
    Ok(Transition::Stay)
}

// backup priority <p> [track-priority <t>]
fn backup(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    args.keyword(0, &BACKUP_OPTIONS)?;
    let priority: u8 = args.parse(1)?;
    let track_priority = match args.opt_keyword(2, &TRACK_OPTIONS)? {
        Some(_) => Some(args.parse::<u8>(3)?),
        None => None,
    };
    args.end(if track_priority.is_some() { 4 } else { 2 })?;

    let vrrp = ctx.vrrp_mut()?;
    vrrp.priority = Some(priority);
    vrrp.track_priority = track_priority;
    Ok(Transition::Stay)
}

fn no_backup(ctx: &mut CommandContext<'_>, _: &Args<'_>) -> CommandResult<Transition> {
    let vrrp = ctx.vrrp_mut()?;
    vrrp.priority = None;
    vrrp.track_priority = None;
    Ok(Transition::Stay)
}

fn advertise(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    args.keyword(0, &ADVERTISE_OPTIONS)?;
    args.end(1)?;
    ctx.vrrp_mut()?.advertising = Some(true);
    Ok(Transition::Stay)
}

fn no_advertise(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    args.keyword(0, &ADVERTISE_OPTIONS)?;
    args.end(1)?;
    ctx.vrrp_mut()?.advertising = Some(false);
    Ok(Transition::Stay)
}

fn hello_interval(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    let seconds: u32 = args.parse(0)?;
    args.end(1)?;
    ctx.vrrp_mut()?.timers_hello = Some(seconds);
    Ok(Transition::Stay)
}

fn dead_interval(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    let seconds: u32 = args.parse(0)?;
    args.end(1)?;
    ctx.vrrp_mut()?.timers_hold = Some(seconds);
    Ok(Transition::Stay)
}

fn non_preempt_mode(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    args.end(0)?;
    ctx.vrrp_mut()?.preempt = false;
    Ok(Transition::Stay)
}

fn no_non_preempt_mode(ctx: &mut CommandContext<'_>, _: &Args<'_>) -> CommandResult<Transition> {
    ctx.vrrp_mut()?.preempt = true;
    Ok(Transition::Stay)
}

/// Resolve `ethernet <p>` to the name of an existing port
fn tracked_port(ctx: &CommandContext<'_>, args: &Args<'_>) -> CommandResult<String> {
    args.keyword(0, &TRACK_PORT_KINDS)?;
    let number = args.get(1)?;
    args.end(2)?;

    let text = format!("ethernet {}", number);
    ctx.config
        .get_port_by_partial_name(&text)
        .map(|port| port.name.clone())
        .ok_or(CommandError::InvalidInterface { text })
}

fn track_port(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    let port = tracked_port(ctx, args)?;
    let vrrp = ctx.vrrp_mut()?;
    let decrement = vrrp
        .track_priority
        .map(|priority| priority.to_string())
        .unwrap_or_default();
    vrrp.track.insert(port, decrement);
    Ok(Transition::Stay)
}

fn no_track_port(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    let port = tracked_port(ctx, args)?;
    ctx.vrrp_mut()?.track.remove(&port);
    Ok(Transition::Stay)
}

fn activate(ctx: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    args.end(0)?;
    ctx.vrrp_mut()?.activated = Some(true);
    Ok(Transition::Stay)
}

fn no_activate(ctx: &mut CommandContext<'_>, _: &Args<'_>) -> CommandResult<Transition> {
    ctx.vrrp_mut()?.activated = Some(false);
    Ok(Transition::Stay)
}
