//! Command processors, one module per mode
//!
//! Each mode owns a positive and a negative [`CommandTable`]. A line starting
//! with the exact word `no` is dispatched to the negative table with the
//! remaining tokens; every other line goes to the positive table.

mod global;
mod interface;
mod privileged;
mod virtual_interface;
mod vlan;
mod vrrp;

use tracing::debug;

use fakeswitch_config::{ConfigError, Port, SwitchConfiguration, VirtualInterface, Vrrp};

use crate::error::{CommandError, CommandResult};
use crate::matcher::{Args, CommandTable};
use crate::mode::{Mode, ModeKind};

/// Negation word, never abbreviated
pub const NEGATION: &str = "no";

/// What the session does with its mode stack after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Stay,
    /// Push a nested mode
    Enter(Mode),
    /// Pop one mode; at the bottom this closes the session
    Exit,
    /// Pop back to privileged exec
    End,
}

pub type Handler = fn(&mut CommandContext<'_>, &Args<'_>) -> CommandResult<Transition>;

/// Command tables of one mode
#[derive(Debug, Default)]
pub struct ModeCommands {
    pub positive: CommandTable,
    pub negative: CommandTable,
}

impl ModeCommands {
    pub fn is_unambiguous(&self) -> bool {
        self.positive.is_unambiguous() && self.negative.is_unambiguous()
    }
}

pub fn commands_for(kind: ModeKind) -> &'static ModeCommands {
    match kind {
        ModeKind::PrivilegedExec => &*privileged::COMMANDS,
        ModeKind::GlobalConfig => &*global::COMMANDS,
        ModeKind::VlanConfig => &*vlan::COMMANDS,
        ModeKind::InterfaceConfig => &*interface::COMMANDS,
        ModeKind::VirtualInterfaceConfig => &*virtual_interface::COMMANDS,
        ModeKind::VrrpConfig => &*vrrp::COMMANDS,
    }
}

/// State a handler works on
pub struct CommandContext<'a> {
    pub config: &'a mut SwitchConfiguration,
    pub mode: &'a Mode,
}

impl<'a> CommandContext<'a> {
    pub fn new(config: &'a mut SwitchConfiguration, mode: &'a Mode) -> Self {
        Self { config, mode }
    }

    fn port_name(&self) -> CommandResult<&'a str> {
        let mode: &'a Mode = self.mode;
        mode.port_name()
            .ok_or_else(|| CommandError::invalid_input(&[mode.to_string()]))
    }

    pub fn port_by_name_mut(&mut self, name: &str) -> CommandResult<&mut Port> {
        self.config
            .get_port_mut(name)
            .ok_or_else(|| ConfigError::port_not_found(name).into())
    }

    /// Port edited by the current mode
    pub fn port_mut(&mut self) -> CommandResult<&mut Port> {
        let name = self.port_name()?;
        self.port_by_name_mut(name)
    }

    pub fn virtual_interface_mut(&mut self) -> CommandResult<&mut VirtualInterface> {
        let name = self.port_name()?;
        self.port_mut()?
            .as_virtual_interface_mut()
            .ok_or_else(|| {
                ConfigError::NotAVirtualInterface {
                    name: name.to_string(),
                }
                .into()
            })
    }

    /// VRRP group edited by the current mode
    pub fn vrrp_mut(&mut self) -> CommandResult<&mut Vrrp> {
        let mode: &'a Mode = self.mode;
        let (port, group) = match mode {
            Mode::VrrpConfig { port, group } => (port.as_str(), *group),
            other => return Err(CommandError::invalid_input(&[other.to_string()])),
        };
        self.virtual_interface_mut()?
            .get_vrrp_group_mut(group)
            .ok_or_else(|| {
                ConfigError::VrrpGroupNotFound {
                    port: port.to_string(),
                    group,
                }
                .into()
            })
    }
}

/// Resolve `tokens` against the tables of the current mode and run the handler
pub fn dispatch(ctx: &mut CommandContext<'_>, tokens: &[&str]) -> CommandResult<Transition> {
    let commands = commands_for(ctx.mode.kind());
    let (table, tokens) = match tokens.split_first() {
        Some((&first, rest)) if first == NEGATION => (&commands.negative, rest),
        _ => (&commands.positive, tokens),
    };

    let (first, rest) = tokens.split_first().ok_or(CommandError::Incomplete)?;
    let (keyword, handler) = table
        .resolve(first)
        .ok_or_else(|| CommandError::invalid_input(tokens))?;

    debug!(mode = %ctx.mode, command = keyword, "Dispatching command");
    handler(ctx, &Args::new(rest))
}

pub(crate) fn exit(_: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    args.end(0)?;
    Ok(Transition::Exit)
}

pub(crate) fn end(_: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    args.end(0)?;
    Ok(Transition::End)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fakeswitch_types::VlanId;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_every_table_is_unambiguous() {
        for kind in ModeKind::ALL {
            let commands = commands_for(kind);
            assert!(
                commands.is_unambiguous(),
                "{:?}: {:?} / {:?}",
                kind,
                commands.positive,
                commands.negative
            );
            assert!(!commands.positive.is_empty(), "{:?}", kind);
        }
    }

    #[test]
    fn test_dispatch_negation_needs_exact_word() {
        let mut config = SwitchConfiguration::new("127.0.0.1", "sw");
        let vrf = config.new_vrf("CUST");
        config.add_vrf(vrf);
        let mode = Mode::GlobalConfig;

        let mut ctx = CommandContext::new(&mut config, &mode);
        assert!(matches!(
            dispatch(&mut ctx, &["n", "vrf", "CUST"]),
            Err(CommandError::InvalidInput { .. })
        ));
        assert_eq!(
            dispatch(&mut ctx, &["no", "vrf", "CUST"]).unwrap(),
            Transition::Stay
        );
        assert!(config.get_vrf("CUST").is_none());
    }

    #[test]
    fn test_dispatch_incomplete_negation() {
        let mut config = SwitchConfiguration::new("127.0.0.1", "sw");
        let mode = Mode::GlobalConfig;
        let mut ctx = CommandContext::new(&mut config, &mode);
        assert!(matches!(
            dispatch(&mut ctx, &["no"]),
            Err(CommandError::Incomplete)
        ));
    }

    #[test]
    fn test_context_port_lookup() {
        let mut config = SwitchConfiguration::new("127.0.0.1", "sw");
        let ve = config.new_vlan_port(VlanId::new(7).unwrap(), "ve 7");
        config.add_port(ve).unwrap();

        let mode = Mode::VirtualInterfaceConfig {
            port: "ve 7".to_string(),
        };
        let mut ctx = CommandContext::new(&mut config, &mode);
        assert_eq!(ctx.virtual_interface_mut().unwrap().vlan_id.as_u16(), 7);
        assert!(matches!(
            ctx.vrrp_mut(),
            Err(CommandError::InvalidInput { .. })
        ));

        let gone = Mode::InterfaceConfig {
            port: "ethernet 9/9".to_string(),
        };
        let mut ctx = CommandContext::new(&mut config, &gone);
        assert!(matches!(
            ctx.port_mut(),
            Err(CommandError::InvalidInterface { .. })
        ));
    }
}
