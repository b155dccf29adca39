//! Privileged exec mode (`SSH@switch#`)

use once_cell::sync::Lazy;

use super::{exit, CommandContext, ModeCommands, Transition};
use crate::error::CommandResult;
use crate::matcher::{Args, CommandTable, Keywords};
use crate::mode::Mode;

const CONFIGURE_TARGETS: Keywords = Keywords::new(&["terminal"]);

pub(super) static COMMANDS: Lazy<ModeCommands> = Lazy::new(|| ModeCommands {
    positive: CommandTable::builder()
        .command("configure", configure)
        .command("exit", exit)
        .build(),
    negative: CommandTable::default(),
});

fn configure(_: &mut CommandContext<'_>, args: &Args<'_>) -> CommandResult<Transition> {
    args.keyword(0, &CONFIGURE_TARGETS)?;
    args.end(1)?;
    Ok(Transition::Enter(Mode::GlobalConfig))
}
