//! Brocade-style configuration shell.
//!
//! Interprets command lines the way the switch CLI does and applies them to
//! a shared [`SwitchConfiguration`](fakeswitch_config::SwitchConfiguration):
//!
//! - [`matcher`]: abbreviated keyword resolution (`conf t`, `int ve 10`)
//! - [`mode`]: configuration modes and their prompts
//! - [`processor`]: per-mode command tables and handlers
//! - [`emitter`]: response output, one line at a time
//! - [`Session`]: mode stack of one connected user
//!
//! # Example
//!
//! ```
//! use fakeswitch_config::{SharedConfiguration, SwitchConfiguration};
//! use fakeswitch_shell::{Session, ShellSettings};
//!
//! let config = SwitchConfiguration::builder("127.0.0.1", "my_switch")
//!     .ports(["ethernet 1/1"])
//!     .build()
//!     .unwrap();
//! let mut session = Session::new(SharedConfiguration::new(config), ShellSettings::default());
//! let mut out: Vec<String> = Vec::new();
//!
//! session.process_line("conf t", &mut out).unwrap();
//! session.process_line("vlan 5000", &mut out).unwrap();
//!
//! assert_eq!(session.prompt(), "SSH@my_switch(config)#");
//! assert_eq!(out, vec!["Error: vlan id 5000 is outside of allowed max of 4094"]);
//! ```

pub mod emitter;
pub mod error;
pub mod matcher;
pub mod mode;
pub mod processor;
pub mod session;
pub mod settings;

pub use emitter::{LineWriter, ResponseEmitter};
pub use error::{CommandError, CommandResult};
pub use matcher::{keyword_matches, Args, CommandTable, Keywords};
pub use mode::{Mode, ModeKind};
pub use processor::{commands_for, dispatch, CommandContext, Handler, ModeCommands, Transition};
pub use session::Session;
pub use settings::{ShellSettings, UnknownCommandPolicy};
