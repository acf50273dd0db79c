//! Built-in console commands
//!
//! Every command is a plain registry entry; the ones that manage processes
//! reach the session manager through their [`CommandContext`].
//!
//! [`CommandContext`]: crate::session::CommandContext

mod motd;
mod process;
mod system;

pub use motd::{JOKES, motd_text};
pub use process::{PROCESS_COMMANDS, exit_process, spawn_terminal};
pub use system::format_uptime;

use crate::config::Config;
use crate::session::CommandRegistry;

/// Registry holding every built-in command, configured from `config`
pub fn builtin_registry(config: &Config) -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    process::register(&mut registry);
    system::register(&mut registry, config);
    motd::register(&mut registry);
    registry
}
