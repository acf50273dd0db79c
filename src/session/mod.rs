//! Console session management module
//!
//! This module provides the core components of the console: per-session
//! command history, command dispatch, the session itself and the session
//! manager that owns every session, their lineage and input focus.

pub mod action_channel;
pub mod command_router;
pub mod console;
pub mod history;
pub mod session_manager;
pub mod surface;

#[cfg(test)]
pub(crate) mod testing;

pub use action_channel::{ActionChannel, SessionEvent};
pub use command_router::{
    CommandContext, CommandDispatcher, CommandError, CommandRegistry, CommandSpec, HELP_COMMAND,
};
pub use console::{DEFAULT_WELCOME_COMMAND, Session};
pub use history::HistoryLedger;
pub use session_manager::{InputOutcome, ProcessId, ProcessState, SessionManager, Termination};
pub use surface::{InputEvent, Surface, SurfaceProvider};
