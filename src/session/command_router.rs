//! Command registry and dispatcher for console sessions

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use super::console::Session;
use super::session_manager::{ProcessId, SessionManager};

/// Name of the virtual command that lists every registered command
pub const HELP_COMMAND: &str = "help";

/// Failure raised by a command handler
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("usage: {0}")]
    Usage(String),

    #[error("{0}")]
    Failed(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Handler signature shared by every command
pub type CommandHandler =
    Box<dyn Fn(&mut CommandContext<'_>, &[&str]) -> Result<String, CommandError>>;

/// One registry entry
pub struct CommandSpec {
    pub name: String,
    pub description: String,
    handler: CommandHandler,
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Mapping from command name to handler, ordered by name
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, CommandSpec>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command, replacing any previous entry with the same name
    pub fn register<F>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        handler: F,
    ) -> &mut Self
    where
        F: Fn(&mut CommandContext<'_>, &[&str]) -> Result<String, CommandError> + 'static,
    {
        let name = name.into();
        if name == HELP_COMMAND {
            warn!("'{}' is reserved; the registered handler will never run", HELP_COMMAND);
        }
        let spec = CommandSpec {
            name: name.clone(),
            description: description.into(),
            handler: Box::new(handler),
        };
        self.commands.insert(name, spec);
        self
    }

    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registered names in lexicographic order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Execution context handed to a command handler.
///
/// Borrows the session manager for the duration of one command so handlers
/// can spawn or terminate processes, including the calling one.
pub struct CommandContext<'a> {
    manager: &'a mut SessionManager,
    pid: ProcessId,
    reload_requested: bool,
}

impl<'a> CommandContext<'a> {
    pub fn new(manager: &'a mut SessionManager, pid: ProcessId) -> Self {
        Self {
            manager,
            pid,
            reload_requested: false,
        }
    }

    /// Process the command is running in
    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    pub fn manager(&mut self) -> &mut SessionManager {
        self.manager
    }

    /// Calling session, or `None` once it has been terminated
    pub fn session(&mut self) -> Option<&mut Session> {
        self.manager.get_process_mut(self.pid)
    }

    /// Ask the front-end to rebuild the whole console
    pub fn request_reload(&mut self) {
        self.reload_requested = true;
    }

    pub fn reload_requested(&self) -> bool {
        self.reload_requested
    }

    /// The command is some process's welcome command
    pub fn is_booting(&self) -> bool {
        self.manager.is_booting()
    }
}

/// Resolves raw input lines to registered handlers.
///
/// Stateless apart from the shared registry; cloning is cheap.
#[derive(Debug, Clone)]
pub struct CommandDispatcher {
    registry: Rc<CommandRegistry>,
}

impl CommandDispatcher {
    pub fn new(registry: Rc<CommandRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Rc<CommandRegistry> {
        &self.registry
    }

    /// Exact, case-sensitive lookup; `help` is always present
    pub fn has_command(&self, name: &str) -> bool {
        name == HELP_COMMAND || self.registry.contains(name)
    }

    /// Resolve and run one input line, returning the text to display.
    ///
    /// Unknown commands and handler failures come back as plain text.
    pub fn execute(&self, raw_input: &str, ctx: &mut CommandContext<'_>) -> String {
        let Some((name, args)) = parse_command_line(raw_input) else {
            return String::new();
        };

        if name == HELP_COMMAND {
            return self.help_text();
        }

        let Some(spec) = self.registry.get(name) else {
            debug!("Unknown command in {}: {}", ctx.pid(), name);
            return format!("Command not found: {}", name);
        };

        debug!("Executing '{}' in {} with args {:?}", name, ctx.pid(), args);

        match (spec.handler)(ctx, &args) {
            Ok(output) => output,
            Err(e) => {
                warn!("Command '{}' failed in {}: {}", name, ctx.pid(), e);
                format!("Error executing command: {}", e)
            }
        }
    }

    /// Listing produced by the virtual `help` command
    pub fn help_text(&self) -> String {
        let mut lines = vec!["Available commands:".to_string()];
        lines.extend(
            self.registry
                .commands
                .values()
                .filter(|spec| spec.name != HELP_COMMAND)
                .map(|spec| format!("  {} - {}", spec.name, spec.description)),
        );
        lines.join("\n")
    }
}

/// Split an input line into command name and positional arguments
pub fn parse_command_line(input: &str) -> Option<(&str, Vec<&str>)> {
    let mut parts = input.split_whitespace();
    let name = parts.next()?;
    Some((name, parts.collect()))
}
