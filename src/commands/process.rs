//! Commands that create and terminate console processes

use tracing::info;

use crate::session::{CommandContext, CommandError, CommandRegistry, Session, Termination};

pub(super) fn register(registry: &mut CommandRegistry) {
    registry
        .register("terminal", "Spawn a new terminal process", spawn_terminal)
        .register("exit", "Exit the current terminal process", exit_process);
}

/// Names that manage the process table and so cannot run as a welcome command
pub const PROCESS_COMMANDS: &[&str] = &["terminal", "exit"];

fn refuse_during_boot(ctx: &CommandContext<'_>, name: &str) -> Result<(), CommandError> {
    if ctx.is_booting() {
        return Err(CommandError::Failed(format!(
            "{} cannot run while a process is starting",
            name
        )));
    }
    Ok(())
}

/// Launch a child session sharing the caller's commands and welcome command
pub fn spawn_terminal(
    ctx: &mut CommandContext<'_>,
    _args: &[&str],
) -> Result<String, CommandError> {
    refuse_during_boot(ctx, "terminal")?;

    let parent = ctx.pid();
    let session = ctx
        .session()
        .ok_or_else(|| CommandError::Failed(format!("{} is no longer running", parent)))?;
    let dispatcher = session.dispatcher().clone();
    let welcome = session.welcome().map(str::to_string);

    let child = ctx.manager().launch_process(
        move |surface| Session::new(surface, dispatcher).with_welcome(welcome),
        Some(parent),
    );
    info!("{} spawned terminal {}", parent, child);

    Ok("New terminal process created.".to_string())
}

/// Terminate the calling process and hand control back to its parent
pub fn exit_process(
    ctx: &mut CommandContext<'_>,
    _args: &[&str],
) -> Result<String, CommandError> {
    refuse_during_boot(ctx, "exit")?;

    let pid = ctx.pid();

    match ctx.manager().terminate_process(pid) {
        Termination::Reload => ctx.request_reload(),
        Termination::ReturnedToParent(parent) => {
            if let Some(parent) = ctx.manager().get_process_mut(parent) {
                parent.display("Process terminated.");
                parent.prompt();
            }
        }
        Termination::FellBack(_) | Termination::NotFound => {}
    }

    Ok(String::new())
}
