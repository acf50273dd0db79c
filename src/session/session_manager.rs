//! Session manager: process table, focus and lifecycle of console sessions

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, info, warn};

use super::command_router::CommandContext;
use super::console::Session;
use super::surface::{InputEvent, Surface, SurfaceProvider};

/// Identifier of a console process; strictly increasing, never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProcessId(u64);

impl ProcessId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "process-{}", self.0)
    }
}

/// Entry of the process table. The parent recorded at launch may point at a
/// process that has since exited.
#[derive(Debug)]
struct ProcessRecord {
    session: Session,
    parent_id: Option<ProcessId>,
}

/// Observable state of a process id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    Focused,
    Backgrounded,
    Terminated,
}

/// Result of [`SessionManager::terminate_process`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The id was not in the table; nothing changed
    NotFound,
    /// The last process exited; the console must be rebuilt from scratch
    Reload,
    /// Focus went back to the terminated process's live parent
    ReturnedToParent(ProcessId),
    /// No live parent; focus went to the lowest surviving id
    FellBack(ProcessId),
}

impl Termination {
    pub fn should_reload(&self) -> bool {
        matches!(self, Termination::Reload)
    }

    /// Parent that should be told about the exit and re-prompted
    pub fn parent_process(&self) -> Option<ProcessId> {
        match self {
            Termination::ReturnedToParent(parent) => Some(*parent),
            _ => None,
        }
    }
}

/// What happened while handling one input event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputOutcome {
    /// A command line was dispatched
    pub executed: bool,
    /// A handler asked for the whole console to be rebuilt
    pub reload_requested: bool,
}

/// Tracks live sessions, their lineage and which one owns input focus
pub struct SessionManager {
    /// Process table ordered by id
    processes: BTreeMap<ProcessId, ProcessRecord>,
    /// Focus pointer
    active: Option<ProcessId>,
    /// Last allocated id
    last_process_id: u64,
    /// Rendering layer hook for new surfaces
    surfaces: Box<dyn SurfaceProvider>,
    /// A welcome command is running
    booting: bool,
    /// The last process exited while a welcome command ran
    reload_pending: bool,
}

impl SessionManager {
    /// Create an empty manager provisioning surfaces from `surfaces`
    pub fn new(surfaces: Box<dyn SurfaceProvider>) -> Self {
        Self {
            processes: BTreeMap::new(),
            active: None,
            last_process_id: 0,
            surfaces,
            booting: false,
            reload_pending: false,
        }
    }

    /// Launch a new process and give it focus.
    ///
    /// `factory` binds a session to the freshly provisioned surface. The
    /// parent defaults to the focused process; the first process has none.
    pub fn launch_process<F>(&mut self, factory: F, parent: Option<ProcessId>) -> ProcessId
    where
        F: FnOnce(Box<dyn Surface>) -> Session,
    {
        self.last_process_id += 1;
        let id = ProcessId(self.last_process_id);

        let mut surface = self.surfaces.create_surface(id);
        if !self.processes.is_empty() {
            surface.set_visible(false);
        }

        let session = factory(surface);
        let parent_id = parent.or(self.active);
        self.processes.insert(id, ProcessRecord { session, parent_id });

        match parent_id {
            Some(parent) => info!("Launched {} (parent {})", id, parent),
            None => info!("Launched {} (root)", id),
        }

        self.boot(id);
        self.switch_to_process(id);
        id
    }

    /// Run the welcome command once and show the first prompt.
    ///
    /// Processes launched by a welcome command skip their own welcome, so a
    /// welcome that spawns terminals cannot recurse.
    fn boot(&mut self, id: ProcessId) {
        let Some(session) = self.get_process(id) else {
            return;
        };

        let dispatcher = session.dispatcher().clone();
        let welcome = session
            .welcome()
            .filter(|name| dispatcher.has_command(name))
            .map(str::to_string);

        if let Some(name) = welcome {
            if self.booting {
                warn!("Skipping welcome '{}' for {}: launched during boot", name, id);
            } else {
                self.booting = true;
                let mut ctx = CommandContext::new(self, id);
                let output = dispatcher.execute(&name, &mut ctx);
                let reload_requested = ctx.reload_requested();
                self.booting = false;

                if reload_requested {
                    warn!("Welcome '{}' terminated the last process", name);
                    self.reload_pending = true;
                }
                if let Some(session) = self.get_process_mut(id) {
                    session.display(&output);
                }
            }
        }

        if let Some(session) = self.get_process_mut(id) {
            session.prompt();
        }
    }

    /// A welcome command is running in some process
    pub fn is_booting(&self) -> bool {
        self.booting
    }

    /// Consume a reload requested while a process was booting
    pub fn take_reload_request(&mut self) -> bool {
        std::mem::take(&mut self.reload_pending)
    }

    /// Give `id` focus, hiding every other surface. Unknown ids are ignored.
    pub fn switch_to_process(&mut self, id: ProcessId) {
        if !self.processes.contains_key(&id) {
            debug!("Ignoring switch to unknown {}", id);
            return;
        }

        for (pid, record) in self.processes.iter_mut() {
            record.session.set_focused(*pid == id);
        }
        self.active = Some(id);
        debug!("Focus switched to {}", id);
    }

    /// Remove a process and hand focus to its parent or a survivor.
    ///
    /// Reparenting is shallow: if the recorded parent has already exited,
    /// focus falls back to the lowest surviving id.
    pub fn terminate_process(&mut self, id: ProcessId) -> Termination {
        let Some(record) = self.processes.remove(&id) else {
            debug!("Ignoring termination of unknown {}", id);
            return Termination::NotFound;
        };

        let parent_id = record.parent_id;
        drop(record);
        info!("Terminated {}", id);

        if let Some(parent) = parent_id.filter(|parent| self.processes.contains_key(parent)) {
            self.switch_to_process(parent);
            return Termination::ReturnedToParent(parent);
        }

        match self.processes.keys().next().copied() {
            Some(next) => {
                self.switch_to_process(next);
                Termination::FellBack(next)
            }
            None => {
                self.active = None;
                info!("Last process exited; console needs a reload");
                Termination::Reload
            }
        }
    }

    /// Submit one input line to a session.
    ///
    /// The handler may terminate the session or move focus; the session is
    /// only re-prompted if it is still focused afterwards.
    pub fn submit(&mut self, id: ProcessId, raw_line: &str) -> InputOutcome {
        let Some(session) = self.get_process_mut(id) else {
            return InputOutcome::default();
        };
        let Some(line) = session.accept_line(raw_line) else {
            return InputOutcome::default();
        };
        let dispatcher = session.dispatcher().clone();

        let mut ctx = CommandContext::new(self, id);
        let output = dispatcher.execute(&line, &mut ctx);
        let reload_requested = ctx.reload_requested();

        if let Some(session) = self.get_process_mut(id) {
            session.display(&output);
        }

        if self.active == Some(id) {
            if let Some(session) = self.get_process_mut(id) {
                session.prompt();
            }
        } else {
            debug!("{} lost focus during '{}'; not prompting", id, line);
        }

        InputOutcome {
            executed: true,
            reload_requested,
        }
    }

    /// Route an input event to the focused session
    pub fn handle_input(&mut self, event: InputEvent) -> InputOutcome {
        let Some(id) = self.active else {
            return InputOutcome {
                executed: false,
                reload_requested: self.take_reload_request(),
            };
        };

        match event {
            InputEvent::Submit(line) => return self.submit(id, &line),
            InputEvent::HistoryUp => {
                if let Some(session) = self.get_process_mut(id) {
                    session.recall_previous();
                }
            }
            InputEvent::HistoryDown => {
                if let Some(session) = self.get_process_mut(id) {
                    session.recall_next();
                }
            }
            InputEvent::ClearScreen => {
                if let Some(session) = self.get_process_mut(id) {
                    session.clear_screen();
                }
            }
        }

        InputOutcome::default()
    }

    pub fn active_process_id(&self) -> Option<ProcessId> {
        self.active
    }

    pub fn get_process(&self, id: ProcessId) -> Option<&Session> {
        self.processes.get(&id).map(|record| &record.session)
    }

    pub fn get_process_mut(&mut self, id: ProcessId) -> Option<&mut Session> {
        self.processes.get_mut(&id).map(|record| &mut record.session)
    }

    pub fn parent_of(&self, id: ProcessId) -> Option<ProcessId> {
        self.processes.get(&id).and_then(|record| record.parent_id)
    }

    /// Live process ids in ascending order
    pub fn process_ids(&self) -> impl Iterator<Item = ProcessId> + '_ {
        self.processes.keys().copied()
    }

    /// `None` for ids this manager never allocated
    pub fn process_state(&self, id: ProcessId) -> Option<ProcessState> {
        if id.0 == 0 || id.0 > self.last_process_id {
            return None;
        }
        if self.active == Some(id) {
            Some(ProcessState::Focused)
        } else if self.processes.contains_key(&id) {
            Some(ProcessState::Backgrounded)
        } else {
            Some(ProcessState::Terminated)
        }
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}
