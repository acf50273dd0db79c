//! Recording surface used by unit tests

use std::cell::RefCell;
use std::rc::Rc;

use super::command_router::CommandDispatcher;
use super::console::Session;
use super::session_manager::{ProcessId, SessionManager};
use super::surface::{Surface, SurfaceProvider};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    Output(String),
    ShowInput,
    SetInput(String),
    Freeze(String),
    Visible(bool),
    Clear,
}

type CallLog = Rc<RefCell<Vec<(ProcessId, SurfaceCall)>>>;

#[derive(Debug, Clone, Default)]
pub struct RecordingProvider {
    log: CallLog,
}

impl RecordingProvider {
    pub fn calls_for(&self, id: ProcessId) -> Vec<SurfaceCall> {
        self.log
            .borrow()
            .iter()
            .filter(|(pid, _)| *pid == id)
            .map(|(_, call)| call.clone())
            .collect()
    }

    pub fn last_visibility(&self, id: ProcessId) -> Option<bool> {
        self.calls_for(id).into_iter().rev().find_map(|call| match call {
            SurfaceCall::Visible(visible) => Some(visible),
            _ => None,
        })
    }

    pub fn reset(&self) {
        self.log.borrow_mut().clear();
    }
}

impl SurfaceProvider for RecordingProvider {
    fn create_surface(&mut self, id: ProcessId) -> Box<dyn Surface> {
        Box::new(RecordingSurface {
            id,
            log: Rc::clone(&self.log),
        })
    }
}

struct RecordingSurface {
    id: ProcessId,
    log: CallLog,
}

impl RecordingSurface {
    fn push(&self, call: SurfaceCall) {
        self.log.borrow_mut().push((self.id, call));
    }
}

impl Surface for RecordingSurface {
    fn display_output(&mut self, text: &str) {
        self.push(SurfaceCall::Output(text.to_string()));
    }

    fn show_input_line(&mut self) {
        self.push(SurfaceCall::ShowInput);
    }

    fn set_input_text(&mut self, text: &str) {
        self.push(SurfaceCall::SetInput(text.to_string()));
    }

    fn replace_input_with_text(&mut self, text: &str) {
        self.push(SurfaceCall::Freeze(text.to_string()));
    }

    fn set_visible(&mut self, visible: bool) {
        self.push(SurfaceCall::Visible(visible));
    }

    fn clear(&mut self) {
        self.push(SurfaceCall::Clear);
    }
}

/// Launch a session with the default welcome command and no explicit parent
pub fn launch_plain(manager: &mut SessionManager, dispatcher: CommandDispatcher) -> ProcessId {
    manager.launch_process(|surface| Session::new(surface, dispatcher), None)
}
