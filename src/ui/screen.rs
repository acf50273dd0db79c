//! In-memory screens backing the TUI surfaces
//!
//! Each process gets a [`Screen`]. The session owns a [`ScreenSurface`]
//! writing into it while the [`ScreenDeck`] keeps a weak reference so the
//! renderer can draw whichever screen is focused. A screen disappears as soon
//! as its session is destroyed.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::{Rc, Weak};

use crate::session::{ProcessId, Surface, SurfaceProvider};

/// Scrollback plus an optional editable input line
#[derive(Debug, Clone)]
pub struct Screen {
    lines: VecDeque<String>,
    input: Option<String>,
    visible: bool,
    prompt: String,
    scrollback_limit: usize,
}

impl Screen {
    pub fn new(prompt: impl Into<String>, scrollback_limit: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            input: None,
            visible: true,
            prompt: prompt.into(),
            scrollback_limit: scrollback_limit.max(1),
        }
    }

    pub fn lines(&self) -> &VecDeque<String> {
        &self.lines
    }

    /// Current input text, `None` when no prompt is shown
    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    pub fn input_mut(&mut self) -> Option<&mut String> {
        self.input.as_mut()
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    fn push_line(&mut self, line: String) {
        self.lines.push_back(line);
        while self.lines.len() > self.scrollback_limit {
            self.lines.pop_front();
        }
    }
}

/// Surface handle owned by a session
pub struct ScreenSurface {
    screen: Rc<RefCell<Screen>>,
}

impl Surface for ScreenSurface {
    fn display_output(&mut self, text: &str) {
        let mut screen = self.screen.borrow_mut();
        for line in text.split('\n') {
            screen.push_line(line.to_string());
        }
    }

    fn show_input_line(&mut self) {
        self.screen.borrow_mut().input = Some(String::new());
    }

    fn set_input_text(&mut self, text: &str) {
        if let Some(input) = self.screen.borrow_mut().input.as_mut() {
            input.clear();
            input.push_str(text);
        }
    }

    fn replace_input_with_text(&mut self, text: &str) {
        let mut screen = self.screen.borrow_mut();
        screen.input = None;
        let line = format!("{}{}", screen.prompt, text);
        screen.push_line(line);
    }

    fn set_visible(&mut self, visible: bool) {
        self.screen.borrow_mut().visible = visible;
    }

    fn clear(&mut self) {
        let mut screen = self.screen.borrow_mut();
        screen.lines.clear();
        screen.input = None;
    }
}

/// Surface provider handing out screens and tracking them by process id
#[derive(Debug, Clone)]
pub struct ScreenDeck {
    screens: Rc<RefCell<BTreeMap<ProcessId, Weak<RefCell<Screen>>>>>,
    prompt: String,
    scrollback_limit: usize,
}

impl ScreenDeck {
    pub fn new(prompt: impl Into<String>, scrollback_limit: usize) -> Self {
        Self {
            screens: Rc::new(RefCell::new(BTreeMap::new())),
            prompt: prompt.into(),
            scrollback_limit,
        }
    }

    /// Screen of a live process
    pub fn screen(&self, id: ProcessId) -> Option<Rc<RefCell<Screen>>> {
        self.screens.borrow().get(&id).and_then(Weak::upgrade)
    }

    /// Number of screens whose session is still alive
    pub fn live_screens(&self) -> usize {
        self.screens
            .borrow()
            .values()
            .filter(|screen| screen.strong_count() > 0)
            .count()
    }
}

impl SurfaceProvider for ScreenDeck {
    fn create_surface(&mut self, id: ProcessId) -> Box<dyn Surface> {
        let screen = Rc::new(RefCell::new(Screen::new(
            self.prompt.clone(),
            self.scrollback_limit,
        )));

        let mut screens = self.screens.borrow_mut();
        screens.retain(|_, screen| screen.strong_count() > 0);
        screens.insert(id, Rc::downgrade(&screen));

        Box::new(ScreenSurface { screen })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{CommandDispatcher, CommandRegistry, Session, SessionManager};

    fn surface(prompt: &str, limit: usize) -> (ScreenSurface, Rc<RefCell<Screen>>) {
        let screen = Rc::new(RefCell::new(Screen::new(prompt, limit)));
        (
            ScreenSurface {
                screen: Rc::clone(&screen),
            },
            screen,
        )
    }

    #[test]
    fn test_multiline_output_is_split() {
        let (mut surface, screen) = surface("$ ", 100);
        surface.display_output("one\ntwo");
        assert_eq!(screen.borrow().lines(), &["one", "two"]);
    }

    #[test]
    fn test_scrollback_is_bounded() {
        let (mut surface, screen) = surface("$ ", 2);
        surface.display_output("a\nb\nc");
        assert_eq!(screen.borrow().lines(), &["b", "c"]);
    }

    #[test]
    fn test_input_line_lifecycle() {
        let (mut surface, screen) = surface("$ ", 10);
        surface.set_input_text("ignored");
        assert_eq!(screen.borrow().input(), None);

        surface.show_input_line();
        surface.set_input_text("whoami");
        assert_eq!(screen.borrow().input(), Some("whoami"));

        surface.replace_input_with_text("whoami");
        assert_eq!(screen.borrow().input(), None);
        assert_eq!(screen.borrow().lines(), &["$ whoami"]);

        surface.show_input_line();
        surface.clear();
        assert!(screen.borrow().lines().is_empty());
        assert_eq!(screen.borrow().input(), None);
    }

    #[test]
    fn test_deck_forgets_destroyed_sessions() {
        let deck = ScreenDeck::new("$ ", 10);
        let dispatcher = CommandDispatcher::new(Rc::new(CommandRegistry::new()));
        let mut manager = SessionManager::new(Box::new(deck.clone()));

        let root = manager.launch_process(|s| Session::new(s, dispatcher.clone()), None);
        let child = manager.launch_process(|s| Session::new(s, dispatcher.clone()), None);
        assert_eq!(deck.live_screens(), 2);
        assert!(!deck.screen(root).unwrap().borrow().is_visible());
        assert!(deck.screen(child).unwrap().borrow().is_visible());

        manager.terminate_process(child);
        assert!(deck.screen(child).is_none());
        assert_eq!(deck.live_screens(), 1);
        assert!(deck.screen(root).unwrap().borrow().is_visible());
    }
}
