//! UI Manager for the interactive terminal interface

use anyhow::Result;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use crossterm::event::{self, Event, KeyEvent};

use crate::boot_console;
use crate::config::{Config, LastExitPolicy};
use crate::session::{ActionChannel, InputEvent, SessionEvent, SessionManager};

use super::tui::{ConsoleView, Tui, UiAction, handle_key_event};
use super::{AppState, ScreenDeck};

/// UI Manager driving the console sessions from terminal events
pub struct UIManager {
    /// Active configuration snapshot
    config: Config,
    /// Process table behind the console
    manager: SessionManager,
    /// Screens of every live process
    deck: ScreenDeck,
    /// Shutdown and reload requests
    action_channel: ActionChannel,
    /// Application state
    app_state: AppState,
    /// UI rendering state
    render_state: RenderState,
    /// TUI terminal handle
    tui: Option<Tui>,
    /// Desired refresh cadence
    refresh_interval: Duration,
    /// Time of the last successful render
    last_render: Instant,
}

/// UI rendering state
#[derive(Debug, Clone)]
pub struct RenderState {
    pub should_quit: bool,
    pub should_redraw: bool,
    pub render_count: u64,
    pub info_message: Option<String>,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            should_quit: false,
            should_redraw: true,
            render_count: 0,
            info_message: None,
        }
    }
}

impl RenderState {
    fn notify(&mut self, message: impl Into<String>) {
        self.info_message = Some(message.into());
        self.should_redraw = true;
    }
}

impl UIManager {
    /// Create a new UIManager and boot the root terminal
    pub fn new(config: Config) -> Self {
        let deck = Self::new_deck(&config);
        let manager = boot_console(&config, Box::new(deck.clone()));
        let refresh_interval = Duration::from_millis(config.ui.refresh_rate_ms.clamp(16, 1000));

        Self {
            manager,
            deck,
            action_channel: ActionChannel::new(),
            app_state: AppState::new(config.ui.enable_colors),
            render_state: RenderState::default(),
            tui: None,
            refresh_interval,
            last_render: Instant::now(),
            config,
        }
    }

    fn new_deck(config: &Config) -> ScreenDeck {
        ScreenDeck::new(
            config.console.prompt.clone(),
            config.console.scrollback_lines,
        )
    }

    /// Run the UI manager until quit
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting UI manager");

        let shutdown_tx = self.action_channel.event_tx();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl+C: {}", e);
                return;
            }

            info!("Ctrl+C received, initiating shutdown");
            let _ = shutdown_tx.send(SessionEvent::ShutdownRequested);
        });

        self.tui =
            Some(Tui::new().map_err(|e| anyhow::anyhow!("Failed to initialise terminal: {}", e))?);
        self.render_state.should_redraw = true;
        self.last_render = Instant::now()
            .checked_sub(self.refresh_interval)
            .unwrap_or_else(Instant::now);

        while !self.render_state.should_quit && !self.app_state.should_quit {
            // Shutdown and reload requests
            self.process_events();

            // Handle terminal input (non-blocking)
            self.poll_terminal_events()?;

            // Render on dirty state or cadence tick
            let now = Instant::now();
            if self.render_state.should_redraw
                || now.duration_since(self.last_render) >= self.refresh_interval
            {
                let view = ConsoleView::capture(&self.manager, &self.deck);
                if let Some(tui) = self.tui.as_mut() {
                    self.render_state.render_count += 1;
                    tui.draw(&self.app_state, &self.render_state, &view)
                        .map_err(|e| anyhow::anyhow!("Failed to render frame: {}", e))?;
                }
                self.render_state.should_redraw = false;
                self.last_render = now;
            }

            // Prevent busy loop
            tokio::time::sleep(Duration::from_millis(16)).await;
        }

        if let Some(tui) = self.tui.as_mut() {
            tui.restore()
                .map_err(|e| anyhow::anyhow!("Failed to restore terminal state: {}", e))?;
        }

        info!(
            "UI manager stopped after {} frames",
            self.render_state.render_count
        );
        Ok(())
    }

    /// Poll for keyboard/terminal events and translate into session input
    fn poll_terminal_events(&mut self) -> Result<()> {
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key_event) => {
                    self.handle_key(key_event);
                    self.render_state.should_redraw = true;
                }
                Event::Resize(_, _) => {
                    self.render_state.should_redraw = true;
                }
                Event::Paste(text) => {
                    self.handle_paste(&text);
                    self.render_state.should_redraw = true;
                }
                Event::Mouse(_) | Event::FocusGained | Event::FocusLost => {}
            }
        }

        if self.app_state.should_quit {
            self.render_state.should_quit = true;
        }

        Ok(())
    }

    fn handle_key(&mut self, key_event: KeyEvent) {
        // The screen borrow must end before the session manager touches it
        let action = {
            let screen = self
                .manager
                .active_process_id()
                .and_then(|id| self.deck.screen(id));
            let mut guard = screen.as_ref().map(|screen| screen.borrow_mut());
            handle_key_event(&mut self.app_state, guard.as_deref_mut(), key_event)
        };

        match action {
            UiAction::None => {}
            UiAction::QuitRequested => {
                info!("User requested quit");
                self.render_state.should_quit = true;
            }
            UiAction::Input(input) => self.forward_input(input),
        }
    }

    /// Type pasted text into the input line, one line per submission
    fn handle_paste(&mut self, text: &str) {
        let mut lines = text.split('\n').peekable();
        while let Some(line) = lines.next() {
            let line = line.trim_end_matches('\r');
            if let Some(screen) = self
                .manager
                .active_process_id()
                .and_then(|id| self.deck.screen(id))
            {
                if let Some(input) = screen.borrow_mut().input_mut() {
                    input.push_str(line);
                }
            }

            if lines.peek().is_some() {
                self.handle_key(KeyEvent::from(crossterm::event::KeyCode::Enter));
            }
        }
    }

    fn forward_input(&mut self, input: InputEvent) {
        if matches!(input, InputEvent::Submit(_)) {
            self.app_state.commands_submitted += 1;
            self.render_state.info_message = None;
        }

        let outcome = self.manager.handle_input(input);
        if outcome.reload_requested {
            if let Err(e) = self.action_channel.request_reload() {
                warn!("Failed to queue reload: {}", e);
            }
        }
    }

    /// Drain queued shutdown and reload requests
    fn process_events(&mut self) {
        for event in self.action_channel.drain() {
            debug!("Handling UI event: {:?}", event);
            self.render_state.should_redraw = true;

            match event {
                SessionEvent::ShutdownRequested => {
                    info!("UI received shutdown request");
                    self.render_state.should_quit = true;
                }
                SessionEvent::ReloadRequested => self.reload(),
            }
        }
    }

    /// The last process exited: restart the console or quit
    fn reload(&mut self) {
        match self.config.console.on_last_exit {
            LastExitPolicy::Restart => {
                info!("Last process exited, restarting console");
                self.deck = Self::new_deck(&self.config);
                self.manager = boot_console(&self.config, Box::new(self.deck.clone()));
                self.app_state.restarts += 1;
                self.app_state.follow_output();
                self.render_state.notify("Console restarted.");
            }
            LastExitPolicy::Quit => {
                info!("Last process exited, quitting");
                self.render_state.should_quit = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{CommandDispatcher, CommandRegistry, Session};
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::rc::Rc;

    fn quiet_config() -> Config {
        let mut config = Config::default();
        config.console.welcome_command = String::new();
        config
    }

    fn type_line(ui: &mut UIManager, line: &str) {
        for c in line.chars() {
            ui.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
        ui.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    }

    fn view(ui: &UIManager) -> ConsoleView {
        ConsoleView::capture(&ui.manager, &ui.deck)
    }

    #[test]
    fn test_typed_commands_reach_focused_session() {
        let mut ui = UIManager::new(quiet_config());
        type_line(&mut ui, "whoami");

        let view = view(&ui);
        assert_eq!(view.lines, vec!["guest:~$ whoami", "Hi, I'm Guest"]);
        assert_eq!(view.input.as_deref(), Some(""));
        assert_eq!(ui.app_state.commands_submitted, 1);
    }

    #[test]
    fn test_exit_of_last_process_restarts() {
        let mut ui = UIManager::new(quiet_config());
        type_line(&mut ui, "whoami");
        type_line(&mut ui, "exit");
        assert!(ui.manager.is_empty());

        ui.process_events();
        assert_eq!(ui.manager.len(), 1);
        assert_eq!(ui.app_state.restarts, 1);
        assert!(view(&ui).lines.is_empty());
        assert!(!ui.render_state.should_quit);
    }

    #[test]
    fn test_restart_notice_clears_on_next_submit() {
        let mut ui = UIManager::new(quiet_config());
        type_line(&mut ui, "exit");
        ui.process_events();
        assert_eq!(
            ui.render_state.info_message.as_deref(),
            Some("Console restarted.")
        );

        type_line(&mut ui, "whoami");
        assert_eq!(ui.render_state.info_message, None);
    }

    #[test]
    fn test_welcome_that_exits_restarts_on_next_submit() {
        let mut ui = UIManager::new(quiet_config());

        let mut registry = CommandRegistry::new();
        registry.register("quit", "Terminate self", |ctx, _args| {
            let pid = ctx.pid();
            if ctx.manager().terminate_process(pid).should_reload() {
                ctx.request_reload();
            }
            Ok(String::new())
        });
        let dispatcher = CommandDispatcher::new(Rc::new(registry));
        let mut manager = SessionManager::new(Box::new(ui.deck.clone()));
        manager.launch_process(
            |surface| Session::new(surface, dispatcher).with_welcome(Some("quit".to_string())),
            None,
        );
        assert!(manager.is_empty());
        ui.manager = manager;

        ui.forward_input(InputEvent::Submit("whoami".to_string()));
        ui.process_events();
        assert_eq!(ui.manager.len(), 1);
        assert_eq!(ui.app_state.restarts, 1);
    }

    #[test]
    fn test_exit_of_last_process_quits() {
        let mut config = quiet_config();
        config.console.on_last_exit = LastExitPolicy::Quit;
        let mut ui = UIManager::new(config);

        type_line(&mut ui, "exit");
        ui.process_events();
        assert!(ui.render_state.should_quit);
    }

    #[test]
    fn test_paste_submits_complete_lines() {
        let mut ui = UIManager::new(quiet_config());
        ui.handle_paste("pwd\r\nwho");

        let view = view(&ui);
        assert_eq!(view.lines, vec!["guest:~$ pwd", "https://localhost"]);
        assert_eq!(view.input.as_deref(), Some("who"));
    }

    #[test]
    fn test_shutdown_request_stops_loop() {
        let mut ui = UIManager::new(quiet_config());
        ui.action_channel.request_shutdown().unwrap();
        ui.process_events();
        assert!(ui.render_state.should_quit);
    }
}
