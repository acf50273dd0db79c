//! Line-oriented console
//!
//! Reads one command per line from stdin and writes session output to
//! stdout. Sessions that are not focused keep their output until they come
//! back into view.

use std::cell::RefCell;
use std::io::{self, BufRead, IsTerminal, Write};
use std::rc::Rc;

use anyhow::{Context, Result};
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use tracing::{info, warn};

use crate::boot_console;
use crate::config::{Config, LastExitPolicy};
use crate::session::{InputEvent, ProcessId, Surface, SurfaceProvider};

/// Surface writing straight to a shared writer
pub struct PlainSurface<W: Write> {
    out: Rc<RefCell<W>>,
    prompt: String,
    echo_input: bool,
    visible: bool,
    pending: Vec<String>,
}

impl<W: Write> PlainSurface<W> {
    fn emit(&mut self, chunk: String) {
        if self.visible {
            self.write(&chunk);
        } else {
            self.pending.push(chunk);
        }
    }

    fn write(&self, chunk: &str) {
        let mut out = self.out.borrow_mut();
        if let Err(e) = out.write_all(chunk.as_bytes()).and_then(|_| out.flush()) {
            warn!("Failed to write console output: {}", e);
        }
    }
}

impl<W: Write> Surface for PlainSurface<W> {
    fn display_output(&mut self, text: &str) {
        self.emit(format!("{}\n", text));
    }

    fn show_input_line(&mut self) {
        self.emit(self.prompt.clone());
    }

    // No line editing: recalled history cannot be put back on stdin
    fn set_input_text(&mut self, _text: &str) {}

    fn replace_input_with_text(&mut self, text: &str) {
        // A terminal already echoed the line and the newline
        if self.echo_input {
            self.emit(format!("{}\n", text));
        }
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if visible {
            for chunk in std::mem::take(&mut self.pending) {
                self.write(&chunk);
            }
        }
    }

    fn clear(&mut self) {
        self.pending.clear();
        if self.visible && !self.echo_input {
            let mut out = self.out.borrow_mut();
            let out: &mut W = &mut out;
            if let Err(e) = execute!(out, Clear(ClearType::All), MoveTo(0, 0)) {
                warn!("Failed to clear terminal: {}", e);
            }
        }
    }
}

/// Surface provider sharing one writer between every session
pub struct PlainDeck<W: Write> {
    out: Rc<RefCell<W>>,
    prompt: String,
    echo_input: bool,
}

impl<W: Write> PlainDeck<W> {
    pub fn new(out: Rc<RefCell<W>>, prompt: impl Into<String>, echo_input: bool) -> Self {
        Self {
            out,
            prompt: prompt.into(),
            echo_input,
        }
    }
}

impl<W: Write + 'static> SurfaceProvider for PlainDeck<W> {
    fn create_surface(&mut self, _id: ProcessId) -> Box<dyn Surface> {
        Box::new(PlainSurface {
            out: Rc::clone(&self.out),
            prompt: self.prompt.clone(),
            echo_input: self.echo_input,
            visible: true,
            pending: Vec::new(),
        })
    }
}

/// Run the console on stdin/stdout
pub fn run_stdio(config: &Config) -> Result<()> {
    let stdin = io::stdin();
    let echo_input = !stdin.is_terminal();
    run_plain(
        config,
        stdin.lock(),
        Rc::new(RefCell::new(io::stdout())),
        echo_input,
    )
}

/// Feed every line of `input` to the focused session until EOF.
///
/// `echo_input` repeats submitted lines after the prompt, which keeps
/// transcripts readable when input does not come from a terminal.
pub fn run_plain<R, W>(
    config: &Config,
    input: R,
    out: Rc<RefCell<W>>,
    echo_input: bool,
) -> Result<()>
where
    R: BufRead,
    W: Write + 'static,
{
    let new_deck = || {
        Box::new(PlainDeck::new(
            Rc::clone(&out),
            config.console.prompt.clone(),
            echo_input,
        ))
    };

    info!("Starting line-oriented console");
    let mut manager = boot_console(config, new_deck());

    for line in input.lines() {
        let line = line.context("Failed to read console input")?;
        let outcome = manager.handle_input(InputEvent::Submit(line));

        if outcome.reload_requested {
            match config.console.on_last_exit {
                LastExitPolicy::Restart => {
                    info!("Last process exited, restarting console");
                    manager = boot_console(config, new_deck());
                }
                LastExitPolicy::Quit => {
                    info!("Last process exited, quitting");
                    break;
                }
            }
        }
    }

    writeln!(out.borrow_mut()).context("Failed to write console output")?;
    Ok(())
}
