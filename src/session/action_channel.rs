//! Action Channel for events that reach the front-end loop from outside a
//! key press (signal handlers, lifecycle requests)

use anyhow::Result;
use tokio::sync::mpsc;

/// Events delivered to the front-end loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Shutdown request (Ctrl+C, quit key)
    ShutdownRequested,
    /// The last process exited and the console has to be rebuilt
    ReloadRequested,
}

/// Action channel for event processing
pub struct ActionChannel {
    /// Event sender
    event_tx: mpsc::UnboundedSender<SessionEvent>,
    /// Event receiver
    event_rx: Option<mpsc::UnboundedReceiver<SessionEvent>>,
}

impl Clone for ActionChannel {
    fn clone(&self) -> Self {
        Self {
            event_tx: self.event_tx.clone(),
            event_rx: None, // Receivers cannot be cloned
        }
    }
}

impl ActionChannel {
    /// Create a new ActionChannel
    pub fn new() -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        Self {
            event_tx,
            event_rx: Some(event_rx),
        }
    }

    /// Send event to channel
    pub fn send_event(&self, event: SessionEvent) -> Result<()> {
        self.event_tx
            .send(event)
            .map_err(|e| anyhow::anyhow!("Failed to send event: {}", e))
    }

    /// Drain every event queued so far without waiting
    pub fn drain(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if let Some(event_rx) = &mut self.event_rx {
            while let Ok(event) = event_rx.try_recv() {
                events.push(event);
            }
        }
        events
    }

    /// Get event sender for external use
    pub fn event_tx(&self) -> mpsc::UnboundedSender<SessionEvent> {
        self.event_tx.clone()
    }

    /// Send shutdown request
    pub fn request_shutdown(&self) -> Result<()> {
        self.send_event(SessionEvent::ShutdownRequested)
    }

    /// Send reload request
    pub fn request_reload(&self) -> Result<()> {
        self.send_event(SessionEvent::ReloadRequested)
    }
}

impl Default for ActionChannel {
    fn default() -> Self {
        Self::new()
    }
}
