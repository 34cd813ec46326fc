use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind, MouseButton, MouseEventKind,
};
use futures::StreamExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::{debug, trace};

/// Application-level events
#[derive(Debug, Clone)]
pub enum Event {
    /// User key press
    Key(KeyEvent),
    /// Left mouse button pressed at (column, row)
    Click(u16, u16),
    /// Animation tick from the ticker generation that produced it
    Tick(u64),
    /// Terminal resize
    Resize(u16, u16),
}

/// Fixed-period tick source.
///
/// A running ticker owns one spawned task that posts `Event::Tick` into the
/// event channel; `handle` is `Some` exactly while running. Every `start`
/// bumps the generation so ticks still queued from an earlier run can be told
/// apart and dropped.
pub struct Ticker {
    tx: mpsc::UnboundedSender<Event>,
    period: Duration,
    handle: Option<JoinHandle<()>>,
    generation: u64,
}

impl Ticker {
    pub fn new(tx: mpsc::UnboundedSender<Event>, period: Duration) -> Self {
        Self {
            tx,
            period,
            handle: None,
            generation: 0,
        }
    }

    /// Begin ticking. Returns false (and does nothing) if already running.
    pub fn start(&mut self) -> bool {
        if self.handle.is_some() {
            return false;
        }
        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;
        let period = self.period;
        let tx = self.tx.clone();
        // First tick one period from now, like a browser interval
        let first = Instant::now() + period;

        self.handle = Some(tokio::spawn(async move {
            let mut interval = interval_at(first, period);
            loop {
                interval.tick().await;
                if tx.send(Event::Tick(generation)).is_err() {
                    return;
                }
            }
        }));
        debug!(generation, period_ms = period.as_millis() as u64, "ticker started");
        true
    }

    /// Cancel ticking. Returns false (and does nothing) if not running.
    pub fn stop(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                handle.abort();
                debug!(generation = self.generation, "ticker stopped");
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Whether a tick from `generation` belongs to the live run
    pub fn accepts(&self, generation: u64) -> bool {
        let live = self.is_running() && generation == self.generation;
        if !live {
            trace!(generation, current = self.generation, "dropping stale tick");
        }
        live
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Handles event collection from the terminal.
///
/// Uses crossterm's async `EventStream` (via `futures::StreamExt`) instead of
/// blocking `event::poll()` / `event::read()`, so no tokio worker thread is
/// ever blocked. Ticks arrive on the same channel from a [`Ticker`] built on
/// [`EventHandler::sender`].
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    tx: mpsc::UnboundedSender<Event>,
    stop: Arc<AtomicBool>,
}

impl EventHandler {
    /// Create a new event handler. Spawns the background input task.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let stop = Arc::new(AtomicBool::new(false));

        let input_tx = tx.clone();
        let input_stop = stop.clone();
        tokio::spawn(async move {
            let mut reader = EventStream::new();
            loop {
                if input_stop.load(Ordering::Relaxed) {
                    return;
                }
                let maybe_event = reader.next().await;
                if input_stop.load(Ordering::Relaxed) {
                    return;
                }
                let event = match maybe_event {
                    Some(Ok(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                        Event::Key(key)
                    }
                    Some(Ok(CrosstermEvent::Mouse(mouse)))
                        if mouse.kind == MouseEventKind::Down(MouseButton::Left) =>
                    {
                        Event::Click(mouse.column, mouse.row)
                    }
                    Some(Ok(CrosstermEvent::Resize(w, h))) => Event::Resize(w, h),
                    Some(Err(_)) | None => {
                        // Stream ended or errored, exit gracefully
                        return;
                    }
                    _ => continue,
                };
                if input_tx.send(event).is_err() {
                    return;
                }
            }
        });

        Self { rx, tx, stop }
    }

    /// Get a clone of the sender, e.g. for a [`Ticker`]
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.tx.clone()
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Signal the input task to stop
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}
