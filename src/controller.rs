use tracing::{debug, info};

use crate::animation::{Progress, Transition};
use crate::chain::Chain;
use crate::event::Ticker;

/// What a tick did to the picture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still moving; redraw and wait for the next tick.
    Animating,
    /// Reached rest; the ticker is stopped. Redraw once more.
    Settled,
}

/// Bridges taps and ticks to the chain.
///
/// Idle: ticker stopped, every node at rest. A tap starts the current node
/// and the ticker; the tick that completes the node stops the ticker again.
pub struct RenderController {
    chain: Chain,
    ticker: Ticker,
}

impl RenderController {
    pub fn new(chain: Chain, ticker: Ticker) -> Self {
        Self { chain, ticker }
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn is_animating(&self) -> bool {
        self.ticker.is_running()
    }

    /// Start a cycle if idle. Returns false when the tap was ignored.
    pub fn handle_interaction(&mut self) -> bool {
        match self.chain.begin_transition() {
            Transition::Started => {
                self.ticker.start();
                true
            }
            Transition::AlreadyRunning => {
                debug!(node = self.chain.current_index(), "tap ignored while animating");
                false
            }
        }
    }

    /// Advance on a tick from `generation`. `None` means the tick was stale.
    pub fn on_tick(&mut self, generation: u64) -> Option<TickOutcome> {
        if !self.ticker.accepts(generation) {
            return None;
        }
        match self.chain.advance() {
            Progress::InProgress => Some(TickOutcome::Animating),
            Progress::SegmentComplete => {
                self.ticker.stop();
                info!(
                    node = self.chain.current_index(),
                    dir = ?self.chain.direction(),
                    "cycle finished"
                );
                Some(TickOutcome::Settled)
            }
        }
    }
}
