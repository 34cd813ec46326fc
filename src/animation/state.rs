use tracing::trace;

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    InProgress,
    /// A full unit of travel finished; the state is at rest again.
    SegmentComplete,
}

/// Result of asking a resting state to start moving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Started,
    AlreadyRunning,
}

/// Per-node progress tracker.
///
/// At rest `dir` is 0 and `scale == prev_scale`, which is always 0 or 1.
/// While animating `dir` is +1 (opening from 0) or -1 (closing from 1).
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    scale: f32,
    dir: f32,
    prev_scale: f32,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            scale: 0.0,
            dir: 0.0,
            prev_scale: 0.0,
        }
    }
}

impl AnimationState {
    /// Current progress
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// -1, 0 or 1
    pub fn direction(&self) -> f32 {
        self.dir
    }

    /// Scale of the last completed unit of travel
    pub fn committed_scale(&self) -> f32 {
        self.prev_scale
    }

    pub fn is_animating(&self) -> bool {
        self.dir != 0.0
    }

    /// Move `gap` along the current direction, snapping once a full unit is covered.
    pub fn advance(&mut self, gap: f32) -> Progress {
        self.scale += gap * self.dir;
        trace!(scale = self.scale, dir = self.dir, "tick");
        if (self.scale - self.prev_scale).abs() > 1.0 {
            self.scale = self.prev_scale + self.dir;
            self.dir = 0.0;
            self.prev_scale = self.scale;
            return Progress::SegmentComplete;
        }
        Progress::InProgress
    }

    /// Start opening from 0 or closing from 1. Ignored while already moving.
    pub fn begin_transition(&mut self) -> Transition {
        if self.is_animating() {
            return Transition::AlreadyRunning;
        }
        self.dir = 1.0 - 2.0 * self.prev_scale;
        Transition::Started
    }
}
