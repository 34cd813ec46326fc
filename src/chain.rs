use tracing::debug;

use crate::animation::{AnimationState, Progress, Transition};

/// Drawing collaborator: renders one frame of the shape for a node.
pub trait Painter {
    fn draw_node(&mut self, index: usize, scale: f32);
}

/// Which way traversal walks along the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    Forward,
    Backward,
}

impl Traversal {
    pub fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Self::Forward => "→",
            Self::Backward => "←",
        }
    }
}

/// Outcome of a neighbor lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Neighbor {
    Node(usize),
    /// No node that way; the caller stays on the current one.
    AtBoundary,
}

/// One animatable unit. Neighbors are `index ± 1` within the owning chain.
#[derive(Debug, Clone)]
pub struct ChainNode {
    index: usize,
    state: AnimationState,
}

impl ChainNode {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            state: AnimationState::default(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn draw(&self, painter: &mut impl Painter) {
        painter.draw_node(self.index, self.state.scale());
    }

    pub fn advance(&mut self, gap: f32) -> Progress {
        self.state.advance(gap)
    }

    pub fn begin_transition(&mut self) -> Transition {
        self.state.begin_transition()
    }

    /// Neighbor in `dir` for a chain of `len` nodes.
    pub fn neighbor(&self, dir: Traversal, len: usize) -> Neighbor {
        match dir {
            Traversal::Backward if self.index > 0 => Neighbor::Node(self.index - 1),
            Traversal::Forward if self.index + 1 < len => Neighbor::Node(self.index + 1),
            _ => Neighbor::AtBoundary,
        }
    }
}

/// Fixed sequence of nodes with a cursor on the one that animates next.
#[derive(Debug, Clone)]
pub struct Chain {
    nodes: Vec<ChainNode>,
    current: usize,
    dir: Traversal,
    gap: f32,
}

impl Chain {
    /// Build a chain of `len` nodes. `len` must be at least 1.
    pub fn new(len: usize, gap: f32) -> Self {
        debug_assert!(len > 0, "chain needs at least one node");
        Self {
            nodes: (0..len).map(ChainNode::new).collect(),
            current: 0,
            dir: Traversal::Forward,
            gap,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn current(&self) -> &ChainNode {
        &self.nodes[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn direction(&self) -> Traversal {
        self.dir
    }

    pub fn draw(&self, painter: &mut impl Painter) {
        self.current().draw(painter);
    }

    /// Tick the current node; on completion hand off to its neighbor.
    pub fn advance(&mut self) -> Progress {
        let progress = self.nodes[self.current].advance(self.gap);
        if progress == Progress::SegmentComplete {
            self.hand_off();
        }
        progress
    }

    pub fn begin_transition(&mut self) -> Transition {
        let transition = self.nodes[self.current].begin_transition();
        if transition == Transition::Started {
            debug!(
                node = self.current,
                dir = self.current().state().direction(),
                "transition started"
            );
        }
        transition
    }

    fn hand_off(&mut self) {
        let from = self.current;
        match self.current().neighbor(self.dir, self.nodes.len()) {
            Neighbor::Node(next) => self.current = next,
            Neighbor::AtBoundary => {
                self.dir = self.dir.reversed();
                debug!(node = from, dir = ?self.dir, "chain end reached, reversing");
            }
        }
        debug!(
            from,
            to = self.current,
            committed = self.nodes[from].state().committed_scale(),
            "segment complete"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAP: f32 = 0.005;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(usize, f32)>,
    }

    impl Painter for Recorder {
        fn draw_node(&mut self, index: usize, scale: f32) {
            self.calls.push((index, scale));
        }
    }

    fn complete_cycle(chain: &mut Chain) {
        assert_eq!(chain.begin_transition(), Transition::Started);
        for _ in 0..10_000 {
            if chain.advance() == Progress::SegmentComplete {
                return;
            }
        }
        panic!("cycle never completed");
    }

    #[test]
    fn initial_state() {
        let chain = Chain::new(5, GAP);
        assert_eq!(chain.len(), 5);
        assert_eq!(chain.current_index(), 0);
        assert_eq!(chain.direction(), Traversal::Forward);
        assert!(!chain.current().state().is_animating());
    }

    #[test]
    fn neighbor_lookup() {
        let first = ChainNode::new(0);
        assert_eq!(first.neighbor(Traversal::Backward, 5), Neighbor::AtBoundary);
        assert_eq!(first.neighbor(Traversal::Forward, 5), Neighbor::Node(1));

        let last = ChainNode::new(4);
        assert_eq!(last.neighbor(Traversal::Forward, 5), Neighbor::AtBoundary);
        assert_eq!(last.neighbor(Traversal::Backward, 5), Neighbor::Node(3));

        let only = ChainNode::new(0);
        assert_eq!(only.neighbor(Traversal::Forward, 1), Neighbor::AtBoundary);
    }

    #[test]
    fn first_completion_moves_to_second_node() {
        let mut chain = Chain::new(5, GAP);
        complete_cycle(&mut chain);

        assert_eq!(chain.nodes[0].state().committed_scale(), 1.0);
        assert_eq!(chain.nodes[0].state().direction(), 0.0);
        assert_eq!(chain.current_index(), 1);
        assert_eq!(chain.direction(), Traversal::Forward);
    }

    #[test]
    fn last_node_closes_and_moves_back() {
        let mut chain = Chain::new(5, GAP);
        for _ in 0..5 {
            complete_cycle(&mut chain);
        }
        // Node 4 opened and hit the end: direction flipped, cursor stayed.
        assert_eq!(chain.current_index(), 4);
        assert_eq!(chain.direction(), Traversal::Backward);
        assert_eq!(chain.current().state().committed_scale(), 1.0);

        chain.begin_transition();
        assert_eq!(chain.current().state().direction(), -1.0);
        while chain.advance() != Progress::SegmentComplete {}

        assert_eq!(chain.nodes[4].state().committed_scale(), 0.0);
        assert_eq!(chain.current_index(), 3);
    }

    #[test]
    fn traversal_oscillates_within_bounds() {
        let mut chain = Chain::new(5, GAP);
        let mut visited = vec![chain.current_index()];
        for _ in 0..20 {
            complete_cycle(&mut chain);
            assert!(chain.current_index() < chain.len());
            visited.push(chain.current_index());
        }
        assert_eq!(
            visited,
            vec![0, 1, 2, 3, 4, 4, 3, 2, 1, 0, 0, 1, 2, 3, 4, 4, 3, 2, 1, 0, 0]
        );
    }

    #[test]
    fn single_node_chain_toggles_in_place() {
        let mut chain = Chain::new(1, GAP);
        complete_cycle(&mut chain);
        assert_eq!(chain.current_index(), 0);
        assert_eq!(chain.direction(), Traversal::Backward);
        complete_cycle(&mut chain);
        assert_eq!(chain.current_index(), 0);
        assert_eq!(chain.current().state().committed_scale(), 0.0);
    }

    #[test]
    fn begin_is_ignored_mid_cycle() {
        let mut chain = Chain::new(3, GAP);
        chain.begin_transition();
        chain.advance();
        let scale = chain.current().state().scale();
        assert_eq!(chain.begin_transition(), Transition::AlreadyRunning);
        assert_eq!(chain.current().state().scale(), scale);
    }

    #[test]
    fn draw_delegates_current_node() {
        let mut chain = Chain::new(5, GAP);
        complete_cycle(&mut chain);
        chain.begin_transition();
        chain.advance();

        let mut recorder = Recorder::default();
        chain.draw(&mut recorder);
        assert_eq!(recorder.calls.len(), 1);
        assert_eq!(recorder.calls[0].0, 1);
        assert!((recorder.calls[0].1 - GAP).abs() < 1e-6);
    }
}
