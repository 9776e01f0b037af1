//! Recorded render history.
//!
//! Invariants operate on what the renderer was handed rather than on live
//! state, so a check sees exactly what a user would have seen.

use spinwatch_app::ViewSnapshot;

/// Every snapshot rendered so far, oldest first.
#[derive(Debug, Clone, Default)]
pub struct RenderHistory {
    renders: Vec<ViewSnapshot>,
}

impl RenderHistory {
    /// Record a render.
    pub fn record(&mut self, snapshot: ViewSnapshot) {
        self.renders.push(snapshot);
    }

    /// All renders.
    pub fn renders(&self) -> &[ViewSnapshot] {
        &self.renders
    }

    /// Most recent render. `None` before the first render.
    pub fn latest(&self) -> Option<&ViewSnapshot> {
        self.renders.last()
    }

    /// Number of renders.
    pub fn len(&self) -> usize {
        self.renders.len()
    }

    /// True before the first render.
    pub fn is_empty(&self) -> bool {
        self.renders.is_empty()
    }
}
