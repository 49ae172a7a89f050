//! Live application state read by the GUI core each frame.
//!
//! **Architecture**: the update pass never reads ambient globals. Collaborators
//! (dataset loader, network trainer, tab system) write their status into
//! `GuiState`, and the whole snapshot is handed to the frame pass by value
//! reference. Tests inject synthetic snapshots the same way.
//!
//! The core is the sole writer of widget handle state; `GuiState` is read-only
//! from the core's perspective.

use anyhow::Result;
use glam::Vec2;
use std::fmt;
use std::sync::Arc;

/// Sub-canvas index that pins a widget to the full viewport instead of a tab.
pub const GLOBAL_SUB_CANVAS: i32 = -1;

/// Dataset collaborator status.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DatasetStatus {
    /// A load was started and its completion has not been observed yet.
    pub is_loading: bool,
    /// Columns were resolved into input/target tensors.
    pub is_compiled: bool,
    pub sample_count: usize,
}

/// Network trainer status.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NetworkStatus {
    pub is_compiled: bool,
}

/// Snapshot of everything the frame pass is allowed to observe.
#[derive(Debug, Clone, Default)]
pub struct GuiState {
    /// Full window size in pixels.
    pub viewport: Vec2,
    /// Fraction of the viewport width reserved for the left tab strip.
    pub left_tab_width_ratio: f32,
    /// Pixel size of each logical sub-canvas, indexed by sub-canvas number.
    /// May be empty or zero-sized during startup.
    pub sub_canvas_sizes: Vec<Vec2>,
    /// The sub-canvas the user has selected (not an interpolated transition value).
    pub active_sub_canvas: i32,
    /// Mouse position in window pixels.
    pub mouse: Vec2,
    pub dataset: DatasetStatus,
    pub network: NetworkStatus,
}

impl GuiState {
    /// Pixel size of a sub-canvas. `GLOBAL_SUB_CANVAS` resolves to the full
    /// viewport; an unknown index resolves to zero size so layout degrades to
    /// zero-size output instead of failing during startup.
    pub fn sub_canvas_size(&self, idx: i32) -> Vec2 {
        if idx == GLOBAL_SUB_CANVAS {
            return self.viewport;
        }
        usize::try_from(idx)
            .ok()
            .and_then(|i| self.sub_canvas_sizes.get(i).copied())
            .unwrap_or(Vec2::ZERO)
    }

    /// Visibility partition: a widget bound to `idx` is shown iff it is global
    /// or its sub-canvas is the active one.
    pub fn is_sub_canvas_active(&self, idx: i32) -> bool {
        idx == GLOBAL_SUB_CANVAS || idx == self.active_sub_canvas
    }

    /// Pixel width of the left tab strip.
    pub fn left_tab_width(&self) -> f32 {
        self.viewport.x * self.left_tab_width_ratio
    }
}

type PredicateFn = dyn Fn(&GuiState) -> Result<bool> + Send + Sync;

/// Condition over the state snapshot, re-evaluated every frame.
///
/// Predicates must not mutate external state. A failing predicate (e.g. a
/// field not yet populated during startup) is a recoverable per-frame fault:
/// callers log it and treat the rule as false for that frame.
#[derive(Clone)]
pub struct Predicate(Arc<PredicateFn>);

impl Predicate {
    /// Infallible condition.
    pub fn new(f: impl Fn(&GuiState) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(move |state| Ok(f(state))))
    }

    /// Condition that may fail while reading state.
    pub fn fallible(f: impl Fn(&GuiState) -> Result<bool> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn always() -> Self {
        Self::new(|_| true)
    }

    pub fn eval(&self, state: &GuiState) -> Result<bool> {
        (self.0)(state)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}
