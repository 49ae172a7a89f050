//! Core engine modules - state, layout, cursor, commands, session.
//!
//! These modules form the frame-driven GUI engine, independent of any
//! concrete widget set or rendering backend.

pub mod command;
pub mod cursor;
pub mod layout;
pub mod session;
pub mod state;

// Re-exports for convenience
pub use command::{Command, CommandQueue};
pub use cursor::{CursorRule, CursorStyle};
pub use layout::PixelRect;
pub use session::{Completion, Session};
pub use state::{DatasetStatus, GuiState, NetworkStatus, Predicate, GLOBAL_SUB_CANVAS};
