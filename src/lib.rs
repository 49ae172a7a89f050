//! nnstage - declarative GUI core of an interactive NN teaching canvas.
//!
//! Re-exports all modules for use by binary targets.

// Core engine (state, layout, cursor, commands, session)
pub mod core;

// App modules
pub mod app;
pub mod cli;
pub mod config;
pub mod ui;
pub mod utils;
pub mod widgets;

// Re-export commonly used types from core
pub use crate::core::{Command, CommandQueue, CursorRule, CursorStyle, GuiState, Predicate, Session};

// Re-export widget machinery
pub use widgets::{GuiRegistry, HandleKind, WidgetDescriptor, WidgetFactory};

pub use app::App;
pub use config::StageConfig;
