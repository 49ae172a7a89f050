//! Commands triggered by widget interaction.
//!
//! Click/change handlers are data, not closures over live objects: a handle
//! stores the `Command` it fires, the input layer pushes it onto the shared
//! `CommandQueue`, and `App::execute` is the single dispatch point that talks
//! to the collaborators. This keeps handlers unit-testable without a live
//! canvas and keeps all external mutation out of the frame pass.

/// One trigger operation against an external collaborator.
///
/// Dispatch observes no synchronous return value; long-running operations
/// report back as state changes (see `session::Completion`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Put a dataset sample on the stage; `None` picks a random index.
    StageSample { index: Option<usize> },
    /// Predict on the staged sample.
    Predict,
    /// Train on the whole dataset. `batch_size` 0 means the full dataset.
    Train { epochs: usize, batch_size: usize },
    AddHiddenLayer,
    RemoveHiddenLayers,
    ResetNetwork,
    CompileNetwork,
    CompileDataset,
    /// Start loading a CSV dataset from a URL (fire-and-forget).
    LoadDataset { url: String },
    /// Read the current value of the named select widget and load it.
    /// A lookup miss skips the command (recoverable).
    LoadDatasetFromSelect { select_id: String },
    /// Open an external link (host-side no-op in headless runs).
    OpenUrl { url: String },
}

/// Commands collected from input handlers, drained once per frame.
#[derive(Debug, Default)]
pub struct CommandQueue {
    commands: Vec<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a command to be dispatched on the next frame.
    pub fn send(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Take all pending commands, preserving arrival order.
    pub fn drain(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
