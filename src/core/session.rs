//! Simulated dataset/network collaborators.
//!
//! The GUI core only triggers opaque operations and observes their results as
//! state changes on a later frame. `Session` stands in for the real CSV
//! loader and network trainer: every long-running operation is fire-and-forget
//! and reports back through a `Completion` channel drained at the top of each
//! frame. There is no cancellation primitive; the widget layer guards against
//! duplicate starts by disabling controls while `is_loading` is set.
//!
//! All mutation of `GuiState` status fields happens here or in
//! `drain_completions` - never inside the widget update pass.

use anyhow::{Result, bail};
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{debug, info, warn};

use super::state::GuiState;
use crate::utils::random_index;

/// Default neuron count for a freshly added hidden layer.
const DEFAULT_HIDDEN_UNITS: usize = 16;

/// Result of an asynchronous collaborator operation, observed next frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// CSV parsed; structure extracted (last column is the target).
    DatasetLoaded {
        url: String,
        sample_count: usize,
        feature_count: usize,
    },
    /// Training run finished.
    TrainingFinished { epochs: usize },
}

/// Stand-in for the dataset loader and network trainer.
pub struct Session {
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
    /// Hidden layer widths of the configured network topology.
    hidden_layers: Vec<usize>,
    /// Index of the sample currently on the stage, if any.
    staged_sample: Option<usize>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self {
            tx,
            rx,
            hidden_layers: Vec::new(),
            staged_sample: None,
        }
    }

    /// Sender half for real collaborators running off-thread.
    pub fn completion_sender(&self) -> Sender<Completion> {
        self.tx.clone()
    }

    pub fn hidden_layer_count(&self) -> usize {
        self.hidden_layers.len()
    }

    pub fn staged_sample(&self) -> Option<usize> {
        self.staged_sample
    }

    /// Apply all completions received since the previous frame.
    /// Returns the number of completions applied.
    pub fn drain_completions(&mut self, state: &mut GuiState) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.rx.try_recv() {
            match completion {
                Completion::DatasetLoaded {
                    url,
                    sample_count,
                    feature_count,
                } => {
                    info!("dataset loaded: {url} ({sample_count} samples, {feature_count} features)");
                    state.dataset.is_loading = false;
                    state.dataset.is_compiled = false;
                    state.dataset.sample_count = sample_count;
                    // Input/output layer shapes changed: network must recompile
                    state.network.is_compiled = false;
                    self.staged_sample = None;
                }
                Completion::TrainingFinished { epochs } => {
                    info!("training finished ({epochs} epochs)");
                }
            }
            applied += 1;
        }
        applied
    }

    /// Start loading a CSV dataset. Invalid URLs are rejected synchronously;
    /// a valid URL flips `is_loading` and completes on a later frame.
    pub fn load_dataset(&mut self, state: &mut GuiState, url: &str) -> Result<()> {
        if url.is_empty() || !url.ends_with(".csv") {
            bail!("not a CSV URL: {url:?}");
        }
        if state.dataset.is_loading {
            bail!("a dataset load is already in flight");
        }
        info!("loading dataset from {url}");
        state.dataset.is_loading = true;
        state.dataset.is_compiled = false;

        // Simulated parse: structure derived deterministically from the URL so
        // repeated headless runs are reproducible.
        let seed = url.bytes().map(usize::from).sum::<usize>();
        let _ = self.tx.send(Completion::DatasetLoaded {
            url: url.to_string(),
            sample_count: 50 + seed % 200,
            feature_count: 2 + seed % 12,
        });
        Ok(())
    }

    /// Freeze the loaded dataset into input/target tensors.
    pub fn compile_dataset(&mut self, state: &mut GuiState) {
        if state.dataset.is_loading || state.dataset.sample_count == 0 {
            warn!("compile_dataset ignored: no dataset ready");
            return;
        }
        state.dataset.is_compiled = true;
        info!("dataset compiled ({} samples)", state.dataset.sample_count);
    }

    /// Put a sample on the stage; `None` samples at random.
    pub fn stage_sample(&mut self, state: &GuiState, index: Option<usize>) {
        let n = state.dataset.sample_count;
        if n == 0 {
            warn!("stage_sample ignored: dataset is empty");
            return;
        }
        let idx = index.unwrap_or_else(|| random_index(n)).min(n - 1);
        self.staged_sample = Some(idx);
        debug!("staged sample #{idx}");
    }

    /// Predict on the staged sample.
    pub fn predict(&mut self, state: &GuiState) {
        if !state.network.is_compiled {
            warn!("predict ignored: network not compiled");
            return;
        }
        match self.staged_sample {
            Some(idx) => info!("prediction requested for sample #{idx}"),
            None => warn!("predict ignored: no sample staged"),
        }
    }

    /// Train on the whole dataset (fire-and-forget).
    pub fn train(&mut self, state: &GuiState, epochs: usize, batch_size: usize) {
        if !state.network.is_compiled || !state.dataset.is_compiled {
            warn!("train ignored: dataset/network not compiled");
            return;
        }
        let batch = if batch_size == 0 {
            state.dataset.sample_count
        } else {
            batch_size
        };
        info!("training started: {epochs} epochs, batch {batch}");
        let _ = self.tx.send(Completion::TrainingFinished { epochs });
    }

    /// Append one hidden layer and rebuild the (now uncompiled) network.
    pub fn add_hidden_layer(&mut self, state: &mut GuiState) {
        self.hidden_layers.push(DEFAULT_HIDDEN_UNITS);
        self.rebuild_network(state);
    }

    /// Drop every hidden layer and rebuild.
    pub fn remove_hidden_layers(&mut self, state: &mut GuiState) {
        self.hidden_layers.clear();
        self.rebuild_network(state);
    }

    /// Reinitialise weights; topology is kept.
    pub fn reset_network(&mut self, state: &mut GuiState) {
        self.rebuild_network(state);
    }

    /// Compile the network against the compiled dataset structure.
    pub fn compile_network(&mut self, state: &mut GuiState) {
        if state.dataset.is_loading || !state.dataset.is_compiled {
            warn!("compile_network ignored: dataset not compiled");
            return;
        }
        state.network.is_compiled = true;
        info!(
            "network compiled ({} hidden layer(s))",
            self.hidden_layers.len()
        );
    }

    fn rebuild_network(&mut self, state: &mut GuiState) {
        state.network.is_compiled = false;
        debug!(
            "network rebuilt: hidden layers {:?}, awaiting compile",
            self.hidden_layers
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_rejected_synchronously() {
        let mut session = Session::new();
        let mut state = GuiState::default();
        assert!(session.load_dataset(&mut state, "").is_err());
        assert!(session.load_dataset(&mut state, "data/table.txt").is_err());
        assert!(!state.dataset.is_loading);
    }

    #[test]
    fn test_load_completes_on_next_drain() {
        let mut session = Session::new();
        let mut state = GuiState::default();
        session.load_dataset(&mut state, "datasets/regression_data.csv").unwrap();
        assert!(state.dataset.is_loading);
        assert_eq!(state.dataset.sample_count, 0);

        // Next frame observes the completion as a state change
        assert_eq!(session.drain_completions(&mut state), 1);
        assert!(!state.dataset.is_loading);
        assert!(state.dataset.sample_count > 0);
        assert!(!state.dataset.is_compiled);
        assert!(!state.network.is_compiled);
    }

    #[test]
    fn test_duplicate_load_rejected_while_in_flight() {
        let mut session = Session::new();
        let mut state = GuiState::default();
        session.load_dataset(&mut state, "a.csv").unwrap();
        assert!(session.load_dataset(&mut state, "b.csv").is_err());
    }

    #[test]
    fn test_compile_gating() {
        let mut session = Session::new();
        let mut state = GuiState::default();

        // Nothing loaded: both compiles are ignored
        session.compile_dataset(&mut state);
        session.compile_network(&mut state);
        assert!(!state.dataset.is_compiled);
        assert!(!state.network.is_compiled);

        session.load_dataset(&mut state, "a.csv").unwrap();
        session.drain_completions(&mut state);
        session.compile_dataset(&mut state);
        session.compile_network(&mut state);
        assert!(state.dataset.is_compiled);
        assert!(state.network.is_compiled);
    }

    #[test]
    fn test_topology_change_uncompiles_network() {
        let mut session = Session::new();
        let mut state = GuiState::default();
        session.load_dataset(&mut state, "a.csv").unwrap();
        session.drain_completions(&mut state);
        session.compile_dataset(&mut state);
        session.compile_network(&mut state);

        session.add_hidden_layer(&mut state);
        assert_eq!(session.hidden_layer_count(), 1);
        assert!(!state.network.is_compiled);

        session.compile_network(&mut state);
        session.remove_hidden_layers(&mut state);
        assert_eq!(session.hidden_layer_count(), 0);
        assert!(!state.network.is_compiled);
    }

    #[test]
    fn test_stage_and_predict() {
        let mut session = Session::new();
        let mut state = GuiState::default();
        session.load_dataset(&mut state, "a.csv").unwrap();
        session.drain_completions(&mut state);
        session.compile_dataset(&mut state);
        session.compile_network(&mut state);

        session.stage_sample(&state, Some(3));
        assert_eq!(session.staged_sample(), Some(3));
        session.predict(&state);

        // Random staging stays inside the dataset
        session.stage_sample(&state, None);
        assert!(session.staged_sample().unwrap() < state.dataset.sample_count);
    }
}
