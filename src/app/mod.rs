//! Application shell tying state, registry, commands and session together.
//!
//! **Architecture**: single-threaded and frame-driven. Input handlers only
//! queue `Command`s; all external mutation happens in `execute`, the single
//! dispatch point, before the widget pass reads the resulting state. The
//! frame order is fixed:
//!
//! 1. drain collaborator completions into `GuiState`
//! 2. execute queued commands (may start new fire-and-forget operations)
//! 3. reset + resolve the cursor from the rule list (last match wins)
//! 4. run the registry update pass against the state snapshot
//!
//! Steps 3-4 are pure reconciliation: rerunning them with unchanged state
//! leaves every handle in an identical observable state.

use anyhow::Result;
use glam::Vec2;
use log::{debug, info, warn};

use crate::config::StageConfig;
use crate::core::command::{Command, CommandQueue};
use crate::core::cursor::{self, CursorRule, CursorStyle};
use crate::core::session::Session;
use crate::core::state::GuiState;
use crate::ui;
use crate::widgets::handle::WidgetHandle;
use crate::widgets::registry::GuiRegistry;

/// The teaching stage: owns the GUI core and the simulated collaborators.
pub struct App {
    pub state: GuiState,
    pub registry: GuiRegistry,
    pub cursor_rules: Vec<CursorRule>,
    pub cursor: CursorStyle,
    pub queue: CommandQueue,
    pub session: Session,
    config: StageConfig,
}

impl App {
    /// Build the registry from the stock widget set and initialize every
    /// widget once, before the first frame.
    pub fn new(config: StageConfig, viewport: Vec2) -> Result<Self> {
        let mut registry = GuiRegistry::build(ui::widget_descriptors(&config))?;
        let failed = registry.init_all();
        if failed > 0 {
            warn!("{failed} widget(s) failed to initialize and stay hidden");
        }

        let mut state = GuiState {
            left_tab_width_ratio: config.left_tab_width_ratio,
            active_sub_canvas: ui::DATASET_SUB_CANVAS,
            ..Default::default()
        };
        state.sub_canvas_sizes = vec![Vec2::ZERO; config.sub_canvas_count];
        let mut app = Self {
            state,
            registry,
            cursor_rules: ui::cursor_rules(),
            cursor: CursorStyle::Unset,
            queue: CommandQueue::new(),
            session: Session::new(),
            config,
        };
        app.resize(viewport);
        info!("stage initialized: {} widget(s)", app.registry.len());
        Ok(app)
    }

    /// Propagate a window resize into the sub-canvas geometry. Every tab
    /// occupies the viewport minus the left tab strip.
    pub fn resize(&mut self, viewport: Vec2) {
        self.state.viewport = viewport;
        let tab = Vec2::new(
            viewport.x * (1.0 - self.state.left_tab_width_ratio),
            viewport.y,
        );
        for size in &mut self.state.sub_canvas_sizes {
            *size = tab;
        }
    }

    pub fn set_mouse(&mut self, pos: Vec2) {
        self.state.mouse = pos;
    }

    pub fn set_active_sub_canvas(&mut self, idx: i32) {
        self.state.active_sub_canvas = idx;
    }

    /// Simulated click. Disabled or unknown widgets ignore the click; a
    /// lookup miss is recoverable and only logged.
    pub fn click(&mut self, id: &str) {
        let Some(handle) = self.registry.find_handle(id) else {
            warn!("click on unknown widget {id:?} skipped");
            return;
        };
        if handle.base().is_disabled() {
            debug!("click on disabled widget {id:?} ignored");
            return;
        }
        if let Some(command) = handle.base().on_click.clone() {
            self.queue.send(command);
        }
    }

    /// Simulated select change: update the value, then fire the widget's
    /// change command.
    pub fn change_select(&mut self, id: &str, value: &str) {
        let Some(select) = self
            .registry
            .find_handle_mut(id)
            .and_then(|h| h.as_select_mut())
        else {
            warn!("select change on unknown widget {id:?} skipped");
            return;
        };
        select.set_selected(value);
        if let Some(command) = select.on_change.clone() {
            self.queue.send(command);
        }
    }

    /// Run one frame (see module docs for the fixed order). Returns the
    /// resolved cursor.
    pub fn frame(&mut self) -> CursorStyle {
        self.session.drain_completions(&mut self.state);
        for command in self.queue.drain() {
            self.execute(command);
        }
        self.cursor = cursor::resolve(&self.cursor_rules, &self.state);
        self.registry.update(&self.state);
        self.cursor
    }

    /// Single dispatch point for all trigger operations. Nothing here blocks;
    /// long-running work completes through the session's channel.
    fn execute(&mut self, command: Command) {
        debug!("execute {command:?}");
        match command {
            Command::StageSample { index } => self.session.stage_sample(&self.state, index),
            Command::Predict => self.session.predict(&self.state),
            Command::Train { epochs, batch_size } => {
                self.session.train(&self.state, epochs, batch_size)
            }
            Command::AddHiddenLayer => self.session.add_hidden_layer(&mut self.state),
            Command::RemoveHiddenLayers => self.session.remove_hidden_layers(&mut self.state),
            Command::ResetNetwork => self.session.reset_network(&mut self.state),
            Command::CompileNetwork => self.session.compile_network(&mut self.state),
            Command::CompileDataset => self.session.compile_dataset(&mut self.state),
            Command::LoadDataset { url } => {
                if let Err(e) = self.session.load_dataset(&mut self.state, &url) {
                    warn!("dataset load rejected: {e:#}");
                }
            }
            Command::LoadDatasetFromSelect { select_id } => {
                // Lookup miss skips the command instead of aborting the frame
                let Some(url) = self
                    .registry
                    .find_handle(&select_id)
                    .and_then(|h| h.as_select())
                    .and_then(|s| s.value())
                    .map(str::to_string)
                else {
                    warn!("select {select_id:?} not found or empty, load skipped");
                    return;
                };
                if let Err(e) = self.session.load_dataset(&mut self.state, &url) {
                    warn!("dataset load rejected: {e:#}");
                }
            }
            Command::OpenUrl { url } => info!("open {url} in browser"),
        }
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }
}
