//! The stock widget set and cursor rules of the teaching stage.
//!
//! This is the declarative data the engine reconciles every frame: a global
//! community banner, the dataset tab controls (source select + compile) and
//! the network tab controls (sampling, prediction, training, topology).
//! Positions and sizes are fractions of the owning sub-canvas.

use crate::config::StageConfig;
use crate::core::command::Command;
use crate::core::cursor::{CursorRule, CursorStyle};
use crate::core::state::{GLOBAL_SUB_CANVAS, Predicate};
use crate::widgets::descriptor::{AttributeRule, WidgetAction, WidgetDescriptor, WidgetFactory};

/// Sub-canvas indices of the stage tabs.
pub const DATASET_SUB_CANVAS: i32 = 0;
pub const NETWORK_SUB_CANVAS: i32 = 1;

// Identifiers of the addressable widgets
pub const DATASET_URL_SELECT: &str = "dataset_url_select";
pub const COMPILE_DATASET_BUTTON: &str = "compile_dataset_button";
pub const GET_SAMPLE_BUTTON: &str = "get_sample_button";
pub const PREDICT_BUTTON: &str = "predict_button";
pub const FIT_BUTTON: &str = "fit_button";
pub const ADD_HIDDEN_LAYER_BUTTON: &str = "add_hidden_layer_button";
pub const REMOVE_HIDDEN_LAYER_BUTTON: &str = "remove_hidden_layer_button";
pub const RESET_NETWORK_BUTTON: &str = "reset_network_button";
pub const COMPILE_NETWORK_BUTTON: &str = "compile_network_button";

/// Cursor rules, evaluated top to bottom (last match wins): pointer while the
/// mouse is over the left tab strip.
pub fn cursor_rules() -> Vec<CursorRule> {
    vec![CursorRule::new(
        CursorStyle::Pointer,
        Predicate::new(|s| s.mouse.x < s.left_tab_width()),
    )]
}

/// Disabled whenever the network tab is not active or the network is not
/// compiled - the gate on every control that touches the live network.
fn needs_compiled_network() -> AttributeRule {
    AttributeRule::disabled_when(Predicate::new(|s| {
        !s.is_sub_canvas_active(NETWORK_SUB_CANVAS) || !s.network.is_compiled
    }))
}

/// Disabled whenever the network tab is not active.
fn needs_network_tab() -> AttributeRule {
    AttributeRule::disabled_when(Predicate::new(|s| {
        !s.is_sub_canvas_active(NETWORK_SUB_CANVAS)
    }))
}

/// The full declarative widget set.
pub fn widget_descriptors(config: &StageConfig) -> Vec<WidgetDescriptor> {
    let mut descriptors = vec![
        //// Main components

        // Community banner, visible on every tab
        WidgetDescriptor::new(
            GLOBAL_SUB_CANVAS,
            WidgetFactory::image_link("assets/join-globalaihub.png", "https://globalaihub.com"),
        )
        .at(0.805, 0.015)
        .sized(0.14, 0.08)
        .init(WidgetAction::set_style("cursor", "pointer")),
        //// Network components
        WidgetDescriptor::new(NETWORK_SUB_CANVAS, WidgetFactory::button("Get sample"))
            .with_id(GET_SAMPLE_BUTTON)
            .at(0.03, 0.02)
            .sized(0.10, 0.06)
            .init(WidgetAction::OnClick(Command::StageSample { index: None }))
            .rule(needs_compiled_network()),
        WidgetDescriptor::new(NETWORK_SUB_CANVAS, WidgetFactory::button("Predict"))
            .with_id(PREDICT_BUTTON)
            .at(0.14, 0.02)
            .sized(0.10, 0.06)
            .init(WidgetAction::OnClick(Command::Predict))
            .rule(needs_compiled_network()),
        WidgetDescriptor::new(NETWORK_SUB_CANVAS, WidgetFactory::button("Train on dataset!"))
            .with_id(FIT_BUTTON)
            .at(0.25, 0.02)
            .sized(0.10, 0.06)
            .init(WidgetAction::OnClick(Command::Train {
                epochs: config.train_epochs,
                batch_size: config.train_batch_size,
            }))
            .rule(needs_compiled_network()),
        WidgetDescriptor::new(NETWORK_SUB_CANVAS, WidgetFactory::button("Add hidden layer"))
            .with_id(ADD_HIDDEN_LAYER_BUTTON)
            .at(0.03, 0.92)
            .sized(0.10, 0.06)
            .init(WidgetAction::OnClick(Command::AddHiddenLayer))
            .rule(needs_network_tab()),
        WidgetDescriptor::new(NETWORK_SUB_CANVAS, WidgetFactory::button("Remove hidden layer"))
            .with_id(REMOVE_HIDDEN_LAYER_BUTTON)
            .at(0.14, 0.92)
            .sized(0.10, 0.06)
            .init(WidgetAction::OnClick(Command::RemoveHiddenLayers))
            .rule(needs_network_tab()),
        WidgetDescriptor::new(NETWORK_SUB_CANVAS, WidgetFactory::button("Reset network"))
            .with_id(RESET_NETWORK_BUTTON)
            .at(0.25, 0.92)
            .sized(0.10, 0.06)
            .init(WidgetAction::OnClick(Command::ResetNetwork))
            .rule(needs_network_tab()),
        WidgetDescriptor::new(NETWORK_SUB_CANVAS, WidgetFactory::button("Compile network!"))
            .with_id(COMPILE_NETWORK_BUTTON)
            .at(0.36, 0.92)
            .sized(0.10, 0.06)
            .init(WidgetAction::OnClick(Command::CompileNetwork))
            .rule(AttributeRule::disabled_when(Predicate::new(|s| {
                s.dataset.is_loading || !s.dataset.is_compiled || s.network.is_compiled
            }))),
        //// Dataset components

        // "Source" label, rendered as a ghost button
        WidgetDescriptor::new(DATASET_SUB_CANVAS, WidgetFactory::button("Source"))
            .at(0.02, 0.02)
            .sized(0.05, 0.06)
            .init(WidgetAction::add_class("textButton")),
    ];

    // Dataset source select: one option per configured CSV, first selected
    let mut select = WidgetDescriptor::new(DATASET_SUB_CANVAS, WidgetFactory::Select)
        .with_id(DATASET_URL_SELECT)
        .at(0.07, 0.02)
        .sized(0.25, 0.06);
    for source in &config.dataset_sources {
        select = select.init(WidgetAction::add_option(&source.name, &source.url));
    }
    if let Some(first) = config.dataset_sources.first() {
        select = select.init(WidgetAction::SetSelected {
            value: first.url.clone(),
        });
    }
    select = select.init(WidgetAction::OnChange(Command::LoadDatasetFromSelect {
        select_id: DATASET_URL_SELECT.to_string(),
    }));
    descriptors.push(select);

    descriptors.push(
        WidgetDescriptor::new(DATASET_SUB_CANVAS, WidgetFactory::button("Compile dataset!"))
            .with_id(COMPILE_DATASET_BUTTON)
            .at(0.33, 0.02)
            .sized(0.10, 0.06)
            .init(WidgetAction::OnClick(Command::CompileDataset))
            .rule(AttributeRule::disabled_when(Predicate::new(|s| {
                s.dataset.is_loading || s.dataset.is_compiled
            }))),
    );

    descriptors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cursor;
    use crate::core::state::GuiState;
    use crate::widgets::registry::GuiRegistry;
    use glam::Vec2;

    #[test]
    fn test_stock_set_builds_without_failures() {
        let config = StageConfig::default();
        let mut registry = GuiRegistry::build(widget_descriptors(&config)).unwrap();
        assert_eq!(registry.init_all(), 0);
        assert_eq!(registry.len(), 11);

        let select = registry
            .find_handle(DATASET_URL_SELECT)
            .unwrap()
            .as_select()
            .unwrap();
        assert_eq!(select.options.len(), config.dataset_sources.len());
        assert_eq!(select.value(), Some(config.dataset_sources[0].url.as_str()));
        assert!(select.on_change.is_some());
    }

    #[test]
    fn test_left_tab_cursor_rule() {
        let rules = cursor_rules();
        let mut state = GuiState {
            viewport: Vec2::new(1000.0, 600.0),
            left_tab_width_ratio: 0.2,
            mouse: Vec2::new(150.0, 300.0),
            ..Default::default()
        };
        assert_eq!(cursor::resolve(&rules, &state), CursorStyle::Pointer);

        state.mouse.x = 500.0;
        assert_eq!(cursor::resolve(&rules, &state), CursorStyle::Unset);
    }

    #[test]
    fn test_network_controls_gated_on_compile() {
        let state = GuiState {
            active_sub_canvas: NETWORK_SUB_CANVAS,
            ..Default::default()
        };
        let rule = needs_compiled_network();
        // Network tab active but network not compiled: disabled
        assert!(rule.when.eval(&state).unwrap());

        let mut compiled = state.clone();
        compiled.network.is_compiled = true;
        assert!(!rule.when.eval(&compiled).unwrap());

        // Other tab active: disabled even with a compiled network
        compiled.active_sub_canvas = DATASET_SUB_CANVAS;
        assert!(rule.when.eval(&compiled).unwrap());
    }
}
