//! Widget registry: build-time checks, one-time lifecycle, per-frame pass.
//!
//! **Architecture**: the registry is built once at GUI initialization and
//! lives for the whole session. There is no per-widget deletion - changing
//! the functional widget set means rebuilding the registry. Each frame the
//! update pass reconciles every handle against the current `GuiState`
//! snapshot; it holds no state of its own, so rerunning it with unchanged
//! state is idempotent.
//!
//! Fault policy: everything here is per-widget recoverable. A failing factory
//! or init action poisons only that widget; a failing predicate skips only
//! that rule for the frame; an id lookup miss returns `None`.

use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use log::{debug, warn};

use crate::core::layout;
use crate::core::state::GuiState;

use super::descriptor::WidgetDescriptor;
use super::handle::{HandleKind, WidgetHandle};

/// A descriptor plus its (eventually created) handle.
#[derive(Debug)]
pub struct Widget {
    pub descriptor: WidgetDescriptor,
    handle: Option<HandleKind>,
    failed: bool,
}

impl Widget {
    /// The live handle, if initialization succeeded.
    pub fn handle(&self) -> Option<&HandleKind> {
        self.handle.as_ref()
    }

    /// True when the factory or an init action failed for this widget.
    pub fn is_failed(&self) -> bool {
        self.failed
    }
}

/// The declarative widget set, in declaration order.
pub struct GuiRegistry {
    widgets: Vec<Widget>,
    /// identifier -> slot in `widgets`
    by_id: IndexMap<String, usize>,
}

impl GuiRegistry {
    /// Build the registry from descriptors. Duplicate identifiers are a
    /// build-time error - the set is static data and a dupe is a bug in it.
    pub fn build(descriptors: Vec<WidgetDescriptor>) -> Result<Self> {
        let mut by_id = IndexMap::new();
        for (slot, descriptor) in descriptors.iter().enumerate() {
            if let Some(id) = &descriptor.id
                && by_id.insert(id.clone(), slot).is_some()
            {
                bail!("duplicate widget identifier {id:?}");
            }
        }
        let widgets = descriptors
            .into_iter()
            .map(|descriptor| Widget {
                descriptor,
                handle: None,
                failed: false,
            })
            .collect();
        Ok(Self { widgets, by_id })
    }

    /// One-time lifecycle: create every handle and apply its init actions in
    /// declared order, before any update pass. A failure is fatal for that
    /// widget only; the rest of the registry still initializes. Returns the
    /// number of failed widgets.
    pub fn init_all(&mut self) -> usize {
        let mut failed = 0;
        for (slot, widget) in self.widgets.iter_mut().enumerate() {
            if widget.handle.is_some() || widget.failed {
                continue; // init runs exactly once
            }
            match init_widget(&widget.descriptor) {
                Ok(handle) => widget.handle = Some(handle),
                Err(e) => {
                    // Partially-initialized widgets must never be displayed
                    widget.failed = true;
                    failed += 1;
                    warn!(
                        "widget #{slot} ({:?}) failed to initialize: {e:#}",
                        widget.descriptor.id
                    );
                }
            }
        }
        debug!("registry initialized: {} widget(s), {failed} failed", self.widgets.len());
        failed
    }

    /// Lookup by identifier. A miss is recoverable: callers skip the
    /// dependent action instead of aborting the frame.
    pub fn find_by_id(&self, id: &str) -> Option<&Widget> {
        self.by_id.get(id).map(|&slot| &self.widgets[slot])
    }

    /// Live handle of an identified widget (None on miss or failed init).
    pub fn find_handle(&self, id: &str) -> Option<&HandleKind> {
        self.find_by_id(id).and_then(Widget::handle)
    }

    pub fn find_handle_mut(&mut self, id: &str) -> Option<&mut HandleKind> {
        self.by_id
            .get(id)
            .copied()
            .and_then(|slot| self.widgets[slot].handle.as_mut())
    }

    /// Per-frame reconciliation, in declaration order for every widget:
    ///
    /// 1. apply `update_actions`
    /// 2. resolve relative layout and write position/size
    /// 3. force hidden, then show iff the widget is global or its sub-canvas
    ///    is the active one
    /// 4. evaluate attribute rules (strictly after visibility: an attribute
    ///    change never affects this frame's visibility decision)
    ///
    /// Handles are fully re-derived from descriptor + state each frame; no
    /// widget mutation survives except what this pass writes.
    pub fn update(&mut self, state: &GuiState) {
        for widget in &mut self.widgets {
            let descriptor = &widget.descriptor;
            let Some(handle) = widget.handle.as_mut() else {
                continue; // failed or not yet initialized: stays undisplayed
            };

            for action in &descriptor.update_actions {
                if let Err(e) = action.apply(handle) {
                    warn!("update action on {:?} skipped: {e:#}", descriptor.id);
                }
            }

            let rect = layout::resolve(
                state,
                descriptor.target_sub_canvas,
                descriptor.rel_pos,
                descriptor.rel_size,
            );
            let base = handle.base_mut();
            base.set_position(rect.pos);
            base.set_size(rect.size);

            base.hide();
            if state.is_sub_canvas_active(descriptor.target_sub_canvas) {
                base.show();
            }

            for rule in &descriptor.attribute_rules {
                match rule.when.eval(state) {
                    Ok(true) => base.set_attribute(&rule.name, &rule.value),
                    Ok(false) => base.remove_attribute(&rule.name),
                    Err(e) => {
                        // Treated as false for this frame; other rules still run
                        base.remove_attribute(&rule.name);
                        warn!(
                            "attribute rule {:?} on {:?} failed: {e:#}",
                            rule.name, descriptor.id
                        );
                    }
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Widget> {
        self.widgets.iter()
    }
}

fn init_widget(descriptor: &WidgetDescriptor) -> Result<HandleKind> {
    let mut handle = descriptor.factory.create().context("factory failed")?;
    for (i, action) in descriptor.init_actions.iter().enumerate() {
        action
            .apply(&mut handle)
            .with_context(|| format!("init action #{i}"))?;
    }
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::command::Command;
    use crate::core::state::{GLOBAL_SUB_CANVAS, Predicate};
    use crate::widgets::descriptor::{AttributeRule, WidgetAction, WidgetFactory};
    use glam::Vec2;

    fn state(active: i32) -> GuiState {
        GuiState {
            viewport: Vec2::new(1000.0, 600.0),
            left_tab_width_ratio: 0.2,
            sub_canvas_sizes: vec![Vec2::new(400.0, 300.0), Vec2::new(800.0, 600.0)],
            active_sub_canvas: active,
            ..Default::default()
        }
    }

    fn small_registry() -> GuiRegistry {
        let mut registry = GuiRegistry::build(vec![
            WidgetDescriptor::new(GLOBAL_SUB_CANVAS, WidgetFactory::image_link("a.png", "https://a"))
                .at(0.805, 0.015)
                .sized(0.14, 0.08),
            WidgetDescriptor::new(0, WidgetFactory::button("Compile dataset!"))
                .with_id("compile_dataset_button")
                .at(0.33, 0.02)
                .sized(0.10, 0.06)
                .rule(AttributeRule::disabled_when(Predicate::new(|s| {
                    s.dataset.is_loading || s.dataset.is_compiled
                }))),
            WidgetDescriptor::new(1, WidgetFactory::button("Get sample"))
                .with_id("get_sample_button")
                .at(0.03, 0.02)
                .sized(0.10, 0.06),
        ])
        .unwrap();
        assert_eq!(registry.init_all(), 0);
        registry
    }

    #[test]
    fn test_duplicate_id_rejected_at_build() {
        let result = GuiRegistry::build(vec![
            WidgetDescriptor::new(0, WidgetFactory::button("A")).with_id("dup"),
            WidgetDescriptor::new(1, WidgetFactory::button("B")).with_id("dup"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_lookup_miss_is_none_not_panic() {
        let registry = small_registry();
        assert!(registry.find_by_id("never_registered").is_none());
        assert!(registry.find_handle("never_registered").is_none());
        assert!(registry.find_by_id("get_sample_button").is_some());
    }

    #[test]
    fn test_visibility_partition() {
        let mut registry = small_registry();
        registry.update(&state(0));

        let visible: Vec<bool> = registry
            .iter()
            .map(|w| w.handle().unwrap().base().visible)
            .collect();
        // global, dataset tab (active), network tab (inactive)
        assert_eq!(visible, vec![true, true, false]);

        registry.update(&state(1));
        let visible: Vec<bool> = registry
            .iter()
            .map(|w| w.handle().unwrap().base().visible)
            .collect();
        assert_eq!(visible, vec![true, false, true]);
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut registry = small_registry();
        let state = state(1);

        registry.update(&state);
        let first: Vec<HandleKind> = registry
            .iter()
            .map(|w| w.handle().unwrap().clone())
            .collect();

        registry.update(&state);
        let second: Vec<HandleKind> = registry
            .iter()
            .map(|w| w.handle().unwrap().clone())
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_update_idempotent_with_add_option_action() {
        // An AddOption re-applied every frame must not grow the option list
        let mut registry = GuiRegistry::build(vec![
            WidgetDescriptor::new(0, WidgetFactory::Select)
                .with_id("sel")
                .update(WidgetAction::add_option("A", "a.csv")),
        ])
        .unwrap();
        registry.init_all();
        let state = state(0);

        registry.update(&state);
        let first = registry.find_handle("sel").unwrap().clone();
        assert_eq!(first.as_select().unwrap().options.len(), 1);

        registry.update(&state);
        let second = registry.find_handle("sel").unwrap().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_layout_applied_to_handles() {
        let mut registry = small_registry();
        registry.update(&state(0));

        let handle = registry.find_handle("compile_dataset_button").unwrap();
        // x = 1000*0.2 + 400*0.33, y = 300*0.02
        let base = handle.base();
        assert!((base.position - Vec2::new(332.0, 6.0)).abs().max_element() < 1e-3);
        assert!((base.size - Vec2::new(40.0, 18.0)).abs().max_element() < 1e-3);
    }

    #[test]
    fn test_attribute_toggles_with_state() {
        let mut registry = small_registry();
        let mut s = state(0);

        s.dataset.is_loading = true;
        registry.update(&s);
        assert!(registry.find_handle("compile_dataset_button").unwrap().base().is_disabled());

        // Loading flips off between frames: attribute disappears
        s.dataset.is_loading = false;
        registry.update(&s);
        assert!(!registry.find_handle("compile_dataset_button").unwrap().base().is_disabled());
    }

    #[test]
    fn test_failing_predicate_skips_rule_only() {
        let mut registry = GuiRegistry::build(vec![
            WidgetDescriptor::new(0, WidgetFactory::button("A"))
                .with_id("a")
                .rule(AttributeRule::new(
                    "disabled",
                    "",
                    Predicate::fallible(|_| anyhow::bail!("not ready")),
                ))
                .rule(AttributeRule::new("title", "ready", Predicate::always())),
        ])
        .unwrap();
        registry.init_all();
        registry.update(&state(0));

        let base = registry.find_handle("a").unwrap().base();
        assert!(!base.is_disabled());
        assert_eq!(base.attributes.get("title").map(String::as_str), Some("ready"));
    }

    #[test]
    fn test_init_failure_is_isolated() {
        let mut registry = GuiRegistry::build(vec![
            WidgetDescriptor::new(0, WidgetFactory::button("One")).with_id("one"),
            WidgetDescriptor::new(0, WidgetFactory::button("Two")).with_id("two"),
            // AddOption on a button fails during init
            WidgetDescriptor::new(0, WidgetFactory::button("Three"))
                .with_id("three")
                .init(WidgetAction::add_option("A", "a.csv")),
            WidgetDescriptor::new(0, WidgetFactory::button("Four"))
                .with_id("four")
                .init(WidgetAction::OnClick(Command::CompileDataset)),
        ])
        .unwrap();

        assert_eq!(registry.init_all(), 1);
        assert!(registry.find_by_id("three").unwrap().is_failed());
        assert!(registry.find_handle("three").is_none());

        // Remaining widgets initialized and participate in the frame pass
        registry.update(&state(0));
        for id in ["one", "two", "four"] {
            assert!(registry.find_handle(id).unwrap().base().visible, "{id}");
        }
        assert_eq!(
            registry.find_handle("four").unwrap().base().on_click,
            Some(Command::CompileDataset)
        );
    }

    #[test]
    fn test_init_runs_exactly_once() {
        let mut registry = GuiRegistry::build(vec![
            WidgetDescriptor::new(0, WidgetFactory::Select)
                .with_id("sel")
                .init(WidgetAction::add_option("A", "a.csv")),
        ])
        .unwrap();
        registry.init_all();
        registry.init_all(); // second call is a no-op

        let select = registry.find_handle("sel").unwrap().as_select().unwrap();
        assert_eq!(select.options.len(), 1);
    }

    #[test]
    fn test_update_actions_reapplied_every_frame() {
        let mut registry = GuiRegistry::build(vec![
            WidgetDescriptor::new(0, WidgetFactory::button("A"))
                .with_id("a")
                .update(WidgetAction::set_style("border", "none")),
        ])
        .unwrap();
        registry.init_all();

        registry.update(&state(0));
        let styles = &registry.find_handle("a").unwrap().base().styles;
        assert_eq!(styles.get("border").map(String::as_str), Some("none"));
    }
}
