//! Declarative widget descriptors.
//!
//! A descriptor is the data half of a widget: what kind it is, which
//! sub-canvas owns it, where it sits (as fractions of that sub-canvas), what
//! is done to it once at creation, every frame, and which attributes appear
//! or disappear depending on live state. The rendered half (the handle) is
//! created from the factory exactly once and mutated in place afterwards.

use anyhow::{Result, bail};
use glam::Vec2;

use crate::core::command::Command;
use crate::core::state::Predicate;

use super::handle::{ButtonHandle, HandleKind, ImageLinkHandle, SelectHandle, WidgetHandle};

/// Creates the underlying handle for a descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetFactory {
    Button { label: String },
    Select,
    ImageLink { src: String, url: String },
}

impl WidgetFactory {
    pub fn button(label: impl Into<String>) -> Self {
        WidgetFactory::Button { label: label.into() }
    }

    pub fn image_link(src: impl Into<String>, url: impl Into<String>) -> Self {
        WidgetFactory::ImageLink {
            src: src.into(),
            url: url.into(),
        }
    }

    /// Build the handle. Runs once per descriptor, before the first frame.
    pub fn create(&self) -> Result<HandleKind> {
        match self {
            WidgetFactory::Button { label } => {
                if label.is_empty() {
                    bail!("button factory requires a label");
                }
                Ok(ButtonHandle::new(label.clone()).into())
            }
            WidgetFactory::Select => Ok(SelectHandle::new().into()),
            WidgetFactory::ImageLink { src, url } => {
                if src.is_empty() {
                    bail!("image link factory requires an image source");
                }
                let mut handle = ImageLinkHandle::new(src.clone());
                handle.base.on_click = Some(Command::OpenUrl { url: url.clone() });
                Ok(handle.into())
            }
        }
    }
}

/// Typed action applied to a handle, either once at init or every frame.
///
/// Select-specific actions fail on other kinds; during initialization that
/// failure poisons only the owning widget.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetAction {
    SetStyle { key: String, value: String },
    AddClass { name: String },
    SetAttribute { name: String, value: String },
    AddOption { label: String, value: String },
    SetSelected { value: String },
    OnClick(Command),
    OnChange(Command),
}

impl WidgetAction {
    pub fn set_style(key: impl Into<String>, value: impl Into<String>) -> Self {
        WidgetAction::SetStyle {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn add_class(name: impl Into<String>) -> Self {
        WidgetAction::AddClass { name: name.into() }
    }

    pub fn add_option(label: impl Into<String>, value: impl Into<String>) -> Self {
        WidgetAction::AddOption {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn apply(&self, handle: &mut HandleKind) -> Result<()> {
        match self {
            WidgetAction::SetStyle { key, value } => handle.base_mut().set_style(key, value),
            WidgetAction::AddClass { name } => handle.base_mut().add_class(name),
            WidgetAction::SetAttribute { name, value } => {
                handle.base_mut().set_attribute(name, value)
            }
            WidgetAction::AddOption { label, value } => match handle.as_select_mut() {
                Some(select) => select.add_option(label.clone(), value.clone()),
                None => bail!("AddOption on a {} widget", handle.kind_name()),
            },
            WidgetAction::SetSelected { value } => match handle.as_select_mut() {
                Some(select) => select.set_selected(value),
                None => bail!("SetSelected on a {} widget", handle.kind_name()),
            },
            WidgetAction::OnClick(command) => {
                handle.base_mut().on_click = Some(command.clone())
            }
            WidgetAction::OnChange(command) => match handle.as_select_mut() {
                Some(select) => select.on_change = Some(command.clone()),
                None => bail!("OnChange on a {} widget", handle.kind_name()),
            },
        }
        Ok(())
    }
}

/// Attribute present on the handle exactly while its predicate holds.
#[derive(Debug, Clone)]
pub struct AttributeRule {
    pub name: String,
    pub value: String,
    pub when: Predicate,
}

impl AttributeRule {
    pub fn new(name: impl Into<String>, value: impl Into<String>, when: Predicate) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            when,
        }
    }

    /// `disabled=""` guarded by a predicate - the common case.
    pub fn disabled_when(when: Predicate) -> Self {
        Self::new("disabled", "", when)
    }
}

/// One declared interactive element.
#[derive(Debug, Clone)]
pub struct WidgetDescriptor {
    /// Optional unique identifier; anonymous widgets are not addressable.
    pub id: Option<String>,
    /// `GLOBAL_SUB_CANVAS` (-1) = visible regardless of the active tab.
    pub target_sub_canvas: i32,
    pub factory: WidgetFactory,
    /// Applied once at creation, in declared order.
    pub init_actions: Vec<WidgetAction>,
    /// Re-applied every frame, in declared order.
    pub update_actions: Vec<WidgetAction>,
    /// Fractions of the sub-canvas, in [0,1].
    pub rel_pos: Vec2,
    pub rel_size: Vec2,
    pub attribute_rules: Vec<AttributeRule>,
}

impl WidgetDescriptor {
    pub fn new(target_sub_canvas: i32, factory: WidgetFactory) -> Self {
        Self {
            id: None,
            target_sub_canvas,
            factory,
            init_actions: Vec::new(),
            update_actions: Vec::new(),
            rel_pos: Vec2::ZERO,
            rel_size: Vec2::ZERO,
            attribute_rules: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.rel_pos = Vec2::new(x, y);
        self
    }

    pub fn sized(mut self, w: f32, h: f32) -> Self {
        self.rel_size = Vec2::new(w, h);
        self
    }

    pub fn init(mut self, action: WidgetAction) -> Self {
        self.init_actions.push(action);
        self
    }

    pub fn update(mut self, action: WidgetAction) -> Self {
        self.update_actions.push(action);
        self
    }

    pub fn rule(mut self, rule: AttributeRule) -> Self {
        self.attribute_rules.push(rule);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_creates_each_kind() {
        assert!(WidgetFactory::button("Predict").create().unwrap().base().on_click.is_none());
        assert!(WidgetFactory::Select.create().unwrap().is_select());

        let link = WidgetFactory::image_link("assets/logo.png", "https://example.org")
            .create()
            .unwrap();
        assert_eq!(
            link.base().on_click,
            Some(Command::OpenUrl { url: "https://example.org".into() })
        );
    }

    #[test]
    fn test_factory_validation() {
        assert!(WidgetFactory::button("").create().is_err());
        assert!(WidgetFactory::image_link("", "https://example.org").create().is_err());
    }

    #[test]
    fn test_select_only_actions_fail_on_button() {
        let mut button = WidgetFactory::button("Get sample").create().unwrap();
        assert!(WidgetAction::add_option("A", "a.csv").apply(&mut button).is_err());
        assert!(
            WidgetAction::OnChange(Command::CompileDataset)
                .apply(&mut button)
                .is_err()
        );

        let mut select = WidgetFactory::Select.create().unwrap();
        WidgetAction::add_option("A", "a.csv").apply(&mut select).unwrap();
        WidgetAction::SetSelected { value: "a.csv".into() }
            .apply(&mut select)
            .unwrap();
        assert_eq!(select.as_select().unwrap().value(), Some("a.csv"));
    }

    #[test]
    fn test_builder_orders_actions() {
        let descriptor = WidgetDescriptor::new(1, WidgetFactory::button("Train on dataset!"))
            .with_id("fit_button")
            .at(0.25, 0.02)
            .sized(0.10, 0.06)
            .init(WidgetAction::set_style("cursor", "pointer"))
            .init(WidgetAction::OnClick(Command::Train { epochs: 100, batch_size: 0 }))
            .rule(AttributeRule::disabled_when(Predicate::always()));

        assert_eq!(descriptor.id.as_deref(), Some("fit_button"));
        assert_eq!(descriptor.init_actions.len(), 2);
        assert!(matches!(descriptor.init_actions[0], WidgetAction::SetStyle { .. }));
        assert_eq!(descriptor.attribute_rules.len(), 1);
    }
}
