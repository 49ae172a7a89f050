//! Rendered widget handles and their capability surface.
//!
//! A handle is the mutable object a descriptor controls: created exactly once
//! by the descriptor's factory, then repositioned/shown/hidden/attributed in
//! place by the frame pass. Handles are plain data - the hosting canvas/DOM
//! layer reads them to draw; this crate never paints pixels.
//!
//! The free-form "call any method by name" surface of the original design is
//! replaced by a fixed capability interface (`HandleBase`) plus kind-specific
//! state on each concrete handle, dispatched through `HandleKind`.

use enum_dispatch::enum_dispatch;
use glam::Vec2;
use indexmap::IndexMap;

use crate::core::command::Command;

/// Shared visual/interactive state every widget kind carries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandleBase {
    pub position: Vec2,
    pub size: Vec2,
    pub visible: bool,
    /// Present attributes, e.g. `disabled=""`. Insertion order kept.
    pub attributes: IndexMap<String, String>,
    /// Inline styles, e.g. `cursor: pointer`.
    pub styles: IndexMap<String, String>,
    /// CSS-like classes attached at init time.
    pub classes: Vec<String>,
    /// Command fired when the widget is clicked.
    pub on_click: Option<Command>,
}

impl HandleBase {
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    pub fn remove_attribute(&mut self, name: &str) {
        self.attributes.shift_remove(name);
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn is_disabled(&self) -> bool {
        self.has_attribute("disabled")
    }

    pub fn set_style(&mut self, key: &str, value: &str) {
        self.styles.insert(key.to_string(), value.to_string());
    }

    pub fn add_class(&mut self, name: &str) {
        if !self.classes.iter().any(|c| c == name) {
            self.classes.push(name.to_string());
        }
    }
}

/// Capability every concrete widget kind exposes to the frame pass.
#[enum_dispatch]
pub trait WidgetHandle {
    fn base(&self) -> &HandleBase;
    fn base_mut(&mut self) -> &mut HandleBase;
}

/// Push button with a fixed label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ButtonHandle {
    pub base: HandleBase,
    pub label: String,
}

impl ButtonHandle {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            base: HandleBase::default(),
            label: label.into(),
        }
    }
}

impl WidgetHandle for ButtonHandle {
    fn base(&self) -> &HandleBase {
        &self.base
    }
    fn base_mut(&mut self) -> &mut HandleBase {
        &mut self.base
    }
}

/// Dropdown select with (label, value) options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectHandle {
    pub base: HandleBase,
    pub options: Vec<(String, String)>,
    pub selected: Option<String>,
    /// Command fired when the selection changes.
    pub on_change: Option<Command>,
}

impl SelectHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an option; a value already present is ignored, so re-applied
    /// actions cannot grow the option list.
    pub fn add_option(&mut self, label: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        if !self.options.iter().any(|(_, v)| *v == value) {
            self.options.push((label.into(), value));
        }
    }

    /// Currently selected value, falling back to the first option.
    pub fn value(&self) -> Option<&str> {
        self.selected
            .as_deref()
            .or_else(|| self.options.first().map(|(_, v)| v.as_str()))
    }

    /// Select by value; unknown values are ignored.
    pub fn set_selected(&mut self, value: &str) {
        if self.options.iter().any(|(_, v)| v == value) {
            self.selected = Some(value.to_string());
        }
    }
}

impl WidgetHandle for SelectHandle {
    fn base(&self) -> &HandleBase {
        &self.base
    }
    fn base_mut(&mut self) -> &mut HandleBase {
        &mut self.base
    }
}

/// Clickable image that opens an external link.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageLinkHandle {
    pub base: HandleBase,
    pub src: String,
}

impl ImageLinkHandle {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            base: HandleBase::default(),
            src: src.into(),
        }
    }
}

impl WidgetHandle for ImageLinkHandle {
    fn base(&self) -> &HandleBase {
        &self.base
    }
    fn base_mut(&mut self) -> &mut HandleBase {
        &mut self.base
    }
}

/// Enum containing all concrete widget kinds, for unified storage in the
/// registry (dispatch via `WidgetHandle`).
#[enum_dispatch(WidgetHandle)]
#[derive(Debug, Clone, PartialEq)]
pub enum HandleKind {
    Button(ButtonHandle),
    Select(SelectHandle),
    ImageLink(ImageLinkHandle),
}

impl HandleKind {
    pub fn is_select(&self) -> bool {
        matches!(self, HandleKind::Select(_))
    }

    pub fn as_select(&self) -> Option<&SelectHandle> {
        match self {
            HandleKind::Select(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_select_mut(&mut self) -> Option<&mut SelectHandle> {
        match self {
            HandleKind::Select(s) => Some(s),
            _ => None,
        }
    }

    /// Kind name for log messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            HandleKind::Button(_) => "button",
            HandleKind::Select(_) => "select",
            HandleKind::ImageLink(_) => "image-link",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_attribute_roundtrip() {
        let mut handle = HandleKind::from(ButtonHandle::new("Predict"));
        assert!(!handle.base().is_disabled());

        handle.base_mut().set_attribute("disabled", "");
        assert!(handle.base().is_disabled());
        assert!(handle.base().has_attribute("disabled"));

        handle.base_mut().remove_attribute("disabled");
        assert!(!handle.base().is_disabled());
    }

    #[test]
    fn test_select_value_falls_back_to_first_option() {
        let mut select = SelectHandle::new();
        assert_eq!(select.value(), None);

        select.add_option("Binary", "datasets/binary.csv");
        select.add_option("Regression", "datasets/regression.csv");
        assert_eq!(select.value(), Some("datasets/binary.csv"));

        select.set_selected("datasets/regression.csv");
        assert_eq!(select.value(), Some("datasets/regression.csv"));

        // Unknown value is ignored
        select.set_selected("nope.csv");
        assert_eq!(select.value(), Some("datasets/regression.csv"));
    }

    #[test]
    fn test_option_deduplication() {
        let mut select = SelectHandle::new();
        select.add_option("Binary", "datasets/binary.csv");
        select.add_option("Binary (again)", "datasets/binary.csv");
        select.add_option("Regression", "datasets/regression.csv");
        assert_eq!(select.options.len(), 2);
        assert_eq!(select.options[0].0, "Binary");
    }

    #[test]
    fn test_class_deduplication() {
        let mut base = HandleBase::default();
        base.add_class("textButton");
        base.add_class("textButton");
        assert_eq!(base.classes, vec!["textButton".to_string()]);
    }
}
