//! Widget machinery - descriptors, handles, registry.
//!
//! Widgets are declared as data and communicate outward via `Command`s.

pub mod descriptor;
pub mod handle;
pub mod registry;

pub use descriptor::{AttributeRule, WidgetAction, WidgetDescriptor, WidgetFactory};
pub use handle::{ButtonHandle, HandleBase, HandleKind, ImageLinkHandle, SelectHandle, WidgetHandle};
pub use registry::{GuiRegistry, Widget};
