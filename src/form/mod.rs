pub mod classifier;
pub mod sections;

pub use classifier::{widget_kind, FormField, SelectOption, WidgetKind};
pub use sections::{group_sections, FieldsMeta, FormLayout, Section};
