pub mod columns;
pub mod resolver;
pub mod settings;

pub use columns::{ensure_column_keys, fallback_columns, fallback_rows, standard_fields, ColumnSpec, ListField};
pub use resolver::{resolve_view, ResolvedView, ViewRequest, ViewSource};
pub use settings::ViewSettings;
