pub mod declared;
pub mod registry;

pub use declared::{ControllerDefinition, DeclaredController};
pub use registry::{ControllerError, ControllerRegistry};

use serde::{Deserialize, Serialize};

use crate::view::ColumnSpec;

/// A sort choice offered by a doctype's list view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOption {
    pub label: String,
    pub value: String,
}

/// Columns and rows a doctype declares for its default list view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultListData {
    pub columns: Vec<ColumnSpec>,
    pub rows: Vec<String>,
}

/// List and filter customization hooks for one doctype.
///
/// Every hook is optional; the defaults mean "not declared".
pub trait DocTypeController: Send + Sync {
    fn sort_options(&self) -> Vec<SortOption> {
        vec![]
    }

    /// Fieldnames that must not be offered as filters
    fn non_filterable_fields(&self) -> Vec<String> {
        vec![]
    }

    fn default_list_data(&self) -> Option<DefaultListData> {
        None
    }
}

/// Controller for doctypes without customization
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopController;

impl DocTypeController for NoopController {}
