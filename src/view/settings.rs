use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::columns::ColumnSpec;

/// A saved list-view layout ("CRM View Settings" document)
///
/// The settings named after a doctype act as its shared default layout;
/// other names are per-user custom views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSettings {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    /// Doctype the view applies to
    pub dt: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub rows: Vec<String>,
    #[serde(default)]
    pub load_default_columns: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
}
