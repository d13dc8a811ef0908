use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One list-view table column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default)]
    pub field_type: String,
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    /// Presentation keys the frontend stores alongside (align, options, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ColumnSpec {
    pub fn new(label: &str, field_type: &str, key: &str, width: &str) -> Self {
        Self {
            label: label.to_string(),
            field_type: field_type.to_string(),
            key: key.to_string(),
            width: Some(width.to_string()),
            extra: Map::new(),
        }
    }
}

/// Columns used when nothing else declares a layout
pub fn fallback_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("Name", "Data", "name", "16rem"),
        ColumnSpec::new("Last Modified", "Datetime", "modified", "8rem"),
    ]
}

pub fn fallback_rows() -> Vec<String> {
    vec!["name".to_string()]
}

/// Append every column key missing from `rows`, keeping existing order
pub fn ensure_column_keys(columns: &[ColumnSpec], rows: &mut Vec<String>) {
    for column in columns {
        if !rows.iter().any(|r| r == &column.key) {
            rows.push(column.key.clone());
        }
    }
}

/// A field offered for column selection and sorting in the list view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListField {
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
}

impl ListField {
    fn standard(label: &str, field_type: &str, value: &str, options: Option<&str>) -> Self {
        Self {
            label: label.to_string(),
            field_type: field_type.to_string(),
            value: value.to_string(),
            options: options.map(str::to_string),
        }
    }
}

/// Fields every doctype record carries regardless of its schema
pub fn standard_fields() -> Vec<ListField> {
    vec![
        ListField::standard("Name", "Data", "name", None),
        ListField::standard("Created On", "Datetime", "creation", None),
        ListField::standard("Last Modified", "Datetime", "modified", None),
        ListField::standard("Modified By", "Link", "modified_by", Some("User")),
        ListField::standard("Assigned To", "Text", "_assign", None),
        ListField::standard("Owner", "Link", "owner", Some("User")),
    ]
}
