pub mod field;

pub use field::{FieldDescriptor, FieldType};

use serde::{Deserialize, Serialize};

/// Schema metadata for one doctype: its name and ordered field list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocTypeMeta {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl DocTypeMeta {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self { name: name.into(), fields }
    }
}
