use serde::{Deserialize, Serialize};

use super::{DefaultListData, DocTypeController, SortOption};

/// Controller hooks declared as data, one entry per doctype in the
/// definitions file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControllerDefinition {
    pub doctype: String,
    #[serde(default)]
    pub sort_options: Option<Vec<SortOption>>,
    #[serde(default)]
    pub non_filterable_fields: Option<Vec<String>>,
    #[serde(default)]
    pub default_list_data: Option<DefaultListData>,
}

#[derive(Debug, Clone)]
pub struct DeclaredController {
    definition: ControllerDefinition,
}

impl DeclaredController {
    pub fn new(definition: ControllerDefinition) -> Self {
        Self { definition }
    }

    pub fn doctype(&self) -> &str {
        &self.definition.doctype
    }
}

impl DocTypeController for DeclaredController {
    fn sort_options(&self) -> Vec<SortOption> {
        self.definition.sort_options.clone().unwrap_or_default()
    }

    fn non_filterable_fields(&self) -> Vec<String> {
        self.definition.non_filterable_fields.clone().unwrap_or_default()
    }

    fn default_list_data(&self) -> Option<DefaultListData> {
        self.definition.default_list_data.clone()
    }
}
