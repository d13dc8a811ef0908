use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use super::declared::{ControllerDefinition, DeclaredController};
use super::{DocTypeController, NoopController};

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("Failed to read controller definitions from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid controller definitions: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Controller declared twice for doctype: {0}")]
    Duplicate(String),
}

#[derive(Debug, Deserialize)]
struct DefinitionsFile {
    #[serde(default)]
    controllers: Vec<ControllerDefinition>,
}

/// Doctype name → controller, built once at startup
pub struct ControllerRegistry {
    controllers: HashMap<String, Arc<dyn DocTypeController>>,
    fallback: Arc<dyn DocTypeController>,
}

impl Default for ControllerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self {
            controllers: HashMap::new(),
            fallback: Arc::new(NoopController),
        }
    }

    /// Register a controller; a later registration for the same doctype replaces the earlier one
    pub fn register(&mut self, doctype: impl Into<String>, controller: Arc<dyn DocTypeController>) -> &mut Self {
        let doctype = doctype.into();
        debug!("Registered controller for doctype: {}", doctype);
        self.controllers.insert(doctype, controller);
        self
    }

    /// Register every controller declared in a YAML document of the form
    /// `controllers: [{ doctype, sort_options, non_filterable_fields, default_list_data }]`
    pub fn register_yaml(&mut self, yaml: &str) -> Result<&mut Self, ControllerError> {
        let file: DefinitionsFile = serde_yaml::from_str(yaml)?;
        let mut seen = std::collections::HashSet::new();
        for definition in &file.controllers {
            if !seen.insert(definition.doctype.as_str()) {
                return Err(ControllerError::Duplicate(definition.doctype.clone()));
            }
        }
        for definition in file.controllers {
            let controller = DeclaredController::new(definition);
            let doctype = controller.doctype().to_string();
            self.register(doctype, Arc::new(controller));
        }
        Ok(self)
    }

    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<&mut Self, ControllerError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ControllerError::Io {
            path: path.display().to_string(),
            source,
        })?;
        self.register_yaml(&yaml)?;
        info!("Loaded controller definitions from {}", path.display());
        Ok(self)
    }

    /// Controller for a doctype; undeclared doctypes get the no-op controller
    pub fn get(&self, doctype: &str) -> Arc<dyn DocTypeController> {
        self.controllers
            .get(doctype)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone())
    }

    pub fn contains(&self, doctype: &str) -> bool {
        self.controllers.contains_key(doctype)
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::SortOption;

    const DEFINITIONS: &str = r#"
controllers:
  - doctype: CRM Lead
    sort_options:
      - { label: Created, value: creation }
      - { label: Status, value: status }
    non_filterable_fields: [converted]
    default_list_data:
      columns:
        - { label: Name, type: Data, key: lead_name, width: 12rem }
      rows: [name, lead_name]
  - doctype: CRM Deal
    sort_options:
      - { label: Modified, value: modified }
"#;

    #[test]
    fn undeclared_doctype_gets_noop_hooks() {
        let registry = ControllerRegistry::new();
        let controller = registry.get("Contact");
        assert!(controller.sort_options().is_empty());
        assert!(controller.non_filterable_fields().is_empty());
        assert!(controller.default_list_data().is_none());
    }

    #[test]
    fn loads_declared_controllers_from_yaml() {
        let mut registry = ControllerRegistry::new();
        registry.register_yaml(DEFINITIONS).unwrap();
        assert_eq!(registry.len(), 2);

        let lead = registry.get("CRM Lead");
        assert_eq!(lead.sort_options()[1], SortOption { label: "Status".into(), value: "status".into() });
        assert_eq!(lead.non_filterable_fields(), vec!["converted".to_string()]);
        let defaults = lead.default_list_data().unwrap();
        assert_eq!(defaults.columns[0].key, "lead_name");
        assert_eq!(defaults.rows, vec!["name", "lead_name"]);

        let deal = registry.get("CRM Deal");
        assert!(deal.default_list_data().is_none());
        assert!(deal.non_filterable_fields().is_empty());
    }

    #[test]
    fn rejects_duplicate_declarations() {
        let yaml = "controllers:\n  - doctype: A\n  - doctype: A\n";
        let err = ControllerRegistry::new().register_yaml(yaml).err().unwrap();
        assert!(matches!(err, ControllerError::Duplicate(name) if name == "A"));
    }

    #[test]
    fn code_registration_overrides_fallback() {
        struct Sorted;
        impl DocTypeController for Sorted {
            fn sort_options(&self) -> Vec<SortOption> {
                vec![SortOption { label: "Name".into(), value: "name".into() }]
            }
        }

        let mut registry = ControllerRegistry::new();
        registry.register("Task", Arc::new(Sorted));
        assert!(registry.contains("Task"));
        assert_eq!(registry.get("Task").sort_options().len(), 1);
    }
}
