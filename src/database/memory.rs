use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

use super::manager::DatabaseError;
use super::store::{DocStore, Record};
use crate::filter::{Filter, FilterMatch};
use crate::meta::DocTypeMeta;
use crate::view::ViewSettings;

/// JSON fixture layout accepted by [`MemoryStore`]
#[derive(Debug, Default, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub doctypes: Vec<DocTypeMeta>,
    /// Doctype name → records
    #[serde(default)]
    pub records: HashMap<String, Vec<Record>>,
    #[serde(default)]
    pub view_settings: Vec<ViewSettings>,
}

/// `DocStore` held entirely in memory, loaded from a fixture.
/// Read-only once shared.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    doctypes: HashMap<String, DocTypeMeta>,
    records: HashMap<String, Vec<Record>>,
    view_settings: Vec<ViewSettings>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fixture(fixture: Fixture) -> Self {
        let mut store = Self::new();
        for meta in fixture.doctypes {
            store.insert_doctype(meta);
        }
        for (doctype, records) in fixture.records {
            store.records.entry(doctype).or_default().extend(records);
        }
        store.view_settings = fixture.view_settings;
        store
    }

    pub fn from_json(json: &str) -> Result<Self, DatabaseError> {
        let fixture: Fixture =
            serde_json::from_str(json).map_err(|e| DatabaseError::InvalidData(format!("fixture: {}", e)))?;
        Ok(Self::from_fixture(fixture))
    }

    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, DatabaseError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| DatabaseError::InvalidData(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    pub fn insert_doctype(&mut self, meta: DocTypeMeta) -> &mut Self {
        self.records.entry(meta.name.clone()).or_default();
        self.doctypes.insert(meta.name.clone(), meta);
        self
    }

    pub fn insert_record(&mut self, doctype: &str, record: Value) -> &mut Self {
        if let Value::Object(map) = record {
            self.records.entry(doctype.to_string()).or_default().push(map);
        }
        self
    }

    pub fn insert_view_settings(&mut self, settings: ViewSettings) -> &mut Self {
        self.view_settings.retain(|v| v.name != settings.name);
        self.view_settings.push(settings);
        self
    }

    fn matching(&self, filter: &Filter) -> Result<Vec<&Record>, DatabaseError> {
        if !self.doctypes.contains_key(filter.doctype()) {
            return Err(DatabaseError::NotFound(format!("DocType {} not found", filter.doctype())));
        }
        Ok(self
            .records
            .get(filter.doctype())
            .map(|records| {
                records
                    .iter()
                    .filter(|r| FilterMatch::matches(filter.condition_list(), r))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn project(record: &Record, fields: &[String]) -> Record {
        if fields.is_empty() || fields.iter().any(|f| f == "*") {
            return record.clone();
        }
        fields
            .iter()
            .map(|f| (f.clone(), record.get(f).cloned().unwrap_or(Value::Null)))
            .collect()
    }
}

#[async_trait]
impl DocStore for MemoryStore {
    async fn get_meta(&self, doctype: &str) -> Result<DocTypeMeta, DatabaseError> {
        self.doctypes
            .get(doctype)
            .cloned()
            .ok_or_else(|| DatabaseError::NotFound(format!("DocType {} not found", doctype)))
    }

    async fn get_all(&self, filter: &Filter) -> Result<Vec<Record>, DatabaseError> {
        let mut records: Vec<Record> = self.matching(filter)?.into_iter().cloned().collect();
        FilterMatch::sort(&mut records, filter.order_list());
        if let Some(limit) = filter.limit_value() {
            records.truncate(limit as usize);
        }
        Ok(records.iter().map(|r| Self::project(r, filter.select_columns())).collect())
    }

    async fn count(&self, filter: &Filter) -> Result<i64, DatabaseError> {
        Ok(self.matching(filter)?.len() as i64)
    }

    async fn view_settings(&self, name: &str) -> Result<Option<ViewSettings>, DatabaseError> {
        Ok(self.view_settings.iter().find(|v| v.name == name).cloned())
    }

    async fn user_views(&self, doctype: &str, user: &str) -> Result<Vec<ViewSettings>, DatabaseError> {
        Ok(self
            .view_settings
            .iter()
            .filter(|v| v.dt == doctype && v.user.as_deref() == Some(user))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> MemoryStore {
        MemoryStore::from_json(
            &json!({
                "doctypes": [{"name": "CRM Lead", "fields": [{"fieldname": "status", "fieldtype": "Select"}]}],
                "records": {"CRM Lead": [
                    {"name": "L-1", "status": "Open", "modified": "2024-01-02"},
                    {"name": "L-2", "status": "Lost", "modified": "2024-01-03"},
                    {"name": "L-3", "status": "Open", "modified": "2024-01-01"}
                ]},
                "view_settings": [
                    {"name": "v1", "dt": "CRM Lead", "user": "a@example.com"},
                    {"name": "v2", "dt": "CRM Lead", "user": "b@example.com"}
                ]
            })
            .to_string(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn get_all_filters_sorts_limits_and_projects() {
        let store = store();
        let mut filter = Filter::new("CRM Lead").unwrap();
        filter
            .select(vec!["name".into(), "email".into()]).unwrap()
            .where_clause(&json!({"status": "Open"})).unwrap()
            .order("modified desc").unwrap()
            .limit(Some(1));

        let records = store.get_all(&filter).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["name"], "L-1");
        assert_eq!(records[0]["email"], Value::Null);
        assert!(records[0].get("status").is_none());
        assert_eq!(store.count(&filter).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn unknown_doctype_is_not_found() {
        let store = store();
        let filter = Filter::new("Nope").unwrap();
        assert!(matches!(store.get_all(&filter).await, Err(DatabaseError::NotFound(_))));
        assert!(matches!(store.get_meta("Nope").await, Err(DatabaseError::NotFound(_))));
    }

    #[tokio::test]
    async fn user_views_are_scoped_to_user() {
        let views = store().user_views("CRM Lead", "a@example.com").await.unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].name, "v1");
    }
}
