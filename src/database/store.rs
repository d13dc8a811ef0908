use async_trait::async_trait;
use serde_json::{Map, Value};

use super::manager::DatabaseError;
use crate::filter::Filter;
use crate::meta::DocTypeMeta;
use crate::view::ViewSettings;

/// One record as returned by a list query: fieldname → value
pub type Record = Map<String, Value>;

/// Doctype used to persist saved list views
pub const VIEW_SETTINGS_DOCTYPE: &str = "CRM View Settings";

/// Metadata, record and view-settings access used by the handlers
#[async_trait]
pub trait DocStore: Send + Sync {
    /// Schema metadata for a doctype; `NotFound` when the doctype does not exist
    async fn get_meta(&self, doctype: &str) -> Result<DocTypeMeta, DatabaseError>;

    /// Records matching the filter's conditions, ordered and limited, projected to its selected fields
    async fn get_all(&self, filter: &Filter) -> Result<Vec<Record>, DatabaseError>;

    /// Count of records matching the filter's conditions, ignoring order and limit
    async fn count(&self, filter: &Filter) -> Result<i64, DatabaseError>;

    /// Saved view settings by document name
    async fn view_settings(&self, name: &str) -> Result<Option<ViewSettings>, DatabaseError>;

    /// Saved views for a doctype owned by `user`
    async fn user_views(&self, doctype: &str, user: &str) -> Result<Vec<ViewSettings>, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
