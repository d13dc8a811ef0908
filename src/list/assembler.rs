use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::controller::DocTypeController;
use crate::database::{DatabaseError, DocStore, Record};
use crate::filter::{Filter, FilterError};
use crate::meta::DocTypeMeta;
use crate::middleware::Session;
use crate::view::{fallback_rows, resolve_view, standard_fields, ColumnSpec, ListField, ViewRequest, ViewSettings};

#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Filter(#[from] FilterError),
}

/// Decoded arguments of a list-data request
#[derive(Debug, Clone, Default)]
pub struct ListRequest {
    pub doctype: String,
    pub filters: Map<String, Value>,
    /// Applied on top of `filters`, replacing conditions on the same field
    pub default_filters: Option<Map<String, Value>>,
    pub order_by: String,
    pub page_length: u32,
    pub page_length_count: u32,
    pub view: ViewRequest,
}

/// Everything a list view needs in one payload
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    pub data: Vec<Record>,
    pub columns: Vec<ColumnSpec>,
    pub rows: Vec<String>,
    pub fields: Vec<ListField>,
    pub page_length: u32,
    pub page_length_count: u32,
    pub is_default: bool,
    pub views: Vec<ViewSettings>,
    pub total_count: i64,
    pub row_count: usize,
}

/// Fields a list view can show or sort by: value-bearing schema fields with a label
pub fn list_fields(meta: &DocTypeMeta) -> Vec<ListField> {
    meta.fields
        .iter()
        .filter(|f| !f.fieldtype.is_no_value())
        .filter(|f| !f.fieldname.is_empty() && f.label.as_deref().is_some_and(|l| !l.is_empty()))
        .map(|f| ListField {
            label: f.label_or_empty().to_string(),
            field_type: f.fieldtype.to_string(),
            value: f.fieldname.clone(),
            options: f.options.clone(),
        })
        .collect()
}

/// Append the standard record fields to `rows` and `fields` where missing
pub fn append_standard_fields(rows: &mut Vec<String>, fields: &mut Vec<ListField>) {
    for field in standard_fields() {
        if !rows.iter().any(|r| r == &field.value) {
            rows.push(field.value.clone());
        }
        if !fields.iter().any(|f| f.value == field.value) {
            fields.push(field);
        }
    }
}

/// Build the list payload for a doctype.
///
/// Records are fetched with the resolved rows only; the standard fields are
/// appended to `rows` afterwards so the client can offer them as columns.
pub async fn get_list_data(
    store: &dyn DocStore,
    controller: &dyn DocTypeController,
    session: &Session,
    request: ListRequest,
) -> Result<ListResponse, ListError> {
    let ListRequest {
        doctype,
        mut filters,
        default_filters,
        order_by,
        page_length,
        page_length_count,
        view,
    } = request;

    if let Some(defaults) = default_filters {
        filters.extend(defaults);
    }
    let mut list_filter = Filter::new(&doctype)?;
    list_filter.where_clause(&Value::Object(filters))?;

    let (mut resolved, _) = resolve_view(store, controller, &doctype, view).await?;
    // A layout saved with no rows still fetches only the record name
    if resolved.rows.is_empty() {
        resolved.rows = fallback_rows();
    }

    // Zero page length lists every matching record
    list_filter
        .select(resolved.rows.clone())?
        .order(&order_by)?
        .limit(Some(page_length).filter(|n| *n > 0));

    let mut count_filter = Filter::new(&doctype)?;
    count_filter.conditions(list_filter.condition_list().to_vec());

    let (data, meta, views, total_count) = futures::try_join!(
        store.get_all(&list_filter),
        store.get_meta(&doctype),
        store.user_views(&doctype, &session.user),
        store.count(&count_filter),
    )?;

    let mut rows = resolved.rows;
    let mut fields = list_fields(&meta);
    append_standard_fields(&mut rows, &mut fields);

    debug!(doctype = %doctype, rows = rows.len(), fields = fields.len(), "assembled list metadata");
    info!(doctype = %doctype, user = %session.user, returned = data.len(), total_count, "list data");

    Ok(ListResponse {
        row_count: data.len(),
        data,
        columns: resolved.columns,
        rows,
        fields,
        page_length,
        page_length_count,
        is_default: resolved.is_default,
        views,
        total_count,
    })
}
