use axum::{body::Bytes, extract::Path, Extension};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::utils::parse_json;
use crate::config;
use crate::handlers::AppState;
use crate::list::{get_list_data, ListRequest, ListResponse};
use crate::middleware::{ApiResponse, ApiResult, Session};
use crate::view::{ColumnSpec, ViewRequest};

const DEFAULT_ORDER_BY: &str = "modified desc";

/// Raw list arguments; structured ones are decoded by [`parse_json`]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ListBody {
    filters: Option<Value>,
    default_filters: Option<Value>,
    order_by: Option<String>,
    page_length: Option<u32>,
    page_length_count: Option<u32>,
    columns: Option<Value>,
    rows: Option<Value>,
    custom_view_name: Option<String>,
}

/// POST /api/doc/:doctype/list
///
/// An empty body lists with defaults: no filters, `modified desc`, and the
/// configured page length.
pub async fn list_post(
    Path(doctype): Path<String>,
    Extension(state): Extension<AppState>,
    Extension(session): Extension<Session>,
    body: Bytes,
) -> ApiResult<ListResponse> {
    let body: ListBody = if body.iter().all(u8::is_ascii_whitespace) {
        ListBody::default()
    } else {
        serde_json::from_slice(&body)?
    };

    let request = list_request(doctype, body)?;
    let controller = state.controllers.get(&request.doctype);
    let response = get_list_data(state.store.as_ref(), controller.as_ref(), &session, request).await?;

    Ok(ApiResponse::success(response))
}

fn list_request(doctype: String, body: ListBody) -> Result<ListRequest, crate::error::ApiError> {
    let config = config::config();

    let page_length = config.cap_page_length(body.page_length.unwrap_or(config.list.default_page_length));
    let order_by = body
        .order_by
        .filter(|o| !o.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ORDER_BY.to_string());

    Ok(ListRequest {
        doctype,
        filters: parse_json::<Map<String, Value>>(body.filters)?.unwrap_or_default(),
        default_filters: parse_json(body.default_filters)?,
        order_by,
        page_length,
        page_length_count: body.page_length_count.unwrap_or(page_length),
        view: ViewRequest {
            columns: parse_json::<Vec<ColumnSpec>>(body.columns)?,
            rows: parse_json::<Vec<String>>(body.rows)?,
            custom_view_name: body.custom_view_name.filter(|n| !n.is_empty()),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> ListBody {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn defaults_fill_missing_arguments() {
        let request = list_request("CRM Lead".into(), ListBody::default()).unwrap();
        assert_eq!(request.order_by, "modified desc");
        assert_eq!(request.page_length, config::config().list.default_page_length);
        assert_eq!(request.page_length_count, request.page_length);
        assert!(request.filters.is_empty());
        assert!(request.view.columns.is_none());
    }

    #[test]
    fn decodes_text_arguments() {
        let request = list_request(
            "CRM Lead".into(),
            body(json!({
                "filters": "{\"status\": \"Open\"}",
                "rows": "[\"name\", \"status\"]",
                "columns": [{"label": "Status", "type": "Select", "key": "status"}],
                "page_length": 5,
                "custom_view_name": "mine"
            })),
        )
        .unwrap();
        assert_eq!(request.filters["status"], "Open");
        assert_eq!(request.view.rows.unwrap(), vec!["name", "status"]);
        assert_eq!(request.view.columns.unwrap()[0].key, "status");
        assert_eq!(request.page_length, 5);
        assert_eq!(request.view.custom_view_name.as_deref(), Some("mine"));
    }

    #[test]
    fn rejects_malformed_filters() {
        let err = list_request("CRM Lead".into(), body(json!({"filters": "{status"}))).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "INVALID_JSON");
    }
}
