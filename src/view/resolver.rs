use serde::Serialize;
use tracing::debug;

use super::columns::{ensure_column_keys, fallback_columns, fallback_rows, ColumnSpec};
use crate::controller::DocTypeController;
use crate::database::{DatabaseError, DocStore};

/// Caller-supplied view overrides for one list request
#[derive(Debug, Clone, Default)]
pub struct ViewRequest {
    pub columns: Option<Vec<ColumnSpec>>,
    pub rows: Option<Vec<String>>,
    pub custom_view_name: Option<String>,
}

/// Effective list layout after precedence is applied
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedView {
    pub columns: Vec<ColumnSpec>,
    pub rows: Vec<String>,
    pub is_default: bool,
}

/// Where the effective layout came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewSource {
    Request,
    SavedSettings,
    Controller,
    Fallback,
}

/// Resolve the columns and rows a list view should show.
///
/// Precedence: explicit request columns/rows, then the view settings saved
/// under the doctype's name, then the controller's declared default, then
/// Name + Last Modified. Every column key ends up in `rows`. A custom view
/// name can flip `is_default` back on through its `load_default_columns`
/// flag.
pub async fn resolve_view(
    store: &dyn DocStore,
    controller: &dyn DocTypeController,
    doctype: &str,
    request: ViewRequest,
) -> Result<(ResolvedView, ViewSource), DatabaseError> {
    let has_override = request.columns.as_ref().is_some_and(|c| !c.is_empty())
        || request.rows.as_ref().is_some_and(|r| !r.is_empty());

    let (mut view, source) = if has_override {
        let view = ResolvedView {
            columns: request.columns.filter(|c| !c.is_empty()).unwrap_or_else(fallback_columns),
            rows: request.rows.filter(|r| !r.is_empty()).unwrap_or_else(fallback_rows),
            is_default: false,
        };
        (view, ViewSource::Request)
    } else if let Some(settings) = store.view_settings(doctype).await? {
        let view = ResolvedView {
            columns: settings.columns,
            rows: settings.rows,
            is_default: false,
        };
        (view, ViewSource::SavedSettings)
    } else if let Some(defaults) = controller.default_list_data() {
        let view = ResolvedView {
            columns: defaults.columns,
            rows: defaults.rows,
            is_default: true,
        };
        (view, ViewSource::Controller)
    } else {
        let view = ResolvedView {
            columns: fallback_columns(),
            rows: fallback_rows(),
            is_default: true,
        };
        (view, ViewSource::Fallback)
    };

    ensure_column_keys(&view.columns, &mut view.rows);

    if !view.is_default {
        if let Some(name) = request.custom_view_name.as_deref().filter(|n| !n.is_empty()) {
            view.is_default = store
                .view_settings(name)
                .await?
                .map(|settings| settings.load_default_columns)
                .unwrap_or(false);
        }
    }

    debug!(doctype, ?source, is_default = view.is_default, "resolved list view");
    Ok((view, source))
}
