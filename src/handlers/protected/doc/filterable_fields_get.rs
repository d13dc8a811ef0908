use axum::{extract::Path, Extension};

use crate::handlers::AppState;
use crate::list::{get_filterable_fields, FilterableField};
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/doc/:doctype/filterable_fields
pub async fn filterable_fields_get(
    Path(doctype): Path<String>,
    Extension(state): Extension<AppState>,
) -> ApiResult<Vec<FilterableField>> {
    let meta = state.store.get_meta(&doctype).await?;
    let controller = state.controllers.get(&doctype);
    Ok(ApiResponse::success(get_filterable_fields(&meta, controller.as_ref())))
}
