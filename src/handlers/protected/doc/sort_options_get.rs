use axum::{extract::Path, Extension};

use crate::controller::SortOption;
use crate::handlers::AppState;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/doc/:doctype/sort_options
///
/// Empty when the doctype declares none; 404 when the doctype is unknown.
pub async fn sort_options_get(
    Path(doctype): Path<String>,
    Extension(state): Extension<AppState>,
) -> ApiResult<Vec<SortOption>> {
    state.store.get_meta(&doctype).await?;
    let options = state.controllers.get(&doctype).sort_options();
    Ok(ApiResponse::success(options))
}
