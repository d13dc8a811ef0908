use axum::{extract::Path, Extension};

use crate::form::{group_sections, FormLayout};
use crate::handlers::AppState;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/doc/:doctype/fields - tabbed form layout plus per-field metadata
pub async fn fields_get(
    Path(doctype): Path<String>,
    Extension(state): Extension<AppState>,
) -> ApiResult<FormLayout> {
    let meta = state.store.get_meta(&doctype).await?;
    let layout = group_sections(&meta.fields);
    tracing::debug!(doctype = %doctype, sections = layout.sections.len(), "form layout");
    Ok(ApiResponse::success(layout))
}
