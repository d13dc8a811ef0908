use serde::Serialize;

use crate::controller::DocTypeController;
use crate::meta::DocTypeMeta;

/// A field the list view may filter on
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterableField {
    pub fieldname: String,
    pub fieldtype: String,
    pub label: Option<String>,
    /// Docfield id, `<doctype>-<fieldname>`
    pub name: String,
    pub options: Option<String>,
}

/// Visible primitive fields of a doctype, minus the controller's restricted ones
pub fn get_filterable_fields(meta: &DocTypeMeta, controller: &dyn DocTypeController) -> Vec<FilterableField> {
    let restricted = controller.non_filterable_fields();
    meta.fields
        .iter()
        .filter(|f| f.fieldtype.is_filterable())
        .filter(|f| !f.hidden)
        .filter(|f| !restricted.iter().any(|r| r == &f.fieldname))
        .map(|f| FilterableField {
            fieldname: f.fieldname.clone(),
            fieldtype: f.fieldtype.to_string(),
            label: f.label.clone(),
            name: format!("{}-{}", meta.name, f.fieldname),
            options: f.options.clone(),
        })
        .collect()
}
