// Doctype list and form metadata handlers, all under /api/doc/:doctype
pub mod fields_get;
pub mod filterable_fields_get;
pub mod list_post;
pub mod sort_options_get;
pub mod utils;

pub use fields_get::fields_get;
pub use filterable_fields_get::filterable_fields_get;
pub use list_post::list_post;
pub use sort_options_get::sort_options_get;
