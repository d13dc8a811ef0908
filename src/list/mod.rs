pub mod assembler;
pub mod filterable;

pub use assembler::{get_list_data, list_fields, ListError, ListRequest, ListResponse};
pub use filterable::{get_filterable_fields, FilterableField};
