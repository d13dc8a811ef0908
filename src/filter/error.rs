use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid doctype name: {0}")]
    InvalidDoctype(String),

    #[error("Invalid column name: {0}")]
    InvalidColumn(String),

    #[error("Invalid filters: {0}")]
    InvalidFilters(String),

    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),

    #[error("Invalid operator data: {0}")]
    InvalidOperatorData(String),
}
