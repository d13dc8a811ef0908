use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::FilterError;

/// Comparison operators accepted in list filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOp {
    #[serde(rename = "=")] Eq,
    #[serde(rename = "!=")] Neq,
    #[serde(rename = ">")] Gt,
    #[serde(rename = ">=")] Gte,
    #[serde(rename = "<")] Lt,
    #[serde(rename = "<=")] Lte,
    #[serde(rename = "like")] Like,
    #[serde(rename = "not like")] NLike,
    #[serde(rename = "in")] In,
    #[serde(rename = "not in")] NIn,
    #[serde(rename = "between")] Between,
    #[serde(rename = "is")] Is,
}

impl FilterOp {
    pub fn parse(op: &str) -> Result<Self, FilterError> {
        Ok(match op.trim().to_ascii_lowercase().as_str() {
            "=" | "==" => FilterOp::Eq,
            "!=" | "<>" => FilterOp::Neq,
            ">" => FilterOp::Gt,
            ">=" => FilterOp::Gte,
            "<" => FilterOp::Lt,
            "<=" => FilterOp::Lte,
            "like" => FilterOp::Like,
            "not like" => FilterOp::NLike,
            "in" => FilterOp::In,
            "not in" => FilterOp::NIn,
            "between" => FilterOp::Between,
            "is" => FilterOp::Is,
            other => return Err(FilterError::UnsupportedOperator(other.to_string())),
        })
    }
}

/// One `column <op> value` condition; conditions are ANDed together
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCondition {
    pub column: String,
    pub operator: FilterOp,
    pub data: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOrderInfo {
    pub column: String,
    pub sort: SortDirection,
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<Value>,
}
