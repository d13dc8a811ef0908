use serde_json::Value;

use super::error::FilterError;
use super::filter::Filter;
use super::types::{FilterCondition, FilterOp};

/// Parses list filters and renders them as a parameterised WHERE clause
pub struct FilterWhere {
    param_values: Vec<Value>,
    param_index: usize,
}

impl FilterWhere {
    pub fn new(starting_param_index: usize) -> Self {
        Self {
            param_values: vec![],
            param_index: starting_param_index,
        }
    }

    /// Parse filters given either as a mapping
    /// `{"status": "Open", "annual_revenue": [">", 1000]}`
    /// or as a list of `[field, op, value]` / `[doctype, field, op, value]` triples.
    pub fn parse(filters: &Value) -> Result<Vec<FilterCondition>, FilterError> {
        match filters {
            Value::Null => Ok(vec![]),
            Value::Object(obj) => {
                let mut conditions = Vec::with_capacity(obj.len());
                for (column, value) in obj {
                    conditions.push(Self::parse_field_condition(column, value)?);
                }
                Ok(conditions)
            }
            Value::Array(items) => items.iter().map(Self::parse_list_condition).collect(),
            _ => Err(FilterError::InvalidFilters("filters must be an object or a list".to_string())),
        }
    }

    fn parse_field_condition(column: &str, value: &Value) -> Result<FilterCondition, FilterError> {
        Filter::validate_column(column)?;
        match value {
            // ["op", operand]
            Value::Array(pair) if pair.len() == 2 && pair[0].is_string() => {
                let operator = FilterOp::parse(pair[0].as_str().unwrap_or_default())?;
                Self::condition(column, operator, pair[1].clone())
            }
            Value::Array(_) => Err(FilterError::InvalidOperatorData(format!(
                "filter on '{}' must be [operator, value]",
                column
            ))),
            // Implicit equality: { field: value }
            other => Self::condition(column, FilterOp::Eq, other.clone()),
        }
    }

    fn parse_list_condition(item: &Value) -> Result<FilterCondition, FilterError> {
        let parts = item
            .as_array()
            .ok_or_else(|| FilterError::InvalidFilters("list filters must be arrays".to_string()))?;
        let (column, op, data) = match parts.as_slice() {
            [column, op, data] => (column, op, data),
            [_doctype, column, op, data] => (column, op, data),
            _ => {
                return Err(FilterError::InvalidFilters(
                    "list filters need [field, operator, value]".to_string(),
                ))
            }
        };
        let column = column
            .as_str()
            .ok_or_else(|| FilterError::InvalidFilters("filter field must be a string".to_string()))?;
        let op = op
            .as_str()
            .ok_or_else(|| FilterError::InvalidFilters("filter operator must be a string".to_string()))?;
        Filter::validate_column(column)?;
        Self::condition(column, FilterOp::parse(op)?, data.clone())
    }

    fn condition(column: &str, operator: FilterOp, data: Value) -> Result<FilterCondition, FilterError> {
        let data = match operator {
            FilterOp::In | FilterOp::NIn => Value::Array(Self::in_values(&data)),
            FilterOp::Between => match &data {
                Value::Array(values) if values.len() == 2 => data,
                _ => {
                    return Err(FilterError::InvalidOperatorData(
                        "between requires exactly 2 values".to_string(),
                    ))
                }
            },
            FilterOp::Is => match data.as_str() {
                Some("set") | Some("not set") => data,
                _ => {
                    return Err(FilterError::InvalidOperatorData(
                        "is requires \"set\" or \"not set\"".to_string(),
                    ))
                }
            },
            _ => data,
        };
        Ok(FilterCondition { column: column.to_string(), operator, data })
    }

    /// `in` accepts an array or a comma-separated string
    fn in_values(data: &Value) -> Vec<Value> {
        match data {
            Value::Array(values) => values.clone(),
            Value::String(s) => s
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| Value::String(s.to_string()))
                .collect(),
            Value::Null => vec![],
            other => vec![other.clone()],
        }
    }

    pub fn generate(conditions: &[FilterCondition], starting_param_index: usize) -> (String, Vec<Value>) {
        let mut filter_where = Self::new(starting_param_index);
        let sql_conditions: Vec<String> = conditions.iter().map(|c| filter_where.build_sql_condition(c)).collect();
        let where_clause = if sql_conditions.is_empty() { String::new() } else { sql_conditions.join(" AND ") };
        (where_clause, filter_where.param_values)
    }

    fn build_sql_condition(&mut self, condition: &FilterCondition) -> String {
        let quoted_column = format!("\"{}\"", condition.column);
        match condition.operator {
            FilterOp::Eq => {
                if condition.data.is_null() { format!("{} IS NULL", quoted_column) }
                else { format!("{} = {}", quoted_column, self.param(condition.data.clone())) }
            }
            FilterOp::Neq => {
                if condition.data.is_null() { format!("{} IS NOT NULL", quoted_column) }
                else { format!("{} <> {}", quoted_column, self.param(condition.data.clone())) }
            }
            FilterOp::Gt => format!("{} > {}", quoted_column, self.param(condition.data.clone())),
            FilterOp::Gte => format!("{} >= {}", quoted_column, self.param(condition.data.clone())),
            FilterOp::Lt => format!("{} < {}", quoted_column, self.param(condition.data.clone())),
            FilterOp::Lte => format!("{} <= {}", quoted_column, self.param(condition.data.clone())),
            FilterOp::Like => format!("{}::text ILIKE {}", quoted_column, self.param(Self::as_text(&condition.data))),
            FilterOp::NLike => format!("{}::text NOT ILIKE {}", quoted_column, self.param(Self::as_text(&condition.data))),
            FilterOp::In | FilterOp::NIn => {
                let values = condition.data.as_array().cloned().unwrap_or_default();
                let negate = condition.operator == FilterOp::NIn;
                if values.is_empty() {
                    return if negate { "1=1".to_string() } else { "1=0".to_string() };
                }
                let params: Vec<String> = values.into_iter().map(|v| self.param(v)).collect();
                let keyword = if negate { "NOT IN" } else { "IN" };
                format!("{} {} ({})", quoted_column, keyword, params.join(", "))
            }
            FilterOp::Between => {
                let values = condition.data.as_array().cloned().unwrap_or_default();
                let low = self.param(values.first().cloned().unwrap_or(Value::Null));
                let high = self.param(values.get(1).cloned().unwrap_or(Value::Null));
                format!("{} BETWEEN {} AND {}", quoted_column, low, high)
            }
            FilterOp::Is => {
                if condition.data.as_str() == Some("set") {
                    format!("({} IS NOT NULL AND {}::text <> '')", quoted_column, quoted_column)
                } else {
                    format!("({} IS NULL OR {}::text = '')", quoted_column, quoted_column)
                }
            }
        }
    }

    fn as_text(value: &Value) -> Value {
        match value {
            Value::String(_) => value.clone(),
            other => Value::String(other.to_string()),
        }
    }

    fn param(&mut self, value: Value) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }
}
