use serde_json::Value;

use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::types::{FilterCondition, FilterOrderInfo, SqlResult};

/// A list query against one doctype's table: selected fields, conditions, order and limit
#[derive(Debug, Clone)]
pub struct Filter {
    doctype: String,
    select_columns: Vec<String>,
    conditions: Vec<FilterCondition>,
    order_data: Vec<FilterOrderInfo>,
    limit: Option<u32>,
}

impl Filter {
    pub fn new(doctype: impl Into<String>) -> Result<Self, FilterError> {
        let doctype = doctype.into();
        Self::validate_doctype(&doctype)?;
        Ok(Self {
            doctype,
            select_columns: vec![],
            conditions: vec![],
            order_data: vec![],
            limit: None,
        })
    }

    pub fn select(&mut self, columns: Vec<String>) -> Result<&mut Self, FilterError> {
        for column in &columns {
            if column != "*" { Self::validate_column(column)?; }
        }
        self.select_columns = columns;
        Ok(self)
    }

    pub fn where_clause(&mut self, filters: &Value) -> Result<&mut Self, FilterError> {
        self.conditions = FilterWhere::parse(filters)?;
        Ok(self)
    }

    pub fn conditions(&mut self, conditions: Vec<FilterCondition>) -> &mut Self {
        self.conditions = conditions;
        self
    }

    pub fn order(&mut self, order_by: &str) -> Result<&mut Self, FilterError> {
        self.order_data = FilterOrder::parse(order_by)?;
        Ok(self)
    }

    pub fn limit(&mut self, limit: Option<u32>) -> &mut Self {
        self.limit = limit;
        self
    }

    pub fn doctype(&self) -> &str {
        &self.doctype
    }

    pub fn select_columns(&self) -> &[String] {
        &self.select_columns
    }

    pub fn condition_list(&self) -> &[FilterCondition] {
        &self.conditions
    }

    pub fn order_list(&self) -> &[FilterOrderInfo] {
        &self.order_data
    }

    pub fn limit_value(&self) -> Option<u32> {
        self.limit
    }

    /// Table holding the doctype's records
    pub fn table_name(&self) -> String {
        format!("tab{}", self.doctype)
    }

    pub fn to_sql(&self) -> SqlResult {
        let select_clause = self.build_select_clause();
        let (where_clause, params) = FilterWhere::generate(&self.conditions, 0);
        let order_clause = FilterOrder::generate(&self.order_data);
        let limit_clause = self.limit.map(|l| format!("LIMIT {}", l)).unwrap_or_default();

        let query = [
            format!("SELECT {}", select_clause),
            format!("FROM \"{}\"", self.table_name()),
            if where_clause.is_empty() { String::new() } else { format!("WHERE {}", where_clause) },
            order_clause,
            limit_clause,
        ].into_iter().filter(|s| !s.is_empty()).collect::<Vec<_>>().join(" ");

        SqlResult { query, params }
    }

    pub fn to_count_sql(&self) -> SqlResult {
        let (where_clause, params) = FilterWhere::generate(&self.conditions, 0);
        let query = if where_clause.is_empty() {
            format!("SELECT COUNT(*) AS count FROM \"{}\"", self.table_name())
        } else {
            format!("SELECT COUNT(*) AS count FROM \"{}\" WHERE {}", self.table_name(), where_clause)
        };
        SqlResult { query, params }
    }

    /// Doctype names may contain spaces ("CRM Lead") but nothing that could break quoting
    pub fn validate_doctype(name: &str) -> Result<(), FilterError> {
        if name.trim().is_empty() {
            return Err(FilterError::InvalidDoctype("Doctype cannot be empty".to_string()));
        }
        if !name.chars().all(|c| c.is_alphanumeric() || c == ' ' || c == '_' || c == '-') {
            return Err(FilterError::InvalidDoctype(format!("Invalid doctype name format: {}", name)));
        }
        Ok(())
    }

    pub fn validate_column(column: &str) -> Result<(), FilterError> {
        let mut chars = column.chars();
        let valid_start = matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_');
        if !valid_start || !column.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(FilterError::InvalidColumn(format!("Invalid column name format: {:?}", column)));
        }
        Ok(())
    }

    fn build_select_clause(&self) -> String {
        if self.select_columns.is_empty() || self.select_columns.iter().any(|c| c == "*") {
            "*".to_string()
        } else {
            self.select_columns.iter().map(|c| format!("\"{}\"", c)).collect::<Vec<_>>().join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_list_query() {
        let mut filter = Filter::new("CRM Lead").unwrap();
        filter
            .select(vec!["name".into(), "status".into()]).unwrap()
            .where_clause(&json!({"status": "Open"})).unwrap()
            .order("modified desc").unwrap()
            .limit(Some(20));

        let sql = filter.to_sql();
        assert_eq!(
            sql.query,
            "SELECT \"name\", \"status\" FROM \"tabCRM Lead\" WHERE \"status\" = $1 ORDER BY \"modified\" DESC LIMIT 20"
        );
        assert_eq!(sql.params, vec![json!("Open")]);
    }

    #[test]
    fn count_query_ignores_order_and_limit() {
        let mut filter = Filter::new("CRM Deal").unwrap();
        filter.order("modified desc").unwrap().limit(Some(5));
        assert_eq!(filter.to_count_sql().query, "SELECT COUNT(*) AS count FROM \"tabCRM Deal\"");
    }

    #[test]
    fn validates_names() {
        assert!(Filter::new("CRM Lead").is_ok());
        assert!(Filter::new("").is_err());
        assert!(Filter::new("Lead\"; --").is_err());
        assert!(Filter::validate_column("_assign").is_ok());
        assert!(Filter::validate_column("1name").is_err());
        assert!(Filter::new("Task").unwrap().select(vec!["bad col".into()]).is_err());
    }
}
