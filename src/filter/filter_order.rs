use super::error::FilterError;
use super::filter::Filter;
use super::types::{FilterOrderInfo, SortDirection};

pub struct FilterOrder;

impl FilterOrder {
    /// Parse an `order_by` string like `"modified desc, name asc"`.
    ///
    /// Table-qualified columns (`` `tabCRM Lead`.modified ``) are reduced to the column name.
    pub fn parse(order_by: &str) -> Result<Vec<FilterOrderInfo>, FilterError> {
        let mut out = Vec::new();
        for part in order_by.split(',') {
            let trimmed = part.trim();
            if trimmed.is_empty() { continue; }
            let (column, sort) = match trimmed.rsplit_once(char::is_whitespace) {
                Some((column, direction)) if direction.eq_ignore_ascii_case("desc") => (column.trim(), SortDirection::Desc),
                Some((column, direction)) if direction.eq_ignore_ascii_case("asc") => (column.trim(), SortDirection::Asc),
                _ => (trimmed, SortDirection::Asc),
            };
            let column = Self::unqualify(column);
            Filter::validate_column(column)?;
            out.push(FilterOrderInfo { column: column.to_string(), sort });
        }
        Ok(out)
    }

    fn unqualify(column: &str) -> &str {
        let column = match column.rsplit_once('.') {
            Some((_, tail)) => tail,
            None => column,
        };
        column.trim_matches('`').trim_matches('"')
    }

    pub fn generate(infos: &[FilterOrderInfo]) -> String {
        if infos.is_empty() { return String::new(); }
        let parts: Vec<String> = infos
            .iter()
            .map(|i| format!("\"{}\" {}", i.column, i.sort.to_sql()))
            .collect();
        format!("ORDER BY {}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multiple_columns_with_directions() {
        let infos = FilterOrder::parse("modified desc, name").unwrap();
        assert_eq!(infos.len(), 2);
        assert_eq!(infos[0], FilterOrderInfo { column: "modified".into(), sort: SortDirection::Desc });
        assert_eq!(infos[1].sort, SortDirection::Asc);
        assert_eq!(FilterOrder::generate(&infos), "ORDER BY \"modified\" DESC, \"name\" ASC");
    }

    #[test]
    fn strips_table_qualifier() {
        let infos = FilterOrder::parse("`tabCRM Lead`.`creation` DESC").unwrap();
        assert_eq!(infos[0].column, "creation");
    }

    #[test]
    fn qualified_column_without_direction_sorts_ascending() {
        let infos = FilterOrder::parse("`tabCRM Lead`.modified").unwrap();
        assert_eq!(infos[0], FilterOrderInfo { column: "modified".into(), sort: SortDirection::Asc });
    }

    #[test]
    fn rejects_injection_and_bad_direction() {
        assert!(FilterOrder::parse("modified; drop table x").is_err());
        assert!(matches!(FilterOrder::parse("modified sideways"), Err(FilterError::InvalidColumn(_))));
        assert!(FilterOrder::parse("").unwrap().is_empty());
    }
}
