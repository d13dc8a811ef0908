use serde_json::{Map, Value};
use std::cmp::Ordering;

use super::types::{FilterCondition, FilterOp, FilterOrderInfo, SortDirection};

/// Evaluates filter conditions against records held in memory.
///
/// Missing fields compare as null. Numbers compare numerically, everything
/// else by its text form, matching how the SQL rendering casts for `like`.
pub struct FilterMatch;

impl FilterMatch {
    pub fn matches(conditions: &[FilterCondition], record: &Map<String, Value>) -> bool {
        conditions.iter().all(|c| Self::matches_one(c, record.get(&c.column).unwrap_or(&Value::Null)))
    }

    fn matches_one(condition: &FilterCondition, value: &Value) -> bool {
        let data = &condition.data;
        match condition.operator {
            FilterOp::Eq => Self::loose_eq(value, data),
            FilterOp::Neq => !Self::loose_eq(value, data),
            FilterOp::Gt => Self::compare_present(value, data) == Some(Ordering::Greater),
            FilterOp::Gte => matches!(Self::compare_present(value, data), Some(Ordering::Greater | Ordering::Equal)),
            FilterOp::Lt => Self::compare_present(value, data) == Some(Ordering::Less),
            FilterOp::Lte => matches!(Self::compare_present(value, data), Some(Ordering::Less | Ordering::Equal)),
            FilterOp::Like => !value.is_null() && Self::like(&Self::text(value), &Self::text(data)),
            FilterOp::NLike => value.is_null() || !Self::like(&Self::text(value), &Self::text(data)),
            FilterOp::In => Self::values(data).iter().any(|d| Self::loose_eq(value, d)),
            FilterOp::NIn => !Self::values(data).iter().any(|d| Self::loose_eq(value, d)),
            FilterOp::Between => {
                let bounds = Self::values(data);
                match (bounds.first(), bounds.get(1)) {
                    (Some(low), Some(high)) => {
                        matches!(Self::compare_present(value, low), Some(Ordering::Greater | Ordering::Equal))
                            && matches!(Self::compare_present(value, high), Some(Ordering::Less | Ordering::Equal))
                    }
                    _ => false,
                }
            }
            FilterOp::Is => {
                let is_set = !value.is_null() && Self::text(value) != "";
                if data.as_str() == Some("set") { is_set } else { !is_set }
            }
        }
    }

    /// Order records by the given sort keys; stable for equal keys
    pub fn sort(records: &mut [Map<String, Value>], order: &[FilterOrderInfo]) {
        if order.is_empty() { return; }
        records.sort_by(|a, b| {
            for info in order {
                let left = a.get(&info.column).unwrap_or(&Value::Null);
                let right = b.get(&info.column).unwrap_or(&Value::Null);
                let ordering = Self::compare(left, right);
                let ordering = match info.sort {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            Ordering::Equal
        });
    }

    /// Total order used for sorting: nulls first, then numbers, then text
    pub fn compare(left: &Value, right: &Value) -> Ordering {
        match (left, right) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Less,
            (_, Value::Null) => Ordering::Greater,
            _ => match (Self::number(left), Self::number(right)) {
                (Some(l), Some(r)) => l.partial_cmp(&r).unwrap_or(Ordering::Equal),
                _ => Self::text(left).cmp(&Self::text(right)),
            },
        }
    }

    fn compare_present(value: &Value, data: &Value) -> Option<Ordering> {
        if value.is_null() || data.is_null() { None } else { Some(Self::compare(value, data)) }
    }

    fn loose_eq(value: &Value, data: &Value) -> bool {
        match (value, data) {
            (Value::Null, Value::Null) => true,
            (Value::Null, _) | (_, Value::Null) => false,
            _ => Self::compare(value, data) == Ordering::Equal,
        }
    }

    fn number(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    fn text(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    fn values(data: &Value) -> Vec<Value> {
        match data {
            Value::Array(values) => values.clone(),
            other => vec![other.clone()],
        }
    }

    /// Case-insensitive SQL LIKE with `%` and `_` wildcards
    fn like(value: &str, pattern: &str) -> bool {
        let value: Vec<char> = value.to_lowercase().chars().collect();
        let pattern: Vec<char> = pattern.to_lowercase().chars().collect();

        let (mut v, mut p) = (0, 0);
        let mut backtrack: Option<(usize, usize)> = None;
        while v < value.len() {
            if p < pattern.len() && (pattern[p] == '_' || pattern[p] == value[v]) {
                v += 1;
                p += 1;
            } else if p < pattern.len() && pattern[p] == '%' {
                backtrack = Some((p, v));
                p += 1;
            } else if let Some((star_p, star_v)) = backtrack {
                p = star_p + 1;
                v = star_v + 1;
                backtrack = Some((star_p, star_v + 1));
            } else {
                return false;
            }
        }
        pattern[p..].iter().all(|c| *c == '%')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterWhere;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn evaluates_comparisons_and_sets() {
        let lead = record(json!({"status": "Open", "annual_revenue": 5000, "email": "a@example.com"}));
        let check = |filters: Value| FilterMatch::matches(&FilterWhere::parse(&filters).unwrap(), &lead);

        assert!(check(json!({"status": "Open"})));
        assert!(!check(json!({"status": "Lost"})));
        assert!(check(json!({"annual_revenue": [">=", 5000]})));
        assert!(!check(json!({"annual_revenue": ["<", 100]})));
        assert!(check(json!({"status": ["in", ["Open", "Replied"]]})));
        assert!(check(json!({"status": ["not in", "Lost,Junk"]})));
        assert!(check(json!({"annual_revenue": ["between", [1000, 9000]]})));
        assert!(check(json!({"email": ["like", "%@EXAMPLE.com"]})));
        assert!(check(json!({"email": ["is", "set"]})));
        assert!(check(json!({"mobile_no": ["is", "not set"]})));
        assert!(!check(json!({"mobile_no": [">", 1]})));
    }

    #[test]
    fn like_supports_wildcards() {
        assert!(FilterMatch::like("john doe", "j%n d_e"));
        assert!(FilterMatch::like("abc", "%"));
        assert!(!FilterMatch::like("abc", "a_"));
        assert!(FilterMatch::like("", "%%"));
    }

    #[test]
    fn sorts_with_nulls_first_and_direction() {
        let mut records = vec![
            record(json!({"name": "b", "rank": 2})),
            record(json!({"name": "a", "rank": null})),
            record(json!({"name": "c", "rank": 10})),
        ];
        FilterMatch::sort(&mut records, &[FilterOrderInfo { column: "rank".into(), sort: SortDirection::Desc }]);
        let names: Vec<&str> = records.iter().map(|r| r["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["c", "b", "a"]);
    }
}
