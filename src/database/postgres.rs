use async_trait::async_trait;
use serde_json::Value;
use sqlx::{postgres::PgArguments, FromRow, PgPool, Row};
use tracing::debug;

use super::manager::DatabaseError;
use super::store::{DocStore, Record, VIEW_SETTINGS_DOCTYPE};
use crate::filter::types::SqlResult;
use crate::filter::Filter;
use crate::meta::{DocTypeMeta, FieldDescriptor};
use crate::view::{ColumnSpec, ViewSettings};

/// `DocStore` over a Frappe-style PostgreSQL site database
/// (`tabDocType`, `tabDocField`, `tabCRM View Settings`, `tab<Doctype>`)
#[derive(Clone)]
pub struct PgDocStore {
    pool: PgPool,
    log_queries: bool,
}

#[derive(Debug, FromRow)]
struct DocFieldRow {
    fieldname: String,
    label: Option<String>,
    fieldtype: String,
    options: Option<String>,
    hidden: bool,
    reqd: bool,
    read_only: bool,
}

impl From<DocFieldRow> for FieldDescriptor {
    fn from(row: DocFieldRow) -> Self {
        Self {
            fieldname: row.fieldname,
            label: row.label.filter(|l| !l.is_empty()),
            fieldtype: row.fieldtype.into(),
            options: row.options.filter(|o| !o.is_empty()),
            hidden: row.hidden,
            reqd: row.reqd,
            read_only: row.read_only,
        }
    }
}

#[derive(Debug, FromRow)]
struct ViewSettingsRow {
    name: String,
    label: Option<String>,
    dt: String,
    user: Option<String>,
    columns: Option<String>,
    rows: Option<String>,
    load_default_columns: bool,
    filters: Option<String>,
    order_by: Option<String>,
}

impl TryFrom<ViewSettingsRow> for ViewSettings {
    type Error = DatabaseError;

    fn try_from(row: ViewSettingsRow) -> Result<Self, Self::Error> {
        let invalid = |field: &str, e: serde_json::Error| {
            DatabaseError::InvalidData(format!("view settings {} has invalid {}: {}", row.name, field, e))
        };
        let columns: Vec<ColumnSpec> = match row.columns.as_deref().filter(|s| !s.is_empty()) {
            Some(text) => serde_json::from_str(text).map_err(|e| invalid("columns", e))?,
            None => vec![],
        };
        let rows: Vec<String> = match row.rows.as_deref().filter(|s| !s.is_empty()) {
            Some(text) => serde_json::from_str(text).map_err(|e| invalid("rows", e))?,
            None => vec![],
        };
        let filters: Option<Value> = match row.filters.as_deref().filter(|s| !s.is_empty()) {
            Some(text) => Some(serde_json::from_str(text).map_err(|e| invalid("filters", e))?),
            None => None,
        };

        Ok(ViewSettings {
            name: row.name,
            label: row.label,
            dt: row.dt,
            user: row.user,
            columns,
            rows,
            load_default_columns: row.load_default_columns,
            filters,
            order_by: row.order_by.filter(|o| !o.is_empty()),
        })
    }
}

const VIEW_SETTINGS_COLUMNS: &str = "name, label, dt, \"user\", columns, rows, \
     COALESCE(load_default_columns, 0) <> 0 AS load_default_columns, filters, order_by";

impl PgDocStore {
    pub fn new(pool: PgPool, log_queries: bool) -> Self {
        Self { pool, log_queries }
    }

    fn log(&self, sql: &SqlResult) {
        if self.log_queries {
            debug!(query = %sql.query, params = sql.params.len(), "list query");
        }
    }
}

#[async_trait]
impl DocStore for PgDocStore {
    async fn get_meta(&self, doctype: &str) -> Result<DocTypeMeta, DatabaseError> {
        let exists = sqlx::query("SELECT name FROM \"tabDocType\" WHERE name = $1")
            .bind(doctype)
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_none() {
            return Err(DatabaseError::NotFound(format!("DocType {} not found", doctype)));
        }

        let rows = sqlx::query_as::<_, DocFieldRow>(
            "SELECT fieldname, label, fieldtype, options, \
                    COALESCE(hidden, 0) <> 0 AS hidden, \
                    COALESCE(reqd, 0) <> 0 AS reqd, \
                    COALESCE(read_only, 0) <> 0 AS read_only \
             FROM \"tabDocField\" WHERE parent = $1 ORDER BY idx",
        )
        .bind(doctype)
        .fetch_all(&self.pool)
        .await?;

        Ok(DocTypeMeta::new(doctype, rows.into_iter().map(FieldDescriptor::from).collect()))
    }

    async fn get_all(&self, filter: &Filter) -> Result<Vec<Record>, DatabaseError> {
        let inner = filter.to_sql();
        let sql = SqlResult {
            query: format!("SELECT row_to_json(t) AS row FROM ({}) t", inner.query),
            params: inner.params,
        };
        self.log(&sql);

        let mut q = sqlx::query(&sql.query);
        for p in sql.params.iter() {
            q = bind_param_query(q, p);
        }
        let rows = q
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx(e, filter.doctype()))?;

        rows.into_iter()
            .map(|row| match row.try_get::<Value, _>("row")? {
                Value::Object(map) => Ok(map),
                other => Err(DatabaseError::InvalidData(format!("expected row object, got {}", other))),
            })
            .collect()
    }

    async fn count(&self, filter: &Filter) -> Result<i64, DatabaseError> {
        let sql = filter.to_count_sql();
        self.log(&sql);

        let mut q = sqlx::query(&sql.query);
        for p in sql.params.iter() {
            q = bind_param_query(q, p);
        }
        let row = q
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx(e, filter.doctype()))?;
        let count: i64 = row.try_get("count")?;
        Ok(count)
    }

    async fn view_settings(&self, name: &str) -> Result<Option<ViewSettings>, DatabaseError> {
        let query = format!(
            "SELECT {} FROM \"tab{}\" WHERE name = $1",
            VIEW_SETTINGS_COLUMNS, VIEW_SETTINGS_DOCTYPE
        );
        let row = sqlx::query_as::<_, ViewSettingsRow>(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        row.map(ViewSettings::try_from).transpose()
    }

    async fn user_views(&self, doctype: &str, user: &str) -> Result<Vec<ViewSettings>, DatabaseError> {
        let query = format!(
            "SELECT {} FROM \"tab{}\" WHERE dt = $1 AND \"user\" = $2 ORDER BY modified DESC",
            VIEW_SETTINGS_COLUMNS, VIEW_SETTINGS_DOCTYPE
        );
        let rows = sqlx::query_as::<_, ViewSettingsRow>(&query)
            .bind(doctype)
            .bind(user)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(ViewSettings::try_from).collect()
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn bind_param_query<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    v: &'q Value,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match v {
        Value::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s),
        // Arrays are expanded into one param per element before binding
        Value::Array(_) | Value::Object(_) => q.bind(v.to_string()),
    }
}
