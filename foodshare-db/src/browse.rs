//! Filtered table browsing.
//!
//! Filters name a column of a known [`Table`] and carry values that are
//! always bound as parameters; nothing the caller supplies is spliced into
//! SQL text except column names that matched the table's layout.

use foodshare_model::Table;
use rusqlite::Connection;
use rusqlite::types::ToSql;

use crate::table::{QueryError, ResultTable, Value, query_table};

/// A single predicate on one column. Multiple filters are combined with AND.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Column equals the value.
    Eq(String, Value),
    /// Column equals any of the values. An empty list matches nothing.
    In(String, Vec<Value>),
    /// Column contains the text, case-insensitively.
    Contains(String, String),
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Eq(column.into(), value.into())
    }

    pub fn any_of<V: Into<Value>>(column: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Self::In(column.into(), values.into_iter().map(Into::into).collect())
    }

    pub fn contains(column: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Contains(column.into(), text.into())
    }

    fn column(&self) -> &str {
        match self {
            Self::Eq(c, _) | Self::In(c, _) | Self::Contains(c, _) => c,
        }
    }
}

/// Fetch every row of `table` matching all `filters`, ordered by primary key.
pub fn get_table(
    conn: &Connection,
    table: Table,
    filters: &[Filter],
) -> Result<ResultTable, QueryError> {
    let mut conditions = Vec::with_capacity(filters.len());
    let mut bound: Vec<Value> = Vec::new();

    for filter in filters {
        let column = resolve_column(table, filter.column())?;
        match filter {
            Filter::Eq(_, value) => {
                bound.push(value.clone());
                conditions.push(format!("{column} = ?{}", bound.len()));
            }
            Filter::In(_, values) if values.is_empty() => {
                conditions.push("0".to_string());
            }
            Filter::In(_, values) => {
                let placeholders: Vec<String> = values
                    .iter()
                    .map(|v| {
                        bound.push(v.clone());
                        format!("?{}", bound.len())
                    })
                    .collect();
                conditions.push(format!("{column} IN ({})", placeholders.join(", ")));
            }
            Filter::Contains(_, text) => {
                bound.push(Value::Text(format!("%{}%", escape_like(text))));
                conditions.push(format!("{column} LIKE ?{} ESCAPE '\\'", bound.len()));
            }
        }
    }

    let mut sql = format!("SELECT * FROM {}", table.name());
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(&format!(" ORDER BY {}", table.primary_key()));

    let params: Vec<&dyn ToSql> = bound.iter().map(|v| v as &dyn ToSql).collect();
    query_table(conn, &sql, params.as_slice())
}

/// Distinct non-null values of one column, sorted, for filter choices.
pub fn distinct_values(
    conn: &Connection,
    table: Table,
    column: &str,
) -> Result<Vec<String>, QueryError> {
    let column = resolve_column(table, column)?;
    let mut stmt = conn.prepare(&format!(
        "SELECT DISTINCT CAST({column} AS TEXT) FROM {table} WHERE {column} IS NOT NULL ORDER BY 1",
        table = table.name(),
    ))?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

fn resolve_column(table: Table, column: &str) -> Result<&'static str, QueryError> {
    table.column(column).ok_or_else(|| QueryError::UnknownColumn {
        table: table.name().to_string(),
        column: column.to_string(),
    })
}

/// Escape LIKE wildcards so user text matches literally.
fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("Pizza"), "Pizza");
    }

    #[test]
    fn unknown_column_is_rejected_before_sql() {
        let conn = crate::schema::open_memory().unwrap();
        let err = get_table(
            &conn,
            Table::Providers,
            &[Filter::eq("Name'; DROP TABLE providers; --", "x".to_string())],
        )
        .unwrap_err();
        assert!(matches!(err, QueryError::UnknownColumn { .. }));
    }
}
