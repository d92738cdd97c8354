//! Execution of compiled export queries.
//!
//! The fetcher knows nothing about columns: it runs the SQL it is given and
//! decodes the result positionally. Column 0 is always the task id.

use crate::libs::error::ExportError;
use rusqlite::{types::ValueRef, Connection, Row};
use std::collections::BTreeMap;
use tracing::debug;

/// One attribute value of a task, before it is pivoted into a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeValue {
    pub name: String,
    pub value: String,
}

/// Rows keyed by task id, ordered ascending.
pub type ExportRowMap = BTreeMap<i64, Vec<String>>;

pub struct ExportRows<'conn> {
    conn: &'conn Connection,
}

impl<'conn> ExportRows<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Runs `sql` and reads `value_count` text cells after the task id of each row.
    pub fn fetch(&self, sql: &str, value_count: usize) -> Result<ExportRowMap, ExportError> {
        debug!(sql, value_count, "fetching export rows");
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;

        let mut result = BTreeMap::new();
        while let Some(row) = rows.next()? {
            let task_id: i64 = row.get(0)?;
            let mut values = Vec::with_capacity(value_count);
            for index in 1..=value_count {
                values.push(cell_text(row, index)?);
            }
            result.insert(task_id, values);
        }

        debug!(rows = result.len(), "export rows fetched");
        Ok(result)
    }

    /// Runs a single column query and returns the names in result order.
    pub fn fetch_attribute_names(&self, sql: &str) -> Result<Vec<String>, ExportError> {
        debug!(sql, "fetching attribute names");
        let mut stmt = self.conn.prepare(sql)?;
        let names = stmt.query_map([], |row| cell_text(row, 0))?.collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// Runs an attributes query and groups `(name, value)` pairs by task id.
    pub fn fetch_attribute_values(&self, sql: &str) -> Result<BTreeMap<i64, Vec<AttributeValue>>, ExportError> {
        debug!(sql, "fetching attribute values");
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;

        let mut result: BTreeMap<i64, Vec<AttributeValue>> = BTreeMap::new();
        while let Some(row) = rows.next()? {
            let task_id: i64 = row.get(0)?;
            result.entry(task_id).or_default().push(AttributeValue {
                name: cell_text(row, 1)?,
                value: cell_text(row, 2)?,
            });
        }

        Ok(result)
    }
}

/// Reads any SQLite value as text. NULL becomes an empty string.
fn cell_text(row: &Row<'_>, index: usize) -> rusqlite::Result<String> {
    let text = match row.get_ref(index)? {
        ValueRef::Null => String::new(),
        ValueRef::Integer(value) => value.to_string(),
        ValueRef::Real(value) => value.to_string(),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => String::from_utf8_lossy(bytes).into_owned(),
    };
    Ok(text)
}
