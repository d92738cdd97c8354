//! Pivoting of task attributes into trailing export columns.
//!
//! Attributes are sparse key/value pairs attached to tasks. Every attribute
//! name found in the exported range becomes one extra column; tasks that do
//! not carry an attribute get an empty cell in that column.

use crate::{
    db::export::ExportRows,
    libs::{
        error::ExportError,
        export::ExportTable,
        query::{DateRange, QueryBuilder},
    },
};
use tracing::debug;

pub struct AttributeMerger<'a> {
    rows: &'a ExportRows<'a>,
    builder: QueryBuilder,
}

impl<'a> AttributeMerger<'a> {
    pub fn new(rows: &'a ExportRows<'a>, builder: QueryBuilder) -> Self {
        Self { rows, builder }
    }

    /// Distinct attribute names in the range, sorted ascending.
    ///
    /// In preview mode the lookup is scoped to the single previewed task.
    pub fn discover_attribute_names(&self, range: Option<&DateRange>, table: &ExportTable) -> Result<Vec<String>, ExportError> {
        let task_id = self.preview_task_id(table)?;
        if self.builder.is_preview() && task_id.is_none() {
            return Ok(Vec::new());
        }

        let sql = self.builder.build_attribute_names_query(range, task_id);
        self.rows.fetch_attribute_names(&sql)
    }

    /// Appends one column per attribute name to `table`.
    ///
    /// Leaves `table` untouched when the range has no attributes.
    pub fn merge_attributes(&self, range: Option<&DateRange>, table: &mut ExportTable) -> Result<(), ExportError> {
        let names = self.discover_attribute_names(range, table)?;
        if names.is_empty() {
            debug!("no attributes to merge");
            return Ok(());
        }

        let task_id = self.preview_task_id(table)?;
        let values = self.rows.fetch_attribute_values(&self.builder.build_attributes_query(range, task_id))?;

        table.headers.extend(names.iter().cloned());
        for (task_id, cells) in table.rows.iter_mut() {
            let pairs = values.get(task_id).map(Vec::as_slice).unwrap_or_default();
            for name in &names {
                let value = pairs.iter().find(|pair| &pair.name == name).map(|pair| pair.value.clone());
                cells.push(value.unwrap_or_default());
            }
        }

        debug!(attributes = names.len(), "attributes merged");
        Ok(())
    }

    fn preview_task_id(&self, table: &ExportTable) -> Result<Option<i64>, ExportError> {
        if !self.builder.is_preview() {
            return Ok(None);
        }

        debug_assert!(table.rows.len() <= 1, "preview fetched {} rows", table.rows.len());
        if table.rows.len() > 1 {
            return Err(ExportError::InvariantViolation(format!(
                "preview expects at most one task, fetched {}",
                table.rows.len()
            )));
        }

        Ok(table.rows.keys().next().copied())
    }
}
