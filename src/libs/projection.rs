//! Resolution of user column selections against the column catalog.
//!
//! A selection names a catalog column by its display name and may carry a
//! user label and an output position. Resolving a batch of selections yields
//! two things the query compiler needs:
//!
//! - the ordered list of [`Projection`]s, one per output column;
//! - the list of [`JoinRequirement`]s, split into first and second level.
//!
//! Selections that reference a column the catalog no longer has are skipped,
//! so presets saved by older versions stay usable.

use crate::libs::columns::{find_column, projects_column, AvailableColumn, ColumnSource, FieldKind, JoinKind, Table};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A column picked by the user for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSelection {
    /// Output label, possibly renamed by the user. Empty means "use the catalog name".
    pub display_column: String,
    /// Catalog display name used for lookup.
    pub original_column: String,
    /// User controlled output position.
    pub order: i32,
}

impl ColumnSelection {
    pub fn new(display_column: &str, original_column: &str, order: i32) -> Self {
        Self {
            display_column: display_column.to_string(),
            original_column: original_column.to_string(),
            order,
        }
    }
}

/// A selection resolved against the catalog, ready for SQL generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub order: i32,
    pub source: ColumnSource,
    pub label: String,
    pub table: Table,
    pub kind: FieldKind,
}

impl Projection {
    fn from_column(column: &AvailableColumn, selection: &ColumnSelection) -> Self {
        let label = if selection.display_column.is_empty() {
            column.display_name.to_string()
        } else {
            selection.display_column.clone()
        };

        Self {
            order: selection.order,
            source: column.source,
            label,
            table: column.table,
            kind: column.kind,
        }
    }

    pub fn is_duration(&self) -> bool {
        self.source == ColumnSource::Duration
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinLevel {
    /// Joined directly on the task log.
    First,
    /// Joined on `projects`, which must already be in scope.
    Second,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinRequirement {
    pub table: Table,
    pub key: &'static str,
    pub kind: JoinKind,
    pub level: JoinLevel,
}

impl JoinRequirement {
    fn from_column(column: &AvailableColumn) -> Option<Self> {
        let join = column.join?;
        let level = match join.through {
            Some(_) => JoinLevel::Second,
            None => JoinLevel::First,
        };

        Some(Self {
            table: column.table,
            key: join.key,
            kind: join.kind,
            level,
        })
    }

    pub fn is_second_level(&self) -> bool {
        self.level == JoinLevel::Second
    }
}

/// Resolves selections into projections sorted by `order`.
///
/// The sort is stable: selections sharing an `order` keep their input order.
pub fn build_projections(selections: &[ColumnSelection]) -> Vec<Projection> {
    let mut projections: Vec<Projection> = selections
        .iter()
        .filter_map(|selection| match find_column(&selection.original_column) {
            Some(column) => Some(Projection::from_column(column, selection)),
            None => {
                debug!(column = %selection.original_column, "skipping selection without catalog match");
                None
            }
        })
        .collect();

    projections.sort_by_key(|projection| projection.order);
    projections
}

/// Collects the joins the selections need.
///
/// The `projects` join is always present because second level joins are
/// made through it. Each table appears at most once; the first requirement
/// seen for a table wins.
pub fn build_join_projections(selections: &[ColumnSelection]) -> Vec<JoinRequirement> {
    let mut joins: Vec<JoinRequirement> = JoinRequirement::from_column(projects_column()).into_iter().collect();

    for column in selections.iter().filter_map(|selection| find_column(&selection.original_column)) {
        if column.table == Table::Projects {
            continue;
        }
        let Some(requirement) = JoinRequirement::from_column(column) else {
            continue;
        };
        if joins.iter().any(|existing| existing.table == requirement.table) {
            continue;
        }
        joins.push(requirement);
    }

    joins
}
