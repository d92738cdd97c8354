//! Static catalog of every column the export engine knows how to project.
//!
//! The catalog is the single source of truth for where a logical column
//! lives: its table, the key used to reach that table from the task log, the
//! join flavour, and whether the raw value must be reformatted in SQL.
//!
//! ## Join hierarchy
//!
//! ```text
//! tasks ──┬── workdays      (always joined, date range filtering)
//!         ├── categories    (first level)
//!         └── projects      (first level)
//!                ├── clients    (second level, LEFT)
//!                └── employers  (second level)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use taskies::libs::columns::{find_column, Table};
//!
//! let column = find_column("Client").unwrap();
//! assert_eq!(column.table, Table::Clients);
//! ```

use std::fmt;

/// Tables reachable from the task log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Tasks,
    Workdays,
    Projects,
    Categories,
    Clients,
    Employers,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Tasks => "tasks",
            Table::Workdays => "workdays",
            Table::Projects => "projects",
            Table::Categories => "categories",
            Table::Clients => "clients",
            Table::Employers => "employers",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// SQL join flavour used to reach a dimension table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
}

impl JoinKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
        }
    }
}

/// How a dimension table is reached from the task log.
///
/// `through` is `None` for tables joined directly on `tasks`, and names the
/// intermediate dimension for tables that are only reachable through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Join {
    pub key: &'static str,
    pub kind: JoinKind,
    pub through: Option<Table>,
}

/// Whether the raw value is emitted as-is or wrapped in a SQL formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Plain,
    Formatted,
}

/// Where the value of a column comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSource {
    /// A physical column of the owning table.
    Field(&'static str),
    /// `hours` and `minutes` of the task combined into one `HH:MM` value.
    Duration,
}

/// One exportable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailableColumn {
    pub source: ColumnSource,
    pub display_name: &'static str,
    pub table: Table,
    pub join: Option<Join>,
    pub kind: FieldKind,
}

const PROJECTS_JOIN: Join = Join {
    key: "project_id",
    kind: JoinKind::Inner,
    through: None,
};

const CATALOG: [AvailableColumn; 12] = [
    AvailableColumn {
        source: ColumnSource::Field("name"),
        display_name: "Employer",
        table: Table::Employers,
        join: Some(Join {
            key: "employer_id",
            kind: JoinKind::Inner,
            through: Some(Table::Projects),
        }),
        kind: FieldKind::Plain,
    },
    AvailableColumn {
        source: ColumnSource::Field("name"),
        display_name: "Client",
        table: Table::Clients,
        join: Some(Join {
            key: "client_id",
            kind: JoinKind::Left,
            through: Some(Table::Projects),
        }),
        kind: FieldKind::Plain,
    },
    AvailableColumn {
        source: ColumnSource::Field("name"),
        display_name: "Project",
        table: Table::Projects,
        join: Some(PROJECTS_JOIN),
        kind: FieldKind::Plain,
    },
    AvailableColumn {
        source: ColumnSource::Field("display_name"),
        display_name: "Display Name",
        table: Table::Projects,
        join: Some(PROJECTS_JOIN),
        kind: FieldKind::Plain,
    },
    AvailableColumn {
        source: ColumnSource::Field("name"),
        display_name: "Category",
        table: Table::Categories,
        join: Some(Join {
            key: "category_id",
            kind: JoinKind::Inner,
            through: None,
        }),
        kind: FieldKind::Plain,
    },
    // The date dimension is joined unconditionally by the query compiler.
    AvailableColumn {
        source: ColumnSource::Field("date"),
        display_name: "Date",
        table: Table::Workdays,
        join: None,
        kind: FieldKind::Plain,
    },
    AvailableColumn {
        source: ColumnSource::Field("description"),
        display_name: "Description",
        table: Table::Tasks,
        join: None,
        kind: FieldKind::Plain,
    },
    AvailableColumn {
        source: ColumnSource::Field("billable"),
        display_name: "Billable",
        table: Table::Tasks,
        join: None,
        kind: FieldKind::Plain,
    },
    AvailableColumn {
        source: ColumnSource::Field("unique_identifier"),
        display_name: "Unique ID",
        table: Table::Tasks,
        join: None,
        kind: FieldKind::Plain,
    },
    AvailableColumn {
        source: ColumnSource::Field("hours"),
        display_name: "Hours",
        table: Table::Tasks,
        join: None,
        kind: FieldKind::Formatted,
    },
    AvailableColumn {
        source: ColumnSource::Field("minutes"),
        display_name: "Minutes",
        table: Table::Tasks,
        join: None,
        kind: FieldKind::Formatted,
    },
    AvailableColumn {
        source: ColumnSource::Duration,
        display_name: "Duration",
        table: Table::Tasks,
        join: None,
        kind: FieldKind::Formatted,
    },
];

/// All exportable columns in catalog order.
pub fn columns() -> &'static [AvailableColumn] {
    &CATALOG
}

/// Looks up a column by its catalog display name.
pub fn find_column(display_name: &str) -> Option<&'static AvailableColumn> {
    CATALOG.iter().find(|column| column.display_name == display_name)
}

/// The catalog entry that supplies the always-present `projects` join.
pub fn projects_column() -> &'static AvailableColumn {
    // First projects entry in CATALOG.
    &CATALOG[2]
}
