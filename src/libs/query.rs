//! SQL generation for task log exports.
//!
//! [`QueryBuilder`] turns resolved projections and join requirements into a
//! single `SELECT` on the `tasks` table. It also produces the two queries
//! used to pivot task attributes into extra columns.
//!
//! ## Query shape
//!
//! ```text
//! SELECT tasks.task_id, <projection>, ...
//! FROM tasks INNER JOIN workdays ON tasks.workday_id = workdays.workday_id
//! <first level joins on tasks.<key>>
//! <second level joins on projects.<key>>
//! [WHERE workdays.date >= '<from>' AND workdays.date <= '<to>' AND tasks.is_active = 1]
//! [LIMIT 1]
//! ```
//!
//! Second level joins reference `projects`, so they are emitted after every
//! first level join. The projection builder always requests the `projects`
//! join, which keeps that reference valid.

use crate::libs::{
    columns::{ColumnSource, FieldKind},
    projection::{JoinRequirement, Projection},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

const FACT_TABLE: &str = "tasks";
const FACT_ID: &str = "task_id";
const DATE_TABLE: &str = "workdays";
const DATE_KEY: &str = "workday_id";
const SECOND_LEVEL_TABLE: &str = "projects";
const DURATION_LABEL: &str = "Duration";

/// Inclusive range of workday dates to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    fn where_clause(&self) -> String {
        format!(
            "WHERE {DATE_TABLE}.date >= '{}' AND {DATE_TABLE}.date <= '{}'",
            self.from.format("%Y-%m-%d"),
            self.to.format("%Y-%m-%d")
        )
    }
}

/// Compiles export queries. `preview` limits results to a single task.
#[derive(Debug, Clone, Copy)]
pub struct QueryBuilder {
    preview: bool,
}

impl QueryBuilder {
    pub fn new(preview: bool) -> Self {
        Self { preview }
    }

    pub fn is_preview(&self) -> bool {
        self.preview
    }

    /// Builds the main export query.
    ///
    /// Without a date range the query has no `WHERE` clause at all.
    pub fn build_query(&self, projections: &[Projection], joins: &[JoinRequirement], range: Option<&DateRange>) -> String {
        let mut select = vec![format!("{FACT_TABLE}.{FACT_ID}")];
        select.extend(projections.iter().map(projection_expression));

        let mut query = format!(
            "SELECT {} FROM {FACT_TABLE} INNER JOIN {DATE_TABLE} ON {FACT_TABLE}.{DATE_KEY} = {DATE_TABLE}.{DATE_KEY}",
            select.join(", ")
        );

        for join in joins.iter().filter(|join| !join.is_second_level()) {
            query.push(' ');
            query.push_str(&join_clause(join, FACT_TABLE));
        }
        for join in joins.iter().filter(|join| join.is_second_level()) {
            query.push(' ');
            query.push_str(&join_clause(join, SECOND_LEVEL_TABLE));
        }

        if let Some(range) = range {
            let _ = write!(query, " {} AND {FACT_TABLE}.is_active = 1", range.where_clause());
        }

        if self.preview {
            query.push_str(" LIMIT 1");
        }

        query
    }

    /// Builds the query returning `(task_id, attribute name, attribute value)` rows.
    ///
    /// In preview mode `task_id` restricts the rows to that task.
    pub fn build_attributes_query(&self, range: Option<&DateRange>, task_id: Option<i64>) -> String {
        format!(
            "SELECT {FACT_TABLE}.{FACT_ID}, attributes.name, \
             coalesce(task_attribute_values.text_value, task_attribute_values.boolean_value, task_attribute_values.numeric_value) AS value {}",
            self.attributes_source(range, task_id)
        )
    }

    /// Builds the query returning the distinct attribute names, sorted ascending.
    pub fn build_attribute_names_query(&self, range: Option<&DateRange>, task_id: Option<i64>) -> String {
        format!(
            "SELECT DISTINCT attributes.name {} ORDER BY attributes.name",
            self.attributes_source(range, task_id)
        )
    }

    fn attributes_source(&self, range: Option<&DateRange>, task_id: Option<i64>) -> String {
        let mut conditions = Vec::new();
        if let Some(range) = range {
            conditions.push(format!(
                "{DATE_TABLE}.date >= '{}' AND {DATE_TABLE}.date <= '{}' AND {FACT_TABLE}.is_active = 1",
                range.from.format("%Y-%m-%d"),
                range.to.format("%Y-%m-%d")
            ));
        }
        conditions.push("task_attribute_values.is_active = 1".to_string());
        if self.preview {
            if let Some(task_id) = task_id {
                conditions.push(format!("{FACT_TABLE}.{FACT_ID} = {task_id}"));
            }
        }

        format!(
            "FROM {FACT_TABLE} \
             INNER JOIN {DATE_TABLE} ON {FACT_TABLE}.{DATE_KEY} = {DATE_TABLE}.{DATE_KEY} \
             INNER JOIN task_attribute_values ON {FACT_TABLE}.{FACT_ID} = task_attribute_values.{FACT_ID} \
             INNER JOIN attributes ON task_attribute_values.attribute_id = attributes.attribute_id \
             WHERE {}",
            conditions.join(" AND ")
        )
    }
}

fn projection_expression(projection: &Projection) -> String {
    let table = projection.table.name();
    let (expression, label) = match (projection.kind, projection.source) {
        (_, ColumnSource::Duration) => {
            let label = if projection.label.is_empty() { DURATION_LABEL } else { projection.label.as_str() };
            (
                format!("(printf('%02d', {table}.hours) || ':' || printf('%02d', {table}.minutes))"),
                label,
            )
        }
        (FieldKind::Formatted, ColumnSource::Field(column)) => (format!("(printf('%02d', {table}.{column}))"), projection.label.as_str()),
        (FieldKind::Plain, ColumnSource::Field(column)) => (format!("{table}.{column}"), projection.label.as_str()),
    };

    if label.is_empty() {
        expression
    } else {
        format!("{expression} AS \"{}\"", label.replace('"', "\"\""))
    }
}

fn join_clause(join: &JoinRequirement, left_table: &str) -> String {
    format!(
        "{} {table} ON {left_table}.{key} = {table}.{key}",
        join.kind.keyword(),
        table = join.table.name(),
        key = join.key
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::projection::{build_join_projections, build_projections, ColumnSelection};

    fn range(from: &str, to: &str) -> DateRange {
        DateRange::new(
            NaiveDate::parse_from_str(from, "%Y-%m-%d").unwrap(),
            NaiveDate::parse_from_str(to, "%Y-%m-%d").unwrap(),
        )
    }

    fn compile(selections: &[ColumnSelection], range: Option<&DateRange>, preview: bool) -> String {
        QueryBuilder::new(preview).build_query(&build_projections(selections), &build_join_projections(selections), range)
    }

    #[test]
    fn empty_projection_selects_only_the_task_id() {
        let sql = QueryBuilder::new(false).build_query(&[], &[], None);
        assert_eq!(
            sql,
            "SELECT tasks.task_id FROM tasks INNER JOIN workdays ON tasks.workday_id = workdays.workday_id"
        );
    }

    #[test]
    fn plain_formatted_and_duration_expressions() {
        let selections = vec![
            ColumnSelection::new("", "Description", 1),
            ColumnSelection::new("", "Hours", 2),
            ColumnSelection::new("Time", "Duration", 3),
        ];
        let sql = compile(&selections, None, false);
        assert!(sql.contains("tasks.description AS \"Description\""));
        assert!(sql.contains("(printf('%02d', tasks.hours)) AS \"Hours\""));
        assert!(sql.contains("(printf('%02d', tasks.hours) || ':' || printf('%02d', tasks.minutes)) AS \"Time\""));
    }

    #[test]
    fn duration_without_label_falls_back_to_default_alias() {
        let projection = Projection {
            order: 1,
            source: ColumnSource::Duration,
            label: String::new(),
            table: crate::libs::columns::Table::Tasks,
            kind: FieldKind::Formatted,
        };
        assert!(projection_expression(&projection).ends_with("AS \"Duration\""));
    }

    #[test]
    fn plain_field_without_label_has_no_alias() {
        let projection = Projection {
            order: 1,
            source: ColumnSource::Field("billable"),
            label: String::new(),
            table: crate::libs::columns::Table::Tasks,
            kind: FieldKind::Plain,
        };
        assert_eq!(projection_expression(&projection), "tasks.billable");
    }

    #[test]
    fn labels_escape_double_quotes() {
        let sql = compile(&[ColumnSelection::new("The \"Code\"", "Unique ID", 1)], None, false);
        assert!(sql.contains("tasks.unique_identifier AS \"The \"\"Code\"\"\""));
    }

    #[test]
    fn second_level_joins_follow_first_level_joins() {
        let selections = vec![
            ColumnSelection::new("", "Employer", 1),
            ColumnSelection::new("", "Client", 2),
            ColumnSelection::new("", "Category", 3),
        ];
        let sql = compile(&selections, None, false);

        let projects = sql.find("INNER JOIN projects ON tasks.project_id = projects.project_id").unwrap();
        let categories = sql.find("INNER JOIN categories ON tasks.category_id = categories.category_id").unwrap();
        let employers = sql.find("INNER JOIN employers ON projects.employer_id = employers.employer_id").unwrap();
        let clients = sql.find("LEFT JOIN clients ON projects.client_id = clients.client_id").unwrap();

        assert!(projects < employers && projects < clients);
        assert!(categories < employers && categories < clients);
        assert_eq!(sql.matches("JOIN projects").count(), 1);
    }

    #[test]
    fn date_range_adds_where_clause() {
        let range = range("2024-01-01", "2024-01-07");
        let sql = compile(&[ColumnSelection::new("", "Date", 1)], Some(&range), false);
        assert!(sql.ends_with(
            "WHERE workdays.date >= '2024-01-01' AND workdays.date <= '2024-01-07' AND tasks.is_active = 1"
        ));
    }

    #[test]
    fn no_range_means_no_where_clause() {
        let sql = compile(&[ColumnSelection::new("", "Date", 1)], None, false);
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn preview_limits_to_one_row() {
        let sql = compile(&[ColumnSelection::new("", "Date", 1)], None, true);
        assert!(sql.ends_with(" LIMIT 1"));
        assert!(!compile(&[ColumnSelection::new("", "Date", 1)], None, false).contains("LIMIT"));
    }

    #[test]
    fn display_name_and_duration_scenario() {
        let selections = vec![
            ColumnSelection::new("Proj", "Display Name", 1),
            ColumnSelection::new("Dur", "Duration", 2),
        ];
        let range = range("2024-03-01", "2024-03-01");
        let sql = compile(&selections, Some(&range), false);

        assert_eq!(
            sql,
            "SELECT tasks.task_id, projects.display_name AS \"Proj\", \
             (printf('%02d', tasks.hours) || ':' || printf('%02d', tasks.minutes)) AS \"Dur\" \
             FROM tasks INNER JOIN workdays ON tasks.workday_id = workdays.workday_id \
             INNER JOIN projects ON tasks.project_id = projects.project_id \
             WHERE workdays.date >= '2024-03-01' AND workdays.date <= '2024-03-01' AND tasks.is_active = 1"
        );
    }

    #[test]
    fn attributes_query_filters_active_values() {
        let range = range("2024-01-01", "2024-01-31");
        let sql = QueryBuilder::new(false).build_attributes_query(Some(&range), Some(7));
        assert!(sql.contains("coalesce(task_attribute_values.text_value, task_attribute_values.boolean_value, task_attribute_values.numeric_value)"));
        assert!(sql.contains("workdays.date >= '2024-01-01' AND workdays.date <= '2024-01-31' AND tasks.is_active = 1"));
        assert!(sql.contains("task_attribute_values.is_active = 1"));
        assert!(!sql.contains("tasks.task_id = 7"));
    }

    #[test]
    fn preview_attributes_query_is_scoped_to_one_task() {
        let sql = QueryBuilder::new(true).build_attributes_query(None, Some(7));
        assert!(sql.ends_with("task_attribute_values.is_active = 1 AND tasks.task_id = 7"));
    }

    #[test]
    fn attribute_names_query_is_distinct_and_sorted() {
        let sql = QueryBuilder::new(false).build_attribute_names_query(None, None);
        assert!(sql.starts_with("SELECT DISTINCT attributes.name FROM tasks"));
        assert!(sql.ends_with("ORDER BY attributes.name"));
    }
}
