use super::columns::{AvailableColumn, ColumnSource, FieldKind};
use super::config::Preset;
use super::export::ExportTable;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn columns(columns: &[AvailableColumn]) {
        let mut table = Table::new();

        table.add_row(row!["COLUMN", "TABLE", "FIELD", "JOIN", "FORMATTED"]);
        for column in columns {
            let field = match column.source {
                ColumnSource::Field(name) => name.to_string(),
                ColumnSource::Duration => "hours:minutes".to_string(),
            };
            let join = match column.join {
                Some(join) => match join.through {
                    Some(through) => format!("{} via {}", join.kind.keyword(), through),
                    None => join.kind.keyword().to_string(),
                },
                None => "-".to_string(),
            };
            let formatted = if column.kind == FieldKind::Formatted { "yes" } else { "" };
            table.add_row(row![column.display_name, column.table, field, join, formatted]);
        }
        table.printstd();
    }

    pub fn presets(presets: &[Preset]) {
        let mut table = Table::new();

        table.add_row(row!["NAME", "COLUMNS", "DEFAULT"]);
        for preset in presets {
            let mut selections = preset.selections.clone();
            selections.sort_by_key(|selection| selection.order);
            let columns = selections
                .iter()
                .map(|selection| {
                    if selection.display_column.is_empty() || selection.display_column == selection.original_column {
                        selection.original_column.clone()
                    } else {
                        format!("{}={}", selection.original_column, selection.display_column)
                    }
                })
                .collect::<Vec<_>>()
                .join(", ");
            table.add_row(row![preset.name, columns, if preset.is_default { "*" } else { "" }]);
        }
        table.printstd();
    }

    /// Prints an export table, used for previews.
    pub fn export(export: &ExportTable) {
        let mut table = Table::new();

        table.set_titles(export.headers.iter().collect());
        for record in export.records() {
            table.add_row(record.iter().collect());
        }
        table.printstd();
    }
}
