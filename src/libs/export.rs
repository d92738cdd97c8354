//! Task log export: from column selections to CSV text or Excel workbooks.
//!
//! [`Exporter`] drives one export request end to end:
//!
//! 1. resolve selections into projections and joins;
//! 2. compile and run the export query;
//! 3. optionally pivot task attributes into trailing columns;
//! 4. apply the cell formatting rules;
//! 5. serialize as delimited text or an Excel workbook.
//!
//! Output is rendered completely in memory before anything is written, so a
//! failed export leaves no partial file behind.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskies::db::db::Db;
//! use taskies::libs::export::Exporter;
//! use taskies::libs::formatter::ExportOptions;
//! use taskies::libs::projection::ColumnSelection;
//!
//! let db = Db::new()?;
//! let selections = vec![ColumnSelection::new("", "Project", 1), ColumnSelection::new("", "Duration", 2)];
//! let exporter = Exporter::new(selections, None, ExportOptions::default(), false);
//! let table = exporter.table(&db.conn)?;
//! print!("{}", exporter.to_delimited(&table)?);
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::{
    db::export::{ExportRowMap, ExportRows},
    libs::{
        attributes::AttributeMerger,
        error::ExportError,
        formatter::{ExportOptions, ValueProcessor},
        projection::{build_join_projections, build_projections, ColumnSelection},
        query::{DateRange, QueryBuilder},
    },
};
use rusqlite::Connection;
use rust_xlsxwriter::{Color, Format, Workbook};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    /// Delimited text with the configured delimiter and qualifier.
    #[default]
    Csv,
    /// Excel workbook with a formatted header row.
    Excel,
}

/// Headers and rows of one export, before serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportTable {
    pub headers: Vec<String>,
    pub rows: ExportRowMap,
}

impl ExportTable {
    /// Cells of every row, ordered by task id.
    pub fn records(&self) -> impl Iterator<Item = &Vec<String>> {
        self.rows.values()
    }
}

pub struct Exporter {
    selections: Vec<ColumnSelection>,
    range: Option<DateRange>,
    options: ExportOptions,
    preview: bool,
}

impl Exporter {
    pub fn new(selections: Vec<ColumnSelection>, range: Option<DateRange>, options: ExportOptions, preview: bool) -> Self {
        Self {
            selections,
            range,
            options,
            preview,
        }
    }

    /// Runs the export query on `conn` and returns the formatted table.
    pub fn table(&self, conn: &Connection) -> Result<ExportTable, ExportError> {
        let projections = build_projections(&self.selections);
        if projections.is_empty() {
            return Err(ExportError::NoColumns);
        }
        let joins = build_join_projections(&self.selections);

        let builder = QueryBuilder::new(self.preview);
        let sql = builder.build_query(&projections, &joins, self.range.as_ref());
        info!(columns = projections.len(), joins = joins.len(), preview = self.preview, "compiled export query");

        let rows = ExportRows::new(conn);
        let mut table = ExportTable {
            headers: projections.iter().map(|projection| projection.label.clone()).collect(),
            rows: rows.fetch(&sql, projections.len())?,
        };

        if self.options.include_attributes {
            AttributeMerger::new(&rows, builder).merge_attributes(self.range.as_ref(), &mut table)?;
        }

        let processor = ValueProcessor::new(&self.options);
        for cells in table.rows.values_mut() {
            for cell in cells.iter_mut() {
                *cell = processor.process(cell);
            }
        }

        info!(rows = table.rows.len(), columns = table.headers.len(), "export table ready");
        Ok(table)
    }

    /// Renders `table` as delimited text, one line per row.
    pub fn to_delimited(&self, table: &ExportTable) -> Result<String, ExportError> {
        let Some(quote) = self.options.text_qualifier.byte() else {
            return Ok(self.to_unqualified(table));
        };

        let mut builder = csv::WriterBuilder::new();
        builder
            .delimiter(self.options.delimiter.byte())
            .terminator(csv::Terminator::Any(b'\n'))
            .flexible(true)
            .quote(quote)
            .quote_style(csv::QuoteStyle::Always)
            .double_quote(true);

        let mut wtr = builder.from_writer(Vec::new());
        if !self.options.exclude_headers {
            wtr.write_record(&table.headers)?;
        }
        for record in table.records() {
            wtr.write_record(record)?;
        }
        wtr.flush()?;

        let bytes = wtr.into_inner().map_err(|error| ExportError::Serialization(error.to_string()))?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Cells joined by the delimiter with no quoting at all.
    ///
    /// `csv` still quotes a record made of one empty field under
    /// `QuoteStyle::Never`, so unqualified output is assembled here.
    fn to_unqualified(&self, table: &ExportTable) -> String {
        let delimiter = char::from(self.options.delimiter.byte()).to_string();
        let headers = (!self.options.exclude_headers).then_some(&table.headers);

        let mut text = String::new();
        for record in headers.into_iter().chain(table.records()) {
            text.push_str(&record.join(&delimiter));
            text.push('\n');
        }
        text
    }

    /// Writes `table` as delimited text to `path`.
    pub fn write_delimited(&self, table: &ExportTable, path: &Path) -> Result<(), ExportError> {
        let text = self.to_delimited(table)?;
        fs::write(path, text)?;
        debug!(path = %path.display(), "delimited export written");
        Ok(())
    }

    /// Writes `table` as an Excel workbook to `path`.
    pub fn write_excel(&self, table: &ExportTable, path: &Path) -> Result<(), ExportError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        let header_format = Format::new().set_bold().set_background_color(Color::Gray);

        let mut row = 0;
        if !self.options.exclude_headers {
            for (col, header) in table.headers.iter().enumerate() {
                worksheet.write_string_with_format(row, col as u16, header, &header_format)?;
            }
            row += 1;
        }

        for record in table.records() {
            for (col, cell) in record.iter().enumerate() {
                worksheet.write_string(row, col as u16, cell)?;
            }
            row += 1;
        }

        worksheet.autofit();
        workbook.save(path)?;
        debug!(path = %path.display(), "excel export written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::formatter::{Delimiter, TextQualifier};

    fn table() -> ExportTable {
        let mut rows = ExportRowMap::new();
        rows.insert(2, vec!["Beta".to_string(), "says \"hi\"".to_string()]);
        rows.insert(1, vec!["Alpha".to_string(), "a;b".to_string()]);
        ExportTable {
            headers: vec!["Project".to_string(), "Description".to_string()],
            rows,
        }
    }

    fn exporter(options: ExportOptions) -> Exporter {
        Exporter::new(Vec::new(), None, options, false)
    }

    #[test]
    fn double_quote_qualifier_wraps_and_escapes() {
        let text = exporter(ExportOptions::default()).to_delimited(&table()).unwrap();
        assert_eq!(
            text,
            "\"Project\",\"Description\"\n\"Alpha\",\"a;b\"\n\"Beta\",\"says \"\"hi\"\"\"\n"
        );
    }

    #[test]
    fn no_qualifier_and_custom_delimiter() {
        let options = ExportOptions {
            delimiter: Delimiter::Pipe,
            text_qualifier: TextQualifier::None,
            ..ExportOptions::default()
        };
        let text = exporter(options).to_delimited(&table()).unwrap();
        assert_eq!(text, "Project|Description\nAlpha|a;b\nBeta|says \"hi\"\n");
    }

    #[test]
    fn headers_can_be_excluded() {
        let options = ExportOptions {
            text_qualifier: TextQualifier::None,
            exclude_headers: true,
            ..ExportOptions::default()
        };
        let text = exporter(options).to_delimited(&table()).unwrap();
        assert_eq!(text, "Alpha,a;b\nBeta,says \"hi\"\n");
    }

    #[test]
    fn single_quote_qualifier() {
        let options = ExportOptions {
            delimiter: Delimiter::Semicolon,
            text_qualifier: TextQualifier::SingleQuote,
            exclude_headers: true,
            ..ExportOptions::default()
        };
        let mut table = table();
        table.rows.insert(3, vec!["O'Brien".to_string(), String::new()]);
        let text = exporter(options).to_delimited(&table).unwrap();
        assert!(text.ends_with("'O''Brien';''\n"));
    }

    #[test]
    fn no_qualifier_leaves_lone_empty_cell_bare() {
        let options = ExportOptions {
            text_qualifier: TextQualifier::None,
            ..ExportOptions::default()
        };
        let mut rows = ExportRowMap::new();
        rows.insert(1, vec!["WEB-1".to_string()]);
        rows.insert(2, vec![String::new()]);
        let table = ExportTable {
            headers: vec!["Unique ID".to_string()],
            rows,
        };

        let text = exporter(options).to_delimited(&table).unwrap();
        assert_eq!(text, "Unique ID\nWEB-1\n\n");
    }
}
