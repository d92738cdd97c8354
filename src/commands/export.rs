//! Task export command.
//!
//! Columns are chosen with repeated `--column` arguments, in output order,
//! or taken from a saved preset. Formatting flags override the preset.
//!
//! ```bash
//! # Project display name and duration for one week, as CSV on stdout
//! taskies export --from 2024-03-04 --to 2024-03-10 -c "Display Name=Proj" -c Duration=Dur
//!
//! # Preview the first task of a preset with attributes pivoted in
//! taskies export --preset weekly --attributes --preview
//!
//! # Full history to Excel
//! taskies export --preset weekly --format excel --output tasks.xlsx
//! ```

use crate::{
    db::db::Db,
    libs::{
        config::{Config, Preset},
        error::ExportError,
        export::{ExportFormat, Exporter},
        formatter::{BooleanPolicy, Delimiter, EmptyValuePolicy, ExportOptions, NewlinePolicy, TextQualifier},
        messages::Message,
        projection::ColumnSelection,
        query::DateRange,
        view::View,
    },
    msg_bail_anyhow, msg_error_anyhow, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use tracing::error;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// First workday to export (`YYYY-MM-DD` or `today`)
    #[arg(long, requires = "to")]
    from: Option<String>,

    /// Last workday to export (`YYYY-MM-DD` or `today`)
    ///
    /// Without `--from`/`--to` every task is exported.
    #[arg(long, requires = "from")]
    to: Option<String>,

    /// Column to export as `COLUMN` or `COLUMN=LABEL`, repeat in output order
    #[arg(short, long = "column")]
    columns: Vec<String>,

    /// Use the columns and options of a saved preset
    #[arg(short, long)]
    preset: Option<String>,

    /// Save the resolved columns and options as a preset
    #[arg(long)]
    save_preset: Option<String>,

    /// Mark the saved preset as the default
    #[arg(long, requires = "save_preset")]
    default: bool,

    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,

    /// Output file; CSV goes to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Database file; defaults to the application database
    #[arg(long)]
    database: Option<PathBuf>,

    #[arg(long, value_enum)]
    delimiter: Option<Delimiter>,

    #[arg(long, value_enum)]
    qualifier: Option<TextQualifier>,

    #[arg(long, value_enum)]
    empty_values: Option<EmptyValuePolicy>,

    #[arg(long, value_enum)]
    newlines: Option<NewlinePolicy>,

    #[arg(long, value_enum)]
    booleans: Option<BooleanPolicy>,

    /// Leave out the header line
    #[arg(long)]
    exclude_headers: bool,

    /// Append task attributes as extra columns
    #[arg(long)]
    attributes: bool,

    /// Show only the first task instead of writing an export
    #[arg(long)]
    preview: bool,
}

pub fn cmd(args: ExportArgs) -> Result<()> {
    let range = parse_range(args.from.as_deref(), args.to.as_deref())?;
    let mut config = Config::read()?;
    let (selections, options) = resolve_selections(&args, &config)?;

    if let Some(name) = &args.save_preset {
        config.upsert_preset(Preset {
            name: name.clone(),
            selections: selections.clone(),
            options,
            is_default: args.default,
        });
        config.save()?;
        msg_success!(Message::PresetSaved(name.clone()));
    }

    let range_text = match &range {
        Some(range) => format!("{} - {}", range.from, range.to),
        None => "all dates".to_string(),
    };
    msg_info!(Message::ExportingData(range_text, format!("{:?}", args.format)));

    let db = match &args.database {
        Some(path) => Db::open(path)?,
        None => Db::new()?,
    };
    let exporter = Exporter::new(selections, range, options, args.preview);
    let table = exporter.table(&db.conn).map_err(report)?;

    if table.rows.is_empty() {
        msg_info!(Message::ExportEmpty);
    }

    if args.preview {
        msg_print!(Message::PreviewHeader);
        View::export(&table);
        return Ok(());
    }

    match (args.format, &args.output) {
        (ExportFormat::Csv, Some(path)) => {
            exporter.write_delimited(&table, path).map_err(report)?;
            msg_success!(Message::ExportCompleted(path.display().to_string()));
        }
        (ExportFormat::Csv, None) => print!("{}", exporter.to_delimited(&table).map_err(report)?),
        (ExportFormat::Excel, Some(path)) => {
            exporter.write_excel(&table, path).map_err(report)?;
            msg_success!(Message::ExportCompleted(path.display().to_string()));
        }
        (ExportFormat::Excel, None) => msg_bail_anyhow!(Message::ExcelRequiresOutputPath),
    }

    Ok(())
}

/// Logs the detailed cause and turns it into the user-facing error `main` prints.
fn report(e: ExportError) -> anyhow::Error {
    error!(error = %e, "export failed");
    let message = match e {
        ExportError::NoColumns => Message::NoColumnsSelected,
        _ => Message::ExportFailed,
    };
    msg_error_anyhow!(message)
}

/// Columns and options from the command line, a named preset, or the default preset.
fn resolve_selections(args: &ExportArgs, config: &Config) -> Result<(Vec<ColumnSelection>, ExportOptions)> {
    let preset = match &args.preset {
        Some(name) => match config.preset(name) {
            Some(preset) => Some(preset),
            None => msg_bail_anyhow!(Message::PresetNotFound(name.clone())),
        },
        None if args.columns.is_empty() => config.default_preset(),
        None => None,
    };

    let selections = if args.columns.is_empty() {
        preset.map(|preset| preset.selections.clone()).unwrap_or_default()
    } else {
        parse_columns(&args.columns)?
    };
    if selections.is_empty() {
        msg_bail_anyhow!(Message::NoColumnsSelected);
    }

    let base = preset.map(|preset| preset.options).unwrap_or_default();
    let options = ExportOptions {
        delimiter: args.delimiter.unwrap_or(base.delimiter),
        text_qualifier: args.qualifier.unwrap_or(base.text_qualifier),
        empty_values: args.empty_values.unwrap_or(base.empty_values),
        newlines: args.newlines.unwrap_or(base.newlines),
        booleans: args.booleans.unwrap_or(base.booleans),
        exclude_headers: args.exclude_headers || base.exclude_headers,
        include_attributes: args.attributes || base.include_attributes,
    };

    Ok((selections, options))
}

/// Parses `COLUMN` / `COLUMN=LABEL` arguments; argument position is the output order.
fn parse_columns(specs: &[String]) -> Result<Vec<ColumnSelection>> {
    specs
        .iter()
        .enumerate()
        .map(|(index, spec)| {
            let (original, label) = match spec.split_once('=') {
                Some((original, label)) => (original.trim(), label.trim()),
                None => (spec.trim(), ""),
            };
            if original.is_empty() {
                return Err(msg_error_anyhow!(Message::InvalidColumnSpec(spec.clone())));
            }
            Ok(ColumnSelection::new(label, original, index as i32 + 1))
        })
        .collect()
}

fn parse_range(from: Option<&str>, to: Option<&str>) -> Result<Option<DateRange>> {
    let (Some(from), Some(to)) = (from, to) else {
        return Ok(None);
    };

    let range = DateRange::new(parse_date(from)?, parse_date(to)?);
    if range.from > range.to {
        msg_bail_anyhow!(Message::InvalidDateRange(range.from.to_string(), range.to.to_string()));
    }
    Ok(Some(range))
}

/// Parses `today` (any case) or an ISO `YYYY-MM-DD` date.
fn parse_date(date_str: &str) -> Result<NaiveDate> {
    if date_str.eq_ignore_ascii_case("today") {
        Ok(Local::now().date_naive())
    } else {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| msg_error_anyhow!(Message::InvalidDate(date_str.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_take_argument_order_and_optional_label() {
        let specs = vec!["Display Name=Proj".to_string(), "Duration".to_string()];
        let selections = parse_columns(&specs).unwrap();
        assert_eq!(
            selections,
            vec![ColumnSelection::new("Proj", "Display Name", 1), ColumnSelection::new("", "Duration", 2)]
        );
    }

    #[test]
    fn empty_column_name_is_rejected() {
        assert!(parse_columns(&["=Label".to_string()]).is_err());
    }

    #[test]
    fn range_needs_both_dates() {
        assert_eq!(parse_range(Some("2024-03-01"), None).unwrap(), None);
        let range = parse_range(Some("2024-03-01"), Some("2024-03-01")).unwrap().unwrap();
        assert_eq!(range.from, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn reversed_range_is_rejected() {
        assert!(parse_range(Some("2024-03-02"), Some("2024-03-01")).is_err());
    }

    #[test]
    fn malformed_dates_are_rejected() {
        assert!(parse_date("2024-13-01").is_err());
        assert!(parse_date("01/03/2024").is_err());
        assert!(parse_date("Today").is_ok());
    }

    #[test]
    fn report_carries_the_user_message() {
        let error = report(ExportError::NoColumns);
        assert_eq!(error.to_string(), format!("❌ {}", Message::NoColumnsSelected));

        let error = report(ExportError::InvariantViolation("two preview rows".to_string()));
        assert_eq!(error.to_string(), format!("❌ {}", Message::ExportFailed));
    }
}
