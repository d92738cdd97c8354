//! Display implementation for application messages.
//!
//! All message text is defined here so commands only ever reference
//! [`Message`] variants.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === EXPORT MESSAGES ===
            Message::ExportingData(range, format) => format!("Exporting tasks ({}) as {}", range, format),
            Message::ExportCompleted(path) => format!("Export completed: {}", path),
            Message::ExportFailed => "Export failed, nothing was written. Run with TASKIES_DEBUG=1 for details.".to_string(),
            Message::ExportEmpty => "No tasks found for the selected range.".to_string(),
            Message::NoColumnsSelected => "None of the selected columns are available. Run `taskies columns` to list them.".to_string(),
            Message::PreviewHeader => "Export preview (first task only):".to_string(),
            Message::InvalidColumnSpec(spec) => format!("Invalid column '{}', expected COLUMN or COLUMN=LABEL", spec),
            Message::InvalidDate(date) => format!("Invalid date '{}', expected YYYY-MM-DD or 'today'", date),
            Message::InvalidDateRange(from, to) => format!("Invalid date range: {} is after {}", from, to),
            Message::ExcelRequiresOutputPath => "Excel exports need an output file, pass --output".to_string(),

            // === COLUMN MESSAGES ===
            Message::ColumnsHeader => "Available export columns:".to_string(),

            // === PRESET MESSAGES ===
            Message::PresetSaved(name) => format!("Preset '{}' saved", name),
            Message::PresetDeleted(name) => format!("Preset '{}' deleted", name),
            Message::PresetNotFound(name) => format!("Preset '{}' not found", name),
            Message::PresetsHeader => "Export presets:".to_string(),
            Message::NoPresets => "No export presets saved yet.".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigParseError(error) => format!("Failed to parse configuration: {}", error),

            // === MIGRATION MESSAGES ===
            Message::MigrationFailed(version, error) => format!("✗ Migration v{} failed: {}", version, error),
            Message::DatabaseUpToDate => "Database schema is up to date".to_string(),
        };

        write!(f, "{}", text)
    }
}
