/// Every user-facing message of the application.
///
/// Text lives in the `Display` implementation in `display.rs`.
#[derive(Debug, Clone)]
pub enum Message {
    // === EXPORT MESSAGES ===
    ExportingData(String, String), // range, format
    ExportCompleted(String),       // path
    ExportFailed,
    ExportEmpty,
    NoColumnsSelected,
    PreviewHeader,
    InvalidColumnSpec(String), // raw argument
    InvalidDate(String),       // raw argument
    InvalidDateRange(String, String), // from, to
    ExcelRequiresOutputPath,

    // === COLUMN MESSAGES ===
    ColumnsHeader,

    // === PRESET MESSAGES ===
    PresetSaved(String),    // name
    PresetDeleted(String),  // name
    PresetNotFound(String), // name
    PresetsHeader,
    NoPresets,

    // === CONFIGURATION MESSAGES ===
    ConfigParseError(String), // error

    // === MIGRATION MESSAGES ===
    MigrationFailed(u32, String), // version, error
    DatabaseUpToDate,
}
