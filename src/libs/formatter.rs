//! Cell formatting rules applied before export serialization.
//!
//! ## Features
//!
//! - **Newlines**: keep, strip, or turn multi-line descriptions into one line
//! - **Booleans**: render `0`/`1` flags as `true`/`false` or `yes`/`no`
//! - **Empty values**: leave blank or write an explicit `NULL`
//! - **Separators**: the delimiter and text qualifier used by the writers
//!
//! ## Usage
//!
//! ```rust
//! use taskies::libs::formatter::{BooleanPolicy, ExportOptions, ValueProcessor};
//!
//! let options = ExportOptions {
//!     booleans: BooleanPolicy::YesNoTitleCase,
//!     ..ExportOptions::default()
//! };
//! assert_eq!(ValueProcessor::new(&options).process("1"), "Yes");
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Delimiter {
    #[default]
    Comma,
    Semicolon,
    Pipe,
    Tab,
    Space,
}

impl Delimiter {
    pub fn byte(&self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Semicolon => b';',
            Delimiter::Pipe => b'|',
            Delimiter::Tab => b'\t',
            Delimiter::Space => b' ',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TextQualifier {
    None,
    #[default]
    DoubleQuote,
    SingleQuote,
}

impl TextQualifier {
    /// Quote byte, or `None` when cells are written unquoted.
    pub fn byte(&self) -> Option<u8> {
        match self {
            TextQualifier::None => None,
            TextQualifier::DoubleQuote => Some(b'"'),
            TextQualifier::SingleQuote => Some(b'\''),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum EmptyValuePolicy {
    #[default]
    Blank,
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum NewlinePolicy {
    #[default]
    Preserve,
    Merge,
    MergeAndAddSpace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BooleanPolicy {
    #[default]
    OneZero,
    TrueFalseLowerCase,
    TrueFalseTitleCase,
    YesNoLowerCase,
    YesNoTitleCase,
}

impl BooleanPolicy {
    fn render(&self, value: bool) -> Option<&'static str> {
        let text = match (self, value) {
            (BooleanPolicy::OneZero, _) => return None,
            (BooleanPolicy::TrueFalseLowerCase, true) => "true",
            (BooleanPolicy::TrueFalseLowerCase, false) => "false",
            (BooleanPolicy::TrueFalseTitleCase, true) => "True",
            (BooleanPolicy::TrueFalseTitleCase, false) => "False",
            (BooleanPolicy::YesNoLowerCase, true) => "yes",
            (BooleanPolicy::YesNoLowerCase, false) => "no",
            (BooleanPolicy::YesNoTitleCase, true) => "Yes",
            (BooleanPolicy::YesNoTitleCase, false) => "No",
        };
        Some(text)
    }
}

/// User-chosen formatting for one export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub delimiter: Delimiter,
    pub text_qualifier: TextQualifier,
    pub empty_values: EmptyValuePolicy,
    pub newlines: NewlinePolicy,
    pub booleans: BooleanPolicy,
    pub exclude_headers: bool,
    pub include_attributes: bool,
}

const NULL_TEXT: &str = "NULL";

/// Applies the newline, boolean and empty-value rules to single cells.
#[derive(Debug, Clone, Copy)]
pub struct ValueProcessor {
    newlines: NewlinePolicy,
    booleans: BooleanPolicy,
    empty_values: EmptyValuePolicy,
}

impl ValueProcessor {
    pub fn new(options: &ExportOptions) -> Self {
        Self {
            newlines: options.newlines,
            booleans: options.booleans,
            empty_values: options.empty_values,
        }
    }

    pub fn process(&self, cell: &str) -> String {
        let mut value = match self.newlines {
            NewlinePolicy::Preserve => cell.to_string(),
            NewlinePolicy::Merge => cell.replace(['\r', '\n'], ""),
            NewlinePolicy::MergeAndAddSpace => cell.replace("\r\n", "\n").replace('\n', " "),
        };

        let flag = match value.as_str() {
            "0" => Some(false),
            "1" => Some(true),
            _ => None,
        };
        if let Some(text) = flag.and_then(|flag| self.booleans.render(flag)) {
            value = text.to_string();
        }

        if value.is_empty() && self.empty_values == EmptyValuePolicy::Null {
            value = NULL_TEXT.to_string();
        }

        value
    }
}
