//! # Taskies - task log export engine
//!
//! Compiles a user's selection of task log columns into SQL over the
//! taskies SQLite database and exports the result as delimited text or
//! Excel workbooks.
//!
//! ## Features
//!
//! - **Column Selection**: pick, rename and order columns across joined tables
//! - **Join Inference**: only the joins the selection needs, at the right depth
//! - **Date Ranges**: export a range of workdays or everything
//! - **Attributes**: pivot custom task attributes into extra columns
//! - **Formatting**: delimiters, qualifiers, newline and boolean rendering
//! - **Presets**: save column selections and options for reuse
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskies::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
