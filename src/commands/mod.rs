pub mod columns;
pub mod export;
pub mod presets;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Export tasks as CSV or Excel")]
    Export(export::ExportArgs),
    #[command(about = "List the columns available for export")]
    Columns,
    #[command(about = "Manage saved export presets")]
    Presets(presets::PresetsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Export(args) => export::cmd(args),
            Commands::Columns => columns::cmd(),
            Commands::Presets(args) => presets::cmd(args),
        }
    }
}
