//! Saved export preset management.

use crate::{
    libs::{
        config::{Config, Preset},
        messages::Message,
        view::View,
    },
    msg_bail_anyhow, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: Option<PresetsCommand>,
}

#[derive(Debug, Subcommand)]
enum PresetsCommand {
    /// List saved presets
    List,
    /// Show the resolved columns and options of a preset
    Show { name: String },
    /// Make a preset the default for `taskies export`
    Default { name: String },
    /// Delete a preset
    Delete { name: String },
}

pub fn cmd(args: PresetsArgs) -> Result<()> {
    let mut config = Config::read()?;

    match args.command.unwrap_or(PresetsCommand::List) {
        PresetsCommand::List => {
            if config.presets.is_empty() {
                msg_info!(Message::NoPresets);
                return Ok(());
            }
            msg_print!(Message::PresetsHeader);
            View::presets(&config.presets);
        }
        PresetsCommand::Show { name } => {
            let Some(preset) = config.preset(&name) else {
                msg_bail_anyhow!(Message::PresetNotFound(name));
            };
            View::presets(std::slice::from_ref(preset));
            println!("{}", serde_json::to_string_pretty(&preset.options)?);
        }
        PresetsCommand::Default { name } => {
            let Some(preset) = config.preset(&name).cloned() else {
                msg_bail_anyhow!(Message::PresetNotFound(name));
            };
            config.upsert_preset(Preset { is_default: true, ..preset });
            config.save()?;
            msg_success!(Message::PresetSaved(name));
        }
        PresetsCommand::Delete { name } => {
            if !config.remove_preset(&name) {
                msg_bail_anyhow!(Message::PresetNotFound(name));
            }
            config.save()?;
            msg_success!(Message::PresetDeleted(name));
        }
    }

    Ok(())
}
