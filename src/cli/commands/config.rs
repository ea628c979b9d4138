use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::migrate::{fill_missing_fields, missing_fields};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, info, success, warning};
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            println!("📄 Current configuration:\n");
            println!("{}", serde_yaml::to_string(cfg)?);
        }

        if *check || *migrate {
            if !path.exists() {
                return Err(AppError::Config(format!(
                    "{} not found, run `techinvoice init` first",
                    path.display()
                )));
            }

            let missing = if *migrate {
                fill_missing_fields(&path)?
            } else {
                missing_fields(&path)?
            };

            match (missing.is_empty(), *migrate) {
                (true, _) => success("Configuration file is complete."),
                (false, false) => {
                    warning(format!("Missing fields: {}", missing.join(", ")));
                    info("Run `techinvoice config --migrate` to add them.");
                }
                (false, true) => success(format!("Added fields: {}", missing.join(", "))),
            }
        }

        if *edit_config {
            let default_editor = std::env::var("EDITOR")
                .or_else(|_| std::env::var("VISUAL"))
                .unwrap_or_else(|_| {
                    if cfg!(target_os = "windows") {
                        "notepad".to_string()
                    } else {
                        "nano".to_string()
                    }
                });

            let editor_to_use = editor.clone().unwrap_or_else(|| default_editor.clone());

            match Command::new(&editor_to_use).arg(&path).status() {
                Ok(s) if s.success() => {
                    success(format!(
                        "Configuration file edited successfully using '{editor_to_use}'"
                    ));
                }
                _ => {
                    warning(format!(
                        "Editor '{editor_to_use}' not available, falling back to '{default_editor}'"
                    ));

                    match Command::new(&default_editor).arg(&path).status() {
                        Ok(s) if s.success() => success(format!(
                            "Configuration file edited successfully using fallback '{default_editor}'"
                        )),
                        _ => error(format!(
                            "Failed to edit configuration file using fallback '{default_editor}'"
                        )),
                    }
                }
            }
        }
    }

    Ok(())
}
