//! Init command implementation.
//!
//! `recce init` writes a starter `recce.yml` so a project can be
//! checked without composing the configuration by hand.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::args::InitArgs;
use crate::config::CONFIG_FILE;
use crate::error::Result;
use crate::ui::{Prompt, PromptType, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The init command implementation.
pub struct InitCommand {
    project_root: PathBuf,
    args: InitArgs,
}

impl InitCommand {
    /// Create a new init command.
    pub fn new(project_root: &Path, args: InitArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Path the configuration will be written to.
    fn config_path(&self) -> PathBuf {
        self.project_root.join(CONFIG_FILE)
    }

    /// Starter configuration content for this project.
    fn starter_config(&self) -> String {
        let project_name = self
            .project_root
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("My application");

        format!(
            "# Recce configuration for {project_name}\n\
             #\n\
             # The database password is deliberately not stored here. Export\n\
             # RECCE_DB_PASSWORD, pass --password, or let recce prompt for it.\n\
             #\n\
             # writable_paths entries are resolved against the project root\n\
             # unless absolute.\n\
             \n\
             title: \"{project_name}\"\n\
             \n\
             database:\n\
             \x20 host: localhost          # host or host:port\n\
             \x20 database: app\n\
             \x20 username: installer\n\
             \n\
             writable_paths:\n\
             \x20 - tmp\n\
             \x20 - files\n"
        )
    }
}

impl Command for InitCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config_path = self.config_path();

        if config_path.exists() && !self.args.force {
            if !ui.is_interactive() {
                ui.warning("recce.yml already exists. Use --force to overwrite.");
                return Ok(CommandResult::failure(1));
            }

            let prompt = Prompt {
                key: "overwrite_config".to_string(),
                question: "recce.yml already exists. Overwrite?".to_string(),
                prompt_type: PromptType::Confirm,
                default: Some("no".to_string()),
            };
            if ui.prompt(&prompt)?.as_bool() != Some(true) {
                ui.message("Keeping the existing configuration.");
                return Ok(CommandResult::failure(1));
            }
        }

        fs::write(&config_path, self.starter_config())?;

        ui.success("Created recce.yml");
        ui.message("\nNext steps:");
        ui.message("  1. Review recce.yml and fill in the database credentials");
        ui.message("  2. Run `recce` to verify the server is ready for installation");

        Ok(CommandResult::success())
    }
}
