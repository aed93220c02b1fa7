//! System command implementation.
//!
//! `recce system` runs only the host-environment checks. It works with
//! no configuration at all, so it can vet a bare server before the
//! project (or its database) exists.

use std::path::{Path, PathBuf};

use crate::checks::{Report, RequirementsChecker};
use crate::cli::args::SystemArgs;
use crate::config::{self, RecceConfig};
use crate::db::MySqlProbe;
use crate::error::{RecceError, Result};
use crate::host::HostContext;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display;

/// The system command implementation.
pub struct SystemCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: SystemArgs,
}

impl SystemCommand {
    /// Create a new system command.
    pub fn new(project_root: &Path, config_override: Option<&Path>, args: SystemArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: config_override.map(Path::to_path_buf),
            args,
        }
    }

    /// Paths to verify write access for: `--path` flags win over the
    /// configured list.
    fn writable_paths(&self, config: &RecceConfig) -> Vec<PathBuf> {
        if self.args.paths.is_empty() {
            config.resolved_writable_paths(&self.project_root)
        } else {
            self.args.paths.clone()
        }
    }
}

impl Command for SystemCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        // A config file is optional here.
        let config = match config::load_config(&self.project_root, self.config_override.as_deref())
        {
            Ok(config) => config,
            Err(RecceError::ConfigNotFound { .. }) => RecceConfig::default(),
            Err(e) => return Err(e),
        };

        if let Err(e) = config::validate(&config) {
            ui.error(&e.to_string());
            return Ok(CommandResult::failure(2));
        }

        let file_paths = self.writable_paths(&config);
        let context = HostContext::from_process();
        let probe = MySqlProbe::new();
        let checker = RequirementsChecker::new(&context, &probe);

        if self.args.json {
            let report = Report::new(config.display_title(), checker.check_system(&file_paths));
            println!("{}", display::render_json(&report, self.args.strict)?);
            return Ok(display::verdict(&report, self.args.strict));
        }

        ui.show_header(config.display_title());
        let results = display::run_system_checks(&checker, &file_paths, ui);

        let report = Report::new(config.display_title(), results);
        display::render_outcome(ui, &report, self.args.strict);
        Ok(display::verdict(&report, self.args.strict))
    }
}
