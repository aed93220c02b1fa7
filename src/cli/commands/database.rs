//! Database command implementation.
//!
//! `recce database` runs only the database checks, for re-testing a
//! server after fixing its configuration without re-running the system
//! half of the suite.

use std::path::{Path, PathBuf};

use crate::checks::{Report, RequirementsChecker};
use crate::cli::args::DatabaseArgs;
use crate::config::{self, RecceConfig};
use crate::db::MySqlProbe;
use crate::error::{RecceError, Result};
use crate::host::HostContext;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display;

/// The database command implementation.
pub struct DatabaseCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: DatabaseArgs,
}

impl DatabaseCommand {
    /// Create a new database command.
    pub fn new(project_root: &Path, config_override: Option<&Path>, args: DatabaseArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: config_override.map(Path::to_path_buf),
            args,
        }
    }
}

impl Command for DatabaseCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        // Load configuration; complete override flags can stand in for a
        // missing file.
        let config = match config::load_config(&self.project_root, self.config_override.as_deref())
        {
            Ok(config) => config,
            Err(RecceError::ConfigNotFound { .. }) if self.args.merged_database(None).is_some() => {
                RecceConfig::default()
            }
            Err(RecceError::ConfigNotFound { .. }) => {
                ui.error("No configuration found. Run 'recce init' first.");
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };

        if let Err(e) = config::validate(&config) {
            ui.error(&e.to_string());
            return Ok(CommandResult::failure(2));
        }

        let Some(db_config) = self.args.merged_database(config.database.as_ref()) else {
            ui.error(
                "No database configured. Add a 'database:' section to recce.yml \
                 or pass --host, --database, and --username.",
            );
            return Ok(CommandResult::failure(2));
        };

        let context = HostContext::from_process();
        let probe = MySqlProbe::new();
        let checker = RequirementsChecker::new(&context, &probe);

        if self.args.json {
            let db_config = display::ensure_password(db_config, ui)?;
            let report = Report::new(config.display_title(), checker.check_database(&db_config));
            println!("{}", display::render_json(&report, self.args.strict)?);
            return Ok(display::verdict(&report, self.args.strict));
        }

        ui.show_header(config.display_title());
        let db_config = display::ensure_password(db_config, ui)?;

        let results = display::run_database_checks(&checker, &db_config, ui);

        let report = Report::new(config.display_title(), results);
        display::render_outcome(ui, &report, self.args.strict);
        Ok(display::verdict(&report, self.args.strict))
    }
}
