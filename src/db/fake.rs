//! Scripted database probe for testing.
//!
//! `FakeProbe` implements [`DatabaseProbe`] without a server: it answers
//! metadata queries from configured values, fails on demand, and records
//! every connection and statement for later assertion.
//!
//! # Example
//!
//! ```
//! use recce::db::{DatabaseProbe, FakeProbe};
//!
//! let probe = FakeProbe::new().with_version("5.0.51");
//!
//! let mut session = probe
//!     .connect(&FakeProbe::config())
//!     .expect("fake connects unless scripted otherwise");
//! assert_eq!(session.server_version().unwrap(), "5.0.51");
//! assert_eq!(probe.connections_opened(), 1);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{DatabaseConfig, DatabaseProbe, DbSession, Row};
use crate::error::{RecceError, Result};

/// Scripted probe for tests. Defaults model a healthy MySQL 8.0 server:
/// InnoDB is the default engine, `auto_increment_increment` is 1 and
/// `thread_stack` is 256 KB.
#[derive(Debug, Clone)]
pub struct FakeProbe {
    available: bool,
    connect_error: Option<String>,
    version: String,
    version_error: Option<String>,
    engines: Vec<(String, String)>,
    variables: HashMap<String, String>,
    failing_sql: Vec<(String, String)>,
    connects: Rc<RefCell<usize>>,
    sql_log: Rc<RefCell<Vec<String>>>,
}

impl Default for FakeProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeProbe {
    pub fn new() -> Self {
        let mut variables = HashMap::new();
        variables.insert("auto_increment_increment".to_string(), "1".to_string());
        variables.insert("thread_stack".to_string(), "262144".to_string());
        Self {
            available: true,
            connect_error: None,
            version: "8.0.36".to_string(),
            version_error: None,
            engines: vec![
                ("InnoDB".to_string(), "DEFAULT".to_string()),
                ("MyISAM".to_string(), "YES".to_string()),
                ("MEMORY".to_string(), "YES".to_string()),
            ],
            variables,
            failing_sql: Vec::new(),
            connects: Rc::new(RefCell::new(0)),
            sql_log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// A throwaway config for driving the fake; the values are never used.
    pub fn config() -> DatabaseConfig {
        DatabaseConfig {
            host: "db.test".to_string(),
            database: "app".to_string(),
            username: "installer".to_string(),
            password: "secret".to_string(),
        }
    }

    /// Script the driver as not usable at all.
    pub fn with_unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// Script every connection attempt to fail with this message.
    pub fn with_connect_error(mut self, message: &str) -> Self {
        self.connect_error = Some(message.to_string());
        self
    }

    /// Set the version string the server reports.
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    /// Script `SELECT VERSION()` to fail.
    pub fn with_version_error(mut self, message: &str) -> Self {
        self.version_error = Some(message.to_string());
        self
    }

    /// Replace the `SHOW ENGINES` rows with (engine, support) pairs.
    pub fn with_engines(mut self, engines: &[(&str, &str)]) -> Self {
        self.engines = engines
            .iter()
            .map(|(e, s)| (e.to_string(), s.to_string()))
            .collect();
        self
    }

    /// Set a server variable visible to `SHOW VARIABLES LIKE`.
    pub fn with_variable(mut self, name: &str, value: &str) -> Self {
        self.variables.insert(name.to_string(), value.to_string());
        self
    }

    /// Remove a server variable, making its lookup return no rows.
    pub fn without_variable(mut self, name: &str) -> Self {
        self.variables.remove(name);
        self
    }

    /// Script any statement or query whose text contains `fragment` to fail.
    pub fn with_failing_sql(mut self, fragment: &str, message: &str) -> Self {
        self.failing_sql
            .push((fragment.to_string(), message.to_string()));
        self
    }

    /// How many sessions have been opened (including failed attempts).
    pub fn connections_opened(&self) -> usize {
        *self.connects.borrow()
    }

    /// Every statement and query sent through sessions, in order.
    pub fn sql_log(&self) -> Vec<String> {
        self.sql_log.borrow().clone()
    }

    /// Check whether some statement containing `fragment` was sent.
    pub fn saw_sql(&self, fragment: &str) -> bool {
        self.sql_log.borrow().iter().any(|s| s.contains(fragment))
    }
}

impl DatabaseProbe for FakeProbe {
    fn is_available(&self) -> bool {
        self.available
    }

    fn driver_name(&self) -> &str {
        "fake"
    }

    fn connect(&self, _config: &DatabaseConfig) -> Result<Box<dyn DbSession>> {
        *self.connects.borrow_mut() += 1;
        if let Some(message) = &self.connect_error {
            return Err(RecceError::Database {
                message: message.clone(),
            });
        }
        Ok(Box::new(FakeSession {
            version: self.version.clone(),
            version_error: self.version_error.clone(),
            engines: self.engines.clone(),
            variables: self.variables.clone(),
            failing_sql: self.failing_sql.clone(),
            sql_log: Rc::clone(&self.sql_log),
        }))
    }
}

struct FakeSession {
    version: String,
    version_error: Option<String>,
    engines: Vec<(String, String)>,
    variables: HashMap<String, String>,
    failing_sql: Vec<(String, String)>,
    sql_log: Rc<RefCell<Vec<String>>>,
}

impl FakeSession {
    fn scripted_failure(&self, sql: &str) -> Option<RecceError> {
        self.failing_sql
            .iter()
            .find(|(fragment, _)| sql.contains(fragment.as_str()))
            .map(|(_, message)| RecceError::Database {
                message: message.clone(),
            })
    }
}

impl DbSession for FakeSession {
    fn server_version(&mut self) -> Result<String> {
        if let Some(message) = &self.version_error {
            return Err(RecceError::Database {
                message: message.clone(),
            });
        }
        Ok(self.version.clone())
    }

    fn query_rows(&mut self, sql: &str) -> Result<Vec<Row>> {
        self.sql_log.borrow_mut().push(sql.to_string());
        if let Some(err) = self.scripted_failure(sql) {
            return Err(err);
        }

        if sql.eq_ignore_ascii_case("SHOW ENGINES") {
            return Ok(self
                .engines
                .iter()
                .map(|(engine, support)| {
                    let mut row = Row::new();
                    row.insert("Engine".to_string(), engine.clone());
                    row.insert("Support".to_string(), support.clone());
                    row
                })
                .collect());
        }

        // SHOW VARIABLES LIKE '<name>'
        if let Some(name) = sql.split('\'').nth(1) {
            if let Some(value) = self.variables.get(name) {
                let mut row = Row::new();
                row.insert("Variable_name".to_string(), name.to_string());
                row.insert("Value".to_string(), value.clone());
                return Ok(vec![row]);
            }
        }
        Ok(Vec::new())
    }

    fn execute(&mut self, sql: &str) -> Result<()> {
        self.sql_log.borrow_mut().push(sql.to_string());
        match self.scripted_failure(sql) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn healthy_defaults_connect_and_answer() {
        let probe = FakeProbe::new();
        let mut session = probe.connect(&FakeProbe::config()).unwrap();

        assert_eq!(session.server_version().unwrap(), "8.0.36");
        let engines = session.query_rows("SHOW ENGINES").unwrap();
        assert!(engines.iter().any(|r| r["Engine"] == "InnoDB"));
    }

    #[test]
    fn connect_error_is_scripted_but_recorded() {
        let probe = FakeProbe::new().with_connect_error("refused");
        assert!(probe.connect(&FakeProbe::config()).is_err());
        assert_eq!(probe.connections_opened(), 1);
    }

    #[test]
    fn variable_lookup_returns_single_row() {
        let probe = FakeProbe::new().with_variable("thread_stack", "131072");
        let mut session = probe.connect(&FakeProbe::config()).unwrap();

        let rows = session
            .query_rows("SHOW VARIABLES LIKE 'thread_stack'")
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Value"], "131072");
    }

    #[test]
    fn removed_variable_yields_no_rows() {
        let probe = FakeProbe::new().without_variable("thread_stack");
        let mut session = probe.connect(&FakeProbe::config()).unwrap();

        let rows = session
            .query_rows("SHOW VARIABLES LIKE 'thread_stack'")
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn failing_sql_matches_fragments() {
        let probe = FakeProbe::new().with_failing_sql("CREATE TRIGGER", "not allowed");
        let mut session = probe.connect(&FakeProbe::config()).unwrap();

        assert!(session.execute("CREATE TABLE t (id INT)").is_ok());
        let err = session
            .execute("CREATE TRIGGER trg BEFORE INSERT ON t FOR EACH ROW BEGIN END")
            .err()
            .unwrap();
        assert!(err.driver_message().contains("not allowed"));
    }

    #[test]
    fn sql_log_records_statements_in_order() {
        let probe = FakeProbe::new();
        let mut session = probe.connect(&FakeProbe::config()).unwrap();
        session.execute("CREATE TEMPORARY TABLE probe (id INT)").unwrap();
        session.execute("DROP TABLE probe").unwrap();

        let log = probe.sql_log();
        assert_eq!(log.len(), 2);
        assert!(log[0].starts_with("CREATE TEMPORARY"));
        assert!(probe.saw_sql("DROP TABLE"));
    }

    #[test]
    fn sessions_share_the_probe_log() {
        let probe = FakeProbe::new();
        probe
            .connect(&FakeProbe::config())
            .unwrap()
            .execute("SELECT 1")
            .unwrap();
        probe
            .connect(&FakeProbe::config())
            .unwrap()
            .execute("SELECT 2")
            .unwrap();

        assert_eq!(probe.connections_opened(), 2);
        assert_eq!(probe.sql_log(), vec!["SELECT 1", "SELECT 2"]);
    }

    #[test]
    fn unavailable_probe_reports_it() {
        let probe = FakeProbe::new().with_unavailable();
        assert!(!probe.is_available());
    }
}
