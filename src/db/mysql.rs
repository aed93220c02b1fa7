//! Real database probe over the blocking MySQL client.

use std::time::Duration;

use mysql::prelude::Queryable;
use mysql::{Conn, OptsBuilder, Value};
use tracing::debug;

use super::{DatabaseConfig, DatabaseProbe, DbSession, Row};
use crate::error::{RecceError, Result};

/// How long to wait for the TCP connect before giving up.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Probe backed by the `mysql` crate's synchronous client.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlProbe;

impl MySqlProbe {
    pub fn new() -> Self {
        Self
    }
}

impl DatabaseProbe for MySqlProbe {
    fn is_available(&self) -> bool {
        true
    }

    fn driver_name(&self) -> &str {
        "mysql"
    }

    fn connect(&self, config: &DatabaseConfig) -> Result<Box<dyn DbSession>> {
        let (host, port) = config.endpoint();
        debug!(host, port, database = %config.database, "opening database session");

        let opts = OptsBuilder::new()
            .ip_or_hostname(Some(host))
            .tcp_port(port)
            .user(Some(&config.username))
            .pass(Some(&config.password))
            .tcp_connect_timeout(Some(CONNECT_TIMEOUT));
        let mut conn = Conn::new(opts).map_err(driver_error)?;

        // Selecting the database is part of the connection contract; a bad
        // database name must fail here, not on first use.
        conn.query_drop(use_statement(&config.database))
            .map_err(driver_error)?;

        Ok(Box::new(MySqlSession { conn }))
    }
}

struct MySqlSession {
    conn: Conn,
}

impl DbSession for MySqlSession {
    fn server_version(&mut self) -> Result<String> {
        let version: Option<String> = self
            .conn
            .query_first("SELECT VERSION()")
            .map_err(driver_error)?;
        version.ok_or_else(|| RecceError::Database {
            message: "server returned no version row".to_string(),
        })
    }

    fn query_rows(&mut self, sql: &str) -> Result<Vec<Row>> {
        let rows: Vec<mysql::Row> = self.conn.query(sql).map_err(driver_error)?;
        Ok(rows.into_iter().map(row_to_map).collect())
    }

    fn execute(&mut self, sql: &str) -> Result<()> {
        self.conn.query_drop(sql).map_err(driver_error)
    }
}

fn driver_error(err: mysql::Error) -> RecceError {
    RecceError::Database {
        message: err.to_string(),
    }
}

fn use_statement(database: &str) -> String {
    format!("USE `{}`", database.replace('`', "``"))
}

/// Flatten a driver row into column-name keyed strings. NULL columns are
/// omitted, matching how `SHOW` output is consumed by the checks.
fn row_to_map(row: mysql::Row) -> Row {
    let columns = row.columns();
    let values = row.unwrap();
    let mut map = Row::new();
    for (column, value) in columns.iter().zip(values) {
        if matches!(value, Value::NULL) {
            continue;
        }
        let rendered = match value {
            Value::Bytes(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Value::Int(v) => v.to_string(),
            Value::UInt(v) => v.to_string(),
            Value::Float(v) => v.to_string(),
            Value::Double(v) => v.to_string(),
            other => other.as_sql(false),
        };
        map.insert(column.name_str().into_owned(), rendered);
    }
    map
}
