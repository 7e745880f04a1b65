use rusqlite::Connection;
use tracing::debug;

use crate::rdbc::{
    connection_adapter::ConnectionAdapter,
    driver_adapter::{ConnectionInfo, DriverAdapter},
    sql_exception::SQLException,
};

use super::sqlite_connection::SqliteConnection;

pub const SQLITE_DRIVER_NAME: &str = "sqlite";

const URL_PREFIXES: [&str; 2] = ["jdbc:sqlite:", "sqlite:"];
const IN_MEMORY: &str = ":memory:";

pub struct SqliteDriver;

impl SqliteDriver {
    fn database_path(url: &str) -> Option<&str> {
        URL_PREFIXES
            .iter()
            .find_map(|prefix| url.strip_prefix(prefix))
            .map(|rest| rest.strip_prefix("//").unwrap_or(rest))
    }
}

impl DriverAdapter for SqliteDriver {
    fn accepts_url(&self, url: &str) -> bool {
        Self::database_path(url).is_some()
    }

    // sqlite has no authentication, credentials are accepted and ignored
    fn connect(
        &self,
        url: &str,
        _info: &ConnectionInfo,
    ) -> Result<Box<dyn ConnectionAdapter>, SQLException> {
        let path = Self::database_path(url)
            .ok_or_else(|| SQLException::new(format!("not a sqlite url: {}", url)))?;

        let conn = if path.is_empty() || path == IN_MEMORY {
            Connection::open_in_memory()
        } else {
            Connection::open(path)
        }
        .map_err(|e| SQLException::with_cause(format!("failed to open database {}", url), e))?;
        debug!(path, "sqlite connection opened");

        Ok(Box::new(SqliteConnection::new(conn)))
    }

    fn get_major_version(&self) -> i32 {
        0
    }

    fn get_minor_version(&self) -> i32 {
        1
    }
}
