use std::path::PathBuf;

use thiserror::Error;

use crate::{config::properties::ConfigError, rdbc::sql_exception::SQLException};

#[derive(Debug, Error)]
pub enum JdbcUtilError {
    #[error("failed to load database configuration from {}", .path.display())]
    ConfigLoad {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    #[error("failed to get database connection: {0}")]
    Connection(#[source] SQLException),

    #[error(transparent)]
    SqlExecution(#[from] SQLException),
}
