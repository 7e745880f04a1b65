use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::{
    config::jdbc_config::JdbcConfig,
    rdbc::{
        connection_adapter::ConnectionAdapter, driver_manager, result_set_adapter::ResultSetAdapter,
        sql_exception::SQLException, statement_adapter::PreparedStatementAdapter, value::Value,
    },
};

use super::error::JdbcUtilError;

/// One row of a query result keyed by column name. NULL cells hold an empty string.
pub type ResultRecord = BTreeMap<String, Value>;

/// Runs parameterized statements over a single connection.
///
/// Statements and cursors live only for the duration of one `execute_*` call
/// and are closed, cursor first, before the call returns. The connection stays
/// open until `release` or drop.
pub struct DataAccessHelper {
    config: JdbcConfig,
    connection: Option<Box<dyn ConnectionAdapter>>,
}

impl DataAccessHelper {
    pub fn new(config: JdbcConfig) -> Self {
        DataAccessHelper {
            config,
            connection: None,
        }
    }

    pub fn from_default_config() -> Result<Self, JdbcUtilError> {
        Ok(Self::new(JdbcConfig::load()?))
    }

    pub fn config(&self) -> &JdbcConfig {
        &self.config
    }

    pub fn is_connected(&self) -> bool {
        self.connection.as_ref().is_some_and(|c| !c.is_closed())
    }

    /// Opens a connection with the configured driver, closing any connection
    /// this helper already holds once the new one is established.
    pub fn get_connection(&mut self) -> Result<&mut dyn ConnectionAdapter, JdbcUtilError> {
        let driver = self
            .config
            .driver
            .as_deref()
            .ok_or_else(|| JdbcUtilError::Connection(SQLException::new("jdbc.driver is not set")))?;
        let url = self
            .config
            .url
            .as_deref()
            .ok_or_else(|| JdbcUtilError::Connection(SQLException::new("jdbc.url is not set")))?;

        let conn = driver_manager::get_connection(driver, url, &self.config.connection_info())
            .map_err(JdbcUtilError::Connection)?;
        info!(driver, url, "database connection established");

        if let Some(mut prior) = self.connection.take() {
            close_quietly("connection", prior.close());
        }
        Ok(&mut **self.connection.insert(conn))
    }

    /// Executes an insert, update or delete and reports whether any row was affected.
    pub fn execute_update(
        &mut self,
        sql: &str,
        params: Option<&[Value]>,
    ) -> Result<bool, JdbcUtilError> {
        let conn = self.live_connection()?;
        let mut stmt = conn.prepare_statement(sql)?;

        let result = bind_params(stmt.as_mut(), params).and_then(|_| stmt.execute_update());
        close_quietly("statement", stmt.close());

        let affected = result?;
        debug!(sql, affected, "update executed");
        Ok(affected > 0)
    }

    /// Executes a query and materializes every row in cursor order.
    pub fn execute_query(
        &mut self,
        sql: &str,
        params: Option<&[Value]>,
    ) -> Result<Vec<ResultRecord>, JdbcUtilError> {
        let conn = self.live_connection()?;
        let mut stmt = conn.prepare_statement(sql)?;

        let result = bind_params(stmt.as_mut(), params).and_then(|_| read_records(stmt.as_mut()));
        close_quietly("statement", stmt.close());

        let records = result?;
        debug!(sql, rows = records.len(), "query executed");
        Ok(records)
    }

    /// Closes the connection if one is held. Never fails; close errors are logged.
    pub fn release(&mut self) {
        if let Some(mut conn) = self.connection.take() {
            close_quietly("connection", conn.close());
        }
    }

    fn live_connection(&mut self) -> Result<&mut dyn ConnectionAdapter, SQLException> {
        match self.connection.as_deref_mut() {
            Some(conn) if !conn.is_closed() => Ok(conn),
            _ => Err(SQLException::new("connection is not open")),
        }
    }
}

impl Drop for DataAccessHelper {
    fn drop(&mut self) {
        self.release();
    }
}

fn close_quietly(resource: &str, result: Result<(), SQLException>) {
    if let Err(e) = result {
        warn!(resource, error = %e, "failed to close");
    }
}

fn bind_params(
    stmt: &mut dyn PreparedStatementAdapter,
    params: Option<&[Value]>,
) -> Result<(), SQLException> {
    for (i, value) in params.unwrap_or_default().iter().enumerate() {
        stmt.set_object(i + 1, value)?;
    }
    Ok(())
}

fn read_records(stmt: &mut dyn PreparedStatementAdapter) -> Result<Vec<ResultRecord>, SQLException> {
    let mut rs = stmt.execute_query()?;
    let records = collect_records(rs.as_mut());
    close_quietly("result set", rs.close());
    records
}

fn collect_records(rs: &mut dyn ResultSetAdapter) -> Result<Vec<ResultRecord>, SQLException> {
    let columns = {
        let meta = rs.get_metadata()?;
        (1..=meta.get_column_count()?)
            .map(|i| meta.get_column_name(i))
            .collect::<Result<Vec<_>, _>>()?
    };

    let mut records = Vec::new();
    while rs.next()? {
        let mut record = ResultRecord::new();
        for name in &columns {
            let value = match rs.get_object(name)? {
                Value::Null => Value::Text(String::new()),
                v => v,
            };
            record.insert(name.clone(), value);
        }
        records.push(record);
    }
    Ok(records)
}
