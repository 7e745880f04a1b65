use rusqlite::{
    types::{ToSqlOutput, Value as SqliteValue, ValueRef},
    Connection, Statement, ToSql,
};
use tracing::debug;

use crate::rdbc::{
    result_set_adapter::ResultSetAdapter,
    sql_exception::SQLException,
    statement_adapter::PreparedStatementAdapter,
    value::{Value, TIMESTAMP_FORMAT},
};

use super::{sqlite_metadata::SqliteMetadata, sqlite_result_set::SqliteResultSet};

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(SqliteValue::Null),
            Value::Bool(b) => ToSqlOutput::Owned(SqliteValue::Integer(*b as i64)),
            Value::Int(i) => ToSqlOutput::Owned(SqliteValue::Integer(*i)),
            Value::Float(x) => ToSqlOutput::Owned(SqliteValue::Real(*x)),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Value::Bytes(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b.as_slice())),
            Value::Timestamp(ts) => {
                ToSqlOutput::Owned(SqliteValue::Text(ts.format(TIMESTAMP_FORMAT).to_string()))
            }
        })
    }
}

pub struct SqliteStatement<'conn> {
    conn: &'conn Connection,
    stmt: Option<Statement<'conn>>,
}

impl<'conn> SqliteStatement<'conn> {
    pub fn new(conn: &'conn Connection, stmt: Statement<'conn>) -> Self {
        SqliteStatement {
            conn,
            stmt: Some(stmt),
        }
    }

    // sqlite3_changes() keeps the count of the last INSERT, UPDATE or DELETE,
    // so a statement that changed nothing is detected by total_changes()
    fn total_changes(&self) -> Result<i64, SQLException> {
        Ok(self
            .conn
            .query_row("select total_changes()", [], |row| row.get(0))?)
    }

    fn statement(&mut self) -> Result<&mut Statement<'conn>, SQLException> {
        self.stmt
            .as_mut()
            .ok_or_else(|| SQLException::closed("statement"))
    }
}

impl<'conn> PreparedStatementAdapter for SqliteStatement<'conn> {
    fn set_object(&mut self, index: usize, value: &Value) -> Result<(), SQLException> {
        let stmt = self.statement()?;
        let count = stmt.parameter_count();
        if index == 0 || index > count {
            return Err(SQLException::new(format!(
                "parameter index out of range: {} (statement has {} parameters)",
                index, count
            )));
        }
        stmt.raw_bind_parameter(index, value)?;
        Ok(())
    }

    fn execute_query<'s>(&'s mut self) -> Result<Box<dyn ResultSetAdapter + 's>, SQLException> {
        let stmt = self.statement()?;
        let metadata = SqliteMetadata::from_statement(stmt);
        debug!(columns = metadata.len(), "executing sqlite query");
        Ok(Box::new(SqliteResultSet::new(stmt.raw_query(), metadata)))
    }

    fn execute_update(&mut self) -> Result<usize, SQLException> {
        let before = self.total_changes()?;
        let changes = self.statement()?.raw_execute()?;
        let affected = if self.total_changes()? == before {
            0
        } else {
            changes
        };
        debug!(affected, "executed sqlite update");
        Ok(affected)
    }

    fn close(&mut self) -> Result<(), SQLException> {
        match self.stmt.take() {
            Some(stmt) => Ok(stmt.finalize()?),
            None => Ok(()),
        }
    }
}
