use rusqlite::Connection;

use crate::rdbc::{
    connection_adapter::ConnectionAdapter, sql_exception::SQLException,
    statement_adapter::PreparedStatementAdapter,
};

use super::sqlite_statement::SqliteStatement;

pub struct SqliteConnection {
    conn: Option<Connection>,
}

impl SqliteConnection {
    pub fn new(conn: Connection) -> Self {
        SqliteConnection { conn: Some(conn) }
    }
}

impl ConnectionAdapter for SqliteConnection {
    fn prepare_statement<'a>(
        &'a mut self,
        sql: &str,
    ) -> Result<Box<dyn PreparedStatementAdapter + 'a>, SQLException> {
        let conn = self
            .conn
            .as_ref()
            .ok_or_else(|| SQLException::closed("connection"))?;
        let stmt = conn.prepare(sql)?;
        Ok(Box::new(SqliteStatement::new(conn, stmt)))
    }

    fn is_closed(&self) -> bool {
        self.conn.is_none()
    }

    fn close(&mut self) -> Result<(), SQLException> {
        match self.conn.take() {
            Some(conn) => conn.close().map_err(|(_, e)| e.into()),
            None => Ok(()),
        }
    }
}
