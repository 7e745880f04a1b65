use rusqlite::{types::ValueRef, Rows};

use crate::rdbc::{
    result_set_adapter::ResultSetAdapter, result_set_metadata_adapter::ResultSetMetadataAdapter,
    sql_exception::SQLException, value::Value,
};

use super::sqlite_metadata::SqliteMetadata;

pub struct SqliteResultSet<'s> {
    rows: Option<Rows<'s>>,
    metadata: SqliteMetadata,
    current: Option<Vec<Value>>,
}

impl<'s> SqliteResultSet<'s> {
    pub fn new(rows: Rows<'s>, metadata: SqliteMetadata) -> Self {
        SqliteResultSet {
            rows: Some(rows),
            metadata,
            current: None,
        }
    }
}

fn to_value(v: ValueRef<'_>) -> Value {
    match v {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Int(i),
        ValueRef::Real(x) => Value::Float(x),
        // TEXT that is not valid UTF-8 keeps its raw bytes
        ValueRef::Text(t) => match std::str::from_utf8(t) {
            Ok(s) => Value::Text(s.to_string()),
            Err(_) => Value::Bytes(t.to_vec()),
        },
        ValueRef::Blob(b) => Value::Bytes(b.to_vec()),
    }
}

impl<'s> ResultSetAdapter for SqliteResultSet<'s> {
    fn next(&mut self) -> Result<bool, SQLException> {
        let rows = self
            .rows
            .as_mut()
            .ok_or_else(|| SQLException::closed("result set"))?;

        self.current = match rows.next()? {
            Some(row) => Some(
                (0..self.metadata.len())
                    .map(|i| row.get_ref(i).map(to_value))
                    .collect::<rusqlite::Result<Vec<_>>>()?,
            ),
            None => None,
        };
        Ok(self.current.is_some())
    }

    fn get_object(&self, column_label: &str) -> Result<Value, SQLException> {
        let row = self
            .current
            .as_ref()
            .ok_or_else(|| SQLException::new("no current row"))?;
        let i = self
            .metadata
            .find_column(column_label)
            .ok_or_else(|| SQLException::new(format!("column not found: {}", column_label)))?;
        Ok(row[i].clone())
    }

    fn get_metadata(&self) -> Result<Box<dyn ResultSetMetadataAdapter + '_>, SQLException> {
        Ok(Box::new(self.metadata.clone()))
    }

    fn close(&mut self) -> Result<(), SQLException> {
        self.rows = None;
        self.current = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::rdbc::{
        sqlite::sqlite_statement::SqliteStatement, statement_adapter::PreparedStatementAdapter,
    };

    use super::*;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "create table article(id integer, title text, body text, score real, cover blob);
             insert into article values (2, 'B', 'second', 1.5, x'0102');
             insert into article values (1, 'A', null, null, null);",
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_iterate_rows() {
        let conn = setup();
        let mut stmt = SqliteStatement::new(&conn, conn.prepare("select * from article").unwrap());
        let mut rs = stmt.execute_query().unwrap();

        assert!(rs.next().unwrap());
        assert_eq!(rs.get_object("id").unwrap(), Value::Int(2));
        assert_eq!(rs.get_object("SCORE").unwrap(), Value::Float(1.5));
        assert_eq!(rs.get_object("cover").unwrap(), Value::Bytes(vec![1, 2]));

        assert!(rs.next().unwrap());
        assert_eq!(rs.get_object("title").unwrap(), Value::from("A"));
        assert_eq!(rs.get_object("body").unwrap(), Value::Null);

        assert!(!rs.next().unwrap());
        assert!(rs.get_object("id").is_err());
    }

    #[test]
    fn test_invalid_utf8_text_as_bytes() {
        let conn = setup();
        let mut stmt = SqliteStatement::new(
            &conn,
            conn.prepare("select cast(x'ff41' as text) as raw, 'ok' as fine")
                .unwrap(),
        );
        let mut rs = stmt.execute_query().unwrap();

        assert!(rs.next().unwrap());
        assert_eq!(rs.get_object("raw").unwrap(), Value::Bytes(vec![0xff, 0x41]));
        assert_eq!(rs.get_object("fine").unwrap(), Value::from("ok"));
    }

    #[test]
    fn test_metadata() {
        let conn = setup();
        let mut stmt =
            SqliteStatement::new(&conn, conn.prepare("select title, id from article").unwrap());
        let rs = stmt.execute_query().unwrap();
        let meta = rs.get_metadata().unwrap();

        assert_eq!(meta.get_column_count().unwrap(), 2);
        assert_eq!(meta.get_column_name(1).unwrap(), "title");
        assert_eq!(meta.get_column_name(2).unwrap(), "id");
    }

    #[test]
    fn test_get_object_before_next() {
        let conn = setup();
        let mut stmt = SqliteStatement::new(&conn, conn.prepare("select * from article").unwrap());
        let rs = stmt.execute_query().unwrap();
        let err = rs.get_object("id").err().unwrap();
        assert_eq!(err.message(), "no current row");
    }

    #[test]
    fn test_unknown_column() {
        let conn = setup();
        let mut stmt = SqliteStatement::new(&conn, conn.prepare("select * from article").unwrap());
        let mut rs = stmt.execute_query().unwrap();
        rs.next().unwrap();
        let err = rs.get_object("author").err().unwrap();
        assert_eq!(err.message(), "column not found: author");
    }

    #[test]
    fn test_close() {
        let conn = setup();
        let mut stmt = SqliteStatement::new(&conn, conn.prepare("select * from article").unwrap());
        let mut rs = stmt.execute_query().unwrap();
        rs.close().unwrap();
        rs.close().unwrap();
        let err = rs.next().err().unwrap();
        assert_eq!(err.message(), "result set is closed");
    }
}
