use rusqlite::Statement;

use crate::rdbc::{
    result_set_metadata_adapter::ResultSetMetadataAdapter, sql_exception::SQLException,
};

#[derive(Debug, Clone)]
pub struct SqliteMetadata {
    columns: Vec<String>,
}

impl SqliteMetadata {
    pub fn from_statement(stmt: &Statement<'_>) -> Self {
        SqliteMetadata {
            columns: stmt.column_names().into_iter().map(String::from).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// 0-based position of the first column labelled `label`, ignoring ASCII case.
    pub fn find_column(&self, label: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(label))
    }
}

impl ResultSetMetadataAdapter for SqliteMetadata {
    fn get_column_count(&self) -> Result<usize, SQLException> {
        Ok(self.columns.len())
    }

    fn get_column_name(&self, column: usize) -> Result<String, SQLException> {
        column
            .checked_sub(1)
            .and_then(|i| self.columns.get(i))
            .cloned()
            .ok_or_else(|| SQLException::new(format!("column index out of range: {}", column)))
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::*;

    #[test]
    fn test_from_statement() {
        let conn = Connection::open_in_memory().unwrap();
        let stmt = conn.prepare("select 1 as id, 'A' as title, 2 as ID").unwrap();
        let meta = SqliteMetadata::from_statement(&stmt);

        assert_eq!(meta.get_column_count().unwrap(), 3);
        assert_eq!(meta.get_column_name(1).unwrap(), "id");
        assert_eq!(meta.get_column_name(2).unwrap(), "title");
        assert!(meta.get_column_name(0).is_err());
        assert!(meta.get_column_name(4).is_err());

        assert_eq!(meta.find_column("TITLE"), Some(1));
        assert_eq!(meta.find_column("id"), Some(0));
        assert_eq!(meta.find_column("body"), None);
    }
}
