use super::sql_exception::SQLException;

pub trait ResultSetMetadataAdapter {
    fn get_column_count(&self) -> Result<usize, SQLException>;
    /// `column` is 1-based.
    fn get_column_name(&self, column: usize) -> Result<String, SQLException>;
}
