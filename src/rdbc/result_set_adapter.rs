use super::{
    result_set_metadata_adapter::ResultSetMetadataAdapter, sql_exception::SQLException,
    value::Value,
};

pub trait ResultSetAdapter {
    fn next(&mut self) -> Result<bool, SQLException>;
    /// Reads the first column of the current row whose label matches `column_label`.
    fn get_object(&self, column_label: &str) -> Result<Value, SQLException>;
    fn get_metadata(&self) -> Result<Box<dyn ResultSetMetadataAdapter + '_>, SQLException>;
    fn close(&mut self) -> Result<(), SQLException>;
}
