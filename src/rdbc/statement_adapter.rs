use super::{result_set_adapter::ResultSetAdapter, sql_exception::SQLException, value::Value};

pub trait PreparedStatementAdapter {
    /// Binds `value` to the placeholder at `index`, counted from 1.
    fn set_object(&mut self, index: usize, value: &Value) -> Result<(), SQLException>;
    fn execute_query<'s>(&'s mut self) -> Result<Box<dyn ResultSetAdapter + 's>, SQLException>;
    fn execute_update(&mut self) -> Result<usize, SQLException>;
    fn close(&mut self) -> Result<(), SQLException>;
}
