use super::{sql_exception::SQLException, statement_adapter::PreparedStatementAdapter};

pub trait ConnectionAdapter {
    fn prepare_statement<'a>(
        &'a mut self,
        sql: &str,
    ) -> Result<Box<dyn PreparedStatementAdapter + 'a>, SQLException>;
    fn is_closed(&self) -> bool;
    fn close(&mut self) -> Result<(), SQLException>;
}
