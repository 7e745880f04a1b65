use std::sync::{Arc, Mutex};

use rand::Rng;

use crate::rdbc::{
    connection_adapter::ConnectionAdapter,
    driver_adapter::{ConnectionInfo, DriverAdapter},
    result_set_adapter::ResultSetAdapter,
    result_set_metadata_adapter::ResultSetMetadataAdapter,
    sql_exception::SQLException,
    statement_adapter::PreparedStatementAdapter,
    value::Value,
};

pub const CLOSE_RESULT_SET: &str = "close result set";
pub const CLOSE_STATEMENT: &str = "close statement";
pub const CLOSE_CONNECTION: &str = "close connection";

/// Scripted database shared between a `MockDriver` and the connections it hands out.
#[derive(Debug, Default)]
pub struct MockState {
    pub connect_info: Option<ConnectionInfo>,
    pub connects: usize,
    pub fail_connect: bool,
    pub fail_prepare: bool,
    pub fail_execute: bool,
    pub fail_close_result_set: bool,
    pub fail_close_statement: bool,
    pub fail_close_connection: bool,

    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    pub update_count: usize,

    pub prepared: Vec<String>,
    pub bound: Vec<Vec<Value>>,
    pub events: Vec<&'static str>,
}

pub type SharedState = Arc<Mutex<MockState>>;

pub fn unique_driver_name() -> String {
    format!("org.example.Mock{}", rand::rng().random::<u64>())
}

pub struct MockDriver {
    url_prefix: String,
    state: SharedState,
}

impl MockDriver {
    pub fn new(url_prefix: &str) -> (Self, SharedState) {
        let state = Arc::new(Mutex::new(MockState::default()));
        (
            MockDriver {
                url_prefix: url_prefix.to_string(),
                state: state.clone(),
            },
            state,
        )
    }
}

impl DriverAdapter for MockDriver {
    fn accepts_url(&self, url: &str) -> bool {
        url.starts_with(&self.url_prefix)
    }

    fn connect(
        &self,
        _url: &str,
        info: &ConnectionInfo,
    ) -> Result<Box<dyn ConnectionAdapter>, SQLException> {
        let mut state = self.state.lock().unwrap();
        if state.fail_connect {
            return Err(SQLException::new("access denied"));
        }
        state.connects += 1;
        state.connect_info = Some(info.clone());
        Ok(Box::new(MockConnection {
            state: self.state.clone(),
            closed: false,
        }))
    }

    fn get_major_version(&self) -> i32 {
        1
    }

    fn get_minor_version(&self) -> i32 {
        0
    }
}

pub struct MockConnection {
    state: SharedState,
    closed: bool,
}

impl ConnectionAdapter for MockConnection {
    fn prepare_statement<'a>(
        &'a mut self,
        sql: &str,
    ) -> Result<Box<dyn PreparedStatementAdapter + 'a>, SQLException> {
        if self.closed {
            return Err(SQLException::closed("connection"));
        }
        let mut state = self.state.lock().unwrap();
        if state.fail_prepare {
            return Err(SQLException::new(format!("syntax error: {}", sql)));
        }
        state.prepared.push(sql.to_string());
        Ok(Box::new(MockStatement {
            state: self.state.clone(),
            params: vec![Value::Null; sql.matches('?').count()],
            closed: false,
        }))
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn close(&mut self) -> Result<(), SQLException> {
        let mut state = self.state.lock().unwrap();
        state.events.push(CLOSE_CONNECTION);
        if state.fail_close_connection {
            return Err(SQLException::new("connection reset"));
        }
        self.closed = true;
        Ok(())
    }
}

pub struct MockStatement {
    state: SharedState,
    params: Vec<Value>,
    closed: bool,
}

impl MockStatement {
    fn record_execution(&self) -> Result<(), SQLException> {
        if self.closed {
            return Err(SQLException::closed("statement"));
        }
        let mut state = self.state.lock().unwrap();
        if state.fail_execute {
            return Err(SQLException::new("constraint violation"));
        }
        state.bound.push(self.params.clone());
        Ok(())
    }
}

impl PreparedStatementAdapter for MockStatement {
    fn set_object(&mut self, index: usize, value: &Value) -> Result<(), SQLException> {
        let count = self.params.len();
        let slot = index
            .checked_sub(1)
            .and_then(|i| self.params.get_mut(i))
            .ok_or_else(|| {
                SQLException::new(format!(
                    "parameter index out of range: {} (statement has {} parameters)",
                    index, count
                ))
            })?;
        *slot = value.clone();
        Ok(())
    }

    fn execute_query<'s>(&'s mut self) -> Result<Box<dyn ResultSetAdapter + 's>, SQLException> {
        self.record_execution()?;
        let state = self.state.lock().unwrap();
        Ok(Box::new(MockResultSet {
            state: self.state.clone(),
            columns: state.columns.clone(),
            rows: state.rows.clone(),
            pos: None,
        }))
    }

    fn execute_update(&mut self) -> Result<usize, SQLException> {
        self.record_execution()?;
        Ok(self.state.lock().unwrap().update_count)
    }

    fn close(&mut self) -> Result<(), SQLException> {
        let mut state = self.state.lock().unwrap();
        state.events.push(CLOSE_STATEMENT);
        if state.fail_close_statement {
            return Err(SQLException::new("statement already finalized"));
        }
        self.closed = true;
        Ok(())
    }
}

pub struct MockResultSet {
    state: SharedState,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    pos: Option<usize>,
}

impl ResultSetAdapter for MockResultSet {
    fn next(&mut self) -> Result<bool, SQLException> {
        let next = self.pos.map_or(0, |p| p + 1);
        self.pos = Some(next);
        Ok(next < self.rows.len())
    }

    fn get_object(&self, column_label: &str) -> Result<Value, SQLException> {
        let row = self
            .pos
            .and_then(|p| self.rows.get(p))
            .ok_or_else(|| SQLException::new("no current row"))?;
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(column_label))
            .map(|i| row[i].clone())
            .ok_or_else(|| SQLException::new(format!("column not found: {}", column_label)))
    }

    fn get_metadata(&self) -> Result<Box<dyn ResultSetMetadataAdapter + '_>, SQLException> {
        Ok(Box::new(MockMetadata {
            columns: &self.columns,
        }))
    }

    fn close(&mut self) -> Result<(), SQLException> {
        let mut state = self.state.lock().unwrap();
        state.events.push(CLOSE_RESULT_SET);
        if state.fail_close_result_set {
            return Err(SQLException::new("cursor already closed"));
        }
        Ok(())
    }
}

pub struct MockMetadata<'a> {
    columns: &'a [String],
}

impl ResultSetMetadataAdapter for MockMetadata<'_> {
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
