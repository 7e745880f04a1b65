use super::{connection_adapter::ConnectionAdapter, sql_exception::SQLException};

/// Credentials handed to a driver when it opens a connection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionInfo {
    pub user: Option<String>,
    pub password: Option<String>,
}

pub trait DriverAdapter: Send + Sync {
    fn accepts_url(&self, url: &str) -> bool;
    fn connect(
        &self,
        url: &str,
        info: &ConnectionInfo,
    ) -> Result<Box<dyn ConnectionAdapter>, SQLException>;
    fn get_major_version(&self) -> i32;
    fn get_minor_version(&self) -> i32;
}
