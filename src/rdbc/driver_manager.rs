use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use lazy_static::lazy_static;
use tracing::debug;

use super::{
    connection_adapter::ConnectionAdapter,
    driver_adapter::{ConnectionInfo, DriverAdapter},
    sql_exception::SQLException,
    sqlite::sqlite_driver::{SqliteDriver, SQLITE_DRIVER_NAME},
};

lazy_static! {
    static ref DRIVERS: Mutex<HashMap<String, Arc<dyn DriverAdapter>>> = {
        let mut m: HashMap<String, Arc<dyn DriverAdapter>> = HashMap::new();
        m.insert(SQLITE_DRIVER_NAME.to_string(), Arc::new(SqliteDriver));
        Mutex::new(m)
    };
}

/// Registers `driver` under `name`, replacing any driver already registered there.
pub fn register_driver(name: &str, driver: Arc<dyn DriverAdapter>) -> Result<(), SQLException> {
    DRIVERS
        .lock()
        .map_err(|_| SQLException::new("failed to get lock"))?
        .insert(name.to_string(), driver);
    debug!(driver = name, "registered driver");
    Ok(())
}

pub fn deregister_driver(name: &str) -> Result<bool, SQLException> {
    Ok(DRIVERS
        .lock()
        .map_err(|_| SQLException::new("failed to get lock"))?
        .remove(name)
        .is_some())
}

pub fn load_driver(name: &str) -> Result<Arc<dyn DriverAdapter>, SQLException> {
    DRIVERS
        .lock()
        .map_err(|_| SQLException::new("failed to get lock"))?
        .get(name)
        .cloned()
        .ok_or_else(|| SQLException::new(format!("driver not found: {}", name)))
}

pub fn registered_drivers() -> Result<Vec<String>, SQLException> {
    let mut names: Vec<String> = DRIVERS
        .lock()
        .map_err(|_| SQLException::new("failed to get lock"))?
        .keys()
        .cloned()
        .collect();
    names.sort();
    Ok(names)
}

pub fn get_connection(
    driver_name: &str,
    url: &str,
    info: &ConnectionInfo,
) -> Result<Box<dyn ConnectionAdapter>, SQLException> {
    let driver = load_driver(driver_name)?;
    if !driver.accepts_url(url) {
        return Err(SQLException::new(format!(
            "no suitable driver found for {}",
            url
        )));
    }
    debug!(
        driver = driver_name,
        version = %format!("{}.{}", driver.get_major_version(), driver.get_minor_version()),
        url,
        "opening connection"
    );
    driver.connect(url, info)
}
