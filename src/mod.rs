pub mod config {
    pub mod jdbc_config;
    pub mod properties;
}

pub mod rdbc {
    pub mod connection_adapter;
    pub mod driver_adapter;
    pub mod driver_manager;
    pub mod result_set_adapter;
    pub mod result_set_metadata_adapter;
    pub mod sql_exception;
    pub mod statement_adapter;
    pub mod value;

    pub mod sqlite {
        pub mod sqlite_connection;
        pub mod sqlite_driver;
        pub mod sqlite_metadata;
        pub mod sqlite_result_set;
        pub mod sqlite_statement;
    }
}

pub mod util {
    pub mod data_access_helper;
    pub mod error;
}


pub use config::jdbc_config::JdbcConfig;
pub use rdbc::value::Value;
pub use util::data_access_helper::{DataAccessHelper, ResultRecord};
pub use util::error::JdbcUtilError;
