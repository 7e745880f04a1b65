use std::{fmt, path::Path};

use tracing::info;

use crate::{rdbc::driver_adapter::ConnectionInfo, util::error::JdbcUtilError};

use super::properties::Properties;

pub const DEFAULT_CONFIG_PATH: &str = "resources/jdbc.properties";

pub const USERNAME_KEY: &str = "jdbc.username";
pub const PASSWORD_KEY: &str = "jdbc.password";
pub const DRIVER_KEY: &str = "jdbc.driver";
pub const URL_KEY: &str = "jdbc.url";

/// Connection settings read once at startup and handed to `DataAccessHelper::new`.
///
/// A key missing from the resource leaves its field unset; only an unreadable
/// or malformed resource is an error.
#[derive(Clone, Default, PartialEq)]
pub struct JdbcConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub driver: Option<String>,
    pub url: Option<String>,
}

impl JdbcConfig {
    /// Loads `resources/jdbc.properties` relative to the working directory.
    pub fn load() -> Result<Self, JdbcUtilError> {
        Self::load_from(Path::new(DEFAULT_CONFIG_PATH))
    }

    pub fn load_from(path: &Path) -> Result<Self, JdbcUtilError> {
        let props = Properties::load_file(path).map_err(|source| JdbcUtilError::ConfigLoad {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_properties(&props);
        info!(path = %path.display(), ?config, "loaded database configuration");
        Ok(config)
    }

    pub fn from_properties(props: &Properties) -> Self {
        let get = |key| props.get_property(key).map(String::from);
        JdbcConfig {
            username: get(USERNAME_KEY),
            password: get(PASSWORD_KEY),
            driver: get(DRIVER_KEY),
            url: get(URL_KEY),
        }
    }

    pub fn connection_info(&self) -> ConnectionInfo {
        ConnectionInfo {
            user: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

// keeps the password out of logs
impl fmt::Debug for JdbcConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JdbcConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("driver", &self.driver)
            .field("url", &self.url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{error::Error, fs};

    use super::*;
    use crate::config::properties::ConfigError;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, text: &str) -> std::path::PathBuf {
        let path = dir.path().join("jdbc.properties");
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_load_all_keys() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "jdbc.username=u\njdbc.password=p\njdbc.driver=org.example.Driver\njdbc.url=jdbc:example://host/db\n",
        );

        let config = JdbcConfig::load_from(&path).unwrap();
        assert_eq!(
            config,
            JdbcConfig {
                username: Some("u".to_string()),
                password: Some("p".to_string()),
                driver: Some("org.example.Driver".to_string()),
                url: Some("jdbc:example://host/db".to_string()),
            }
        );
    }

    #[test]
    fn test_missing_key_is_unset() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "jdbc.driver=sqlite\njdbc.url=jdbc:sqlite::memory:\n");

        let config = JdbcConfig::load_from(&path).unwrap();
        assert_eq!(config.username, None);
        assert_eq!(config.password, None);
        assert_eq!(config.driver.as_deref(), Some("sqlite"));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jdbc.properties");

        match JdbcConfig::load_from(&path) {
            Err(JdbcUtilError::ConfigLoad { path: p, source }) => {
                assert_eq!(p, path);
                assert!(matches!(source, ConfigError::Io(_)));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "jdbc.password=\\uXYZW\n");

        let err = JdbcConfig::load_from(&path).err().unwrap();
        assert!(err
            .to_string()
            .starts_with("failed to load database configuration from"));
        assert!(err.source().is_some());
        assert!(matches!(
            err,
            JdbcUtilError::ConfigLoad {
                source: ConfigError::Parse(_),
                ..
            }
        ));
    }

    #[test]
    fn test_load_is_repeatable() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "jdbc.username=first\n");
        assert_eq!(
            JdbcConfig::load_from(&path).unwrap().username.as_deref(),
            Some("first")
        );

        write_config(&dir, "jdbc.username=second\n");
        assert_eq!(
            JdbcConfig::load_from(&path).unwrap().username.as_deref(),
            Some("second")
        );
    }

    #[test]
    fn test_load_default_resource() {
        let config = JdbcConfig::load().unwrap();
        assert_eq!(config.driver.as_deref(), Some("sqlite"));
        assert!(config.url.is_some());
    }

    #[test]
    fn test_debug_hides_password() {
        let config = JdbcConfig {
            password: Some("hunter2".to_string()),
            ..Default::default()
        };
        let printed = format!("{:?}", config);
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("***"));
    }

    #[test]
    fn test_connection_info() {
        let config = JdbcConfig {
            username: Some("u".to_string()),
            password: Some("p".to_string()),
            ..Default::default()
        };
        let info = config.connection_info();
        assert_eq!(info.user.as_deref(), Some("u"));
        assert_eq!(info.password.as_deref(), Some("p"));
    }
}
