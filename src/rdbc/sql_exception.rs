use thiserror::Error;

type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error raised by a driver while preparing, binding, executing or closing.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SQLException {
    message: String,
    #[source]
    cause: Option<BoxedCause>,
}

impl SQLException {
    pub fn new(message: impl Into<String>) -> Self {
        SQLException {
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(message: impl Into<String>, cause: impl Into<BoxedCause>) -> Self {
        SQLException {
            message: message.into(),
            cause: Some(cause.into()),
        }
    }

    pub fn closed(what: &str) -> Self {
        SQLException::new(format!("{} is closed", what))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<rusqlite::Error> for SQLException {
    fn from(e: rusqlite::Error) -> Self {
        SQLException::with_cause(e.to_string(), e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn test_display_uses_message() {
        let e = SQLException::new("no such table: article");
        assert_eq!(e.to_string(), "no such table: article");
        assert!(e.source().is_none());
    }

    #[test]
    fn test_with_cause_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let e = SQLException::with_cause("failed to open database", io);
        assert_eq!(e.message(), "failed to open database");
        assert_eq!(e.source().unwrap().to_string(), "disk gone");
    }

    #[test]
    fn test_from_rusqlite_error() {
        let e: SQLException = rusqlite::Error::InvalidParameterCount(3, 2).into();
        assert!(e.source().is_some());
    }
}
