use std::{collections::HashMap, fs::File, io::Read, path::Path};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] java_properties::PropertiesError),
}

/// Key/value pairs read from `.properties` text.
///
/// Input bytes are decoded as ISO-8859-1. Supports `#` and `!` comments,
/// `=`, `:` or whitespace separators, backslash line continuation and
/// `\uXXXX` escapes. A key that appears more than once keeps its last value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    entries: HashMap<String, String>,
}

impl Properties {
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        Self::load(File::open(path)?)
    }

    pub fn load<R: Read>(input: R) -> Result<Self, ConfigError> {
        let entries = java_properties::read(input)?;
        Ok(Properties { entries })
    }

    pub fn get_property(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn get_property_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get_property(key).unwrap_or(default)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
