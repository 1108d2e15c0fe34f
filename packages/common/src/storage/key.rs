use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::StorageError;

const MAX_KEY_LEN: usize = 512;

/// A validated object key: a relative, `/`-separated path with no traversal.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Parse and validate an object key such as `uploads/1700000000000.mp4`.
    pub fn parse(s: &str) -> Result<Self, StorageError> {
        if s.is_empty() {
            return Err(StorageError::InvalidKey("key is empty".into()));
        }
        if s.len() > MAX_KEY_LEN {
            return Err(StorageError::InvalidKey(format!(
                "key exceeds {MAX_KEY_LEN} bytes"
            )));
        }
        if s.chars().any(|c| c.is_control() || c == '\\') {
            return Err(StorageError::InvalidKey(
                "control characters and backslashes are not allowed".into(),
            ));
        }
        for segment in s.split('/') {
            match segment {
                "" => {
                    return Err(StorageError::InvalidKey(
                        "empty path segment (leading, trailing or double '/')".into(),
                    ));
                }
                "." | ".." => {
                    return Err(StorageError::InvalidKey(
                        "'.' and '..' segments are not allowed".into(),
                    ));
                }
                _ if segment.starts_with('.') => {
                    return Err(StorageError::InvalidKey(
                        "hidden segments are not allowed".into(),
                    ));
                }
                _ => {}
            }
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path segments in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

impl fmt::Debug for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectKey({})", self.0)
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ObjectKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ObjectKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
