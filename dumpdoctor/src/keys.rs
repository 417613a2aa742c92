//! Support ids and build keys.
//!
//! A support id is the UUID the firmware prints when a dump is uploaded; a
//! build key is the 32 character hex id of a cloud build. Dumps carry their
//! build key on a `BUILD KEY: <key>` line.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;
use uuid::Uuid;

static UUID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}").unwrap()
});
static BUILD_KEY_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)BUILD KEY: ([a-z0-9]+)").unwrap());

pub const BUILD_KEY_LEN: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("Invalid key format: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupportKey {
    Support(Uuid),
    Build(String),
}

impl SupportKey {
    pub fn parse(key: &str) -> Result<Self, KeyError> {
        let key = key.trim();
        if key.len() == BUILD_KEY_LEN && key.chars().all(|c| c.is_ascii_hexdigit()) {
            return Ok(SupportKey::Build(key.to_ascii_lowercase()));
        }
        // Uuid::parse_str also takes simple and braced forms; only hyphenated ids are support ids.
        if key.len() == 36 {
            if let Ok(id) = Uuid::parse_str(key) {
                return Ok(SupportKey::Support(id));
            }
        }
        Err(KeyError::InvalidFormat(key.to_string()))
    }

    pub fn is_build_key(&self) -> bool {
        matches!(self, SupportKey::Build(_))
    }
}

impl fmt::Display for SupportKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupportKey::Support(id) => write!(f, "{}", id.hyphenated()),
            SupportKey::Build(key) => write!(f, "{}", key),
        }
    }
}

/// First support id found anywhere in `text`.
pub fn extract_support_id(text: &str) -> Option<Uuid> {
    UUID_PATTERN
        .find_iter(text)
        .find_map(|m| Uuid::parse_str(m.as_str()).ok())
}

/// Build key announced on a `BUILD KEY:` line.
pub fn extract_build_key(text: &str) -> Option<String> {
    BUILD_KEY_LINE
        .captures(text)
        .map(|caps| caps[1].to_string())
}
