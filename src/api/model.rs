//! Wire schemas for the quotes resource

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque identifier assigned by the remote resource.
///
/// Servers in the wild hand these out either as strings or as integers, so both
/// are accepted and carried as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct QuoteId(String);

impl QuoteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for QuoteId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Int(i64),
            UInt(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => QuoteId(s),
            RawId::Int(n) => QuoteId(n.to_string()),
            RawId::UInt(n) => QuoteId(n.to_string()),
        })
    }
}

/// A quote as stored by the remote resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: QuoteId,
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub quote_text: String,
}

impl Quote {
    /// Tags joined for display
    pub fn tags_joined(&self) -> String {
        self.tags.join(", ")
    }
}

/// A quote as submitted by the client. Never carries an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDraft {
    pub author: String,
    pub tags: Vec<String>,
    pub quote_text: String,
}
