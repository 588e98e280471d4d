use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Site-assigned standard identification number (ASIN), e.g. `"B000ABC123"`.
///
/// Deserialization goes through [`ProductIdentifier::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductIdentifier(String);

impl ProductIdentifier {
    /// Wraps `raw` when it is a non-empty ASCII alphanumeric token.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_alphanumeric()) {
            Some(Self(raw.to_owned()))
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProductIdentifier {
    type Error = CoreError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw).ok_or(CoreError::InvalidIdentifier { raw })
    }
}

impl From<ProductIdentifier> for String {
    fn from(id: ProductIdentifier) -> Self {
        id.0
    }
}

impl std::fmt::Display for ProductIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A product whose title, seller and price were all extracted.
///
/// Records with any missing field are never constructed, so every field is
/// required here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "asin")]
    pub identifier: ProductIdentifier,
    /// Canonical short URL, free of tracking query parameters.
    pub url: String,
    pub title: String,
    /// Byline text, e.g. `"Visit the Anker Store"`.
    pub seller: String,
    pub price: f64,
}
