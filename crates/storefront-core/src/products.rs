use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Placeholder shown when a product has no image.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/400";

/// Text shown when a product has no description.
pub const MISSING_DESCRIPTION: &str = "No description available.";

/// Product identifier as issued by the storefront API.
///
/// The API may use numeric or string ids. The JSON type is kept so
/// that ids echo back to the server unchanged in order requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(i64),
    Text(String),
}

impl ProductId {
    /// Returns `true` when `raw` is the textual form of this id.
    ///
    /// Used to resolve ids typed by a user against the catalog.
    #[must_use]
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            ProductId::Number(n) => raw.trim().parse::<i64>().is_ok_and(|v| v == *n),
            ProductId::Text(s) => s == raw.trim(),
        }
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{n}"),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        ProductId::Number(value)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        ProductId::Text(value.to_owned())
    }
}

/// A catalog entry. Owned by the server; the client never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl Product {
    #[must_use]
    pub fn description_or_default(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(MISSING_DESCRIPTION)
    }

    #[must_use]
    pub fn image_or_placeholder(&self) -> &str {
        self.image
            .as_deref()
            .filter(|i| !i.is_empty())
            .unwrap_or(PLACEHOLDER_IMAGE_URL)
    }
}
