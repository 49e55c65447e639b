//! Catalog product type.

use serde::{Deserialize, Serialize};

use eclat_core::{Price, ProductId};

/// Image shown when a product has none of its own.
pub const PLACEHOLDER_IMAGE: &str = "img/perfume1.png";

/// A product as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price in the base currency.
    pub price: Price,
    #[serde(default = "default_image")]
    pub image: String,
    /// Scent notes, e.g. "Oud, Amber, Rose".
    #[serde(default)]
    pub notes: String,
    /// Lowercase category slug (`men`, `women`, `unisex`).
    #[serde(default)]
    pub category: String,
}

fn default_image() -> String {
    PLACEHOLDER_IMAGE.to_owned()
}
