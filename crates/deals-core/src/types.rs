use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Product
// =============================================================================

/// A single product record as served by the deals backend.
///
/// Every field except the title is optional because scraped listings are
/// frequently incomplete. Missing numbers count as `0` when filtering or
/// sorting and render as `"N/A"` for display.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub type_product: Option<String>,
    pub price_numeric: Option<f64>,
    pub old_price_numeric: Option<f64>,
    pub discount_percentage: Option<f64>,
    pub image_url: Option<String>,
    pub product_link: Option<String>,
}

impl Product {
    /// Create a product with only a title set.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_type(mut self, type_product: impl Into<String>) -> Self {
        self.type_product = Some(type_product.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price_numeric = Some(price);
        self
    }

    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount_percentage = Some(discount);
        self
    }

    /// Price for comparisons; absent prices count as zero.
    pub fn price_or_zero(&self) -> f64 {
        self.price_numeric.unwrap_or(0.0)
    }

    /// Discount for comparisons; absent discounts count as zero.
    pub fn discount_or_zero(&self) -> f64 {
        self.discount_percentage.unwrap_or(0.0)
    }

    /// Lower-cased `title brand category type` text used for keyword matching.
    pub fn search_text(&self) -> String {
        [
            Some(self.title.as_str()),
            self.brand.as_deref(),
            self.category.as_deref(),
            self.type_product.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
    }
}

/// Scraped rows sometimes carry `"title": null`; treat it as an empty title.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Envelope returned by the backend's bulk product listing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
}

// =============================================================================
// Conversation
// =============================================================================

/// Author of a conversation message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One entry in the append-only conversation log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ConversationMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}
