//! Response formatting for ranked products.
//!
//! Renders the engine's output as a numbered, human-readable reply without
//! any model in the loop.

use deals_core::types::Product;

/// Reply used whenever nothing matched.
pub const NO_RESULTS_MESSAGE: &str = "Sorry, I couldn't find any products matching your request. \
Try broader terms or a higher price range.";

/// Closing line appended after a non-empty result list.
pub const TIP_MESSAGE: &str = "Tip: add a price range like \"under 3000\", or words like \
\"cheap\", \"discount\" or \"best\" to refine the results.";

const DEFAULT_CURRENCY: &str = "Dhs";
const MISSING: &str = "N/A";
const UNKNOWN_BRAND: &str = "Unknown";

// =============================================================================
// ResponseFormatter
// =============================================================================

/// Formats ranked products into a chat reply.
#[derive(Debug, Clone)]
pub struct ResponseFormatter {
    /// Suffix shown after every price.
    pub currency: String,
}

impl Default for ResponseFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY)
    }
}

impl ResponseFormatter {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    /// Render `results` in engine order. The utterance does not affect the text.
    pub fn format(&self, _utterance: &str, results: &[Product]) -> String {
        if results.is_empty() {
            return NO_RESULTS_MESSAGE.to_string();
        }

        let mut blocks = vec![format!("Found {} products for you:", results.len())];
        for (i, product) in results.iter().enumerate() {
            blocks.push(self.product_block(i + 1, product));
        }
        blocks.push(TIP_MESSAGE.to_string());
        blocks.join("\n\n")
    }

    fn product_block(&self, rank: usize, product: &Product) -> String {
        let mut price_line = format!("   Price: {}", self.price_label(product.price_numeric));
        if let Some(discount) = discount_label(product.discount_percentage) {
            price_line.push(' ');
            price_line.push_str(&discount);
        }

        let brand = product.brand.as_deref().unwrap_or(UNKNOWN_BRAND);
        let category = product.category.as_deref().unwrap_or(MISSING);

        format!(
            "{}. **{}**\n{}\n   Brand: {} | Category: {}",
            rank, product.title, price_line, brand, category
        )
    }

    fn price_label(&self, price: Option<f64>) -> String {
        match price {
            // Half away from zero, same as the discount annotation.
            Some(p) => format!("{:.0} {}", p.round(), self.currency),
            None => MISSING.to_string(),
        }
    }
}

/// `"(R% off!)"` for a non-zero discount, rounded to the nearest integer.
fn discount_label(discount: Option<f64>) -> Option<String> {
    match discount {
        Some(d) if d != 0.0 && !d.is_nan() => Some(format!("({}% off!)", d.round() as i64)),
        _ => None,
    }
}

/// Format with the default currency.
pub fn format_response(utterance: &str, results: &[Product]) -> String {
    ResponseFormatter::default().format(utterance, results)
}

// =============================================================================
// Tests
// =============================================================================
