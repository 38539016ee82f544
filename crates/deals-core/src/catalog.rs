//! Catalogue analytics: summary statistics and deal scoring.
//!
//! Both operate on a borrowed corpus and never modify it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::Product;

/// Brands that earn the trust bonus in [`deal_score`].
pub const TRUSTED_BRANDS: &[&str] = &[
    "samsung", "xiaomi", "apple", "lg", "sony", "dell", "hp", "lenovo", "huawei", "asus",
];

const DISCOUNT_WEIGHT: f64 = 0.4;
const PRICE_WEIGHT: f64 = 0.3;
const BRAND_WEIGHT: f64 = 0.3;
/// Scales `1 / price` into the same range as a discount percentage.
const PRICE_SCALE: f64 = 10_000.0;

// =============================================================================
// Stats
// =============================================================================

/// Summary figures for a product corpus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total_products: usize,
    /// Mean over products that have a price; `0.0` when none do.
    pub avg_price: f64,
    /// Mean over products that have a discount; `0.0` when none do.
    pub avg_discount: f64,
    pub brands_count: usize,
    pub categories: Vec<String>,
    pub types: Vec<String>,
    pub brands: Vec<String>,
}

impl CatalogStats {
    pub fn from_products(products: &[Product]) -> Self {
        let brands = distinct(products.iter().map(|p| p.brand.as_deref()));
        Self {
            total_products: products.len(),
            avg_price: mean(products.iter().filter_map(|p| p.price_numeric)),
            avg_discount: mean(products.iter().filter_map(|p| p.discount_percentage)),
            brands_count: brands.len(),
            categories: distinct(products.iter().map(|p| p.category.as_deref())),
            types: distinct(products.iter().map(|p| p.type_product.as_deref())),
            brands,
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn distinct<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    values
        .flatten()
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// =============================================================================
// Deal scoring
// =============================================================================

/// Score a product as a deal: discount, cheapness and brand trust blended.
///
/// Products without a positive price get no cheapness credit.
pub fn deal_score(product: &Product) -> f64 {
    let inverse_price = match product.price_numeric {
        Some(p) if p > 0.0 => 1.0 / p,
        _ => 0.0,
    };
    let trusted = product
        .brand
        .as_deref()
        .map(|b| TRUSTED_BRANDS.contains(&b.to_lowercase().as_str()))
        .unwrap_or(false);

    product.discount_or_zero() * DISCOUNT_WEIGHT
        + inverse_price * PRICE_SCALE * PRICE_WEIGHT
        + if trusted { BRAND_WEIGHT } else { 0.0 }
}

/// A product paired with its deal score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopDeal {
    pub product: Product,
    pub deal_score: f64,
}

/// Return the `limit` best deals, highest score first.
///
/// Equal scores keep their corpus order.
pub fn top_deals(products: &[Product], limit: usize) -> Vec<TopDeal> {
    let mut scored: Vec<TopDeal> = products
        .iter()
        .map(|p| TopDeal {
            deal_score: deal_score(p),
            product: p.clone(),
        })
        .collect();
    scored.sort_by(|a, b| b.deal_score.total_cmp(&a.deal_score));
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<Product> {
        vec![
            Product::new("Galaxy A14")
                .with_brand("Samsung")
                .with_category("Phones")
                .with_type("smartphone")
                .with_price(2000.0)
                .with_discount(10.0),
            Product::new("Noname Buds")
                .with_brand("Generic")
                .with_category("Audio")
                .with_type("earpods")
                .with_price(100.0)
                .with_discount(50.0),
            Product::new("Mystery box"),
        ]
    }

    #[test]
    fn test_stats_basic() {
        let stats = CatalogStats::from_products(&corpus());
        assert_eq!(stats.total_products, 3);
        assert_eq!(stats.avg_price, 1050.0);
        assert_eq!(stats.avg_discount, 30.0);
        assert_eq!(stats.brands_count, 2);
        assert_eq!(stats.brands, vec!["Generic", "Samsung"]);
        assert_eq!(stats.categories, vec!["Audio", "Phones"]);
        assert_eq!(stats.types, vec!["earpods", "smartphone"]);
    }

    #[test]
    fn test_stats_empty_corpus() {
        let stats = CatalogStats::from_products(&[]);
        assert_eq!(stats, CatalogStats::default());
    }

    #[test]
    fn test_stats_dedupes_values() {
        let products = vec![
            Product::new("A").with_brand("LG"),
            Product::new("B").with_brand("LG"),
        ];
        let stats = CatalogStats::from_products(&products);
        assert_eq!(stats.brands_count, 1);
        assert_eq!(stats.avg_price, 0.0);
    }

    #[test]
    fn test_deal_score_components() {
        let p = Product::new("TV").with_brand("SONY").with_price(1000.0).with_discount(20.0);
        // 20*0.4 + (1/1000)*10000*0.3 + 0.3
        let expected = 8.0 + 3.0 + 0.3;
        assert!((deal_score(&p) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_deal_score_missing_or_zero_price() {
        let missing = Product::new("A").with_discount(10.0);
        let zero = Product::new("B").with_discount(10.0).with_price(0.0);
        assert!((deal_score(&missing) - 4.0).abs() < 1e-9);
        assert!((deal_score(&zero) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_top_deals_order_and_limit() {
        let deals = top_deals(&corpus(), 2);
        assert_eq!(deals.len(), 2);
        assert_eq!(deals[0].product.title, "Noname Buds");
        assert_eq!(deals[1].product.title, "Galaxy A14");
        assert!(deals[0].deal_score >= deals[1].deal_score);
    }

    #[test]
    fn test_top_deals_ties_keep_corpus_order() {
        let products = vec![Product::new("first"), Product::new("second")];
        let deals = top_deals(&products, 5);
        assert_eq!(deals[0].product.title, "first");
        assert_eq!(deals[1].product.title, "second");
    }
}
