//! Plain-text rendering for the one-shot commands.

use deals_core::{CatalogStats, TopDeal};

pub fn render_stats(stats: &CatalogStats, currency: &str) -> String {
    let mut lines = vec![
        format!("Products:     {}", stats.total_products),
        format!("Avg price:    {:.0} {}", stats.avg_price, currency),
        format!("Avg discount: {:.1}%", stats.avg_discount),
        format!("Brands:       {}", stats.brands_count),
    ];
    if !stats.brands.is_empty() {
        lines.push(format!("Brand list:   {}", stats.brands.join(", ")));
    }
    if !stats.categories.is_empty() {
        lines.push(format!("Categories:   {}", stats.categories.join(", ")));
    }
    if !stats.types.is_empty() {
        lines.push(format!("Types:        {}", stats.types.join(", ")));
    }
    lines.join("\n")
}

pub fn render_top_deals(deals: &[TopDeal], currency: &str) -> String {
    if deals.is_empty() {
        return "No deals available.".to_string();
    }

    deals
        .iter()
        .enumerate()
        .map(|(i, deal)| {
            let p = &deal.product;
            let price = p
                .price_numeric
                .map(|v| format!("{:.0} {}", v, currency))
                .unwrap_or_else(|| "N/A".to_string());
            format!(
                "{}. {} | {} | {:.0}% off | score {:.1}",
                i + 1,
                p.title,
                price,
                p.discount_or_zero(),
                deal.deal_score
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
