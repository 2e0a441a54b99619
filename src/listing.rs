//! Renders catalog lookups and listings as styled terminal tables.

use crate::catalog::{CatalogItem, Category};
use crate::currency::{self, Currency};
use crate::provider::CatalogProvider;
use crate::ui;
use anyhow::Result;
use comfy_table::Cell;

/// Prices are stored in the base currency; convert for display.
fn display_price(amount: f64, display: Currency, locale: &str) -> String {
    currency::format(currency::convert(amount, Currency::Mad, display), display, locale)
}

pub fn item_detail_table(item: &CatalogItem, display: Currency, locale: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Field"), ui::header_cell("Value")]);

    table.add_row(vec![Cell::new("ID"), Cell::new(&item.id)]);
    table.add_row(vec![Cell::new("Name"), Cell::new(&item.name)]);
    table.add_row(vec![
        Cell::new("Price"),
        ui::amount_cell(&display_price(item.new_price, display, locale)),
    ]);
    if item.old_price > 0.0 {
        table.add_row(vec![
            Cell::new("Old price"),
            ui::amount_cell(&display_price(item.old_price, display, locale)),
        ]);
    }

    let specs = [
        ("RAM", &item.ram),
        ("Storage", &item.storage),
        ("Screen", &item.screen),
        ("Graphics", &item.graphics),
        ("Processor", &item.processor),
        ("OS", &item.os),
        ("Promo code", &item.promo_code),
        ("Category", &item.category_id),
    ];
    for (label, value) in specs {
        if let Some(value) = value {
            table.add_row(vec![Cell::new(label), Cell::new(value)]);
        }
    }
    if !item.images.is_empty() {
        table.add_row(vec![
            Cell::new("Images"),
            Cell::new(item.images.len().to_string()),
        ]);
    }

    table.to_string()
}

pub fn items_table(
    items: &[CatalogItem],
    categories: Option<&[Category]>,
    display: Currency,
    locale: &str,
) -> String {
    let mut table = ui::new_styled_table();
    let mut header = vec![
        ui::header_cell("ID"),
        ui::header_cell("Name"),
        ui::header_cell(&format!("Price ({display})")),
        ui::header_cell("Old price"),
    ];
    if categories.is_some() {
        header.push(ui::header_cell("Category"));
    }
    table.set_header(header);

    for item in items {
        let old_price = if item.old_price > 0.0 {
            ui::amount_cell(&display_price(item.old_price, display, locale))
        } else {
            ui::na_cell()
        };
        let mut row = vec![
            Cell::new(&item.id),
            Cell::new(&item.name),
            ui::amount_cell(&display_price(item.new_price, display, locale)),
            old_price,
        ];
        if let Some(categories) = categories {
            let name = item.category_id.as_ref().and_then(|id| {
                categories
                    .iter()
                    .find(|c| &c.id == id)
                    .map(|c| c.name.as_str())
            });
            row.push(name.map_or_else(ui::na_cell, Cell::new));
        }
        table.add_row(row);
    }

    table.to_string()
}

pub fn categories_table(categories: &[Category]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("ID"),
        ui::header_cell("Slug"),
        ui::header_cell("Name"),
    ]);
    for category in categories {
        table.add_row(vec![
            Cell::new(&category.id),
            category.slug.as_deref().map_or_else(ui::na_cell, Cell::new),
            Cell::new(&category.name),
        ]);
    }
    table.to_string()
}

pub async fn show_item(
    provider: &dyn CatalogProvider,
    id: &str,
    display: Currency,
    locale: &str,
) -> Result<()> {
    let spinner = ui::new_spinner("Resolving catalog item...");
    let outcome = provider.resolve(id).await;
    spinner.finish_and_clear();

    match outcome? {
        Some(item) => {
            println!(
                "{}\n\n{}",
                ui::style_text(&item.name, ui::StyleType::Title),
                item_detail_table(&item, display, locale)
            );
        }
        None => {
            println!(
                "{}",
                ui::style_text(&format!("No catalog item found for '{id}'"), ui::StyleType::Subtle)
            );
        }
    }
    Ok(())
}

pub async fn list_products(
    provider: &dyn CatalogProvider,
    display: Currency,
    locale: &str,
) -> Result<()> {
    let spinner = ui::new_spinner("Fetching products...");
    let products = provider.fetch_products().await;
    spinner.finish_and_clear();

    println!(
        "{} ({})\n\n{}",
        ui::style_text("Products", ui::StyleType::Title),
        products.len(),
        items_table(&products, None, display, locale)
    );
    Ok(())
}

pub async fn list_accessories(
    provider: &dyn CatalogProvider,
    display: Currency,
    locale: &str,
) -> Result<()> {
    let spinner = ui::new_spinner("Fetching accessories...");
    // Categories are fetched alongside so rows can show category names.
    let (accessories, categories) =
        futures::join!(provider.fetch_accessories(), provider.fetch_categories());
    spinner.finish_and_clear();

    println!(
        "{} ({})\n\n{}",
        ui::style_text("Accessories", ui::StyleType::Title),
        accessories.len(),
        items_table(&accessories, Some(&categories), display, locale)
    );
    Ok(())
}

pub async fn list_categories(provider: &dyn CatalogProvider) -> Result<()> {
    let spinner = ui::new_spinner("Fetching categories...");
    let categories = provider.fetch_categories().await;
    spinner.finish_and_clear();

    println!(
        "{} ({})\n\n{}",
        ui::style_text("Categories", ui::StyleType::Title),
        categories.len(),
        categories_table(&categories)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Normalized, normalize_item};
    use crate::provider::ResolveError;
    use async_trait::async_trait;
    use serde_json::json;

    fn item(raw: serde_json::Value) -> CatalogItem {
        match normalize_item(&raw) {
            Normalized::Valid(item) => item,
            Normalized::Invalid(reason) => panic!("invalid test item: {reason}"),
        }
    }

    struct StaticProvider {
        accessories: Vec<CatalogItem>,
        categories: Vec<Category>,
    }

    #[async_trait]
    impl CatalogProvider for StaticProvider {
        async fn resolve(&self, id: &str) -> Result<Option<CatalogItem>, ResolveError> {
            Ok(self.accessories.iter().find(|i| i.id == id).cloned())
        }
        async fn fetch_products(&self) -> Vec<CatalogItem> {
            Vec::new()
        }
        async fn fetch_accessories(&self) -> Vec<CatalogItem> {
            self.accessories.clone()
        }
        async fn fetch_categories(&self) -> Vec<Category> {
            self.categories.clone()
        }
        async fn clear_cache(&self, _id: Option<&str>) {}
    }

    #[test]
    fn test_items_table_converts_prices() {
        let items = vec![item(json!({
            "id": "p-1",
            "name": "Zenbook",
            "newPrice": 1085.0,
        }))];
        let table = items_table(&items, None, Currency::Eur, "en");
        // 1085 MAD = 100 EUR at the fixed rate.
        assert!(table.contains("€100"));
        assert!(table.contains("Zenbook"));
        assert!(table.contains("N/A"));
    }

    #[test]
    fn test_items_table_joins_category_names() {
        let items = vec![item(json!({
            "id": "a-1",
            "name": "Hub",
            "newPrice": 100,
            "categoryId": "c-3",
        }))];
        let categories = vec![Category {
            id: "c-3".to_string(),
            slug: None,
            name: "Connectivity".to_string(),
        }];
        let table = items_table(&items, Some(&categories), Currency::Mad, "en");
        assert!(table.contains("Connectivity"));
    }

    #[test]
    fn test_item_detail_skips_absent_fields() {
        let table = item_detail_table(
            &item(json!({ "id": "p-1", "name": "Mouse", "newPrice": 249, "ram": "8GB" })),
            Currency::Mad,
            "en",
        );
        assert!(table.contains("RAM"));
        assert!(!table.contains("Storage"));
        assert!(!table.contains("Old price"));
        assert!(table.contains("249 DH"));
    }

    #[tokio::test]
    async fn test_listing_through_provider_trait() {
        let provider = StaticProvider {
            accessories: vec![item(json!({ "id": "a-1", "name": "Hub", "newPrice": 100 }))],
            categories: Vec::new(),
        };
        list_accessories(&provider, Currency::Mad, "en").await.unwrap();
        show_item(&provider, "a-1", Currency::Mad, "en").await.unwrap();
        show_item(&provider, "missing", Currency::Mad, "en")
            .await
            .unwrap();
    }
}
