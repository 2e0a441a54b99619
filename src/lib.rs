pub mod cache;
pub mod catalog;
pub mod config;
pub mod currency;
pub mod listing;
pub mod log;
pub mod provider;
pub mod providers;
pub mod ui;

use crate::currency::Currency;
use crate::providers::HttpCatalogClient;
use anyhow::{Context, Result};
use std::str::FromStr;
use tracing::{debug, info};

pub enum AppCommand {
    Show { id: String },
    Products,
    Accessories,
    Categories,
    Convert { amount: f64, from: String, to: String },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("souk starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    // Conversion is pure; no client or network involved.
    if let AppCommand::Convert { amount, from, to } = &command {
        let from = Currency::from_str(from)?;
        let to = Currency::from_str(to)?;
        let converted = currency::convert(*amount, from, to);
        println!(
            "{} = {}",
            currency::format(*amount, from, &config.locale),
            ui::style_text(
                &currency::format(converted, to, &config.locale),
                ui::StyleType::Value
            )
        );
        return Ok(());
    }

    let display = Currency::from_str(&config.currency)
        .with_context(|| format!("Unsupported display currency: {}", config.currency))?;
    let client = HttpCatalogClient::new(&config.api.base_url)?;

    match command {
        AppCommand::Show { id } => {
            listing::show_item(&client, &id, display, &config.locale).await
        }
        AppCommand::Products => listing::list_products(&client, display, &config.locale).await,
        AppCommand::Accessories => {
            listing::list_accessories(&client, display, &config.locale).await
        }
        AppCommand::Categories => listing::list_categories(&client).await,
        AppCommand::Convert { .. } => unreachable!("Convert is handled above"),
    }
}
