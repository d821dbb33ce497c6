//! Prints the effective feed order for a menu as a customer would see it
//! right now. Handy for checking override schedules against the live clock.

use anyhow::{Context, Result};
use chrono::Utc;
use log::info;

use menupulse::{resolve_order, HttpMenuSource, MenuSource, MenuVariant};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let base_url = std::env::var("MENUPULSE_API").context("MENUPULSE_API is not set")?;
    let owner_id = std::env::var("MENUPULSE_OWNER").context("MENUPULSE_OWNER is not set")?;
    let menu_id = std::env::var("MENUPULSE_MENU").context("MENUPULSE_MENU is not set")?;

    let source = HttpMenuSource::new(&base_url)?;
    let payload = source
        .fetch_menu(&owner_id, &menu_id, MenuVariant::Control)
        .await?;
    info!(
        "fetched {} items and {} override schedules for {owner_id}/{menu_id}",
        payload.items.len(),
        payload.override_schedules.len()
    );

    let now = Utc::now().time();
    let feed = resolve_order(&payload.items, &payload.override_schedules, now);
    println!("Feed at {} UTC:", now.format("%H:%M"));
    for (position, item) in feed.iter().enumerate() {
        println!(
            "{:>3}. {}  {}  [{}]",
            position + 1,
            item.name,
            item.price,
            item.category
        );
    }
    Ok(())
}
