//! Demo command: the receipt pipeline against scripted backend responses

use anyhow::{Context, Result};
use divvy_core::backend::DEMO_RULES;
use divvy_core::split::{allocated_total, bill_total};
use divvy_core::{process_bill, MockBackend, SplitBackend, SplitConfig};

use super::format_allocations;

/// Placeholder image bytes; the mock backend never looks at them
const DEMO_IMAGE: &[u8] = b"demo receipt";

pub async fn cmd_demo(json: bool, config: &SplitConfig) -> Result<()> {
    let backend = MockBackend::demo();

    let result = process_bill(&backend, DEMO_IMAGE, "image/png", DEMO_RULES, config)
        .await
        .context("Demo pipeline failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("🧾 Demo receipt ({} backend)", backend.name());
    println!();
    for item in &result.items {
        let total = item.total_price.unwrap_or(0.0);
        match (item.unit_price, item.quantity) {
            (Some(unit), Some(qty)) => println!(
                "   {:<20} {:>3} x {:>8.2} + tax {:>6.2} = {:>8.2}",
                item.name, qty, unit, item.tax, total
            ),
            _ => println!("   {:<20} {:>35.2}", item.name, total),
        }
    }
    println!();
    println!("Rules:");
    for line in DEMO_RULES.lines() {
        println!("   {}", line);
    }
    println!();
    print!(
        "{}",
        format_allocations(&result.allocations, config.display_threshold)
    );
    println!();
    println!(
        "Bill total: {:.3}  Allocated: {:.3}",
        bill_total(&result.items),
        allocated_total(&result.allocations)
    );

    Ok(())
}
