// Demo walkthrough: catalog → cart → purchase → statistics → export.
// Run with `cargo run`. Pass `rates` as the first argument to also hit the
// live exchange-rate endpoint.

use anyhow::Result;
use chrono::Utc;
use std::env;

use grocery_ledger::{
    export, format_amount, CurrencyConverter, GrocerySession, POPULAR_CURRENCIES,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("grocery_ledger=info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let with_rates = args.len() > 1 && args[1] == "rates";

    let mut session = GrocerySession::with_default_catalog();
    println!("🛒 Grocery Ledger demo");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Catalog loaded: {} items", session.catalog.len());

    // Fill a cart
    session.add_to_cart("Basmati Rice (5kg)", 2)?;
    session.add_to_cart("Fresh Milk (1L)", 1)?;
    session.add_to_cart("Bananas (1kg)", 3)?;
    session.add_to_cart("Shampoo (400ml)", 1)?;

    println!("\n🛍️ Cart ({} lines, {} pcs):", session.cart.line_count(), session.cart.total_quantity());
    for (name, line) in session.cart.iter() {
        println!(
            "  {} — {} × RM{:.2} = RM{:.2}  [{}]",
            name,
            line.quantity,
            line.unit_price,
            line.subtotal(),
            session.classifier.classify(name)
        );
    }
    println!("  Total: RM{:.2}", session.cart.total());

    // Optional currency conversion
    if with_rates {
        let mut converter = CurrencyConverter::new();
        match converter.rates() {
            Some(table) => {
                println!("\n💱 Converted totals (rates from {}):", table.fetched_at.format("%H:%M"));
                let total = session.cart.total();
                for code in POPULAR_CURRENCIES {
                    if let Some(amount) = grocery_ledger::convert(total, code, table) {
                        println!("  {}: {}", code, format_amount(amount, code));
                    }
                }
            }
            None => println!("\n⚠️ Exchange rates unavailable, showing MYR only"),
        }
    }

    // Export before completing
    let now = Utc::now();
    let text = export::render_text(&session.cart, now);
    println!("\n📄 Export preview ({}):\n{}", export::suggested_filename(now, export::ExportFormat::Text), text);

    // Complete the purchase and show statistics
    let total = session.complete_purchase()?.total;
    println!("✅ Purchase completed: RM{:.2} ({} in history)", total, session.history.len());

    session.add_to_cart("Basmati Rice (5kg)", 1)?;
    session.add_to_cart("Coffee (200g)", 2)?;
    session.complete_purchase()?;

    println!("\n📈 History:");
    println!("  Total spent: RM{:.2}", session.history.total_spent());
    println!("  Average purchase: RM{:.2}", session.history.average_purchase());

    println!("\n🥧 Spending by category:");
    for (tag, amount) in session.history.category_totals(&session.classifier) {
        println!("  {}: RM{:.2}", tag, amount);
    }

    println!("\n🥇 Most purchased items:");
    let frequency = session.history.item_frequency();
    let mut ranked: Vec<_> = frequency.iter().collect();
    ranked.sort_by(|a, b| b.1.times_purchased.cmp(&a.1.times_purchased));
    for (name, stats) in ranked.iter().take(5) {
        println!(
            "  {} — {}× purchased, {} pcs total",
            name, stats.times_purchased, stats.total_quantity
        );
    }

    // Overview of the catalog itself
    println!("\n📊 Catalog overview:");
    for (tag, summary) in session.catalog.category_overview(&session.classifier) {
        println!(
            "  {}: {} items, RM{:.2} total, RM{:.2} avg",
            tag,
            summary.item_count,
            summary.total_value,
            summary.average_price()
        );
    }

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Done");

    Ok(())
}
