//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::auth::UserProfile;
use crate::demo::{
    self, DailyStats, InventoryNotification, Product, SalesPoint, StockStatus, Store,
};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Group digits in thousands, e.g. 12845000 -> "12 845 000"
pub fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

/// Print the dashboard header for a profile
pub fn print_profile(profile: &UserProfile) {
    println!("{} {}", profile.avatar, profile.name.bold());
    println!("  {} {}", "Email:".bold(), profile.email);
    println!("  {} {}", "Role:".bold(), profile.role.label());
    println!("  {} {}", "Scope:".bold(), demo::scope_label(profile));
}

/// Print the headline numbers
pub fn print_stats(stats: &DailyStats) {
    println!();
    println!("{}", "Today".bold().underline());
    println!("  {} {} UZS", "Revenue:".bold(), format_amount(stats.revenue));
    println!("  {} {}", "Customers:".bold(), stats.customers);
    println!("  {} {} UZS", "Average check:".bold(), format_amount(stats.avg_check));
    println!("  {} {}", "Items sold:".bold(), stats.items_sold);
}

fn status_color(status: StockStatus) -> Color {
    match status {
        StockStatus::Low => Color::Red,
        StockStatus::Medium => Color::Yellow,
        StockStatus::Normal => Color::Green,
    }
}

/// Print a table of stock notifications
pub fn print_notifications(items: &[InventoryNotification]) {
    if items.is_empty() {
        info("No stock notifications");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Product").fg(Color::Cyan),
            Cell::new("Store").fg(Color::Cyan),
            Cell::new("Stock").fg(Color::Cyan),
            Cell::new("Min").fg(Color::Cyan),
            Cell::new("Status").fg(Color::Cyan),
        ]);

    for item in items {
        table.add_row(vec![
            Cell::new(&item.product),
            Cell::new(&item.store),
            Cell::new(item.stock),
            Cell::new(item.min_stock),
            Cell::new(item.status.label()).fg(status_color(item.status)),
        ]);
    }

    println!("{table}");
}

/// Print totals and the best day of the sales chart
pub fn print_sales_summary(chart: &[SalesPoint]) {
    let Some(summary) = demo::summarize_sales(chart) else {
        info("No sales data");
        return;
    };

    println!("{}", format!("Sales, last {} days", summary.days).bold().underline());
    println!("  {} {} UZS", "Total:".bold(), format_amount(summary.total_sales));
    println!("  {} {}", "Transactions:".bold(), summary.total_transactions);
    println!(
        "  {} {} ({} UZS)",
        "Best day:".bold(),
        summary.best_day.date,
        format_amount(summary.best_day.sales)
    );
}

/// Print a table of products
pub fn print_products(products: &[Product]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Product").fg(Color::Cyan),
            Cell::new("SKU").fg(Color::Cyan),
            Cell::new("Category").fg(Color::Cyan),
            Cell::new("Price (UZS)").fg(Color::Cyan),
            Cell::new("Stock / Min").fg(Color::Cyan),
            Cell::new("Status").fg(Color::Cyan),
        ]);

    for product in products {
        table.add_row(vec![
            Cell::new(&product.name),
            Cell::new(&product.sku),
            Cell::new(&product.category),
            Cell::new(format_amount(product.price)),
            Cell::new(format!("{} / {}", product.stock, product.min_stock)),
            Cell::new(product.status.label()).fg(status_color(product.status)),
        ]);
    }

    println!("{table}");
}

/// Print a table of stores
pub fn print_stores(stores: &[Store]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Store").fg(Color::Cyan),
            Cell::new("City").fg(Color::Cyan),
            Cell::new("Revenue (UZS)").fg(Color::Cyan),
            Cell::new("Customers").fg(Color::Cyan),
            Cell::new("Rating").fg(Color::Cyan),
        ]);

    for store in stores {
        table.add_row(vec![
            Cell::new(&store.name),
            Cell::new(&store.city),
            Cell::new(format_amount(store.revenue)),
            Cell::new(store.customers),
            Cell::new(format!("{:.1}/5", store.rating)),
        ]);
    }

    println!("{table}");
}
