//! Fixed and randomly generated demo data served by the dashboard API

pub mod models;

pub use models::*;

use chrono::{Duration, NaiveDate, Utc};

use crate::auth::models::{StoreId, UserProfile};

/// Number of days in the sales chart
pub const CHART_DAYS: u32 = 30;

pub fn daily_stats() -> DailyStats {
    DailyStats {
        revenue: 12_845_000,
        customers: 324,
        avg_check: 39_645,
        items_sold: 587,
        stores_count: 4,
        growth: 12.5,
    }
}

pub fn notifications() -> Vec<InventoryNotification> {
    let item = |id, product: &str, stock, min_stock, status, store: &str| InventoryNotification {
        id,
        product: product.to_string(),
        stock,
        min_stock,
        status,
        store: store.to_string(),
    };

    vec![
        item(1, "Prostokvashino milk 1L", 8, 25, StockStatus::Low, "Tashkent Central"),
        item(2, "Borodinsky bread", 15, 30, StockStatus::Medium, "Tashkent Central"),
        item(3, "Mineral water 1.5L", 42, 20, StockStatus::Normal, "Tashkent Central"),
        item(4, "Sugar 1kg", 12, 25, StockStatus::Low, "Samarkand Trade"),
    ]
}

/// Random sales for the `days` days ending on `today`, oldest first
pub fn sales_chart(today: NaiveDate, days: u32) -> Vec<SalesPoint> {
    (0..days)
        .rev()
        .map(|offset| SalesPoint {
            date: (today - Duration::days(i64::from(offset)))
                .format("%Y-%m-%d")
                .to_string(),
            sales: rand::random_range(700_000..1_000_000),
            transactions: rand::random_range(100..150),
        })
        .collect()
}

/// Totals and best day of a chart, `None` when it is empty
pub fn summarize_sales(points: &[SalesPoint]) -> Option<SalesSummary> {
    let best_day = points.iter().max_by_key(|point| point.sales)?.clone();
    Some(SalesSummary {
        days: points.len(),
        total_sales: points.iter().map(|point| point.sales).sum(),
        total_transactions: points.iter().map(|point| u64::from(point.transactions)).sum(),
        best_day,
    })
}

/// Sales chart ending today
pub fn current_sales_chart() -> Vec<SalesPoint> {
    sales_chart(Utc::now().date_naive(), CHART_DAYS)
}

pub fn stores() -> Vec<Store> {
    let store = |id, name: &str, city: &str, revenue, customers, rating| Store {
        id,
        name: name.to_string(),
        city: city.to_string(),
        revenue,
        customers,
        rating,
    };

    vec![
        store(1, "Tashkent Central", "Tashkent", 12_845_000, 324, 4.8),
        store(2, "Samarkand Trade", "Samarkand", 9_850_000, 245, 4.6),
        store(3, "Bukhara Old Town", "Bukhara", 7_450_000, 198, 4.7),
        store(4, "Namangan North", "Namangan", 6_210_000, 167, 4.5),
    ]
}

pub fn products() -> Vec<Product> {
    let product =
        |id, name: &str, sku: &str, category: &str, price, stock, min_stock, status| Product {
            id,
            name: name.to_string(),
            sku: sku.to_string(),
            category: category.to_string(),
            price,
            stock,
            min_stock,
            status,
        };

    vec![
        product(1, "Prostokvashino milk 1L", "MLK-001", "Dairy", 12_000, 8, 25, StockStatus::Low),
        product(2, "Borodinsky bread", "BRD-001", "Bakery", 4_000, 15, 30, StockStatus::Medium),
        product(3, "Mineral water 1.5L", "WTR-001", "Drinks", 3_500, 42, 20, StockStatus::Normal),
        product(4, "Uzgen rice 1kg", "RIC-001", "Grocery", 11_000, 25, 15, StockStatus::Normal),
        product(5, "Sugar 1kg", "SUG-001", "Grocery", 8_000, 12, 25, StockStatus::Low),
        product(6, "Butter 180g", "BUT-001", "Dairy", 14_000, 18, 20, StockStatus::Medium),
    ]
}

/// Find a demo store by id
pub fn store_name(id: StoreId) -> Option<String> {
    stores().into_iter().find(|s| s.id == id).map(|s| s.name)
}

/// Scope line shown in the dashboard header
pub fn scope_label(profile: &UserProfile) -> String {
    match profile.store_id {
        None => "All stores".to_string(),
        Some(id) => store_name(id).unwrap_or_else(|| format!("Store #{}", id)),
    }
}

/// Record a sale. Nothing is stored; the sale is echoed back.
pub fn record_sale(req: NewSaleRequest, cashier: &str) -> SaleResponse {
    let now = Utc::now();
    SaleResponse {
        success: true,
        message: "Sale created".to_string(),
        sale: Sale {
            id: now.timestamp_millis(),
            date: now.to_rfc3339(),
            total: req.total,
            payment_method: req.payment_method.unwrap_or_else(|| "cash".to_string()),
            products: req.products,
            status: "completed".to_string(),
            cashier: cashier.to_string(),
        },
    }
}
