//! Demo dashboard data types

use serde::{Deserialize, Serialize};

use crate::auth::models::StoreId;

/// Stock level relative to the minimum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Low,
    Medium,
    Normal,
}

impl StockStatus {
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::Low => "Low stock",
            StockStatus::Medium => "Medium stock",
            StockStatus::Normal => "In stock",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStats {
    pub revenue: u64,
    pub customers: u32,
    pub avg_check: u64,
    pub items_sold: u32,
    pub stores_count: u32,
    pub growth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryNotification {
    pub id: u32,
    pub product: String,
    pub stock: u32,
    pub min_stock: u32,
    pub status: StockStatus,
    pub store: String,
}

/// Totals over a sales chart
#[derive(Debug, Clone, PartialEq)]
pub struct SalesSummary {
    pub days: usize,
    pub total_sales: u64,
    pub total_transactions: u64,
    pub best_day: SalesPoint,
}

/// One day of the sales chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesPoint {
    /// YYYY-MM-DD
    pub date: String,
    pub sales: u64,
    pub transactions: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    pub city: String,
    pub revenue: u64,
    pub customers: u32,
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub sku: String,
    pub category: String,
    pub price: u64,
    pub stock: u32,
    pub min_stock: u32,
    pub status: StockStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSaleRequest {
    #[serde(default)]
    pub products: serde_json::Value,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub payment_method: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: i64,
    pub date: String,
    pub total: Option<f64>,
    pub payment_method: String,
    pub products: serde_json::Value,
    pub status: String,
    /// Email of the authenticated user who recorded the sale
    pub cashier: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleResponse {
    pub success: bool,
    pub message: String,
    pub sale: Sale,
}
