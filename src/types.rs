use crate::util::{format_currency, format_int};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Columns every source must carry, in export order.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "order_id",
    "order_date",
    "product_category",
    "customer_city",
    "payment_method",
    "price",
    "quantity",
    "discount_applied",
];

#[derive(Debug, Deserialize)]
pub struct RawRow {
    pub order_id: Option<String>,
    pub order_date: Option<String>,
    pub product_category: Option<String>,
    pub customer_city: Option<String>,
    pub payment_method: Option<String>,
    pub price: Option<String>,
    pub quantity: Option<String>,
    pub discount_applied: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub order_id: String,
    pub order_date: NaiveDate,
    pub product_category: String,
    pub customer_city: String,
    pub payment_method: String,
    pub price: f64,
    pub quantity: u32,
    pub discount_fraction: f64,
}

impl SalesRecord {
    pub fn gross_amount(&self) -> f64 {
        self.price * self.quantity as f64
    }

    pub fn net_revenue(&self) -> f64 {
        self.gross_amount() * (1.0 - self.discount_fraction)
    }

    pub fn date_key(&self) -> String {
        self.order_date.format("%Y-%m-%d").to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KpiSummary {
    pub total_revenue: f64,
    pub total_orders: usize,
    /// Record count, not distinct customers.
    pub active_customers: usize,
    pub average_order_value: f64,
}

/// Card-ready strings for the four KPIs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiDisplay {
    pub revenue: String,
    pub orders: String,
    pub average_order_value: String,
    pub customers: String,
}

impl KpiSummary {
    pub fn display(&self) -> KpiDisplay {
        KpiDisplay {
            revenue: format_currency(self.total_revenue),
            orders: format_int(self.total_orders),
            average_order_value: format_currency(self.average_order_value),
            customers: format_int(self.active_customers),
        }
    }
}

fn display_rupiah(v: &f64) -> String {
    format_currency(*v)
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct CategoryRevenue {
    #[tabled(rename = "Category")]
    pub product_category: String,
    #[tabled(rename = "NetRevenue", display_with = "display_rupiah")]
    pub net_revenue: f64,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct DailyRevenue {
    #[serde(rename = "date_str")]
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "NetRevenue", display_with = "display_rupiah")]
    pub net_revenue: f64,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct CityRevenue {
    #[tabled(rename = "City")]
    pub customer_city: String,
    #[tabled(rename = "NetRevenue", display_with = "display_rupiah")]
    pub net_revenue: f64,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct PaymentShare {
    #[tabled(rename = "PaymentMethod")]
    pub name: String,
    #[tabled(rename = "Orders")]
    pub value: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupedSummaries {
    pub revenue_by_category: Vec<CategoryRevenue>,
    pub revenue_by_day: Vec<DailyRevenue>,
    pub revenue_by_city: Vec<CityRevenue>,
    pub orders_by_payment_method: Vec<PaymentShare>,
}

/// One complete load: KPIs and chart series from the same record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub kpis: KpiSummary,
    pub display: KpiDisplay,
    pub groups: GroupedSummaries,
}

#[derive(Debug, Tabled, Clone)]
pub struct KpiCardRow {
    #[tabled(rename = "Metric")]
    pub metric: &'static str,
    #[tabled(rename = "Value")]
    pub value: String,
}
