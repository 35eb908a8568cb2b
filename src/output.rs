use crate::types::{Dashboard, KpiCardRow};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

pub const CATEGORY_FILE: &str = "revenue_by_category.csv";
pub const DAILY_FILE: &str = "revenue_by_day.csv";
pub const CITY_FILE: &str = "revenue_by_city.csv";
pub const PAYMENT_FILE: &str = "orders_by_payment_method.csv";
pub const DASHBOARD_FILE: &str = "dashboard.json";

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Write every series as CSV plus the whole dashboard as JSON.
///
/// Returns the paths written, in order.
pub fn export_dashboard(dir: &Path, dashboard: &Dashboard) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    let groups = &dashboard.groups;

    let category = dir.join(CATEGORY_FILE);
    write_csv(&category, &groups.revenue_by_category)?;
    let daily = dir.join(DAILY_FILE);
    write_csv(&daily, &groups.revenue_by_day)?;
    let city = dir.join(CITY_FILE);
    write_csv(&city, &groups.revenue_by_city)?;
    let payment = dir.join(PAYMENT_FILE);
    write_csv(&payment, &groups.orders_by_payment_method)?;
    let json = dir.join(DASHBOARD_FILE);
    write_json(&json, dashboard)?;

    Ok(vec![category, daily, city, payment, json])
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().cloned().take(max_rows).collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

pub fn kpi_cards(dashboard: &Dashboard) -> Vec<KpiCardRow> {
    let d = &dashboard.display;
    vec![
        KpiCardRow { metric: "Total Net Revenue", value: d.revenue.clone() },
        KpiCardRow { metric: "Total Orders", value: d.orders.clone() },
        KpiCardRow { metric: "Avg. Order Value", value: d.average_order_value.clone() },
        KpiCardRow { metric: "Customers", value: d.customers.clone() },
    ]
}

/// Print KPI cards and a preview of each chart series.
pub fn print_dashboard(dashboard: &Dashboard, max_rows: usize) {
    let groups = &dashboard.groups;

    println!("Sales Dashboard\n");
    preview_table_rows(&kpi_cards(dashboard), 4);

    println!("Revenue Trend (Daily)");
    preview_table_rows(&groups.revenue_by_day, max_rows);

    println!("Revenue by Category");
    preview_table_rows(&groups.revenue_by_category, max_rows);

    println!("Top Cities by Revenue");
    preview_table_rows(&groups.revenue_by_city, max_rows);

    println!("Payment Method Distribution");
    preview_table_rows(&groups.orders_by_payment_method, max_rows);
}
