use crate::types::{
    CategoryRevenue, CityRevenue, DailyRevenue, Dashboard, GroupedSummaries, KpiSummary,
    PaymentShare, SalesRecord,
};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// KPIs and all four chart series, computed over one record set.
pub fn build_dashboard(data: &[SalesRecord]) -> Dashboard {
    let kpis = compute_kpis(data);
    let groups = GroupedSummaries {
        revenue_by_category: revenue_by_category(data),
        revenue_by_day: revenue_by_day(data),
        revenue_by_city: revenue_by_city(data),
        orders_by_payment_method: orders_by_payment_method(data),
    };
    Dashboard {
        display: kpis.display(),
        kpis,
        groups,
    }
}

pub fn compute_kpis(data: &[SalesRecord]) -> KpiSummary {
    let total_revenue: f64 = data.iter().map(|r| r.net_revenue()).sum();
    let orders: HashSet<&str> = data.iter().map(|r| r.order_id.as_str()).collect();
    let total_orders = orders.len();
    let average_order_value = if total_orders > 0 {
        total_revenue / total_orders as f64
    } else {
        0.0
    };
    KpiSummary {
        total_revenue,
        total_orders,
        active_customers: data.len(),
        average_order_value,
    }
}

/// Sum net revenue per key, sorted by key.
fn sum_by_key<F>(data: &[SalesRecord], key: F) -> Vec<(String, f64)>
where
    F: Fn(&SalesRecord) -> String,
{
    let mut map: HashMap<String, f64> = HashMap::new();
    for r in data {
        *map.entry(key(r)).or_insert(0.0) += r.net_revenue();
    }
    let mut rows: Vec<(String, f64)> = map.into_iter().collect();
    rows.sort_by(|a, b| a.0.cmp(&b.0));
    rows
}

pub fn revenue_by_category(data: &[SalesRecord]) -> Vec<CategoryRevenue> {
    sum_by_key(data, |r| r.product_category.clone())
        .into_iter()
        .map(|(product_category, net_revenue)| CategoryRevenue {
            product_category,
            net_revenue,
        })
        .collect()
}

/// One entry per distinct day, oldest first. `YYYY-MM-DD` keys sort
/// chronologically as plain strings.
pub fn revenue_by_day(data: &[SalesRecord]) -> Vec<DailyRevenue> {
    sum_by_key(data, |r| r.date_key())
        .into_iter()
        .map(|(date, net_revenue)| DailyRevenue { date, net_revenue })
        .collect()
}

/// Highest-revenue city first; ties keep alphabetical order.
pub fn revenue_by_city(data: &[SalesRecord]) -> Vec<CityRevenue> {
    let mut rows: Vec<CityRevenue> = sum_by_key(data, |r| r.customer_city.clone())
        .into_iter()
        .map(|(customer_city, net_revenue)| CityRevenue {
            customer_city,
            net_revenue,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.net_revenue
            .partial_cmp(&a.net_revenue)
            .unwrap_or(Ordering::Equal)
    });
    rows
}

pub fn orders_by_payment_method(data: &[SalesRecord]) -> Vec<PaymentShare> {
    let mut map: HashMap<&str, usize> = HashMap::new();
    for r in data {
        *map.entry(r.payment_method.as_str()).or_default() += 1;
    }
    let mut rows: Vec<PaymentShare> = map
        .into_iter()
        .map(|(name, value)| PaymentShare {
            name: name.to_string(),
            value,
        })
        .collect();
    rows.sort_by(|a, b| a.name.cmp(&b.name));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(
        order_id: &str,
        day: u32,
        category: &str,
        city: &str,
        payment: &str,
        price: f64,
        quantity: u32,
        discount_fraction: f64,
    ) -> SalesRecord {
        SalesRecord {
            order_id: order_id.to_string(),
            order_date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            product_category: category.to_string(),
            customer_city: city.to_string(),
            payment_method: payment.to_string(),
            price,
            quantity,
            discount_fraction,
        }
    }

    fn sample() -> Vec<SalesRecord> {
        vec![
            record("O1", 1, "Fashion", "Jakarta", "QRIS", 100.0, 2, 0.10),
            record("O2", 1, "Electronics", "Bandung", "Transfer", 50.0, 1, 0.0),
            record("O3", 2, "Fashion", "Surabaya", "QRIS", 300.0, 1, 0.25),
            record("O3", 2, "Home Living", "Surabaya", "COD", 80.0, 3, 0.0),
            record("O4", 3, "Home Living", "Medan", "QRIS", 12.5, 4, 0.05),
        ]
    }

    #[test]
    fn test_example_rows_total_revenue() {
        let data = vec![
            record("A", 1, "Fashion", "Jakarta", "QRIS", 100.0, 2, 0.10),
            record("B", 1, "Fashion", "Jakarta", "QRIS", 50.0, 1, 0.0),
        ];
        let kpis = compute_kpis(&data);
        assert!((kpis.total_revenue - 230.0).abs() < 1e-9);
        assert_eq!(kpis.total_orders, 2);
        assert!((kpis.average_order_value - 115.0).abs() < 1e-9);
    }

    #[test]
    fn test_distinct_orders_and_record_count() {
        let kpis = compute_kpis(&sample());
        assert_eq!(kpis.total_orders, 4);
        assert_eq!(kpis.active_customers, 5);
    }

    #[test]
    fn test_average_order_value_consistent() {
        let kpis = compute_kpis(&sample());
        let back = kpis.average_order_value * kpis.total_orders as f64;
        assert!((back - kpis.total_revenue).abs() < 1e-9);
    }

    #[test]
    fn test_empty_data() {
        let dashboard = build_dashboard(&[]);
        assert_eq!(dashboard.kpis, KpiSummary::default());
        assert_eq!(dashboard.kpis.average_order_value, 0.0);
        assert!(dashboard.groups.revenue_by_category.is_empty());
        assert!(dashboard.groups.revenue_by_day.is_empty());
        assert!(dashboard.groups.revenue_by_city.is_empty());
        assert!(dashboard.groups.orders_by_payment_method.is_empty());
        assert_eq!(dashboard.display.revenue, "Rp 0");
    }

    #[test]
    fn test_category_sum_matches_total_revenue() {
        let data = sample();
        let dashboard = build_dashboard(&data);
        let sum: f64 = dashboard
            .groups
            .revenue_by_category
            .iter()
            .map(|c| c.net_revenue)
            .sum();
        assert!((sum - dashboard.kpis.total_revenue).abs() < 1e-9);

        let names: Vec<&str> = dashboard
            .groups
            .revenue_by_category
            .iter()
            .map(|c| c.product_category.as_str())
            .collect();
        assert_eq!(names, vec!["Electronics", "Fashion", "Home Living"]);
    }

    #[test]
    fn test_payment_counts_match_record_count() {
        let dashboard = build_dashboard(&sample());
        let total: usize = dashboard
            .groups
            .orders_by_payment_method
            .iter()
            .map(|p| p.value)
            .sum();
        assert_eq!(total, dashboard.kpis.active_customers);
        assert_eq!(
            dashboard.groups.orders_by_payment_method,
            vec![
                PaymentShare { name: "COD".into(), value: 1 },
                PaymentShare { name: "QRIS".into(), value: 3 },
                PaymentShare { name: "Transfer".into(), value: 1 },
            ]
        );
    }

    #[test]
    fn test_revenue_by_day_one_entry_per_day() {
        let days = revenue_by_day(&sample());
        let keys: Vec<&str> = days.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(keys, vec!["2024-05-01", "2024-05-02", "2024-05-03"]);
        assert!((days[0].net_revenue - 230.0).abs() < 1e-9);
        assert!((days[1].net_revenue - 465.0).abs() < 1e-9);
        assert!((days[2].net_revenue - 47.5).abs() < 1e-9);
    }

    #[test]
    fn test_revenue_by_city_sorted_descending() {
        let cities = revenue_by_city(&sample());
        for pair in cities.windows(2) {
            assert!(pair[0].net_revenue >= pair[1].net_revenue);
        }
        assert_eq!(cities[0].customer_city, "Surabaya");
        assert_eq!(cities.last().unwrap().customer_city, "Medan");
    }

    #[test]
    fn test_revenue_by_city_ties_are_alphabetical() {
        let data = vec![
            record("1", 1, "A", "Zeta", "QRIS", 10.0, 1, 0.0),
            record("2", 1, "A", "Alpha", "QRIS", 10.0, 1, 0.0),
        ];
        let cities = revenue_by_city(&data);
        assert_eq!(cities[0].customer_city, "Alpha");
        assert_eq!(cities[1].customer_city, "Zeta");
    }

    #[test]
    fn test_display_strings() {
        let dashboard = build_dashboard(&sample());
        assert_eq!(dashboard.display.orders, "4");
        assert_eq!(dashboard.display.customers, "5");
        assert!(dashboard.display.revenue.starts_with("Rp "));
    }
}
