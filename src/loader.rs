use crate::aggregator::build_dashboard;
use crate::error::LoadError;
use crate::source::Source;
use crate::types::{Dashboard, RawRow, SalesRecord, REQUIRED_COLUMNS};
use crate::util::{parse_discount, parse_f64_safe, parse_order_date, parse_u32_safe};
use csv::{ReaderBuilder, Trim};
use std::time::Duration;
use tracing::{debug, info};

/// Fetch the source and turn it into a fresh dashboard.
///
/// Nothing is returned unless every row parsed; the caller keeps whatever it
/// was showing before when this fails.
pub fn load(source: &Source, timeout: Duration) -> Result<Dashboard, LoadError> {
    info!("Loading sales data from {}", source);
    let text = source.fetch(timeout)?;
    let records = parse_records(&text)?;
    info!("Parsed {} sales records", records.len());
    Ok(build_dashboard(&records))
}

/// Parse CSV text into cleaned records, failing on the first bad row.
pub fn parse_records(text: &str) -> Result<Vec<SalesRecord>, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = rdr.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column));
        }
    }
    debug!("Header ok: {:?}", headers);

    let mut records = Vec::new();
    for (idx, result) in rdr.deserialize::<RawRow>().enumerate() {
        let row = result?;
        records.push(clean_row(idx + 1, row)?);
    }
    Ok(records)
}

fn clean_row(row_no: usize, row: RawRow) -> Result<SalesRecord, LoadError> {
    let order_id = match row.order_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        other => return Err(LoadError::invalid(row_no, "order_id", other.unwrap_or(""))),
    };

    let order_date = parse_order_date(row.order_date.as_deref()).ok_or_else(|| {
        LoadError::invalid(row_no, "order_date", row.order_date.as_deref().unwrap_or(""))
    })?;

    let price = match parse_f64_safe(row.price.as_deref()) {
        Some(v) if v.is_finite() && v >= 0.0 => v,
        _ => return Err(LoadError::invalid(row_no, "price", row.price.as_deref().unwrap_or(""))),
    };
    let quantity = parse_u32_safe(row.quantity.as_deref()).ok_or_else(|| {
        LoadError::invalid(row_no, "quantity", row.quantity.as_deref().unwrap_or(""))
    })?;
    let discount_fraction = parse_discount(row.discount_applied.as_deref()).ok_or_else(|| {
        LoadError::invalid(
            row_no,
            "discount_applied",
            row.discount_applied.as_deref().unwrap_or(""),
        )
    })?;

    Ok(SalesRecord {
        order_id,
        order_date,
        product_category: label_or_unknown(row.product_category),
        customer_city: label_or_unknown(row.customer_city),
        payment_method: label_or_unknown(row.payment_method),
        price,
        quantity,
        discount_fraction,
    })
}

fn label_or_unknown(value: Option<String>) -> String {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => v,
        _ => "Unknown".to_string(),
    }
}
