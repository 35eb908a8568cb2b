// Parsing and formatting helpers.
//
// Raw CSV cells come in as untyped text; everything here turns them into
// typed values (or `None`) so the loader can decide what is fatal.
use chrono::{NaiveDate, NaiveDateTime};
use num_format::{Locale, ToFormattedString};

/// Date-only layouts accepted for `order_date`. Slash dates are month-first.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse a string-like value into `f64`, forgiving about thousands
/// separators and surrounding whitespace.
///
/// - Rejects empty values and anything containing letters (`nan`, `inf`).
/// - Returns `None` for anything that cannot be safely parsed.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace(",", "");
    s.parse::<f64>().ok()
}

pub fn parse_u32_safe(s: Option<&str>) -> Option<u32> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<u32>().ok()
}

/// Parse a `discount_applied` cell into a fraction.
///
/// Strips trailing `%` and treats the rest as a percentage, so `"10%"` and
/// `"10"` both give `0.10`. Missing, empty and `nan` cells mean no discount.
/// `None` means the cell held something that is not a number.
pub fn parse_discount(s: Option<&str>) -> Option<f64> {
    let Some(s) = s else {
        return Some(0.0);
    };
    let s = s.trim().trim_end_matches('%').trim();
    if s.is_empty() || s.eq_ignore_ascii_case("nan") {
        return Some(0.0);
    }
    match s.parse::<f64>() {
        Ok(pct) if pct.is_finite() => Some(pct / 100.0),
        _ => None,
    }
}

pub fn parse_order_date(s: Option<&str>) -> Option<NaiveDate> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
                .map(|dt| dt.date())
        })
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed decimals plus `,` thousands separators (e.g. `1,234,567.89`).
    if !n.is_finite() {
        return n.to_string();
    }
    let s = format!("{:.*}", decimals, n.abs());
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s.as_str(), None),
    };
    let mut res = group_thousands(int_part);
    if let Some(frac) = frac_part {
        res.push('.');
        res.push_str(frac);
    }
    // Rounding can turn a tiny negative into zero; don't print `-0`.
    let is_zero = !s.chars().any(|c| c.is_ascii_digit() && c != '0');
    if n.is_sign_negative() && !is_zero {
        format!("-{}", res)
    } else {
        res
    }
}

/// Insert `,` every three digits from the right. Works on the digit string
/// so amounts beyond any integer type still group correctly.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}

/// Rupiah amount rounded to whole units, e.g. `Rp 1,234,567`.
pub fn format_currency(n: f64) -> String {
    format!("Rp {}", format_number(n, 0))
}
