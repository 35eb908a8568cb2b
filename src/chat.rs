//! Scripted business assistant.
//!
//! Answers are picked by plain substring matching on the lower-cased query;
//! the only inputs are the current KPIs and city ranking.

use crate::types::{CityRevenue, Dashboard, KpiSummary};
use crate::util::format_currency;

pub const GREETING: &str =
    "Halo. Selamat datang di Dibimbing Dashboard. Ada yang bisa saya bantu analisis?";
pub const NO_CITY_DATA: &str = "Data wilayah belum tersedia.";
pub const CATEGORY_ADVICE: &str = "Saran Stok: Pertahankan stok untuk kategori Home Living dan Fashion karena memiliki margin tinggi.";
pub const HELP: &str =
    "Saya dapat membantu menghitung prediksi revenue, analisis kota terlaris, atau performa kategori.";

/// Projected growth applied to current revenue.
const GROWTH_FACTOR: f64 = 1.2;

pub fn respond(query: &str, kpis: &KpiSummary, revenue_by_city: &[CityRevenue]) -> String {
    let q = query.to_lowercase();
    if q.contains("prediksi") {
        let projected = kpis.total_revenue * GROWTH_FACTOR;
        format!(
            "Analisis Prediktif: Berdasarkan tren saat ini, diproyeksikan pendapatan bulan depan mencapai {} (Growth +20%).",
            format_currency(projected)
        )
    } else if q.contains("kota") || q.contains("terlaris") {
        match revenue_by_city.first() {
            Some(top) => format!(
                "Insight Wilayah: Kota dengan kontribusi pendapatan terbesar adalah {}.",
                top.customer_city
            ),
            None => NO_CITY_DATA.to_string(),
        }
    } else if q.contains("kategori") {
        CATEGORY_ADVICE.to_string()
    } else {
        HELP.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    Assistant,
    User,
}

impl Sender {
    pub fn label(&self) -> &'static str {
        match self {
            Sender::Assistant => "AI",
            Sender::User => "User",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl Default for ChatLog {
    fn default() -> Self {
        Self {
            messages: vec![ChatMessage {
                sender: Sender::Assistant,
                text: GREETING.to_string(),
            }],
        }
    }
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// One `sender: text` line per message, oldest first.
    pub fn transcript(&self) -> Vec<String> {
        self.messages
            .iter()
            .map(|m| format!("{}: {}", m.sender.label(), m.text))
            .collect()
    }

    /// Record the question and its answer. Blank input, including
    /// whitespace-only input, is ignored without touching the log.
    ///
    /// Without a loaded dashboard the answer is computed against zero
    /// revenue and no cities.
    pub fn ask(&mut self, input: &str, dashboard: Option<&Dashboard>) -> Option<&str> {
        if input.trim().is_empty() {
            return None;
        }
        let empty = KpiSummary::default();
        let (kpis, cities) = match dashboard {
            Some(d) => (&d.kpis, d.groups.revenue_by_city.as_slice()),
            None => (&empty, &[] as &[CityRevenue]),
        };
        let reply = respond(input, kpis, cities);
        self.messages.push(ChatMessage {
            sender: Sender::User,
            text: input.to_string(),
        });
        self.messages.push(ChatMessage {
            sender: Sender::Assistant,
            text: reply,
        });
        self.messages.last().map(|m| m.text.as_str())
    }
}
