use chrono::NaiveDate;

/// Formats currency amounts for presentation.
pub trait CurrencyFormatter: Send + Sync {
    fn format_amount(&self, amount: f64) -> String;
}

/// Formats dates for presentation.
pub trait DateFormatter: Send + Sync {
    fn format_date(&self, date: NaiveDate) -> String;
}

/// Two-decimal amounts with thousands grouping behind a fixed symbol,
/// e.g. `$1,234.50` or `-$20.00`.
#[derive(Debug, Clone)]
pub struct SymbolCurrencyFormatter {
    symbol: String,
}

impl SymbolCurrencyFormatter {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

impl Default for SymbolCurrencyFormatter {
    fn default() -> Self {
        Self::new("$")
    }
}

impl CurrencyFormatter for SymbolCurrencyFormatter {
    fn format_amount(&self, amount: f64) -> String {
        let fixed = format!("{:.2}", amount.abs());
        let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
        format!("{sign}{}{}.{cents}", self.symbol, group_thousands(whole))
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// `YYYY-MM-DD`, the layout rows are written in.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsoDateFormatter;

impl DateFormatter for IsoDateFormatter {
    fn format_date(&self, date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }
}
