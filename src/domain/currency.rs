//! Static currency catalog and amount formatting.
//!
//! The gateway exposes small currency utility endpoints (symbol and name
//! lookup, formatting, search) so frontends do not need their own table.
//! The catalog is a compile-time constant; lookups are case-insensitive.

use serde::Serialize;

/// Where the currency symbol sits relative to the formatted amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    /// Symbol precedes the amount with no space, e.g. `$1,000.00`.
    Before,
    /// Symbol follows the amount after a space, e.g. `1 000,00 kr`.
    After,
}

/// Metadata for one supported currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyInfo {
    /// ISO 4217 code, upper case.
    pub code: &'static str,
    /// Display symbol.
    pub symbol: &'static str,
    /// English display name.
    pub name: &'static str,
    /// Fraction digits used when formatting.
    pub decimal_places: u32,
    /// Symbol placement.
    pub position: SymbolPosition,
}

/// All supported currencies.
pub const CURRENCIES: &[CurrencyInfo] = &[
    c("USD", "$", "US Dollar", 2, SymbolPosition::Before),
    c("EUR", "€", "Euro", 2, SymbolPosition::Before),
    c("GBP", "£", "British Pound", 2, SymbolPosition::Before),
    c("NGN", "₦", "Nigerian Naira", 2, SymbolPosition::Before),
    c("JPY", "¥", "Japanese Yen", 0, SymbolPosition::Before),
    c("CAD", "C$", "Canadian Dollar", 2, SymbolPosition::Before),
    c("AUD", "A$", "Australian Dollar", 2, SymbolPosition::Before),
    c("CHF", "CHF", "Swiss Franc", 2, SymbolPosition::Before),
    c("CNY", "¥", "Chinese Yuan", 2, SymbolPosition::Before),
    c("INR", "₹", "Indian Rupee", 2, SymbolPosition::Before),
    c("KRW", "₩", "South Korean Won", 0, SymbolPosition::Before),
    c("SGD", "S$", "Singapore Dollar", 2, SymbolPosition::Before),
    c("HKD", "HK$", "Hong Kong Dollar", 2, SymbolPosition::Before),
    c("THB", "฿", "Thai Baht", 2, SymbolPosition::Before),
    c("MYR", "RM", "Malaysian Ringgit", 2, SymbolPosition::Before),
    c("IDR", "Rp", "Indonesian Rupiah", 0, SymbolPosition::Before),
    c("PHP", "₱", "Philippine Peso", 2, SymbolPosition::Before),
    c("SEK", "kr", "Swedish Krona", 2, SymbolPosition::After),
    c("NOK", "kr", "Norwegian Krone", 2, SymbolPosition::After),
    c("DKK", "kr", "Danish Krone", 2, SymbolPosition::After),
    c("PLN", "zł", "Polish Złoty", 2, SymbolPosition::After),
    c("CZK", "Kč", "Czech Koruna", 2, SymbolPosition::After),
    c("HUF", "Ft", "Hungarian Forint", 0, SymbolPosition::After),
    c("RON", "lei", "Romanian Leu", 2, SymbolPosition::After),
    c("BGN", "лв", "Bulgarian Lev", 2, SymbolPosition::After),
    c("AED", "د.إ", "UAE Dirham", 2, SymbolPosition::Before),
    c("SAR", "ر.س", "Saudi Riyal", 2, SymbolPosition::Before),
    c("QAR", "ر.ق", "Qatari Riyal", 2, SymbolPosition::Before),
    c("KWD", "د.ك", "Kuwaiti Dinar", 3, SymbolPosition::Before),
    c("BHD", ".د.ب", "Bahraini Dinar", 3, SymbolPosition::Before),
    c("OMR", "ر.ع.", "Omani Rial", 3, SymbolPosition::Before),
    c("BRL", "R$", "Brazilian Real", 2, SymbolPosition::Before),
    c("MXN", "$", "Mexican Peso", 2, SymbolPosition::Before),
    c("ARS", "$", "Argentine Peso", 2, SymbolPosition::Before),
    c("CLP", "$", "Chilean Peso", 0, SymbolPosition::Before),
    c("COP", "$", "Colombian Peso", 0, SymbolPosition::Before),
    c("PEN", "S/", "Peruvian Sol", 2, SymbolPosition::Before),
    c("UYU", "$U", "Uruguayan Peso", 2, SymbolPosition::Before),
    c("RUB", "₽", "Russian Ruble", 2, SymbolPosition::After),
    c("TRY", "₺", "Turkish Lira", 2, SymbolPosition::After),
    c("ILS", "₪", "Israeli Shekel", 2, SymbolPosition::Before),
    c("ZAR", "R", "South African Rand", 2, SymbolPosition::Before),
    c("NZD", "NZ$", "New Zealand Dollar", 2, SymbolPosition::Before),
];

const fn c(
    code: &'static str,
    symbol: &'static str,
    name: &'static str,
    decimal_places: u32,
    position: SymbolPosition,
) -> CurrencyInfo {
    CurrencyInfo {
        code,
        symbol,
        name,
        decimal_places,
        position,
    }
}

/// Looks up a currency by code, case-insensitively.
#[must_use]
pub fn lookup(code: &str) -> Option<&'static CurrencyInfo> {
    CURRENCIES
        .iter()
        .find(|info| info.code.eq_ignore_ascii_case(code))
}

/// Returns the display symbol for `code`, or the code itself when the
/// currency is not supported.
#[must_use]
pub fn symbol(code: &str) -> String {
    lookup(code).map_or_else(|| code.to_string(), |info| info.symbol.to_string())
}

/// Returns the display name for `code`, or the code itself when the
/// currency is not supported.
#[must_use]
pub fn name(code: &str) -> String {
    lookup(code).map_or_else(|| code.to_string(), |info| info.name.to_string())
}

/// Whether `code` names a supported currency.
#[must_use]
pub fn is_supported(code: &str) -> bool {
    lookup(code).is_some()
}

/// Finds currencies whose code, name, or symbol contains `query`
/// (case-insensitive).
#[must_use]
pub fn search(query: &str) -> Vec<&'static CurrencyInfo> {
    let query = query.to_lowercase();
    CURRENCIES
        .iter()
        .filter(|info| {
            info.code.to_lowercase().contains(&query)
                || info.name.to_lowercase().contains(&query)
                || info.symbol.to_lowercase().contains(&query)
        })
        .collect()
}

/// Formatting switches for [`format_amount`].
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    /// Include the currency symbol.
    pub show_symbol: bool,
    /// Append the ISO code after the formatted amount.
    pub show_code: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            show_symbol: true,
            show_code: false,
        }
    }
}

/// Formats `amount` in the style of `code`: thousands grouping, the
/// currency's fraction digits, and symbol placement.
///
/// Unsupported codes fall back to `"{amount} {code}"`.
#[must_use]
pub fn format_amount(amount: f64, code: &str, options: FormatOptions) -> String {
    let Some(info) = lookup(code) else {
        return format!("{amount} {code}");
    };

    let grouped = group_digits(amount, info.decimal_places);

    let mut result = if options.show_symbol {
        match info.position {
            SymbolPosition::Before => format!("{}{grouped}", info.symbol),
            SymbolPosition::After => format!("{grouped} {}", info.symbol),
        }
    } else {
        grouped
    };

    if options.show_code {
        result.push(' ');
        result.push_str(info.code);
    }
    result
}

/// Renders `amount` with `decimal_places` fraction digits and comma
/// thousands separators in the integer part.
fn group_digits(amount: f64, decimal_places: u32) -> String {
    let fixed = format!("{amount:.prec$}", prec = decimal_places as usize);
    let (sign, rest) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest.to_string()),
        None => ("", fixed),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (rest, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    let digits: Vec<char> = int_part.chars().collect();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}
