//! Currency utility DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::currency::CurrencyInfo;

/// Response for `GET /api/currency/symbol/{code}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SymbolResponse {
    /// Upper-cased currency code from the request.
    pub code: String,
    /// Display symbol, or the code itself when unsupported.
    pub symbol: String,
    /// Whether the code is in the catalog.
    pub supported: bool,
}

/// Response for `GET /api/currency/name/{code}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct NameResponse {
    /// Upper-cased currency code from the request.
    pub code: String,
    /// Display name, or the code itself when unsupported.
    pub name: String,
    /// Whether the code is in the catalog.
    pub supported: bool,
}

/// Query parameters for `GET /api/currency/format`.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct FormatParams {
    /// Amount to format.
    pub amount: Option<String>,
    /// Currency code.
    pub code: Option<String>,
    /// Include the currency symbol (default `true`).
    #[serde(default)]
    pub show_symbol: Option<String>,
    /// Append the ISO code (default `false`).
    #[serde(default)]
    pub show_code: Option<String>,
}

/// Response for `GET /api/currency/format`.
#[derive(Debug, Serialize, ToSchema)]
pub struct FormatResponse {
    /// Parsed amount.
    pub amount: f64,
    /// Upper-cased currency code.
    pub code: String,
    /// Formatted rendering.
    pub formatted: String,
    /// Whether the code is in the catalog.
    pub supported: bool,
}

/// One catalog entry as exposed over the API.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyDto {
    /// ISO 4217 code.
    pub code: &'static str,
    /// Display symbol.
    pub symbol: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Fraction digits.
    pub decimal_places: u32,
    /// Symbol placement, `before` or `after`.
    #[schema(value_type = String)]
    pub position: crate::domain::currency::SymbolPosition,
}

impl From<&'static CurrencyInfo> for CurrencyDto {
    fn from(info: &'static CurrencyInfo) -> Self {
        Self {
            code: info.code,
            symbol: info.symbol,
            name: info.name,
            decimal_places: info.decimal_places,
            position: info.position,
        }
    }
}

/// Response for `GET /api/currency/supported`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SupportedResponse {
    /// Catalog size.
    pub count: usize,
    /// Every supported currency.
    pub currencies: Vec<CurrencyDto>,
}

/// Query parameters for `GET /api/currency/search`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Free-text query matched against code, name, and symbol.
    pub q: Option<String>,
}

/// A single search hit.
#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResultDto {
    /// ISO 4217 code.
    pub code: &'static str,
    /// Display symbol.
    pub symbol: &'static str,
    /// Display name.
    pub name: &'static str,
}

/// Response for `GET /api/currency/search`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResponse {
    /// Echo of the query string.
    pub query: String,
    /// Number of hits.
    pub count: usize,
    /// Matching currencies.
    pub results: Vec<SearchResultDto>,
}

/// Response for `GET /api/currency/info/{code}`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponse {
    /// ISO 4217 code.
    pub code: &'static str,
    /// Display symbol.
    pub symbol: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Fraction digits.
    pub decimal_places: u32,
    /// Symbol placement.
    #[schema(value_type = String)]
    pub position: crate::domain::currency::SymbolPosition,
    /// Always `true` for a found entry.
    pub supported: bool,
}
