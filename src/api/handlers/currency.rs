//! Currency utility endpoints.
//!
//! Served entirely from the static catalog in [`crate::domain::currency`];
//! no upstream calls are involved.

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{
    CurrencyDto, FormatParams, FormatResponse, InfoResponse, NameResponse, SearchParams,
    SearchResponse, SearchResultDto, SupportedResponse, SymbolResponse,
};
use crate::app_state::AppState;
use crate::domain::currency::{self, FormatOptions};
use crate::error::{ErrorResponse, GatewayError};

/// `GET /api/currency/symbol/{code}` — Currency symbol lookup.
#[utoipa::path(
    get,
    path = "/api/currency/symbol/{code}",
    tag = "Currency",
    summary = "Look up a currency symbol",
    params(("code" = String, Path, description = "ISO 4217 code, any case")),
    responses(
        (status = 200, description = "Symbol (falls back to the code when unsupported)", body = SymbolResponse),
    )
)]
pub async fn symbol_handler(Path(code): Path<String>) -> impl IntoResponse {
    Json(SymbolResponse {
        symbol: currency::symbol(&code),
        supported: currency::is_supported(&code),
        code: code.to_uppercase(),
    })
}

/// `GET /api/currency/name/{code}` — Currency name lookup.
#[utoipa::path(
    get,
    path = "/api/currency/name/{code}",
    tag = "Currency",
    summary = "Look up a currency name",
    params(("code" = String, Path, description = "ISO 4217 code, any case")),
    responses(
        (status = 200, description = "Name (falls back to the code when unsupported)", body = NameResponse),
    )
)]
pub async fn name_handler(Path(code): Path<String>) -> impl IntoResponse {
    Json(NameResponse {
        name: currency::name(&code),
        supported: currency::is_supported(&code),
        code: code.to_uppercase(),
    })
}

/// `GET /api/currency/format` — Format an amount in a currency's style.
///
/// # Errors
///
/// Returns `400` when `amount` or `code` is missing, or `amount` is not a
/// number.
#[utoipa::path(
    get,
    path = "/api/currency/format",
    tag = "Currency",
    summary = "Format an amount",
    params(FormatParams),
    responses(
        (status = 200, description = "Formatted amount", body = FormatResponse),
        (status = 400, description = "Missing or invalid parameters", body = ErrorResponse),
    )
)]
pub async fn format_handler(
    Query(params): Query<FormatParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let (Some(amount_raw), Some(code)) = (params.amount, params.code) else {
        return Err(GatewayError::InvalidRequest(
            "missing required parameters: amount, code".to_string(),
        ));
    };
    let amount: f64 = amount_raw.parse().map_err(|_| {
        GatewayError::InvalidRequest(format!("invalid amount parameter: {amount_raw}"))
    })?;

    let options = FormatOptions {
        show_symbol: params.show_symbol.as_deref().map_or(true, |v| v == "true"),
        show_code: params.show_code.as_deref().is_some_and(|v| v == "true"),
    };

    Ok(Json(FormatResponse {
        amount,
        formatted: currency::format_amount(amount, &code, options),
        supported: currency::is_supported(&code),
        code: code.to_uppercase(),
    }))
}

/// `GET /api/currency/supported` — The full currency catalog.
#[utoipa::path(
    get,
    path = "/api/currency/supported",
    tag = "Currency",
    summary = "List supported currencies",
    responses(
        (status = 200, description = "Catalog", body = SupportedResponse),
    )
)]
pub async fn supported_handler() -> impl IntoResponse {
    let currencies: Vec<CurrencyDto> = currency::CURRENCIES.iter().map(CurrencyDto::from).collect();
    Json(SupportedResponse {
        count: currencies.len(),
        currencies,
    })
}

/// `GET /api/currency/search` — Search the catalog.
///
/// # Errors
///
/// Returns `400` when the `q` parameter is missing.
#[utoipa::path(
    get,
    path = "/api/currency/search",
    tag = "Currency",
    summary = "Search currencies",
    params(SearchParams),
    responses(
        (status = 200, description = "Matches by code, name, or symbol", body = SearchResponse),
        (status = 400, description = "Missing search query", body = ErrorResponse),
    )
)]
pub async fn search_handler(
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let Some(query) = params.q else {
        return Err(GatewayError::InvalidRequest(
            "missing search query".to_string(),
        ));
    };

    let results: Vec<SearchResultDto> = currency::search(&query)
        .into_iter()
        .map(|info| SearchResultDto {
            code: info.code,
            symbol: info.symbol,
            name: info.name,
        })
        .collect();

    Ok(Json(SearchResponse {
        count: results.len(),
        query,
        results,
    }))
}

/// `GET /api/currency/info/{code}` — Full metadata for one currency.
#[utoipa::path(
    get,
    path = "/api/currency/info/{code}",
    tag = "Currency",
    summary = "Currency metadata",
    params(("code" = String, Path, description = "ISO 4217 code, any case")),
    responses(
        (status = 200, description = "Currency metadata", body = InfoResponse),
        (status = 404, description = "Unknown currency code", body = ErrorResponse),
    )
)]
pub async fn info_handler(Path(code): Path<String>) -> Response {
    match currency::lookup(&code) {
        Some(info) => Json(InfoResponse {
            code: info.code,
            symbol: info.symbol,
            name: info.name,
            decimal_places: info.decimal_places,
            position: info.position,
            supported: true,
        })
        .into_response(),
        None => {
            let body = ErrorResponse {
                error: "not_found".to_string(),
                details: format!("currency {} is not supported", code.to_uppercase()),
            };
            (StatusCode::NOT_FOUND, Json(body)).into_response()
        }
    }
}

/// Currency routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/currency/symbol/{code}", get(symbol_handler))
        .route("/api/currency/name/{code}", get(name_handler))
        .route("/api/currency/format", get(format_handler))
        .route("/api/currency/supported", get(supported_handler))
        .route("/api/currency/search", get(search_handler))
        .route("/api/currency/info/{code}", get(info_handler))
}
