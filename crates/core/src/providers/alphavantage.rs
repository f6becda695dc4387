use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::errors::CoreError;

use super::traits::QuoteProvider;

const BASE_URL: &str = "https://www.alphavantage.co/query";

/// Alpha Vantage GLOBAL_QUOTE client.
///
/// - **Free tier**: 25 requests/day.
/// - **Requires**: API key.
///
/// The API reports its own failures inside a 200 response body, so the
/// JSON envelope is inspected field by field rather than deserialized
/// into a fixed shape — see [`parse_global_quote`].
pub struct AlphaVantageProvider {
    client: Client,
    api_key: String,
}

impl AlphaVantageProvider {
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client, api_key }
    }
}

#[async_trait]
impl QuoteProvider for AlphaVantageProvider {
    fn name(&self) -> &str {
        "Alpha Vantage"
    }

    async fn current_price(&self, symbol: &str) -> Result<Decimal, CoreError> {
        let body = self
            .client
            .get(BASE_URL)
            .query(&[
                ("function", "GLOBAL_QUOTE"),
                ("symbol", &symbol.to_uppercase()),
                ("apikey", &self.api_key),
            ])
            .send()
            .await?
            .text()
            .await?;

        parse_global_quote(symbol, &body)
    }
}

/// Triage a GLOBAL_QUOTE response body. Checked in order:
///
/// 1. `"Error Message"` — the API rejected the request.
/// 2. `"Note"` / `"Information"` — throttle advisory (the free tier puts
///    its rate-limit notice under either key depending on API vintage).
/// 3. `"Global Quote"."05. price"` — the quote, price as a numeric string.
///
/// Anything else, including a price that does not parse as a decimal, is
/// an unparseable response.
pub fn parse_global_quote(symbol: &str, body: &str) -> Result<Decimal, CoreError> {
    let doc: Value = serde_json::from_str(body).map_err(|e| CoreError::Api {
        symbol: symbol.to_uppercase(),
        message: format!("invalid JSON response: {e}"),
    })?;

    if let Some(message) = doc.get("Error Message").and_then(Value::as_str) {
        return Err(CoreError::Api {
            symbol: symbol.to_uppercase(),
            message: format!("api error: {message}"),
        });
    }

    for advisory in ["Note", "Information"] {
        if let Some(message) = doc.get(advisory).and_then(Value::as_str) {
            return Err(CoreError::Api {
                symbol: symbol.to_uppercase(),
                message: format!("rate limited: {message}"),
            });
        }
    }

    if let Some(price) = doc
        .get("Global Quote")
        .and_then(|q| q.get("05. price"))
        .and_then(Value::as_str)
    {
        if let Ok(price) = price.parse::<Decimal>() {
            return Ok(price);
        }
    }

    Err(CoreError::Api {
        symbol: symbol.to_uppercase(),
        message: format!("unparseable response for symbol {}", symbol.to_uppercase()),
    })
}
