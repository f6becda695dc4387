// ═══════════════════════════════════════════════════════════════════
// Provider Tests — GLOBAL_QUOTE response triage
// ═══════════════════════════════════════════════════════════════════

use rust_decimal_macros::dec;
use stock_tracker_core::errors::CoreError;
use stock_tracker_core::providers::alphavantage::{parse_global_quote, AlphaVantageProvider};
use stock_tracker_core::providers::traits::QuoteProvider;

fn api_message(result: Result<rust_decimal::Decimal, CoreError>) -> (String, String) {
    match result.unwrap_err() {
        CoreError::Api { symbol, message } => (symbol, message),
        other => panic!("expected CoreError::Api, got {other:?}"),
    }
}

mod quote_parsing {
    use super::*;

    #[test]
    fn well_formed_quote_parses_to_decimal() {
        let body = r#"{
            "Global Quote": {
                "01. symbol": "AAPL",
                "05. price": "160.2500",
                "07. latest trading day": "2024-06-03"
            }
        }"#;
        assert_eq!(parse_global_quote("AAPL", body).unwrap(), dec!(160.25));
    }

    #[test]
    fn api_error_field_is_reported_as_api_error() {
        let body = r#"{"Error Message": "Invalid API call."}"#;
        let (symbol, message) = api_message(parse_global_quote("aapl", body));
        assert_eq!(symbol, "AAPL");
        assert_eq!(message, "api error: Invalid API call.");
    }

    #[test]
    fn note_field_is_reported_as_rate_limited() {
        let body = r#"{"Note": "Thank you for using Alpha Vantage! 25 requests per day."}"#;
        let (_, message) = api_message(parse_global_quote("AAPL", body));
        assert!(message.starts_with("rate limited: "));
    }

    #[test]
    fn information_field_is_reported_as_rate_limited() {
        // Newer API vintages moved the throttle advisory to "Information".
        let body = r#"{"Information": "API rate limit reached."}"#;
        let (_, message) = api_message(parse_global_quote("AAPL", body));
        assert_eq!(message, "rate limited: API rate limit reached.");
    }

    #[test]
    fn error_field_wins_over_advisory_field() {
        let body = r#"{"Error Message": "bad symbol", "Note": "slow down"}"#;
        let (_, message) = api_message(parse_global_quote("AAPL", body));
        assert!(message.starts_with("api error: "));
    }

    #[test]
    fn empty_envelope_is_unparseable() {
        let (_, message) = api_message(parse_global_quote("tsla", "{}"));
        assert_eq!(message, "unparseable response for symbol TSLA");
    }

    #[test]
    fn quote_without_price_field_is_unparseable() {
        let body = r#"{"Global Quote": {"01. symbol": "TSLA"}}"#;
        let (_, message) = api_message(parse_global_quote("TSLA", body));
        assert_eq!(message, "unparseable response for symbol TSLA");
    }

    #[test]
    fn non_numeric_price_is_unparseable() {
        let body = r#"{"Global Quote": {"05. price": "n/a"}}"#;
        let (_, message) = api_message(parse_global_quote("TSLA", body));
        assert_eq!(message, "unparseable response for symbol TSLA");
    }

    #[test]
    fn malformed_json_is_an_api_error() {
        let (_, message) = api_message(parse_global_quote("AAPL", "<html>oops</html>"));
        assert!(message.starts_with("invalid JSON response: "));
    }
}

mod provider {
    use super::*;

    #[test]
    fn name_identifies_the_provider() {
        let provider = AlphaVantageProvider::new("test-key".to_string());
        assert_eq!(provider.name(), "Alpha Vantage");
    }
}
