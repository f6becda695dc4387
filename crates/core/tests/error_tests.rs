// ═══════════════════════════════════════════════════════════════════
// Error Tests — display text, conversions, source chains
// ═══════════════════════════════════════════════════════════════════

use std::error::Error;

use stock_tracker_core::errors::CoreError;

mod display {
    use super::*;

    #[test]
    fn validation() {
        let e = CoreError::Validation("Symbol cannot be empty".to_string());
        assert_eq!(e.to_string(), "Validation failed: Symbol cannot be empty");
    }

    #[test]
    fn storage() {
        let e = CoreError::Storage("disk full".to_string());
        assert_eq!(e.to_string(), "Storage error: disk full");
    }

    #[test]
    fn api_includes_symbol_and_message() {
        let e = CoreError::Api {
            symbol: "AAPL".to_string(),
            message: "rate limited: slow down".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Quote provider error for AAPL: rate limited: slow down"
        );
    }

    #[test]
    fn price_update_includes_symbol_and_cause() {
        let e = CoreError::PriceUpdate {
            symbol: "MSFT".to_string(),
            source: Box::new(CoreError::Network("timed out".to_string())),
        };
        assert_eq!(
            e.to_string(),
            "Failed to update stock price for MSFT: Network error: timed out"
        );
    }

    #[test]
    fn config() {
        let e = CoreError::Config("Alpha Vantage API key is not set".to_string());
        assert!(e.to_string().starts_with("Configuration error: "));
    }
}

mod conversions {
    use super::*;

    #[test]
    fn io_errors_become_storage_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let e: CoreError = io.into();
        assert!(matches!(e, CoreError::Storage(_)));
        assert!(e.to_string().contains("denied"));
    }

    #[test]
    fn serde_errors_become_serialization_errors() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{{{").unwrap_err();
        let e: CoreError = serde_err.into();
        assert!(matches!(e, CoreError::Serialization(_)));
    }
}

mod source_chain {
    use super::*;

    #[test]
    fn price_update_exposes_its_cause() {
        let e = CoreError::PriceUpdate {
            symbol: "AAPL".to_string(),
            source: Box::new(CoreError::Api {
                symbol: "AAPL".to_string(),
                message: "api error: Invalid API call.".to_string(),
            }),
        };
        let source = e.source().expect("PriceUpdate should carry a source");
        assert!(source.to_string().contains("api error"));
    }

    #[test]
    fn leaf_variants_have_no_source() {
        assert!(CoreError::Validation("x".to_string()).source().is_none());
        assert!(CoreError::Storage("x".to_string()).source().is_none());
    }
}
