// ═══════════════════════════════════════════════════════════════════
// Integration Tests — Config validation and the StockTracker facade
// ═══════════════════════════════════════════════════════════════════

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use stock_tracker_core::config::Config;
use stock_tracker_core::errors::CoreError;
use stock_tracker_core::StockTracker;

mod config_validation {
    use super::*;

    #[test]
    fn accepts_a_real_looking_key() {
        let config = Config::new("data", "REALKEY123");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_a_blank_key() {
        for key in ["", "   "] {
            let err = Config::new("data", key).validate().unwrap_err();
            assert!(matches!(err, CoreError::Config(_)));
        }
    }

    #[test]
    fn rejects_placeholder_keys_case_insensitively() {
        for key in ["YOUR_API_KEY", "your_api_key", "demo", "Demo", "changeme"] {
            let err = Config::new("data", key).validate().unwrap_err();
            assert!(matches!(err, CoreError::Config(_)));
        }
    }

    #[test]
    fn data_dir_defaults_when_absent_from_serialized_form() {
        let config: Config = serde_json::from_str(r#"{"api_key": "REALKEY123"}"#).unwrap();
        assert_eq!(config.data_dir, std::path::PathBuf::from("data"));
    }
}

mod facade {
    use super::*;

    fn tracker() -> (tempfile::TempDir, StockTracker) {
        let dir = tempfile::tempdir().unwrap();
        let tracker = StockTracker::new(Config::new(dir.path(), "REALKEY123")).unwrap();
        (dir, tracker)
    }

    #[test]
    fn construction_fails_fast_on_a_placeholder_key() {
        let dir = tempfile::tempdir().unwrap();
        let err = StockTracker::new(Config::new(dir.path(), "demo")).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn construction_creates_the_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("data");
        StockTracker::new(Config::new(&root, "REALKEY123")).unwrap();
        assert!(root.is_dir());
    }

    #[tokio::test]
    async fn purchase_lifecycle_through_the_facade() {
        let (_dir, tracker) = tracker();

        tracker
            .add_purchase("aapl", dec!(150.00), dec!(10), "2024-01-01", false)
            .await
            .unwrap();

        let stock = tracker.get_stock("AAPL").await.unwrap();
        assert_eq!(stock.total_investment(), dec!(1500.00));
        assert_eq!(stock.total_shares(), dec!(10));
        assert!(tracker.stock_exists("AAPL").await);

        let symbols: Vec<String> = tracker
            .get_all_stocks()
            .await
            .iter()
            .map(|s| s.symbol().to_string())
            .collect();
        assert_eq!(symbols, vec!["AAPL"]);

        tracker.delete_stock("AAPL").await.unwrap();
        assert!(!tracker.stock_exists("AAPL").await);
        let fresh = tracker.get_stock("AAPL").await.unwrap();
        assert_eq!(fresh.total_shares(), Decimal::ZERO);
    }
}
