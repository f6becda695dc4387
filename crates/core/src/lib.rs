pub mod config;
pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use std::sync::Arc;

use rust_decimal::Decimal;

use config::Config;
use errors::CoreError;
use models::stock::Stock;
use providers::alphavantage::AlphaVantageProvider;
use services::stock_service::StockManagementService;
use storage::file_repository::FileStockRepository;

/// Main entry point for the Stock Tracker core library.
///
/// Wires the file repository and the Alpha Vantage provider into the
/// management service and exposes the service surface. Construction is
/// the startup-time configuration check: it fails on a missing or
/// placeholder API key.
#[must_use]
pub struct StockTracker {
    service: StockManagementService,
}

impl std::fmt::Debug for StockTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StockTracker").finish_non_exhaustive()
    }
}

impl StockTracker {
    /// Validate the configuration and open the tracker. The data
    /// directory is created if it does not exist.
    pub fn new(config: Config) -> Result<Self, CoreError> {
        config.validate()?;
        let repository = Arc::new(FileStockRepository::new(&config.data_dir)?);
        let provider = Arc::new(AlphaVantageProvider::new(config.api_key));
        Ok(Self {
            service: StockManagementService::new(repository, provider),
        })
    }

    /// The underlying service, for callers that hold the tracker behind
    /// an `Arc` and hand the service to UI wiring.
    pub fn service(&self) -> &StockManagementService {
        &self.service
    }

    // ── Service surface (delegation) ────────────────────────────────

    pub async fn get_all_stocks(&self) -> Vec<Stock> {
        self.service.get_all_stocks().await
    }

    pub async fn get_stock(&self, symbol: &str) -> Result<Stock, CoreError> {
        self.service.get_stock(symbol).await
    }

    pub async fn add_purchase(
        &self,
        symbol: &str,
        price_per_share: Decimal,
        quantity: Decimal,
        purchase_date: impl Into<String>,
        is_dividend: bool,
    ) -> Result<(), CoreError> {
        self.service
            .add_purchase(symbol, price_per_share, quantity, purchase_date, is_dividend)
            .await
    }

    pub async fn update_stock_price(&self, symbol: &str) -> Result<Decimal, CoreError> {
        self.service.update_stock_price(symbol).await
    }

    pub async fn refresh_all_prices(&self) -> Vec<(String, Result<Decimal, CoreError>)> {
        self.service.refresh_all_prices().await
    }

    pub async fn delete_stock(&self, symbol: &str) -> Result<(), CoreError> {
        self.service.delete_stock(symbol).await
    }

    pub async fn stock_exists(&self, symbol: &str) -> bool {
        self.service.stock_exists(symbol).await
    }
}
