use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use crate::errors::CoreError;
use crate::models::stock::Stock;
use crate::providers::traits::QuoteProvider;
use crate::storage::repository::StockRepository;

/// Orchestrates the repository and the quote provider. This is the entire
/// service-facing surface of the core: consumers (UI layers) call nothing
/// else.
///
/// Every read-modify-write cycle (`add_purchase`, `update_stock_price`)
/// runs under a per-symbol mutex, so two concurrent mutations of the same
/// symbol serialize instead of losing the earlier write. Distinct symbols
/// never contend.
pub struct StockManagementService {
    repository: Arc<dyn StockRepository>,
    provider: Arc<dyn QuoteProvider>,

    /// symbol (normalized) → its mutation lock. Grows by one entry per
    /// symbol ever mutated; entries are never evicted.
    symbol_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl StockManagementService {
    pub fn new(repository: Arc<dyn StockRepository>, provider: Arc<dyn QuoteProvider>) -> Self {
        Self {
            repository,
            provider,
            symbol_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Load every stored stock.
    pub async fn get_all_stocks(&self) -> Vec<Stock> {
        self.repository.get_all().await
    }

    /// Load one stock. Never fails for a missing symbol — an absent (or
    /// unreadable) record yields a fresh empty aggregate.
    pub async fn get_stock(&self, symbol: &str) -> Result<Stock, CoreError> {
        let symbol = normalize_symbol(symbol)?;
        Ok(self.repository.get_by_symbol(&symbol).await)
    }

    /// Record a new lot for a symbol and persist the aggregate. Strictly
    /// additive: identical calls create distinct lots. Quantity
    /// validation happens in the aggregate.
    pub async fn add_purchase(
        &self,
        symbol: &str,
        price_per_share: Decimal,
        quantity: Decimal,
        purchase_date: impl Into<String>,
        is_dividend: bool,
    ) -> Result<(), CoreError> {
        let symbol = normalize_symbol(symbol)?;
        if price_per_share <= Decimal::ZERO {
            return Err(CoreError::Validation(
                "Price per share must be greater than zero".to_string(),
            ));
        }

        let purchase_date = purchase_date.into();
        let lock = self.lock_for(&symbol).await;
        let _guard = lock.lock().await;

        let mut stock = self.repository.get_by_symbol(&symbol).await;
        stock.add_purchase(price_per_share, quantity, purchase_date, is_dividend)?;
        self.repository.save(&stock).await
    }

    /// Fetch the live quote for a symbol and persist it. On a provider
    /// failure the error is wrapped with the symbol as
    /// [`CoreError::PriceUpdate`] and the stored stock is left untouched.
    /// Returns the fetched price.
    pub async fn update_stock_price(&self, symbol: &str) -> Result<Decimal, CoreError> {
        let symbol = normalize_symbol(symbol)?;

        // Fetch before taking the lock: quote latency must not serialize
        // behind another writer on the same symbol.
        let price = self
            .provider
            .current_price(&symbol)
            .await
            .map_err(|e| CoreError::PriceUpdate {
                symbol: symbol.clone(),
                source: Box::new(e),
            })?;

        let lock = self.lock_for(&symbol).await;
        let _guard = lock.lock().await;

        let mut stock = self.repository.get_by_symbol(&symbol).await;
        stock.update_current_price(price);
        self.repository.save(&stock).await?;
        Ok(price)
    }

    /// Refresh the price of every stored stock concurrently: one
    /// independent fetch+update+save cycle per symbol, fan-in when all
    /// complete. One symbol's failure never blocks or rolls back
    /// another's update; each outcome is reported per symbol.
    pub async fn refresh_all_prices(&self) -> Vec<(String, Result<Decimal, CoreError>)> {
        let symbols: Vec<String> = self
            .get_all_stocks()
            .await
            .into_iter()
            .map(|s| s.symbol().to_string())
            .collect();

        let updates = symbols.into_iter().map(|symbol| async move {
            let result = self.update_stock_price(&symbol).await;
            (symbol, result)
        });
        let outcomes = join_all(updates).await;

        for (symbol, result) in &outcomes {
            if let Err(e) = result {
                log::warn!("Price refresh failed for {symbol}: {e}");
            }
        }
        outcomes
    }

    /// Remove a symbol's record. No-op when absent.
    pub async fn delete_stock(&self, symbol: &str) -> Result<(), CoreError> {
        let symbol = normalize_symbol(symbol)?;
        let lock = self.lock_for(&symbol).await;
        let _guard = lock.lock().await;
        self.repository.delete(&symbol).await
    }

    /// Whether a record exists for the symbol. Blank input is `false`,
    /// not an error.
    pub async fn stock_exists(&self, symbol: &str) -> bool {
        match normalize_symbol(symbol) {
            Ok(symbol) => self.repository.exists(&symbol).await,
            Err(_) => false,
        }
    }

    async fn lock_for(&self, symbol: &str) -> Arc<Mutex<()>> {
        let mut locks = self.symbol_locks.lock().await;
        locks.entry(symbol.to_string()).or_default().clone()
    }
}

/// Trim and uppercase a caller-supplied symbol; blank input is a
/// validation error.
fn normalize_symbol(symbol: &str) -> Result<String, CoreError> {
    let trimmed = symbol.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Symbol cannot be empty".to_string(),
        ));
    }
    Ok(trimmed.to_uppercase())
}
