use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::stock::Stock;

/// Result of reading one symbol's record. Read failures never propagate
/// as errors: a record that exists but cannot be parsed is `Corrupted`,
/// and the caller decides whether to mask it as empty (the legacy policy,
/// see [`StockRepository::get_by_symbol`]) or surface it.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(Stock),
    NotFound,
    Corrupted { symbol: String, cause: String },
}

/// Symbol-keyed durable store, one record per symbol. Writes and deletes
/// are strict (I/O failures propagate as [`CoreError::Storage`]); reads
/// are tolerant (failures fold into [`LoadOutcome`]).
#[async_trait]
pub trait StockRepository: Send + Sync {
    /// Read one symbol's record without masking.
    async fn load(&self, symbol: &str) -> LoadOutcome;

    /// Load every stored record. Each unreadable record is masked as an
    /// empty stock for its symbol; an unreadable store root yields an
    /// empty vec, not an error.
    async fn get_all(&self) -> Vec<Stock>;

    /// Overwrite the symbol's record with a full snapshot of the
    /// aggregate. Atomic with respect to the previous content of that one
    /// record; no cross-symbol atomicity.
    async fn save(&self, stock: &Stock) -> Result<(), CoreError>;

    /// Remove the record if present; absence is not an error.
    async fn delete(&self, symbol: &str) -> Result<(), CoreError>;

    async fn exists(&self, symbol: &str) -> bool;

    /// Legacy read contract: never fails. A missing record yields a fresh
    /// empty stock, and so does a corrupted one — data-loss-safe by
    /// omission. The masking is logged so corruption is at least
    /// observable; callers that need to distinguish use [`load`].
    ///
    /// [`load`]: StockRepository::load
    async fn get_by_symbol(&self, symbol: &str) -> Stock {
        match self.load(symbol).await {
            LoadOutcome::Loaded(stock) => stock,
            LoadOutcome::NotFound => Stock::new(symbol),
            LoadOutcome::Corrupted { symbol: sym, cause } => {
                log::warn!("Record for {sym} is unreadable, treating as empty: {cause}");
                Stock::new(symbol)
            }
        }
    }
}
