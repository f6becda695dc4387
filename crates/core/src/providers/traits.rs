use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::CoreError;

/// Trait boundary around the external quote feed. The service only ever
/// sees this trait, so the HTTP provider can be swapped or mocked without
/// touching the rest of the codebase.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the current market price for a symbol. Point-in-time only;
    /// failures are reported, never retried here — retry policy (if any)
    /// belongs to the caller.
    async fn current_price(&self, symbol: &str) -> Result<Decimal, CoreError>;
}
