use thiserror::Error;

/// Unified error type for the entire stock-tracker-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Caller input ────────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    Validation(String),

    // ── Persistence ─────────────────────────────────────────────────
    /// Write/delete I/O failure. Reads never produce this: an unreadable
    /// record surfaces as `LoadOutcome::Corrupted` instead.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // ── Quote provider ──────────────────────────────────────────────
    #[error("Quote provider error for {symbol}: {message}")]
    Api { symbol: String, message: String },

    #[error("Network error: {0}")]
    Network(String),

    /// Service-level wrapping of a provider failure during a price
    /// update. The stock is left untouched when this is returned.
    #[error("Failed to update stock price for {symbol}: {source}")]
    PriceUpdate {
        symbol: String,
        #[source]
        source: Box<CoreError>,
    },

    // ── Startup configuration ───────────────────────────────────────
    #[error("Configuration error: {0}")]
    Config(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Sanitize error message: strip query parameters from URLs to prevent
        // API key leakage. reqwest errors often contain full URLs with secrets.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
