use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::errors::CoreError;

use super::purchase::Purchase;

/// The aggregate root: a ticker symbol, its purchase lots, and the last
/// known market price. All portfolio metrics are derived on demand from
/// the current lot list and price — nothing derived is stored.
///
/// The symbol is uppercased at construction and never changes; the
/// repository treats it (case-insensitively) as the sole primary key.
#[derive(Debug, Clone, PartialEq)]
pub struct Stock {
    symbol: String,
    purchases: Vec<Purchase>,
    current_price: Decimal,
    last_updated: DateTime<Utc>,

    // UI-persisted snapshot fields. Opaque to every calculation here;
    // round-tripped verbatim through the repository.
    is_minimized: bool,
    minimized_total_investment: Decimal,
    minimized_current_price: Decimal,
}

impl Stock {
    /// Create an empty stock for a symbol: no lots, zero price.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            purchases: Vec::new(),
            current_price: Decimal::ZERO,
            last_updated: Utc::now(),
            is_minimized: false,
            minimized_total_investment: Decimal::ZERO,
            minimized_current_price: Decimal::ZERO,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Lots in insertion order (load order after rehydration).
    pub fn purchases(&self) -> &[Purchase] {
        &self.purchases
    }

    pub fn current_price(&self) -> Decimal {
        self.current_price
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    pub fn is_minimized(&self) -> bool {
        self.is_minimized
    }

    pub fn minimized_total_investment(&self) -> Decimal {
        self.minimized_total_investment
    }

    pub fn minimized_current_price(&self) -> Decimal {
        self.minimized_current_price
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Append a lot. Fails with [`CoreError::Validation`] if the price or
    /// quantity is not strictly positive. In-memory only — the caller
    /// persists separately.
    pub fn add_purchase(
        &mut self,
        price_per_share: Decimal,
        quantity: Decimal,
        purchase_date: impl Into<String>,
        is_dividend: bool,
    ) -> Result<(), CoreError> {
        let purchase = Purchase::new(price_per_share, quantity, purchase_date, is_dividend)?;
        self.purchases.push(purchase);
        Ok(())
    }

    /// Set the current market price and stamp `last_updated` with now
    /// (UTC). Unconditional: zero and negative prices are accepted, the
    /// external feed is trusted.
    pub fn update_current_price(&mut self, price: Decimal) {
        self.current_price = price;
        self.last_updated = Utc::now();
    }

    /// Restore a persisted `last_updated` timestamp. Used by the
    /// repository when rehydrating, after `update_current_price` has
    /// stamped now.
    pub(crate) fn restore_last_updated(&mut self, last_updated: DateTime<Utc>) {
        self.last_updated = last_updated;
    }

    pub fn set_minimized(&mut self, minimized: bool) {
        self.is_minimized = minimized;
    }

    pub fn set_minimized_total_investment(&mut self, value: Decimal) {
        self.minimized_total_investment = value;
    }

    pub fn set_minimized_current_price(&mut self, value: Decimal) {
        self.minimized_current_price = value;
    }

    // ── Derived metrics ─────────────────────────────────────────────
    //
    // All getters below are pure functions of the current state. An empty
    // lot list yields zero / None, never an error.
    //
    // Note the asymmetry: the aggregate totals (shares, investment)
    // include dividend lots, while the max/min helpers filter on the
    // dividend flag. Intentional — do not unify.

    /// Sum of all lots' quantity, dividend lots included.
    pub fn total_shares(&self) -> Decimal {
        self.purchases.iter().map(Purchase::quantity).sum()
    }

    /// Sum of all lots' total cost, dividend lots included.
    pub fn total_investment(&self) -> Decimal {
        self.purchases.iter().map(|p| p.total_cost()).sum()
    }

    /// Market value of the position at the current price.
    pub fn current_value(&self) -> Decimal {
        self.total_shares() * self.current_price
    }

    pub fn total_gain_loss(&self) -> Decimal {
        self.current_value() - self.total_investment()
    }

    /// Gain/loss as a percentage of the total investment. Zero when
    /// nothing has been invested, regardless of the current price.
    pub fn total_gain_loss_percentage(&self) -> Decimal {
        let investment = self.total_investment();
        if investment == Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.total_gain_loss() / investment * Decimal::ONE_HUNDRED
    }

    /// The lot with the greatest `purchase_date`, compared as raw strings
    /// (correct for zero-padded ISO-8601 dates, fragile otherwise). Ties
    /// go to the first lot encountered.
    pub fn latest_purchase(&self) -> Option<&Purchase> {
        self.purchases.iter().fold(None, |best, p| match best {
            Some(b) if p.purchase_date() <= b.purchase_date() => best,
            _ => Some(p),
        })
    }

    /// Gain/loss on the latest lot alone, zero when there are no lots.
    pub fn latest_purchase_gain_loss(&self) -> Decimal {
        match self.latest_purchase() {
            Some(p) => (self.current_price - p.price_per_share()) * p.quantity(),
            None => Decimal::ZERO,
        }
    }

    /// Gain/loss on the latest lot relative to its purchase price, as a
    /// percentage. Zero when there are no lots.
    pub fn latest_purchase_gain_loss_percentage(&self) -> Decimal {
        match self.latest_purchase() {
            Some(p) => {
                (self.current_price - p.price_per_share()) / p.price_per_share()
                    * Decimal::ONE_HUNDRED
            }
            None => Decimal::ZERO,
        }
    }

    /// Highest price paid per share across non-dividend lots.
    pub fn max_bought(&self) -> Option<Decimal> {
        self.purchases
            .iter()
            .filter(|p| !p.is_dividend())
            .map(Purchase::price_per_share)
            .max()
    }

    /// Lowest price paid per share across non-dividend lots.
    pub fn min_bought(&self) -> Option<Decimal> {
        self.purchases
            .iter()
            .filter(|p| !p.is_dividend())
            .map(Purchase::price_per_share)
            .min()
    }

    /// Total cost across non-dividend lots only.
    pub fn total_bought(&self) -> Decimal {
        self.purchases
            .iter()
            .filter(|p| !p.is_dividend())
            .map(|p| p.total_cost())
            .sum()
    }

    /// Highest per-share price across dividend lots.
    pub fn max_dividend(&self) -> Option<Decimal> {
        self.purchases
            .iter()
            .filter(|p| p.is_dividend())
            .map(Purchase::price_per_share)
            .max()
    }

    /// Lowest per-share price across dividend lots.
    pub fn min_dividend(&self) -> Option<Decimal> {
        self.purchases
            .iter()
            .filter(|p| p.is_dividend())
            .map(Purchase::price_per_share)
            .min()
    }

    /// Total value credited across dividend lots.
    pub fn dividend_total(&self) -> Decimal {
        self.purchases
            .iter()
            .filter(|p| p.is_dividend())
            .map(|p| p.total_cost())
            .sum()
    }
}
