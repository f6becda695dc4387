use rust_decimal::Decimal;

use crate::errors::CoreError;

/// A single recorded lot: shares bought (or credited as a dividend) at a
/// price on a date. Immutable once constructed — lots are only ever
/// appended to a [`Stock`](super::stock::Stock) and dropped when the whole
/// stock is deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    price_per_share: Decimal,
    quantity: Decimal,
    purchase_date: String,
    is_dividend: bool,
}

impl Purchase {
    /// Create a lot. Both `price_per_share` and `quantity` must be
    /// strictly positive.
    pub fn new(
        price_per_share: Decimal,
        quantity: Decimal,
        purchase_date: impl Into<String>,
        is_dividend: bool,
    ) -> Result<Self, CoreError> {
        if price_per_share <= Decimal::ZERO {
            return Err(CoreError::Validation(
                "Price per share must be greater than zero".to_string(),
            ));
        }
        if quantity <= Decimal::ZERO {
            return Err(CoreError::Validation(
                "Quantity must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            price_per_share,
            quantity,
            purchase_date: purchase_date.into(),
            is_dividend,
        })
    }

    pub fn price_per_share(&self) -> Decimal {
        self.price_per_share
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// The date string as entered, e.g. "2024-01-01". Stored verbatim and
    /// never parsed — ordering over it is lexicographic.
    pub fn purchase_date(&self) -> &str {
        &self.purchase_date
    }

    pub fn is_dividend(&self) -> bool {
        self.is_dividend
    }

    /// Total cost of the lot: price per share × quantity.
    pub fn total_cost(&self) -> Decimal {
        self.price_per_share * self.quantity
    }
}
