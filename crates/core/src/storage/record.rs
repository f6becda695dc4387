use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::stock::Stock;

/// On-disk shape of one symbol's record. Field names are camelCase in the
/// JSON files.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRecord {
    pub symbol: String,
    pub current_price: Decimal,
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub is_minimized: bool,
    #[serde(default)]
    pub minimized_total_investment: Decimal,
    #[serde(default)]
    pub minimized_current_price: Decimal,
    #[serde(default)]
    pub purchases: Vec<PurchaseRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    pub price_per_share: Decimal,
    pub quantity: Decimal,
    #[serde(default)]
    pub purchase_date: String,
    #[serde(default)]
    pub is_dividend: bool,
}

impl From<&Stock> for StockRecord {
    fn from(stock: &Stock) -> Self {
        Self {
            symbol: stock.symbol().to_string(),
            current_price: stock.current_price(),
            last_updated: stock.last_updated(),
            is_minimized: stock.is_minimized(),
            minimized_total_investment: stock.minimized_total_investment(),
            minimized_current_price: stock.minimized_current_price(),
            purchases: stock
                .purchases()
                .iter()
                .map(|p| PurchaseRecord {
                    price_per_share: p.price_per_share(),
                    quantity: p.quantity(),
                    purchase_date: p.purchase_date().to_string(),
                    is_dividend: p.is_dividend(),
                })
                .collect(),
        }
    }
}

impl StockRecord {
    /// Rebuild the aggregate under the requested symbol. Goes through the
    /// domain constructors, so a record holding an invalid lot (e.g. a
    /// non-positive quantity) fails here and is reported as corruption by
    /// the repository rather than accepted.
    pub fn into_stock(self, symbol: &str) -> Result<Stock, CoreError> {
        let mut stock = Stock::new(symbol);
        stock.update_current_price(self.current_price);
        stock.restore_last_updated(self.last_updated);
        stock.set_minimized(self.is_minimized);
        stock.set_minimized_total_investment(self.minimized_total_investment);
        stock.set_minimized_current_price(self.minimized_current_price);
        for p in self.purchases {
            stock.add_purchase(p.price_per_share, p.quantity, p.purchase_date, p.is_dividend)?;
        }
        Ok(stock)
    }
}
