pub mod purchase;
pub mod stock;
