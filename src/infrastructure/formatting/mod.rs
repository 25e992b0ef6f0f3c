//! Price formatting

mod currency;

pub use currency::CurrencyFormatter;
