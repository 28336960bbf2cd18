//! Exact arithmetic value types: rationals, percentages, currency amounts and prices.

pub mod currency_amount;
pub mod fraction;
pub mod percent;
pub mod price;

pub use currency_amount::CurrencyAmount;
pub use fraction::Fraction;
pub use percent::Percent;
pub use price::Price;
