use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A market quote as published by the price-list service: the closing
/// price, exact, and the calendar date it was quoted at.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct Quote {
    pub price: Decimal,
    pub as_of: NaiveDate,
}

impl Quote {
    pub fn new(price: Decimal, as_of: NaiveDate) -> Quote {
        Quote { price, as_of }
    }
}
