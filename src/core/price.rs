use chrono::NaiveDate;
use std::fmt;
use super::value::FixedValue;

/// One entry of the ledger's price database: the value of a commodity in a
/// currency on a date. Serializes to a journal price line, e.g.
/// `P 2023-01-02 "Example Fund" 10.50 PLN`.
#[derive(PartialEq, Debug, Clone)]
pub struct PriceRecord {
    commodity: String,
    currency: String,
    date: NaiveDate,
    value: FixedValue,
}

impl PriceRecord {
    pub fn new<S, C>(commodity: S, currency: C, date: NaiveDate, value: FixedValue) -> PriceRecord
    where S: Into<String>, C: Into<String> {
        PriceRecord {
            commodity: commodity.into(),
            currency: currency.into(),
            date,
            value,
        }
    }

    /// A copy of this record restamped with a newer date and value, for the
    /// same commodity/currency pair.
    pub fn updated(&self, date: NaiveDate, value: FixedValue) -> PriceRecord {
        PriceRecord {
            commodity: self.commodity.clone(),
            currency: self.currency.clone(),
            date,
            value,
        }
    }

    pub fn commodity(&self) -> &str {
        &self.commodity
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn value(&self) -> FixedValue {
        self.value
    }
}

impl fmt::Display for PriceRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.commodity.contains(char::is_whitespace) {
            write!(f, "P {} \"{}\" {} {}",
                self.date.format("%Y-%m-%d"), self.commodity, self.value, self.currency)
        } else {
            write!(f, "P {} {} {} {}",
                self.date.format("%Y-%m-%d"), self.commodity, self.value, self.currency)
        }
    }
}
