use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::io::Read;
use std::str::FromStr;
use crate::core::quote::Quote;
use crate::error::Error;

/// Column headers of a fund's price history, as published by the provider.
pub const DATE_COLUMN: &str = "<DTYYYYMMDD>";
pub const CLOSE_COLUMN: &str = "<CLOSE>";

fn table_error(member: &str, reason: impl Into<String>) -> Error {
    Error::Table {
        member: member.to_string(),
        reason: reason.into(),
    }
}

/// Reads a fund's CSV price history and returns the last row's closing
/// price and date. Rows are chronologically ascending in the upstream
/// data, so the last row is the latest quote; that ordering is an assumed
/// precondition and is not re-validated here.
///
/// Both columns are read as raw text and converted explicitly — the price
/// as an exact decimal, the date as a strict `YYYYMMDD` calendar date.
pub fn latest_quote<R: Read>(reader: R, member: &str) -> Result<Quote, Error> {
    let mut table = csv::Reader::from_reader(reader);

    let headers = table.headers().map_err(|e| table_error(member, e.to_string()))?;
    let date_column = headers.iter().position(|h| h == DATE_COLUMN)
        .ok_or_else(|| table_error(member, format!("missing {} column", DATE_COLUMN)))?;
    let close_column = headers.iter().position(|h| h == CLOSE_COLUMN)
        .ok_or_else(|| table_error(member, format!("missing {} column", CLOSE_COLUMN)))?;

    let mut last_row: Option<(String, String)> = None;
    for row in table.records() {
        let row = row.map_err(|e| table_error(member, e.to_string()))?;
        let date = row.get(date_column)
            .ok_or_else(|| table_error(member, "short row"))?;
        let close = row.get(close_column)
            .ok_or_else(|| table_error(member, "short row"))?;
        last_row = Some((date.to_string(), close.to_string()));
    }
    let (date, close) = last_row.ok_or_else(|| table_error(member, "no data rows"))?;

    let price = Decimal::from_str(&close)
        .map_err(|_| table_error(member, format!("bad closing price {:?}", close)))?;
    let as_of = NaiveDate::parse_from_str(&date, "%Y%m%d")
        .map_err(|_| table_error(member, format!("bad date {:?}", date)))?;
    Ok(Quote::new(price, as_of))
}
