use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;
use crate::core::commodity::{Commodity, CommodityClass};
use crate::core::price::PriceRecord;
use crate::core::value::FixedValue;
use crate::error::Error;

/// The declarations of a ledger journal that matter to a price update:
/// the commodities the ledger owner tracks and the recorded prices.
#[derive(PartialEq, Debug, Default)]
pub struct Journal {
    pub commodities: Vec<Commodity>,
    pub prices: Vec<PriceRecord>,
}

// PATTERNS

/// `P 2023-01-02 "Example Fund" 10.50 PLN` — quoted names for commodities
/// with whitespace, bare tokens otherwise.
fn price_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"^P\s+(\d{4}-\d{2}-\d{2})\s+(?:"([^"]+)"|(\S+))\s+(-?[0-9.]+)\s+(\S+)\s*$"#)
            .expect("price line pattern compiles")
    })
}

/// `commodity PLN` or `commodity "PKO Akcji Plus"`.
fn commodity_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"^commodity\s+(?:"([^"]+)"|(\S+))\s*$"#)
            .expect("commodity line pattern compiles")
    })
}

// PARSER

fn journal_error(number: usize, line: &str) -> Error {
    Error::Journal {
        number,
        line: line.to_string(),
    }
}

/// Parses journal text. Comment (`;`) and blank lines carry no meaning.
/// An indented line is a subdirective of the commodity declared above it:
/// `class fund` marks a fund instrument, `note ...` is free text.
/// Any line that fits none of these shapes is a hard error naming it.
pub fn parse(text: &str) -> Result<Journal, Error> {
    let mut journal = Journal::default();

    for (index, raw) in text.lines().enumerate() {
        let number = index + 1;
        let line = raw.trim_end();

        if line.trim_start().is_empty() || line.trim_start().starts_with(';') {
            continue;
        }

        if raw.starts_with(char::is_whitespace) {
            apply_subdirective(&mut journal, line.trim_start(), number, raw)?;
        } else if let Some(captures) = commodity_pattern().captures(line) {
            let name = captures.get(1).or_else(|| captures.get(2))
                .expect("one name alternative matched")
                .as_str();
            journal.commodities.push(Commodity::new(name, CommodityClass::Currency));
        } else if line.starts_with('P') {
            journal.prices.push(parse_price_line(line, number)?);
        } else {
            return Err(journal_error(number, raw));
        }
    }

    Ok(journal)
}

fn apply_subdirective(
    journal: &mut Journal,
    directive: &str,
    number: usize,
    raw: &str,
) -> Result<(), Error> {
    let commodity = journal.commodities.last_mut().ok_or_else(|| journal_error(number, raw))?;
    let mut words = directive.split_whitespace();
    match (words.next(), words.next()) {
        (Some("class"), Some("fund")) => {
            commodity.set_class(CommodityClass::Fund);
            Ok(())
        }
        (Some("class"), Some("currency")) => Ok(()),
        (Some("note"), _) => Ok(()),
        _ => Err(journal_error(number, raw)),
    }
}

fn parse_price_line(line: &str, number: usize) -> Result<PriceRecord, Error> {
    let captures = price_pattern().captures(line).ok_or_else(|| journal_error(number, line))?;
    let date = NaiveDate::parse_from_str(&captures[1], "%Y-%m-%d")
        .map_err(|_| journal_error(number, line))?;
    let commodity = captures.get(2).or_else(|| captures.get(3))
        .expect("one name alternative matched")
        .as_str();
    let value = FixedValue::parse(&captures[4]).ok_or_else(|| journal_error(number, line))?;
    Ok(PriceRecord::new(commodity, &captures[5], date, value))
}
