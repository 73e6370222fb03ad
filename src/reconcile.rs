//! The update run: walk the ledger's fund commodities, resolve each one to
//! its latest quote on the price list, and record every quote that is
//! strictly newer than what the ledger already has.

use deunicode::deunicode;
use std::fmt;
use std::io::{Read, Seek};
use crate::core::value::FixedValue;
use crate::error::Error;
use crate::feed::PriceFeed;
use crate::ledger::LedgerSession;

/// The price lists quote everything in PLN, so that is the only currency
/// baselines are looked up in.
pub const REFERENCE_CURRENCY: &str = "PLN";

/// Why a fund was left untouched. None of these abort the run.
#[derive(PartialEq, Debug)]
pub enum Skip {
    /// No recorded price in the reference currency to compare against; a
    /// fund without a baseline is never repriced.
    NoBaseline,
    /// The fund does not appear on the price list.
    NotListed,
    /// The fund is listed but its price data could not be read.
    Unreadable(String),
    /// The quote is not strictly newer than the recorded baseline.
    Stale {
        baseline: chrono::NaiveDate,
        quote: chrono::NaiveDate,
    },
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Skip::NoBaseline => {
                write!(f, "no price entries denominated in {}", REFERENCE_CURRENCY)
            }
            Skip::NotListed => write!(f, "not available on the price list"),
            Skip::Unreadable(reason) => write!(f, "its price data could not be read: {}", reason),
            Skip::Stale { baseline, quote } => {
                write!(f, "its recorded price ({}) is not older than the quote ({})",
                    baseline, quote)
            }
        }
    }
}

/// What an update run did, fund by fund.
#[derive(Debug, Default)]
pub struct RunReport {
    pub updated: Vec<String>,
    pub skipped: Vec<(String, Skip)>,
}

/// Runs the reconciliation over every fund commodity and persists the
/// ledger once at the end. Per-fund problems skip that fund; manifest,
/// archive and ledger problems abort.
pub fn update_prices<R: Read + Seek>(
    session: &mut LedgerSession,
    feed: &mut PriceFeed<R>,
) -> Result<RunReport, Error> {
    let mut report = RunReport::default();

    for commodity in session.fund_commodities() {
        let name = commodity.name().to_string();

        let baseline = match session.latest_price(&name, REFERENCE_CURRENCY) {
            Some(record) => record.clone(),
            None => {
                skip(&mut report, name, Skip::NoBaseline);
                continue;
            }
        };

        // The price list transliterates fund names to plain ASCII; fold
        // the ledger's name the same way before looking it up.
        let quote = match feed.latest_quote(&deunicode(&name)) {
            Ok(Some(quote)) => quote,
            Ok(None) => {
                skip(&mut report, name, Skip::NotListed);
                continue;
            }
            Err(e @ (Error::MissingMember { .. } | Error::Table { .. })) => {
                skip(&mut report, name, Skip::Unreadable(e.to_string()));
                continue;
            }
            Err(e) => return Err(e),
        };

        if baseline.date() >= quote.as_of {
            skip(&mut report, name, Skip::Stale {
                baseline: baseline.date(),
                quote: quote.as_of,
            });
            continue;
        }

        let value = match FixedValue::from_decimal(quote.price, baseline.value().denom()) {
            Some(value) => value,
            None => {
                let reason = format!("price {} is out of range", quote.price);
                skip(&mut report, name, Skip::Unreadable(reason));
                continue;
            }
        };

        tracing::info!("updating {} with price {} at {}", name, quote.price, quote.as_of);
        session.add_price(baseline.updated(quote.as_of, value));
        report.updated.push(name);
    }

    session.save()?;
    Ok(report)
}

fn skip(report: &mut RunReport, name: String, why: Skip) {
    tracing::info!("skipping {}: {}", name, why);
    report.skipped.push((name, why));
}
