//! Keep a plain-text ledger's price database current with fund quotes from
//! a public price-list service.
//!
//! A run is a single sequential pass: fetch and parse the fund manifest,
//! download the price archive, then walk the ledger's fund commodities and
//! record every quote strictly newer than the ledger's latest price —
//! converted into the ledger's fixed-point value representation.

pub mod core;
pub mod error;
pub mod feed;
pub mod ledger;
pub mod parser;
pub mod reconcile;

pub use error::Error;
