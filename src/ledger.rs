//! File-backed ledger session. The journal is read once at open; price
//! insertions are staged in memory and appended to the file in a single
//! write at save time, leaving any other journal content untouched.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use crate::core::commodity::{Commodity, CommodityClass};
use crate::core::price::PriceRecord;
use crate::error::Error;
use crate::parser::journal;

/// An open ledger. Owns an advisory lock on the journal file for its whole
/// lifetime; the lock is released on drop, whether or not the run
/// succeeded. Staged but unsaved records die with the session.
pub struct LedgerSession {
    path: PathBuf,
    lock_path: PathBuf,
    commodities: Vec<Commodity>,
    prices: Vec<PriceRecord>,
    staged: Vec<PriceRecord>,
    ends_with_newline: bool,
}

impl LedgerSession {
    pub fn open(path: &Path) -> Result<LedgerSession, Error> {
        let text = fs::read_to_string(path)?;
        let parsed = journal::parse(&text)?;

        let lock_path = lock_path_for(path);
        match OpenOptions::new().write(true).create_new(true).open(&lock_path) {
            Ok(mut lock) => {
                let _ = writeln!(lock, "{}", std::process::id());
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(Error::Locked { lock: lock_path });
            }
            Err(e) => return Err(Error::Io(e)),
        }

        tracing::debug!(
            "opened ledger {} with {} commodities and {} recorded prices",
            path.display(),
            parsed.commodities.len(),
            parsed.prices.len()
        );
        Ok(LedgerSession {
            path: path.to_path_buf(),
            lock_path,
            commodities: parsed.commodities,
            prices: parsed.prices,
            staged: Vec::new(),
            ends_with_newline: text.is_empty() || text.ends_with('\n'),
        })
    }

    /// The commodities tagged as fund instruments, in declaration order.
    pub fn fund_commodities(&self) -> Vec<Commodity> {
        self.commodities
            .iter()
            .filter(|c| c.class() == CommodityClass::Fund)
            .cloned()
            .collect()
    }

    /// The most recent recorded price for a commodity/currency pair — the
    /// baseline a candidate quote is compared against. Staged records do
    /// not count until saved.
    pub fn latest_price(&self, commodity: &str, currency: &str) -> Option<&PriceRecord> {
        self.prices
            .iter()
            .filter(|p| p.commodity() == commodity && p.currency() == currency)
            .max_by_key(|p| p.date())
    }

    /// Stages a price record for insertion at the next save.
    pub fn add_price(&mut self, record: PriceRecord) {
        tracing::debug!("staging price record: {}", record);
        self.staged.push(record);
    }

    /// Appends all staged records to the journal in one write.
    pub fn save(&mut self) -> Result<(), Error> {
        if self.staged.is_empty() {
            tracing::debug!("nothing staged, ledger left as-is");
            return Ok(());
        }

        let mut out = String::new();
        if !self.ends_with_newline {
            out.push('\n');
        }
        for record in &self.staged {
            out.push_str(&record.to_string());
            out.push('\n');
        }

        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(out.as_bytes())?;
        file.flush()?;
        self.ends_with_newline = true;

        tracing::info!(
            "recorded {} new price(s) in {}",
            self.staged.len(),
            self.path.display()
        );
        self.prices.append(&mut self.staged);
        Ok(())
    }
}

impl Drop for LedgerSession {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.lock_path) {
            tracing::warn!("could not remove lock file {}: {}", self.lock_path.display(), e);
        }
    }
}

fn lock_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".lck");
    path.with_file_name(name)
}
