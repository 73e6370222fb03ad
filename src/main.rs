use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use fund_pulse::feed::{self, PriceFeed};
use fund_pulse::ledger::LedgerSession;
use fund_pulse::reconcile;

/// Update a ledger's price database with the latest fund quotes.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path to the ledger journal to update
    ledger: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();

    match run(&args.ledger) {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("update failed: {}", e);
            let mut source = std::error::Error::source(&e);
            while let Some(err) = source {
                tracing::error!("   caused by: {}", err);
                source = err.source();
            }
            Err(e.into())
        }
    }
}

fn run(ledger: &Path) -> Result<(), fund_pulse::Error> {
    // The session owns the journal lock; it is released when `session`
    // drops, on the error paths included.
    let mut session = LedgerSession::open(ledger)?;
    let mut feed = PriceFeed::connect(feed::DEFAULT_BASE_URL)?;

    let report = reconcile::update_prices(&mut session, &mut feed)?;
    tracing::info!(
        "done: {} fund(s) updated, {} skipped",
        report.updated.len(),
        report.skipped.len()
    );
    Ok(())
}
