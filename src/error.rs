use std::path::PathBuf;

/// Everything that can go wrong during an update run.
///
/// `MissingMember` and `Table` are scoped to a single fund and only cause
/// that fund to be skipped when raised from the per-fund loop; every other
/// variant aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("request for {url} returned {status}, not 200 OK")]
    Fetch {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("HTTP transport failure: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed price-list line: {line:?}")]
    Manifest { line: String },

    #[error("price table {member}: {reason}")]
    Table { member: String, reason: String },

    #[error("archive has no member {member}")]
    MissingMember { member: String },

    #[error("malformed journal line {number}: {line:?}")]
    Journal { number: usize, line: String },

    #[error("ledger is already in use; remove {} if the lock is stale", .lock.display())]
    Locked { lock: PathBuf },

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("zip archive failure: {0}")]
    Zip(#[from] zip::result::ZipError),
}
