//! Client for the public fund price-list service: one text manifest naming
//! an archive member per fund, and one zip archive of per-fund CSV price
//! histories.

pub mod table;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek};
use std::time::Duration;
use zip::result::ZipError;
use zip::ZipArchive;
use crate::core::quote::Quote;
use crate::error::Error;
use crate::parser::manifest::{self, FundManifestEntry};

pub const DEFAULT_BASE_URL: &str = "https://bossa.pl/pub/fundinwest/mstock";

const MANIFEST_FILE: &str = "mstfun.lst";
const ARCHIVE_FILE: &str = "mstfun.zip";
const FETCH_TIMEOUT: Duration = Duration::from_secs(120);

/// An open connection to the price lists: the parsed manifest plus the
/// downloaded archive. Holds the archive for the whole run; each quote
/// lookup opens exactly one member.
pub struct PriceFeed<R: Read + Seek> {
    manifest: HashMap<String, FundManifestEntry>,
    archive: ZipArchive<R>,
}

impl PriceFeed<File> {
    /// Fetches the manifest and the archive from the service. The archive
    /// body is streamed into an unnamed temporary file and opened in
    /// place. Any non-200 response is fatal; there are no retries.
    pub fn connect(base_url: &str) -> Result<PriceFeed<File>, Error> {
        let client = Client::builder().timeout(FETCH_TIMEOUT).build()?;

        let url = format!("{}/{}", base_url, MANIFEST_FILE);
        tracing::debug!("fetching fund list from {}", url);
        let response = client.get(&url).send()?;
        if response.status() != StatusCode::OK {
            return Err(Error::Fetch { url, status: response.status() });
        }
        let manifest = manifest::parse(&response.text()?)?;
        tracing::info!("price list names {} funds", manifest.len());

        let url = format!("{}/{}", base_url, ARCHIVE_FILE);
        tracing::debug!("fetching price archive from {}", url);
        let mut response = client.get(&url).send()?;
        if response.status() != StatusCode::OK {
            return Err(Error::Fetch { url, status: response.status() });
        }
        let mut spool = tempfile::tempfile()?;
        let bytes = response.copy_to(&mut spool)?;
        tracing::debug!("spooled {} archive bytes", bytes);

        Ok(PriceFeed {
            manifest,
            archive: ZipArchive::new(spool)?,
        })
    }
}

impl<R: Read + Seek> PriceFeed<R> {
    /// A feed assembled from already-obtained parts; lets tests run the
    /// pipeline against in-memory archives.
    pub fn from_parts(
        manifest: HashMap<String, FundManifestEntry>,
        archive: ZipArchive<R>,
    ) -> PriceFeed<R> {
        PriceFeed { manifest, archive }
    }

    /// Looks up the latest quote for a fund, by its manifest name.
    ///
    /// `Ok(None)` means the fund is not on the price list at all. Errors
    /// are scoped to the fund's archive member — a missing member or a
    /// price table that does not have the expected shape.
    pub fn latest_quote(&mut self, fund_name: &str) -> Result<Option<Quote>, Error> {
        let member = match self.manifest.get(fund_name) {
            Some(entry) => entry.member.clone(),
            None => return Ok(None),
        };

        let file = match self.archive.by_name(&member) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Err(Error::MissingMember { member }),
            Err(e) => {
                return Err(Error::Table { member, reason: e.to_string() });
            }
        };
        table::latest_quote(file, &member).map(Some)
    }
}
