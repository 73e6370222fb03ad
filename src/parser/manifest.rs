use chrono::NaiveDate;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use crate::error::Error;

/// The provider frames the fund list with a fixed-size banner and footer;
/// the offsets come from the published format, not from the content.
pub const HEADER_LINES: usize = 3;
pub const TRAILER_LINES: usize = 2;

/// One record of the fund list: the archive member holding the fund's price
/// history and the "as of" date the list was generated with.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct FundManifestEntry {
    pub member: String,
    pub date: NaiveDate,
}

/// A record line: date, three filler tokens, the archive member, then the
/// fund's display name running to end of line.
fn record_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{4}-\d{2}-\d{2})\s+\S+\s+\S+\s+\S+\s+(\S+)\s+(\S(?:.*\S)?)\s*$")
            .expect("manifest record pattern compiles")
    })
}

/// Parses the manifest text into a map from fund name to its entry.
///
/// All-or-nothing: a record line that does not match the expected shape
/// fails the whole parse, carrying the offending line. Duplicate fund
/// names are last-line-wins; the provider's list is expected to be unique.
pub fn parse(text: &str) -> Result<HashMap<String, FundManifestEntry>, Error> {
    let lines: Vec<&str> = text.lines().collect();
    let body = lines
        .get(HEADER_LINES..lines.len().saturating_sub(TRAILER_LINES))
        .unwrap_or_default();

    let mut entries = HashMap::new();
    for line in body {
        if line.trim().is_empty() {
            continue;
        }
        let captures = record_pattern().captures(line).ok_or_else(|| Error::Manifest {
            line: line.to_string(),
        })?;
        let date = NaiveDate::parse_from_str(&captures[1], "%Y-%m-%d")
            .map_err(|_| Error::Manifest { line: line.to_string() })?;
        entries.insert(
            captures[3].to_string(),
            FundManifestEntry {
                member: captures[2].to_string(),
                date,
            },
        );
    }
    Ok(entries)
}
