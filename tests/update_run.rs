//! End-to-end update runs against a scratch journal and an in-memory
//! price archive.

use std::fs;
use std::io::{Cursor, Write};
use std::path::PathBuf;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use fund_pulse::feed::PriceFeed;
use fund_pulse::ledger::LedgerSession;
use fund_pulse::parser::manifest;
use fund_pulse::reconcile::{self, Skip};

const MANIFEST: &str = "\
fundinwest price lists
generated nightly
----------------------------------------
2023-01-02  08:00  1024  mst  fund.csv  Example Fund
----------------------------------------
end of list
";

const HISTORY: &str = "\
<TICKER>,<DTYYYYMMDD>,<OPEN>,<CLOSE>
FUND,20230101,9.98,10.00
FUND,20230102,10.01,10.50
";

fn feed_with(members: &[(&str, &str)]) -> PriceFeed<Cursor<Vec<u8>>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, body) in members {
        writer.start_file(*name, SimpleFileOptions::default()).unwrap();
        writer.write_all(body.as_bytes()).unwrap();
    }
    let archive = ZipArchive::new(writer.finish().unwrap()).unwrap();
    PriceFeed::from_parts(manifest::parse(MANIFEST).unwrap(), archive)
}

fn scratch_ledger(content: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wallet.ledger");
    fs::write(&path, content).unwrap();
    (dir, path)
}

fn journal_with_baseline(baseline: &str) -> String {
    format!(
        "commodity PLN\ncommodity \"Example Fund\"\n    class fund\n{}",
        baseline
    )
}

#[test]
fn newer_quote_is_recorded_with_the_baseline_denominator() {
    let (_dir, path) =
        scratch_ledger(&journal_with_baseline("P 2023-01-01 \"Example Fund\" 10.00 PLN\n"));
    let mut session = LedgerSession::open(&path).unwrap();
    let mut feed = feed_with(&[("fund.csv", HISTORY)]);

    let report = reconcile::update_prices(&mut session, &mut feed).unwrap();
    assert_eq!(report.updated, vec!["Example Fund".to_string()]);
    assert!(report.skipped.is_empty());

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.ends_with("P 2023-01-02 \"Example Fund\" 10.50 PLN\n"));
}

#[test]
fn fund_without_a_baseline_is_skipped_and_nothing_is_inserted() {
    let (_dir, path) = scratch_ledger(&journal_with_baseline(""));
    let before = fs::read_to_string(&path).unwrap();
    let mut session = LedgerSession::open(&path).unwrap();
    let mut feed = feed_with(&[("fund.csv", HISTORY)]);

    let report = reconcile::update_prices(&mut session, &mut feed).unwrap();
    assert!(report.updated.is_empty());
    assert_eq!(report.skipped, vec![("Example Fund".to_string(), Skip::NoBaseline)]);
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn equal_dated_quote_is_stale() {
    let (_dir, path) =
        scratch_ledger(&journal_with_baseline("P 2023-01-02 \"Example Fund\" 10.00 PLN\n"));
    let before = fs::read_to_string(&path).unwrap();
    let mut session = LedgerSession::open(&path).unwrap();
    let mut feed = feed_with(&[("fund.csv", HISTORY)]);

    let report = reconcile::update_prices(&mut session, &mut feed).unwrap();
    assert!(report.updated.is_empty());
    assert!(matches!(report.skipped[0].1, Skip::Stale { .. }));
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn older_quote_is_stale() {
    let (_dir, path) =
        scratch_ledger(&journal_with_baseline("P 2023-02-01 \"Example Fund\" 11.00 PLN\n"));
    let mut session = LedgerSession::open(&path).unwrap();
    let mut feed = feed_with(&[("fund.csv", HISTORY)]);

    let report = reconcile::update_prices(&mut session, &mut feed).unwrap();
    assert!(report.updated.is_empty());
    assert!(matches!(report.skipped[0].1, Skip::Stale { .. }));
}

#[test]
fn fund_not_on_the_price_list_is_skipped_without_aborting() {
    let journal = "\
commodity PLN
commodity \"Unlisted Fund\"
    class fund
commodity \"Example Fund\"
    class fund
P 2023-01-01 \"Unlisted Fund\" 5.00 PLN
P 2023-01-01 \"Example Fund\" 10.00 PLN
";
    let (_dir, path) = scratch_ledger(journal);
    let mut session = LedgerSession::open(&path).unwrap();
    let mut feed = feed_with(&[("fund.csv", HISTORY)]);

    let report = reconcile::update_prices(&mut session, &mut feed).unwrap();
    assert_eq!(report.skipped, vec![("Unlisted Fund".to_string(), Skip::NotListed)]);
    assert_eq!(report.updated, vec!["Example Fund".to_string()]);
}

#[test]
fn missing_archive_member_is_skipped_without_aborting() {
    let (_dir, path) =
        scratch_ledger(&journal_with_baseline("P 2023-01-01 \"Example Fund\" 10.00 PLN\n"));
    let mut session = LedgerSession::open(&path).unwrap();
    let mut feed = feed_with(&[("other.csv", HISTORY)]);

    let report = reconcile::update_prices(&mut session, &mut feed).unwrap();
    assert!(report.updated.is_empty());
    assert!(matches!(report.skipped[0].1, Skip::Unreadable(_)));
}

#[test]
fn diacritics_in_the_ledger_name_match_the_ascii_manifest_name() {
    // The ledger owner writes the fund's proper name; the price list only
    // carries its ASCII transliteration.
    let manifest_text = "\
a
b
c
2023-01-02  x  x  x  fund.csv  Fundusz Akcji Spolek
d
e
";
    let journal = "\
commodity PLN
commodity \"Fundusz Akcji Spółek\"
    class fund
P 2023-01-01 \"Fundusz Akcji Spółek\" 10.00 PLN
";
    let (_dir, path) = scratch_ledger(journal);
    let mut session = LedgerSession::open(&path).unwrap();

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer.start_file("fund.csv", SimpleFileOptions::default()).unwrap();
    writer.write_all(HISTORY.as_bytes()).unwrap();
    let archive = ZipArchive::new(writer.finish().unwrap()).unwrap();
    let mut feed = PriceFeed::from_parts(manifest::parse(manifest_text).unwrap(), archive);

    let report = reconcile::update_prices(&mut session, &mut feed).unwrap();
    assert_eq!(report.updated, vec!["Fundusz Akcji Spółek".to_string()]);

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.ends_with("P 2023-01-02 \"Fundusz Akcji Spółek\" 10.50 PLN\n"));
}
