//! CSV import for the adventure log
//!
//! Expected columns (header names are case-insensitive, order is free):
//! `Description`, `Amount`, `Type` (credit/debit), and optionally
//! `Timestamp` and `Source`. Rows are appended in file order.

use std::collections::HashSet;
use std::io::Read;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{NewTransaction, Transaction, TransactionType};
use crate::store::LedgerStore;

/// Source recorded for imported rows without a `Source` column
pub const DEFAULT_SOURCE: &str = "csv";

const REQUIRED_COLUMNS: [&str; 3] = ["description", "amount", "type"];

/// Outcome of applying an import batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStats {
    pub imported: usize,
    pub skipped: usize,
}

/// Column positions resolved from the header row
struct Columns {
    description: usize,
    amount: usize,
    kind: usize,
    timestamp: Option<usize>,
    source: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|c| find(*c).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(Error::Import(format!(
                "CSV must contain Description, Amount and Type columns (missing: {})",
                missing.join(", ")
            )));
        }

        Ok(Self {
            description: find("description").unwrap_or_default(),
            amount: find("amount").unwrap_or_default(),
            kind: find("type").unwrap_or_default(),
            timestamp: find("timestamp"),
            source: find("source"),
        })
    }
}

/// Parse CSV data into transactions ready to append
///
/// Rows without a timestamp are stamped with `now`.
pub fn parse_csv<R: Read>(reader: R, now: DateTime<Utc>) -> Result<Vec<NewTransaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let columns = Columns::resolve(rdr.headers()?)?;
    let mut transactions = Vec::new();

    for (index, result) in rdr.records().enumerate() {
        let record = result?;
        // Header is line 1
        let line = index + 2;

        let field = |i: usize| record.get(i).unwrap_or("");

        let title = field(columns.description);
        if title.is_empty() {
            return Err(Error::Import(format!("Line {}: missing description", line)));
        }

        let amount = parse_amount(field(columns.amount))
            .map_err(|e| Error::Import(format!("Line {}: {}", line, e)))?;

        let kind: TransactionType = field(columns.kind)
            .parse()
            .map_err(|e: String| Error::Import(format!("Line {}: {}", line, e)))?;

        let timestamp = match columns.timestamp.map(field).filter(|s| !s.is_empty()) {
            Some(raw) => parse_timestamp(raw)
                .map_err(|e| Error::Import(format!("Line {}: {}", line, e)))?,
            None => now,
        };

        let source = columns
            .source
            .map(field)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SOURCE);

        transactions.push(NewTransaction {
            title: title.to_string(),
            amount,
            kind,
            source: source.to_string(),
            timestamp: Some(timestamp),
        });
    }

    debug!(rows = transactions.len(), "Parsed transaction CSV");
    Ok(transactions)
}

/// Append `rows` to the store, skipping duplicates
///
/// A row is a duplicate when its fingerprint matches a transaction already
/// in the store or an earlier row in the batch. The batch is all-or-nothing:
/// if any row fails validation the store is left unchanged.
pub fn apply(store: &mut LedgerStore, rows: &[NewTransaction]) -> Result<ImportStats> {
    apply_at(store, rows, Utc::now())
}

/// [`apply`] with rows lacking a timestamp stamped with `now`
pub fn apply_at(
    store: &mut LedgerStore,
    rows: &[NewTransaction],
    now: DateTime<Utc>,
) -> Result<ImportStats> {
    let mut seen: HashSet<String> = store.transactions().iter().map(fingerprint).collect();
    let mut staged = store.clone();
    let mut stats = ImportStats::default();

    for row in rows {
        let timestamp = row.timestamp.unwrap_or(now);
        let key = fingerprint_parts(row.title.trim(), row.amount.abs(), row.kind, timestamp);
        if !seen.insert(key) {
            stats.skipped += 1;
            continue;
        }
        staged.append(&NewTransaction {
            timestamp: Some(timestamp),
            ..row.clone()
        })?;
        stats.imported += 1;
    }

    *store = staged;
    info!(
        imported = stats.imported,
        skipped = stats.skipped,
        "Import applied"
    );
    Ok(stats)
}

/// Fingerprint of a stored transaction for deduplication
pub fn fingerprint(tx: &Transaction) -> String {
    fingerprint_parts(&tx.title, tx.amount, tx.kind, tx.timestamp)
}

fn fingerprint_parts(
    title: &str,
    amount: f64,
    kind: TransactionType,
    timestamp: DateTime<Utc>,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    hasher.update(amount.to_be_bytes());
    hasher.update(kind.as_str().as_bytes());
    hasher.update(timestamp.to_rfc3339().as_bytes());
    hex::encode(hasher.finalize())
}

/// Parse an amount string, handling currency symbols and commas
fn parse_amount(s: &str) -> Result<f64> {
    let cleaned: String = s
        .trim()
        .replace(['$', ',', ' '], "")
        .replace('(', "-")
        .replace(')', "");

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|a| a.is_finite())
        .ok_or_else(|| Error::Import(format!("Unable to parse amount: {}", s)))
}

/// Parse a timestamp in RFC 3339, `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD`
fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive.and_utc());
        }
    }

    if let Some(midnight) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }

    Err(Error::Import(format!("Unable to parse timestamp: {}", s)))
}
