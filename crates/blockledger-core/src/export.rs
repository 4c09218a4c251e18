//! Snapshot export and restore
//!
//! Writes the ledger document to a standalone JSON file, gzip compressed
//! when the path ends in `.gz`. The file has the same shape as the document
//! kept in the data slot, so an export can be restored into any database.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::info;

use crate::error::{Error, Result};
use crate::models::LedgerSnapshot;

fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

/// Write `snapshot` to `path` as pretty-printed JSON
pub fn write_snapshot(snapshot: &LedgerSnapshot, path: &Path) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);

    if is_gzip(path) {
        let mut encoder = GzEncoder::new(writer, Compression::default());
        serde_json::to_writer_pretty(&mut encoder, snapshot)?;
        encoder.finish()?.flush()?;
    } else {
        let mut writer = writer;
        serde_json::to_writer_pretty(&mut writer, snapshot)?;
        writer.flush()?;
    }

    info!(
        path = %path.display(),
        transactions = snapshot.transactions.len(),
        "Exported ledger snapshot"
    );
    Ok(())
}

/// Read a snapshot previously written by [`write_snapshot`]
pub fn read_snapshot(path: &Path) -> Result<LedgerSnapshot> {
    let reader = BufReader::new(File::open(path)?);

    let mut content = String::new();
    if is_gzip(path) {
        GzDecoder::new(reader).read_to_string(&mut content)?;
    } else {
        let mut reader = reader;
        reader.read_to_string(&mut content)?;
    }

    serde_json::from_str(&content).map_err(Error::Deserialization)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;
    use crate::store::LedgerStore;

    fn sample() -> LedgerSnapshot {
        let mut store = LedgerStore::new();
        store.add_chest("Main", 42.0).unwrap();
        store.add_goal("Elytra", 900.0, Some(100.0)).unwrap();
        store.add_investment("Fund", 10.0, None).unwrap();
        store
            .add_transaction("Pay", 99.99, TransactionType::Credit, "Work", None)
            .unwrap();
        store.snapshot()
    }

    #[test]
    fn test_plain_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");

        let snapshot = sample();

        write_snapshot(&snapshot, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"chests\""));
        assert!(content.contains("\"type\": \"credit\""));

        assert_eq!(read_snapshot(&path).unwrap(), snapshot);
    }

    #[test]
    fn test_gzip_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json.gz");
        let snapshot = sample();

        write_snapshot(&snapshot, &path).unwrap();

        let raw = std::fs::read(&path).unwrap();
        assert_eq!(&raw[..2], &[0x1f, 0x8b]);
        assert_eq!(read_snapshot(&path).unwrap(), snapshot);
    }

    #[test]
    fn test_read_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "[1, 2").unwrap();

        assert!(matches!(
            read_snapshot(&path).unwrap_err(),
            Error::Deserialization(_)
        ));
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_snapshot(Path::new("/nonexistent/ledger.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
