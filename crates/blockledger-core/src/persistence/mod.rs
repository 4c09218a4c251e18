//! Persistence gateway with pluggable slot storage
//!
//! # Architecture
//!
//! - `SlotStore` trait defines a durable key-value slot interface
//! - `SqliteSlots` keeps slots in an (optionally encrypted) SQLite database
//! - `MemorySlots` keeps slots in process memory
//! - `LedgerGateway` turns a `LedgerStore` into a JSON document under the
//!   data key, and the credential record into a document under the user key
//!
//! The gateway holds no copy of the ledger; it only transforms at the
//! boundary. It assumes it is the only writer of its slots.

use tracing::{debug, info, warn};

use crate::config::StorageConfig;
use crate::error::{Error, Result};
use crate::models::{CredentialRecord, LedgerSnapshot};
use crate::store::LedgerStore;

mod memory;
mod sqlite;

pub use memory::MemorySlots;
pub use sqlite::{SqliteSlots, DB_KEY_ENV};

/// A durable key-value slot store
pub trait SlotStore: Send + Sync {
    /// Human-readable name for this backend
    fn name(&self) -> &str;

    /// Read the value stored under `key`, if any
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing an absent key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

/// Saves and loads the ledger and credential documents
pub struct LedgerGateway<S: SlotStore> {
    slots: S,
    data_key: String,
    user_key: String,
}

impl<S: SlotStore> LedgerGateway<S> {
    /// Create a gateway over `slots` using the configured keys
    pub fn new(slots: S, storage: &StorageConfig) -> Self {
        Self {
            slots,
            data_key: storage.data_key.clone(),
            user_key: storage.user_key.clone(),
        }
    }

    /// Create a gateway using the default slot keys
    pub fn with_default_keys(slots: S) -> Self {
        Self::new(slots, &StorageConfig::default())
    }

    /// Access the underlying slot store
    pub fn slots(&self) -> &S {
        &self.slots
    }

    /// Slot key holding the ledger document
    pub fn data_key(&self) -> &str {
        &self.data_key
    }

    /// Persist the store, overwriting any previous document
    pub fn save(&self, store: &LedgerStore) -> Result<()> {
        self.save_snapshot(&store.snapshot())
    }

    /// Persist a snapshot, overwriting any previous document
    pub fn save_snapshot(&self, snapshot: &LedgerSnapshot) -> Result<()> {
        let document = serde_json::to_string(snapshot)?;

        self.slots
            .write(&self.data_key, &document)
            .map_err(|e| {
                warn!(backend = self.slots.name(), error = %e, "Failed to save ledger");
                Error::Storage(format!("could not write ledger: {}", e))
            })?;

        debug!(
            chests = snapshot.chests.len(),
            goals = snapshot.goals.len(),
            investments = snapshot.investments.len(),
            transactions = snapshot.transactions.len(),
            "Ledger saved"
        );
        Ok(())
    }

    /// Load the persisted ledger
    ///
    /// An absent slot is a first run and yields an empty snapshot. A slot
    /// holding something other than a ledger document is an error.
    pub fn load(&self) -> Result<LedgerSnapshot> {
        let document = self.read_slot(&self.data_key)?;

        match document {
            None => {
                debug!("No saved ledger, starting empty");
                Ok(LedgerSnapshot::default())
            }
            Some(document) => serde_json::from_str(&document).map_err(Error::Deserialization),
        }
    }

    /// Load the persisted ledger into a store
    pub fn load_store(&self) -> Result<LedgerStore> {
        self.load().map(LedgerStore::from_snapshot)
    }

    /// Register a username, replacing any existing credential
    pub fn signup(&self, username: &str) -> Result<CredentialRecord> {
        let username = username.trim();
        if username.is_empty() {
            return Err(Error::Validation("Username must not be empty".to_string()));
        }

        let record = CredentialRecord::new(username);
        let document = serde_json::to_string(&record)?;
        self.slots
            .write(&self.user_key, &document)
            .map_err(|e| Error::Storage(format!("could not write credential: {}", e)))?;

        info!(username = %record.username, "Adventurer registered");
        Ok(record)
    }

    /// Check `username` against the stored credential
    pub fn login(&self, username: &str) -> Result<CredentialRecord> {
        match self.current_user()? {
            Some(record) if record.username == username.trim() => Ok(record),
            Some(_) => Err(Error::Auth(format!("Unknown adventurer: {}", username))),
            None => Err(Error::Auth("No adventurer registered yet".to_string())),
        }
    }

    /// The stored credential, if any
    pub fn current_user(&self) -> Result<Option<CredentialRecord>> {
        self.read_slot(&self.user_key)?
            .map(|document| serde_json::from_str(&document).map_err(Error::Deserialization))
            .transpose()
    }

    /// Remove the credential; the ledger is left untouched
    pub fn logout(&self) -> Result<()> {
        self.slots
            .remove(&self.user_key)
            .map_err(|e| Error::Storage(format!("could not remove credential: {}", e)))
    }

    fn read_slot(&self, key: &str) -> Result<Option<String>> {
        self.slots.read(key).map_err(|e| {
            warn!(backend = self.slots.name(), key, error = %e, "Failed to read slot");
            Error::Storage(format!("could not read {}: {}", key, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;
    use chrono::{TimeZone, Utc};

    /// Slot store that refuses every operation
    struct UnavailableSlots;

    impl SlotStore for UnavailableSlots {
        fn name(&self) -> &str {
            "unavailable"
        }

        fn read(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::Storage("storage disabled".to_string()))
        }

        fn write(&self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::Storage("quota exceeded".to_string()))
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Err(Error::Storage("storage disabled".to_string()))
        }
    }

    fn populated_store() -> LedgerStore {
        let mut store = LedgerStore::new();
        store.add_chest("Main Chest", 1200.0).unwrap();
        store.add_chest("Pocket", 35.5).unwrap();
        store.add_goal("Netherite Armor", 5000.0, Some(750.0)).unwrap();
        store
            .add_investment("Index Fund", 3000.0, Some("https://example.com".to_string()))
            .unwrap();
        store.add_investment("Gold", 150.0, None).unwrap();
        for (i, kind) in [TransactionType::Credit, TransactionType::Debit]
            .iter()
            .enumerate()
        {
            store
                .add_transaction(
                    &format!("Entry {}", i),
                    10.0 * (i + 1) as f64,
                    *kind,
                    "Bank",
                    Some(Utc.with_ymd_and_hms(2024, 1, 1 + i as u32, 8, 0, 0).unwrap()),
                )
                .unwrap();
        }
        store
    }

    #[test]
    fn test_load_absent_is_empty() {
        let gateway = LedgerGateway::with_default_keys(MemorySlots::new());
        let snapshot = gateway.load().unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_round_trip_preserves_everything() {
        let gateway = LedgerGateway::with_default_keys(MemorySlots::new());
        let store = populated_store();

        gateway.save(&store).unwrap();
        let loaded = gateway.load_store().unwrap();

        assert_eq!(loaded, store);
        assert_eq!(loaded.chests()[0].name, "Main Chest");
        assert_eq!(loaded.transactions()[1].title, "Entry 1");
    }

    #[test]
    fn test_reset_then_round_trip_is_empty() {
        let gateway = LedgerGateway::with_default_keys(MemorySlots::new());
        let mut store = populated_store();
        gateway.save(&store).unwrap();

        store.reset_all();
        gateway.save(&store).unwrap();

        let snapshot = gateway.load().unwrap();
        assert_eq!(snapshot, LedgerSnapshot::default());
    }

    #[test]
    fn test_save_overwrites_previous_document() {
        let gateway = LedgerGateway::with_default_keys(MemorySlots::new());
        let mut store = LedgerStore::new();
        store.add_chest("First", 1.0).unwrap();
        gateway.save(&store).unwrap();

        store.add_chest("Second", 2.0).unwrap();
        gateway.save(&store).unwrap();

        assert_eq!(gateway.load().unwrap().chests.len(), 2);
    }

    #[test]
    fn test_persisted_document_shape() {
        let gateway = LedgerGateway::with_default_keys(MemorySlots::new());
        gateway.save(&populated_store()).unwrap();

        let raw = gateway.slots().read("blockledger_data").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

        for key in ["chests", "goals", "investments", "transactions"] {
            assert!(value[key].is_array(), "missing {}", key);
        }
        assert_eq!(value["transactions"][0]["type"], "credit");
        assert!(value["investments"][1]["link"].is_null());
    }

    #[test]
    fn test_malformed_document_is_deserialization_error() {
        let slots = MemorySlots::new();
        slots.write("blockledger_data", "{not json").unwrap();
        let gateway = LedgerGateway::with_default_keys(slots);

        let err = gateway.load().unwrap_err();
        assert!(matches!(err, Error::Deserialization(_)));
    }

    #[test]
    fn test_wrong_shape_is_deserialization_error() {
        let slots = MemorySlots::new();
        slots
            .write("blockledger_data", r#"{"chests": [{"name": "no id"}]}"#)
            .unwrap();
        let gateway = LedgerGateway::with_default_keys(slots);

        assert!(matches!(
            gateway.load().unwrap_err(),
            Error::Deserialization(_)
        ));
    }

    #[test]
    fn test_unavailable_storage_returns_error() {
        let gateway = LedgerGateway::with_default_keys(UnavailableSlots);

        let err = gateway.save(&populated_store()).unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
        assert!(matches!(gateway.load().unwrap_err(), Error::Storage(_)));
    }

    #[test]
    fn test_custom_keys() {
        let storage = StorageConfig {
            data_key: "ledger".to_string(),
            user_key: "who".to_string(),
        };
        let gateway = LedgerGateway::new(MemorySlots::new(), &storage);
        gateway.save(&populated_store()).unwrap();
        gateway.signup("steve").unwrap();

        assert!(gateway.slots().read("ledger").unwrap().is_some());
        assert!(gateway.slots().read("who").unwrap().is_some());
        assert!(gateway.slots().read("blockledger_data").unwrap().is_none());
    }

    #[test]
    fn test_signup_and_login() {
        let gateway = LedgerGateway::with_default_keys(MemorySlots::new());

        assert!(matches!(gateway.login("steve").unwrap_err(), Error::Auth(_)));

        let record = gateway.signup("steve").unwrap();
        assert_eq!(gateway.login("steve").unwrap(), record);
        assert!(matches!(gateway.login("alex").unwrap_err(), Error::Auth(_)));
        assert!(gateway.signup("  ").is_err());
    }

    #[test]
    fn test_credential_document_has_no_password() {
        let gateway = LedgerGateway::with_default_keys(MemorySlots::new());
        gateway.signup("steve").unwrap();

        let raw = gateway.slots().read("blockledger_user").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 2);
        assert!(value.get("id").is_some());
        assert_eq!(value["username"], "steve");
    }

    #[test]
    fn test_logout_keeps_ledger() {
        let gateway = LedgerGateway::with_default_keys(MemorySlots::new());
        gateway.signup("steve").unwrap();
        gateway.save(&populated_store()).unwrap();

        gateway.logout().unwrap();

        assert!(gateway.current_user().unwrap().is_none());
        assert_eq!(gateway.load().unwrap().chests.len(), 2);
    }
}
