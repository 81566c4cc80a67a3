//! # Application State
//!
//! Shared state handed to every handler. The registry sits behind an
//! `Arc<dyn RegistryStore>`: a journal-backed store when `UNICRED_JOURNAL`
//! is set, an in-memory one otherwise. Store calls are synchronous and take
//! `parking_lot` locks that are released before any `.await`.

use std::path::PathBuf;
use std::sync::Arc;

use unicred_canonical::Canonicalizer;
use unicred_core::{SimulatedLedger, TransactionSource};
use unicred_store::{JournalStore, MemoryStore, RegistryStore, StoreError, WriteOptions};

/// Service configuration, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Journal file. `None` keeps the registry in memory.
    pub journal_path: Option<PathBuf>,
    /// `fsync` the journal after every record.
    pub journal_sync: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            journal_path: None,
            journal_sync: false,
        }
    }
}

impl AppConfig {
    /// Reads `PORT`, `UNICRED_JOURNAL` and `UNICRED_JOURNAL_SYNC`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            journal_path: lookup("UNICRED_JOURNAL")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            journal_sync: lookup("UNICRED_JOURNAL_SYNC")
                .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
                .unwrap_or(defaults.journal_sync),
        }
    }
}

/// Handler state.
#[derive(Clone)]
pub struct AppState {
    /// Authoritative registry.
    pub store: Arc<dyn RegistryStore>,
    /// Where credential hashes are anchored.
    pub ledger: Arc<dyn TransactionSource>,
    /// Canonicalizer used for hashing and verification.
    pub canonicalizer: Canonicalizer,
}

impl AppState {
    /// In-memory registry with a simulated ledger.
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// Wraps an existing store.
    pub fn with_store(store: Arc<dyn RegistryStore>) -> Self {
        Self {
            store,
            ledger: Arc::new(SimulatedLedger::new()),
            canonicalizer: Canonicalizer::new(),
        }
    }

    /// Builds state for `config`, opening and replaying the journal if one is
    /// configured.
    pub fn from_config(config: AppConfig) -> Result<Self, StoreError> {
        let store: Arc<dyn RegistryStore> = match &config.journal_path {
            Some(path) => {
                let options = WriteOptions {
                    sync: config.journal_sync,
                    ..WriteOptions::default()
                };
                Arc::new(JournalStore::open(path, options)?)
            }
            None => {
                tracing::warn!("UNICRED_JOURNAL not set; registry is in memory only");
                Arc::new(MemoryStore::new())
            }
        };
        Ok(Self::with_store(store))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        assert_eq!(AppConfig::from_lookup(lookup(&[])), AppConfig::default());
    }

    #[test]
    fn reads_variables() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PORT", "9090"),
            ("UNICRED_JOURNAL", "/var/lib/unicred/registry.ucj"),
            ("UNICRED_JOURNAL_SYNC", "true"),
        ]));
        assert_eq!(config.port, 9090);
        assert_eq!(
            config.journal_path,
            Some(PathBuf::from("/var/lib/unicred/registry.ucj"))
        );
        assert!(config.journal_sync);
    }

    #[test]
    fn bad_port_falls_back() {
        assert_eq!(AppConfig::from_lookup(lookup(&[("PORT", "http")])).port, 8080);
        assert_eq!(
            AppConfig::from_lookup(lookup(&[("UNICRED_JOURNAL", "  ")])).journal_path,
            None
        );
    }
}
