//! Command implementations.

pub mod canonicalize;
pub mod credentials;
pub mod decide;
pub mod hash;
pub mod issue;
pub mod list;
pub mod register;
pub mod validate;
pub mod verify;

use std::io::{self, Read};
use unicred_store::{JournalStore, WriteOptions};

/// Reads input from a file, or stdin when no path is given.
pub fn read_input(input: Option<String>) -> Result<String, Box<dyn std::error::Error>> {
    match input {
        Some(path) => Ok(std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read file {}: {}", path, e))?),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Opens (or creates) the journal-backed registry, syncing every append.
pub fn open_store(journal: &str) -> Result<JournalStore, Box<dyn std::error::Error>> {
    let options = WriteOptions {
        sync: true,
        ..WriteOptions::default()
    };
    tracing::debug!(journal, "opening registry");
    let store = JournalStore::open(journal, options)
        .map_err(|e| format!("Failed to open journal {}: {}", journal, e))?;
    Ok(store)
}
