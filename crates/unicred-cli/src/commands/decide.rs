//! Approve and reject command implementations.

use crate::commands::open_store;
use crate::output;
use unicred_core::AuthorityAction;
use unicred_store::RegistryStore;
use uuid::Uuid;

pub fn approve(journal: String, id: String) -> Result<(), Box<dyn std::error::Error>> {
    run(&journal, &id, AuthorityAction::Approve)
}

pub fn reject(journal: String, id: String, reason: String) -> Result<(), Box<dyn std::error::Error>> {
    run(&journal, &id, AuthorityAction::Reject { reason })
}

fn run(journal: &str, id: &str, action: AuthorityAction) -> Result<(), Box<dyn std::error::Error>> {
    let id = Uuid::parse_str(id.trim()).map_err(|e| format!("Invalid university id: {}", e))?;
    let store = open_store(journal)?;
    let record = store.decide(id, &action)?;
    println!("{}", output::format_json(&record));
    Ok(())
}
