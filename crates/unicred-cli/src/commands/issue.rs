//! Issue command implementation.

use crate::commands::{open_store, read_input};
use crate::output;
use unicred_canonical::Canonicalizer;
use unicred_core::{CredentialData, SimulatedLedger};
use unicred_store::{issue_credential, IssuanceError};

pub fn run(
    journal: String,
    wallet: String,
    input: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_str = read_input(input)?;
    let data: CredentialData =
        serde_json::from_str(&json_str).map_err(|e| format!("Invalid JSON: {}", e))?;

    let store = open_store(&journal)?;
    let ledger = SimulatedLedger::new();
    match issue_credential(&store, &ledger, &Canonicalizer::new(), data, &wallet) {
        Ok(credential) => {
            println!("{}", output::format_json(&credential));
            Ok(())
        }
        Err(IssuanceError::Incomplete(missing)) => Err(format!(
            "Please fill in all credential fields (missing: {})",
            missing.join(", ")
        )
        .into()),
        Err(e) => Err(e.into()),
    }
}
