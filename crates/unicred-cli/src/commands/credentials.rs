//! Credentials command implementation.

use crate::commands::open_store;
use crate::output;
use serde_json::json;
use unicred_canonical::Canonicalizer;
use unicred_core::{verify_issued, CredentialVerdict};
use unicred_store::RegistryStore;

pub fn run(journal: String, json_output: bool, strict: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(&journal)?;
    let canonicalizer = Canonicalizer::new();

    if !json_output {
        output::print_credential_header();
    }

    let mut all_ok = true;
    for credential in store.credentials()? {
        let verdict = verify_issued(&credential, &canonicalizer)?;
        all_ok = all_ok && verdict == CredentialVerdict::Authentic;

        if json_output {
            let line = json!({
                "credential_hash": credential.credential_hash,
                "student_name": credential.data.student_name,
                "transaction_id": credential.transaction_id,
                "verdict": verdict,
            });
            println!("{}", line);
        } else {
            println!("{}", output::format_credential_row(&credential, &verdict));
        }
    }

    if strict && !all_ok {
        return Err("One or more credentials failed verification".into());
    }
    Ok(())
}
