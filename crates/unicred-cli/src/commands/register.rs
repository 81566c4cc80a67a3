//! Register command implementation.

use crate::commands::{open_store, read_input};
use crate::output;
use unicred_core::RegistrationCandidate;
use unicred_store::{register, RegistrationError};

pub fn run(journal: String, input: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let json_str = read_input(input)?;
    let candidate: RegistrationCandidate =
        serde_json::from_str(&json_str).map_err(|e| format!("Invalid JSON: {}", e))?;

    let store = open_store(&journal)?;
    match register(&store, &candidate) {
        Ok(record) => {
            println!("{}", output::format_json(&record));
            Ok(())
        }
        Err(RegistrationError::Invalid(errors)) => {
            println!("{}", output::format_json(&errors));
            Err(format!("Validation failed ({} field(s))", errors.len()).into())
        }
        Err(RegistrationError::Duplicate(conflict)) => Err(format!(
            "University with this domain or email already exists ({})",
            conflict.existing
        )
        .into()),
        Err(e) => Err(e.into()),
    }
}
