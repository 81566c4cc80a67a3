//! Validate command implementation.
//!
//! Pre-flight check: runs the same validator the server runs on submission,
//! without opening any registry.

use crate::commands::read_input;
use crate::output;
use unicred_core::{validate, RegistrationCandidate};

pub fn run(input: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let json_str = read_input(input)?;
    let candidate: RegistrationCandidate =
        serde_json::from_str(&json_str).map_err(|e| format!("Invalid JSON: {}", e))?;

    match validate(&candidate) {
        Ok(normalized) => {
            println!("{}", output::format_json(&normalized));
            Ok(())
        }
        Err(errors) => {
            println!("{}", output::format_json(&errors));
            Err(format!("Validation failed ({} field(s))", errors.len()).into())
        }
    }
}
