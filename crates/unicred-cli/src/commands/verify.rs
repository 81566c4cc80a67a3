//! Verify command implementation.

use crate::commands::read_input;
use crate::output;
use unicred_canonical::{verify_raw, Canonicalizer, ContentHash, HashVerdict};

pub fn run(hash: String, input: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let claimed = ContentHash::parse(hash.trim()).map_err(|e| format!("Invalid hash: {}", e))?;

    // Files saved by editors end in a newline the stored bytes never had.
    let raw = read_input(input)?;
    let raw_json = raw.trim_end_matches(['\n', '\r']);

    let verdict = verify_raw(raw_json, &claimed, &Canonicalizer::new())?;
    println!("VERDICT: {}", output::label(&verdict));

    if verdict != HashVerdict::Authentic {
        return Err(format!("Credential does not match hash {}", claimed).into());
    }
    Ok(())
}
