//! Canonicalize command implementation.

use crate::commands::read_input;
use serde_json::Value;
use unicred_canonical::Canonicalizer;

pub fn run(input: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let json_str = read_input(input)?;
    let value: Value = serde_json::from_str(&json_str).map_err(|e| format!("Invalid JSON: {}", e))?;

    let canonical = Canonicalizer::new()
        .canonicalize(&value)
        .map_err(|e| format!("Canonicalization failed: {}", e))?;

    println!("{}", canonical);
    Ok(())
}
