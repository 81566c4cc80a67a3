//! Hash command implementation.

use crate::commands::read_input;
use serde_json::Value;
use unicred_canonical::{compute_content_hash, Canonicalizer};

pub fn run(input: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let json_str = read_input(input)?;
    let value: Value = serde_json::from_str(&json_str).map_err(|e| format!("Invalid JSON: {}", e))?;

    let payload = compute_content_hash(&value, &Canonicalizer::new())?;
    println!("{}", payload.hash);
    Ok(())
}
