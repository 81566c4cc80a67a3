//! Output formatting utilities.

use serde::Serialize;
use unicred_core::{IssuedCredential, UniversityRecord};

/// Formats a value as pretty JSON.
pub fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Wire label of a serde unit enum (`"authentic"`, `"hash_mismatch"`, ...).
pub fn label<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => "?".to_string(),
    }
}

/// Prints the registration table header.
#[allow(clippy::print_literal)]
pub fn print_university_header() {
    println!(
        "{:<36} {:<9} {:<8} {:<24} {}",
        "ID", "STATUS", "TYPE", "DOMAIN", "LEGAL_NAME"
    );
    println!("{}", "-".repeat(110));
}

/// Formats a registration as a table row.
pub fn format_university_row(record: &UniversityRecord) -> String {
    format!(
        "{:<36} {:<9} {:<8} {:<24} {}",
        record.id,
        record.verification_status.as_str(),
        record.kind.as_str(),
        truncate(record.website_domain.as_str(), 24),
        record.legal_name
    )
}

/// Prints the credential table header.
#[allow(clippy::print_literal)]
pub fn print_credential_header() {
    println!(
        "{:<64} {:<16} {}",
        "CREDENTIAL_HASH", "VERDICT", "STUDENT"
    );
    println!("{}", "-".repeat(110));
}

/// Formats an issued credential and its verdict as a table row.
pub fn format_credential_row<V: Serialize>(credential: &IssuedCredential, verdict: &V) -> String {
    format!(
        "{:<64} {:<16} {}",
        credential.credential_hash,
        label(verdict),
        credential.data.student_name
    )
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
