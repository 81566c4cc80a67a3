//! List command implementation.

use crate::commands::open_store;
use crate::output;
use unicred_core::{Region, UniversityType, VerificationStatus};
use unicred_store::{AndFilter, RegionFilter, RegistryStore, StatusFilter, TypeFilter};

pub fn run(
    journal: String,
    status: Option<String>,
    state: Option<String>,
    kind: Option<String>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut filter = AndFilter::default();
    if let Some(status) = status {
        let status: VerificationStatus = status.parse()?;
        filter = filter.with(StatusFilter(status));
    }
    if let Some(state) = state {
        let region: Region = state.parse()?;
        filter = filter.with(RegionFilter(region));
    }
    if let Some(kind) = kind {
        let kind: UniversityType = kind.parse()?;
        filter = filter.with(TypeFilter(kind));
    }

    let store = open_store(&journal)?;
    let records = store.universities(&filter)?;

    if json {
        for record in &records {
            println!("{}", serde_json::to_string(record)?);
        }
    } else {
        output::print_university_header();
        for record in &records {
            println!("{}", output::format_university_row(record));
        }
    }

    Ok(())
}
