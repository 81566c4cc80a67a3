//! Record filtering for registry listings.

use unicred_core::{Region, UniversityRecord, UniversityType, VerificationStatus};

/// Selects university records in a listing.
pub trait RecordFilter: Send + Sync {
    /// Returns true if the record should be listed.
    fn matches(&self, record: &UniversityRecord) -> bool;
}

/// Matches every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllRecords;

impl RecordFilter for AllRecords {
    fn matches(&self, _record: &UniversityRecord) -> bool {
        true
    }
}

/// Filter by verification status.
#[derive(Debug, Clone, Copy)]
pub struct StatusFilter(pub VerificationStatus);

impl RecordFilter for StatusFilter {
    fn matches(&self, record: &UniversityRecord) -> bool {
        record.verification_status == self.0
    }
}

/// Filter by state or union territory.
#[derive(Debug, Clone, Copy)]
pub struct RegionFilter(pub Region);

impl RecordFilter for RegionFilter {
    fn matches(&self, record: &UniversityRecord) -> bool {
        record.state == self.0
    }
}

/// Filter by university type.
#[derive(Debug, Clone, Copy)]
pub struct TypeFilter(pub UniversityType);

impl RecordFilter for TypeFilter {
    fn matches(&self, record: &UniversityRecord) -> bool {
        record.kind == self.0
    }
}

/// Composite filter: all filters must match (AND). Empty matches everything.
#[derive(Default)]
pub struct AndFilter {
    /// Filters to combine.
    pub filters: Vec<Box<dyn RecordFilter>>,
}

impl AndFilter {
    /// Adds a filter.
    pub fn with(mut self, filter: impl RecordFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }
}

impl RecordFilter for AndFilter {
    fn matches(&self, record: &UniversityRecord) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }
}

/// Composite filter: any filter must match (OR). Empty matches nothing.
#[derive(Default)]
pub struct OrFilter {
    /// Filters to combine.
    pub filters: Vec<Box<dyn RecordFilter>>,
}

impl OrFilter {
    /// Adds a filter.
    pub fn with(mut self, filter: impl RecordFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }
}

impl RecordFilter for OrFilter {
    fn matches(&self, record: &UniversityRecord) -> bool {
        self.filters.iter().any(|f| f.matches(record))
    }
}
