#![deny(unsafe_code)]

use serde::Serialize;

use crate::catalog::{CatalogMetadata, CciCatalog, Resolution};
use crate::error::CatalogError;
use crate::hash::sha256_hex;
use crate::policy::ReferencePolicy;
use crate::source::CatalogSource;

/// Summary of a CCI catalog and how it resolves under a policy.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogReport {
    pub schema: String,
    pub schema_version: u32,
    pub source: String,
    pub sha256: String,
    pub metadata: CatalogMetadata,
    pub counts: CatalogCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogCounts {
    pub items: usize,
    pub mapped: usize,
    pub no_preferred_reference: usize,
    pub unmatched_index: usize,
    pub invalid_token: usize,
    pub missing_id: usize,
    pub duplicate_ids: usize,
}

impl CatalogCounts {
    pub fn skipped(&self) -> usize {
        self.no_preferred_reference + self.unmatched_index + self.invalid_token + self.missing_id
    }
}

impl CatalogReport {
    pub fn build(source: &CatalogSource, policy: &ReferencePolicy) -> Result<Self, CatalogError> {
        let bytes = source.read_bytes()?;
        let catalog = CciCatalog::parse(&bytes)?;
        Ok(Self::from_catalog(source, &bytes, &catalog, policy))
    }

    pub fn from_catalog(
        source: &CatalogSource,
        bytes: &[u8],
        catalog: &CciCatalog,
        policy: &ReferencePolicy,
    ) -> Self {
        Self {
            schema: "stigctl.catalog-report".to_string(),
            schema_version: 1,
            source: source.to_string(),
            sha256: sha256_hex(bytes),
            metadata: catalog.metadata.clone(),
            counts: count_resolutions(catalog, policy),
        }
    }
}

fn count_resolutions(catalog: &CciCatalog, policy: &ReferencePolicy) -> CatalogCounts {
    let mut counts = CatalogCounts {
        items: catalog.items.len(),
        ..CatalogCounts::default()
    };
    let mut seen = std::collections::BTreeSet::new();
    for item in &catalog.items {
        if item.id.is_empty() {
            counts.missing_id += 1;
            continue;
        }
        if !seen.insert(item.id.as_str()) {
            counts.duplicate_ids += 1;
        }
        match item.resolve(policy) {
            Resolution::Mapped(_) => counts.mapped += 1,
            Resolution::NoPreferredReference => counts.no_preferred_reference += 1,
            Resolution::UnmatchedIndex(_) => counts.unmatched_index += 1,
            Resolution::InvalidToken(_) => counts.invalid_token += 1,
        }
    }
    counts
}
