#![deny(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod hash;
pub mod normalize;
pub mod policy;
pub mod report;
pub mod source;

pub use crate::catalog::{CatalogMetadata, CciCatalog, CciItem, CciReference, Resolution};
pub use crate::error::CatalogError;
pub use crate::normalize::normalize_control_id;
pub use crate::policy::{DEFAULT_REFERENCE_TITLES, ReferencePolicy};
pub use crate::report::{CatalogCounts, CatalogReport};
pub use crate::source::{
    CatalogSource, EMBEDDED_CATALOG_NOTE, EMBEDDED_CCI_LIST, embedded_catalog, load_control_map,
};

/// Parse a CCI list and build its control mapping under the default policy.
pub fn parse_cci_list(bytes: &[u8]) -> Result<stig_model::CciControlMap, CatalogError> {
    let catalog = CciCatalog::parse(bytes)?;
    Ok(catalog.control_map(&ReferencePolicy::default()))
}
