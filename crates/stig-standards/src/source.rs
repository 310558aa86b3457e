//! Catalog source selection and the embedded default CCI list.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use stig_model::CciControlMap;
use tracing::{info, warn};

use crate::catalog::CciCatalog;
use crate::error::CatalogError;
use crate::policy::ReferencePolicy;

/// CCI list compiled into the binary, used when no catalog path is given.
///
/// This is a small subset of the DISA list. Most rules of a real checklist
/// resolve to `unknown` against it.
pub const EMBEDDED_CCI_LIST: &[u8] = include_bytes!("../assets/cci_list.xml");

/// Shown whenever the embedded subset stands in for a real CCI list.
pub const EMBEDDED_CATALOG_NOTE: &str =
    "using the embedded CCI subset; pass --cci-file with the full DISA CCI list for complete coverage";

static EMBEDDED_CATALOG: OnceLock<CciCatalog> = OnceLock::new();

/// The parsed embedded catalog, parsed once per process.
pub fn embedded_catalog() -> Result<&'static CciCatalog, CatalogError> {
    if let Some(catalog) = EMBEDDED_CATALOG.get() {
        return Ok(catalog);
    }
    let catalog = CciCatalog::parse(EMBEDDED_CCI_LIST)?;
    Ok(EMBEDDED_CATALOG.get_or_init(|| catalog))
}

/// Where the CCI list is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Embedded,
    File(PathBuf),
}

impl CatalogSource {
    /// `None` or an empty path selects the embedded catalog.
    pub fn from_path(path: Option<&Path>) -> Self {
        match path {
            Some(path) if !path.as_os_str().is_empty() => Self::File(path.to_path_buf()),
            _ => Self::Embedded,
        }
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self, Self::Embedded)
    }

    pub fn read_bytes(&self) -> Result<Cow<'static, [u8]>, CatalogError> {
        match self {
            Self::Embedded => Ok(Cow::Borrowed(EMBEDDED_CCI_LIST)),
            Self::File(path) => std::fs::read(path)
                .map(Cow::Owned)
                .map_err(|source| CatalogError::io(path, source)),
        }
    }

    pub fn load(&self) -> Result<Cow<'static, CciCatalog>, CatalogError> {
        match self {
            Self::Embedded => embedded_catalog().map(Cow::Borrowed),
            Self::File(_) => {
                let bytes = self.read_bytes()?;
                CciCatalog::parse(&bytes).map(Cow::Owned)
            }
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Embedded => f.write_str("embedded"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Load the catalog from `source` and build its control mapping.
pub fn load_control_map(
    source: &CatalogSource,
    policy: &ReferencePolicy,
) -> Result<CciControlMap, CatalogError> {
    if source.is_embedded() {
        warn!("{EMBEDDED_CATALOG_NOTE}");
    }
    let catalog = source.load()?;
    let map = catalog.control_map(policy);
    info!(
        source = %source,
        item_count = catalog.items.len(),
        mapped_count = map.len(),
        "CCI catalog loaded"
    );
    Ok(map)
}
