use std::path::Path;

use stig_model::Checklist;
use tracing::{debug, info};

use crate::error::ChecklistError;
use crate::validate::validate_checklist;

/// Parse CKLB JSON bytes. `origin` is only used for error context.
pub fn parse_checklist(bytes: &[u8], origin: &Path) -> Result<Checklist, ChecklistError> {
    serde_json::from_slice(bytes).map_err(|source| ChecklistError::json(origin, source))
}

pub fn load_checklist(path: &Path) -> Result<Checklist, ChecklistError> {
    let bytes = std::fs::read(path).map_err(|source| ChecklistError::io(path, source))?;
    let checklist = parse_checklist(&bytes, path)?;
    debug!(
        path = %path.display(),
        stig_count = checklist.stigs.len(),
        rule_count = checklist.rule_count(),
        "checklist loaded"
    );
    Ok(checklist)
}

/// Load a checklist and reject it when presence validation fails.
pub fn load_valid_checklist(path: &Path) -> Result<Checklist, ChecklistError> {
    let checklist = load_checklist(path)?;
    let report = validate_checklist(&checklist);
    if !report.is_valid() {
        return Err(ChecklistError::Invalid { report });
    }
    info!(title = %checklist.title, "checklist validated");
    Ok(checklist)
}

/// Write a checklist as pretty-printed CKLB JSON.
pub fn save_checklist(checklist: &Checklist, path: &Path) -> Result<(), ChecklistError> {
    let json =
        serde_json::to_vec_pretty(checklist).map_err(|source| ChecklistError::json(path, source))?;
    std::fs::write(path, json).map_err(|source| ChecklistError::Write {
        path: path.to_path_buf(),
        source,
    })
}
