use std::path::PathBuf;

use stig_map::StigSummary;

/// Inputs to one `generate component` run after configuration is resolved.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub cci_file: Option<PathBuf>,
    pub title: Option<String>,
    pub source: String,
    pub back_matter: bool,
}

#[derive(Debug)]
pub struct GenerateResult {
    pub checklist_title: String,
    pub output: PathBuf,
    /// `embedded` or the catalog path.
    pub catalog: String,
    pub embedded_catalog: bool,
    pub mapped_ccis: usize,
    pub requirement_count: usize,
    pub stigs: Vec<StigSummary>,
}

impl GenerateResult {
    pub fn unknown_count(&self) -> usize {
        self.stigs.iter().map(|stig| stig.unknown).sum()
    }
}
