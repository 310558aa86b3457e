//! Command pipelines shared by the binary and its tests.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use stig_ingest::{ValidationReport, load_checklist, load_valid_checklist, validate_checklist};
use stig_map::{ComponentOptions, IdGenerator, build_component_definition, summarize_mapping};
use stig_model::{Checklist, OscalDocument};
use stig_standards::{CatalogReport, CatalogSource, ReferencePolicy, load_control_map};
use tracing::{info, info_span};

use crate::types::{GenerateRequest, GenerateResult};

/// Convert one checklist into a component definition file.
pub fn generate_component(
    request: &GenerateRequest,
    now: DateTime<Utc>,
    ids: &mut dyn IdGenerator,
) -> Result<GenerateResult> {
    let span = info_span!("generate", input = %request.input.display());
    let _guard = span.enter();

    let checklist = load_valid_checklist(&request.input).context("failed to read STIG checklist")?;

    let source = CatalogSource::from_path(request.cci_file.as_deref());
    let controls = load_control_map(&source, &ReferencePolicy::default())
        .context("failed to parse CCI document")?;

    let mut options = ComponentOptions::new(now).with_source(request.source.clone());
    if let Some(title) = &request.title {
        options = options.with_title(title.clone());
    }
    if request.back_matter {
        options = options.with_back_matter(input_file_name(&request.input));
    }

    let document = build_component_definition(&checklist, &controls, &options, ids);
    write_document(&document, &request.output).context("failed to write OSCAL component")?;
    info!(output = %request.output.display(), "component definition written");

    Ok(GenerateResult {
        checklist_title: checklist.title.clone(),
        output: request.output.clone(),
        catalog: source.to_string(),
        embedded_catalog: source.is_embedded(),
        mapped_ccis: controls.len(),
        requirement_count: document.component_definition.implemented_requirements().count(),
        stigs: summarize_mapping(&checklist, &controls),
    })
}

/// Pretty JSON with a trailing newline, creating parent directories.
pub fn write_document(document: &OscalDocument, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let mut json = serde_json::to_string_pretty(document).context("serialize component")?;
    json.push('\n');
    std::fs::write(path, json).with_context(|| format!("write {}", path.display()))
}

/// Load a checklist and run presence validation without failing on errors.
pub fn check_checklist(path: &Path) -> Result<(Checklist, ValidationReport)> {
    let checklist = load_checklist(path)?;
    let report = validate_checklist(&checklist);
    Ok((checklist, report))
}

pub fn catalog_report(cci_file: Option<&Path>) -> Result<CatalogReport> {
    let source = CatalogSource::from_path(cci_file);
    CatalogReport::build(&source, &ReferencePolicy::default())
        .with_context(|| format!("failed to parse CCI document ({source})"))
}

fn input_file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
