use anyhow::{Context, Result};
use chrono::Utc;
use stig_cli::config::{Config, Overrides};
use stig_cli::pipeline::{catalog_report, check_checklist, generate_component};
use stig_cli::types::{GenerateRequest, GenerateResult};
use stig_map::RandomIds;

use crate::cli::{CatalogArgs, ComponentArgs, ReportFormatArg, ValidateArgs};
use crate::summary::{print_catalog_report, print_validation};

pub fn run_generate_component(args: &ComponentArgs, config: &Config) -> Result<GenerateResult> {
    let settings = config.resolve(&Overrides {
        title: args.title.clone(),
        source: args.source.clone(),
        cci_file: args.cci_file.clone(),
    });
    let request = GenerateRequest {
        input: args.input.clone(),
        output: args.output.clone(),
        cci_file: settings.cci_file,
        title: settings.title,
        source: settings.source,
        back_matter: !args.no_back_matter,
    };
    generate_component(&request, Utc::now(), &mut RandomIds)
}

/// Returns whether the checklist passed validation.
pub fn run_validate(args: &ValidateArgs) -> Result<bool> {
    let (checklist, report) = check_checklist(&args.input)?;
    print_validation(&args.input, &checklist, &report);
    Ok(report.is_valid())
}

pub fn run_catalog(args: &CatalogArgs, config: &Config) -> Result<()> {
    let settings = config.resolve(&Overrides {
        cci_file: args.cci_file.clone(),
        ..Overrides::default()
    });
    let report = catalog_report(settings.cci_file.as_deref())?;
    match args.format {
        ReportFormatArg::Table => print_catalog_report(&report),
        ReportFormatArg::Json => {
            let json = serde_json::to_string_pretty(&report).context("serialize catalog report")?;
            println!("{json}");
        }
    }
    Ok(())
}
