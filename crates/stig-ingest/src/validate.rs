//! Presence validation for CKLB checklists.
//!
//! Checks only that the fields STIG Viewer requires are populated and that
//! rule statuses use a known value. All problems are collected so a user sees
//! the complete list in one run.

use std::fmt;

use stig_model::Checklist;

/// Outcome of validating a checklist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    fn push(&mut self, message: String) {
        self.errors.push(message);
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.errors.join("; "))
    }
}

pub fn validate_checklist(checklist: &Checklist) -> ValidationReport {
    let mut report = ValidationReport::default();

    if checklist.title.is_empty() {
        report.push("Missing title".to_string());
    }
    if checklist.id.is_empty() {
        report.push("Missing ID".to_string());
    }

    for (i, stig) in checklist.stigs.iter().enumerate() {
        let required = [
            ("stig_name", &stig.stig_name),
            ("display_name", &stig.display_name),
            ("stig_id", &stig.stig_id),
            ("release_info", &stig.release_info),
            ("uuid", &stig.uuid),
        ];
        for (field, value) in required {
            if value.is_empty() {
                report.push(format!("STIG[{i}]: Missing {field}"));
            }
        }
        if stig.size == 0 {
            report.push(format!("STIG[{i}]: Missing or zero size"));
        }

        for (j, rule) in stig.rules.iter().enumerate() {
            if rule.uuid.is_empty() {
                report.push(format!("STIG[{i}].Rule[{j}]: Missing uuid"));
            }
            if rule.rule_id.is_empty() {
                report.push(format!("STIG[{i}].Rule[{j}]: Missing rule_id"));
            }
            if let Some(Err(_)) = rule.parsed_status() {
                let status = rule.status.as_deref().unwrap_or_default();
                report.push(format!("STIG[{i}].Rule[{j}]: Invalid status '{status}'"));
            }
        }
    }

    report
}
