//! Rule to implemented-requirement mapping.

use serde::Serialize;
use stig_model::{
    CciControlMap, Checklist, ControlId, ControlImplementationSet, ImplementedRequirement, Rule,
};

use crate::ids::IdGenerator;

/// Control for the first CCI, in rule order, that the mapping resolves.
///
/// Falls back to the `unknown` control when the rule has no CCIs or none of
/// them resolve.
pub fn resolve_control_id(ccis: &[&str], controls: &CciControlMap) -> ControlId {
    ccis.iter()
        .find_map(|cci| controls.get(cci))
        .cloned()
        .unwrap_or_else(ControlId::unknown)
}

/// Bracketed, space separated CCI list: `[CCI-000001 CCI-000009]`.
pub fn render_cci_list(ccis: &[&str]) -> String {
    format!("[{}]", ccis.join(" "))
}

/// `<rule_id>`, followed by ` - CCIs: [..]` when the rule cites any CCIs.
pub fn requirement_remarks(rule_id: &str, ccis: &[&str]) -> String {
    if ccis.is_empty() {
        rule_id.to_string()
    } else {
        format!("{rule_id} - CCIs: {}", render_cci_list(ccis))
    }
}

pub fn build_requirement(
    rule: &Rule,
    controls: &CciControlMap,
    ids: &mut dyn IdGenerator,
) -> ImplementedRequirement {
    let ccis = rule.cci_refs();
    ImplementedRequirement {
        uuid: ids.next_id(),
        control_id: resolve_control_id(&ccis, controls),
        description: rule.rule_title.clone().unwrap_or_default(),
        remarks: Some(requirement_remarks(&rule.rule_id, &ccis)),
    }
}

/// One implementation set holding a requirement per rule, STIG-then-rule order.
pub fn build_control_implementation_set(
    checklist: &Checklist,
    controls: &CciControlMap,
    source: &str,
    ids: &mut dyn IdGenerator,
) -> ControlImplementationSet {
    let uuid = ids.next_id();
    let implemented_requirements = checklist
        .rules()
        .map(|rule| build_requirement(rule, controls, ids))
        .collect();
    ControlImplementationSet {
        uuid,
        source: source.to_string(),
        description: format!("Control implementation for {}", checklist.title),
        implemented_requirements,
    }
}

/// Resolution counts for one STIG.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StigSummary {
    pub stig_id: String,
    pub display_name: String,
    pub rules: usize,
    pub resolved: usize,
    pub unknown: usize,
}

pub fn summarize_mapping(checklist: &Checklist, controls: &CciControlMap) -> Vec<StigSummary> {
    checklist
        .stigs()
        .iter()
        .map(|stig| {
            let unknown = stig
                .rules
                .iter()
                .filter(|rule| resolve_control_id(&rule.cci_refs(), controls).is_unknown())
                .count();
            StigSummary {
                stig_id: stig.stig_id.clone(),
                display_name: stig.display_name.clone(),
                rules: stig.rules.len(),
                resolved: stig.rules.len() - unknown,
                unknown,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controls() -> CciControlMap {
        [("CCI-000009", "ac-2.4"), ("CCI-000366", "cm-6")]
            .into_iter()
            .map(|(cci, control)| (cci.to_string(), ControlId::new(control).unwrap()))
            .collect()
    }

    #[test]
    fn first_resolvable_cci_wins() {
        let control = resolve_control_id(&["CCI-000001", "CCI-000009", "CCI-000366"], &controls());
        assert_eq!(control.as_str(), "ac-2.4");
    }

    #[test]
    fn unresolved_or_missing_ccis_fall_back_to_unknown() {
        assert!(resolve_control_id(&[], &controls()).is_unknown());
        assert!(resolve_control_id(&["CCI-999999"], &controls()).is_unknown());
        assert!(resolve_control_id(&["CCI-000009"], &CciControlMap::new()).is_unknown());
    }

    #[test]
    fn remarks_without_ccis_is_the_rule_id() {
        assert_eq!(requirement_remarks("SV-1r1_rule", &[]), "SV-1r1_rule");
        assert_eq!(
            requirement_remarks("SV-1r1_rule", &["CCI-000001", "CCI-000001"]),
            "SV-1r1_rule - CCIs: [CCI-000001 CCI-000001]"
        );
    }
}
