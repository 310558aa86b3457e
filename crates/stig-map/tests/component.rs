use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{TimeZone, Utc};
use stig_map::{
    ComponentOptions, DEFAULT_SOURCE, SequentialIds, build_component_definition,
    summarize_mapping,
};
use stig_model::{CciControlMap, Checklist, ControlId};
use uuid::Uuid;

const CATALOG: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<cci_list xmlns="http://iase.disa.mil/cci">
  <cci_items>
    <cci_item id="CCI-000001">
      <references>
        <reference creator="NIST" title="NIST SP 800-53 Revision 4" version="4" index="AC-1 a" />
      </references>
    </cci_item>
    <cci_item id="CCI-000002">
      <references>
        <reference creator="NIST" title="NIST SP 800-53 Revision 5" version="5" index="SA-4 (7) (a)" />
      </references>
    </cci_item>
  </cci_items>
</cci_list>"#;

fn rule(id: &str, title: Option<&str>, ccis: &[&str]) -> serde_json::Value {
    let mut value = serde_json::json!({
        "uuid": format!("uuid-{id}"),
        "stig_uuid": "stig-uuid",
        "group_id": format!("V-{id}"),
        "group_id_src": format!("V-{id}"),
        "rule_id": id,
        "rule_id_src": id,
        "ccis": ccis,
        "status": "not_reviewed",
    });
    if let Some(title) = title {
        value["rule_title"] = title.into();
    }
    value
}

fn stig(stig_id: &str, rules: Vec<serde_json::Value>) -> serde_json::Value {
    let size = rules.len();
    serde_json::json!({
        "stig_name": stig_id,
        "display_name": stig_id.replace('_', " "),
        "stig_id": stig_id,
        "release_info": "Release: 1",
        "uuid": format!("{stig_id}-uuid"),
        "size": size,
        "rules": rules,
    })
}

fn checklist(stigs: Vec<serde_json::Value>) -> Checklist {
    serde_json::from_value(serde_json::json!({
        "title": "Sample Checklist",
        "id": "checklist-1",
        "stigs": stigs,
    }))
    .unwrap()
}

fn scenario() -> Checklist {
    checklist(vec![stig(
        "Sample_STIG",
        vec![
            rule("SV-A", Some("Rule A"), &["CCI-000001"]),
            rule("SV-B", Some("Rule B"), &["CCI-000002", "CCI-999999"]),
        ],
    )])
}

fn controls() -> CciControlMap {
    stig_standards::parse_cci_list(CATALOG.as_bytes()).unwrap()
}

fn options() -> ComponentOptions {
    ComponentOptions::new(Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap())
}

#[test]
fn resolves_each_rule_against_the_catalog() {
    let document =
        build_component_definition(&scenario(), &controls(), &options(), &mut SequentialIds::default());
    let definition = &document.component_definition;

    let requirements: Vec<_> = definition.implemented_requirements().collect();
    assert_eq!(requirements.len(), 2);
    assert_eq!(requirements[0].control_id.as_str(), "ac-1");
    assert_eq!(requirements[0].description, "Rule A");
    assert_eq!(requirements[0].remarks.as_deref(), Some("SV-A - CCIs: [CCI-000001]"));
    assert_eq!(requirements[1].control_id.as_str(), "sa-4.7");
    assert_eq!(
        requirements[1].remarks.as_deref(),
        Some("SV-B - CCIs: [CCI-000002 CCI-999999]")
    );
}

#[test]
fn document_shape_and_ids() {
    let document =
        build_component_definition(&scenario(), &controls(), &options(), &mut SequentialIds::default());
    let definition = &document.component_definition;

    assert_eq!(definition.uuid, Uuid::from_u128(1));
    assert_eq!(definition.metadata.title, "Sample Checklist");
    assert_eq!(definition.metadata.version, "1.0.0");
    assert_eq!(definition.metadata.oscal_version, "1.1.3");
    assert!(definition.back_matter.is_none());

    assert_eq!(definition.components.len(), 1);
    let component = &definition.components[0];
    assert_eq!(component.uuid, Uuid::from_u128(2));
    assert_eq!(component.component_type, "software");
    assert_eq!(
        component.description,
        "Component definition generated from Checklist: Sample Checklist"
    );

    assert_eq!(component.control_implementations.len(), 1);
    let set = &component.control_implementations[0];
    assert_eq!(set.uuid, Uuid::from_u128(3));
    assert_eq!(set.source, DEFAULT_SOURCE);
    assert_eq!(set.description, "Control implementation for Sample Checklist");
    let ids: Vec<_> = set.implemented_requirements.iter().map(|r| r.uuid).collect();
    assert_eq!(ids, vec![Uuid::from_u128(4), Uuid::from_u128(5)]);
}

#[test]
fn rules_flatten_in_stig_then_rule_order() {
    let checklist = checklist(vec![
        stig(
            "First_STIG",
            vec![
                rule("SV-1", Some("one"), &[]),
                rule("SV-2", Some("two"), &["CCI-000002"]),
            ],
        ),
        stig("Second_STIG", vec![rule("SV-3", None, &["CCI-000001"])]),
    ]);
    let document =
        build_component_definition(&checklist, &controls(), &options(), &mut SequentialIds::default());

    let rows: Vec<_> = document
        .component_definition
        .implemented_requirements()
        .map(|r| {
            format!(
                "{} | {} | {}",
                r.control_id,
                r.description,
                r.remarks.as_deref().unwrap_or_default()
            )
        })
        .collect();
    insta::assert_snapshot!(rows.join("\n"), @r"
    unknown | one | SV-1
    sa-4.7 | two | SV-2 - CCIs: [CCI-000002]
    ac-1 |  | SV-3 - CCIs: [CCI-000001]
    ");
}

#[test]
fn order_decides_between_resolvable_ccis() {
    let controls: CciControlMap = [
        ("CCI-000009".to_string(), ControlId::new("ac-2.4").unwrap()),
        ("CCI-000366".to_string(), ControlId::new("cm-6").unwrap()),
    ]
    .into_iter()
    .collect();
    let checklist = checklist(vec![stig(
        "STIG",
        vec![
            rule("SV-1", None, &["CCI-000001", "CCI-000009"]),
            rule("SV-2", None, &["CCI-000366", "CCI-000009"]),
            rule("SV-3", None, &["CCI-000404"]),
        ],
    )]);
    let document =
        build_component_definition(&checklist, &controls, &options(), &mut SequentialIds::default());
    let controls: Vec<_> = document
        .component_definition
        .implemented_requirements()
        .map(|r| r.control_id.to_string())
        .collect();
    assert_eq!(controls, vec!["ac-2.4", "cm-6", "unknown"]);
}

#[test]
fn empty_mapping_yields_unknown_for_every_rule() {
    let document = build_component_definition(
        &scenario(),
        &CciControlMap::new(),
        &options(),
        &mut SequentialIds::default(),
    );
    assert!(
        document
            .component_definition
            .implemented_requirements()
            .all(|r| r.control_id.is_unknown())
    );
}

#[test]
fn title_and_source_overrides() {
    let overridden = options()
        .with_title("Web Tier")
        .with_source("https://example.test/catalog.json");
    let document =
        build_component_definition(&scenario(), &controls(), &overridden, &mut SequentialIds::default());
    let definition = &document.component_definition;
    assert_eq!(definition.metadata.title, "Web Tier");
    assert_eq!(definition.components[0].title, "Web Tier");
    assert_eq!(
        definition.components[0].description,
        "Component definition generated from Checklist: Sample Checklist"
    );
    assert_eq!(
        definition.components[0].control_implementations[0].source,
        "https://example.test/catalog.json"
    );

    let blank = build_component_definition(
        &scenario(),
        &controls(),
        &options().with_title(""),
        &mut SequentialIds::default(),
    );
    assert_eq!(blank.component_definition.metadata.title, "Sample Checklist");
}

#[test]
fn back_matter_embeds_the_checklist() {
    let checklist = scenario();
    let options = options().with_back_matter("sample.cklb");
    let document =
        build_component_definition(&checklist, &controls(), &options, &mut SequentialIds::default());

    let back_matter = document.component_definition.back_matter.unwrap();
    assert_eq!(back_matter.resources.len(), 1);
    let resource = &back_matter.resources[0];
    assert_eq!(resource.uuid, Uuid::from_u128(6));
    assert_eq!(resource.title.as_deref(), Some("Original STIG Checklist"));
    assert_eq!(
        resource.description.as_deref(),
        Some("Base64 encoded CKLB(json) STIG checklist used to generate this component definition")
    );

    let base64 = resource.base64.as_ref().unwrap();
    assert_eq!(base64.filename.as_deref(), Some("sample.cklb"));
    assert_eq!(base64.media_type.as_deref(), Some("application/json"));
    let decoded = STANDARD.decode(&base64.value).unwrap();
    let embedded: Checklist = serde_json::from_slice(&decoded).unwrap();
    assert_eq!(embedded, checklist);
}

#[test]
fn serialized_document_uses_oscal_property_names() {
    let document =
        build_component_definition(&scenario(), &controls(), &options(), &mut SequentialIds::default());
    let json = serde_json::to_value(&document).unwrap();
    let definition = &json["component-definition"];
    assert_eq!(definition["metadata"]["last-modified"], "2025-01-02T03:04:05Z");
    assert_eq!(definition["metadata"]["oscal-version"], "1.1.3");
    let requirement = &definition["components"][0]["control-implementations"][0]
        ["implemented-requirements"][0];
    assert_eq!(requirement["control-id"], "ac-1");
    assert_eq!(requirement["uuid"], "00000000-0000-0000-0000-000000000004");
}

#[test]
fn summary_counts_per_stig() {
    let checklist = checklist(vec![
        stig(
            "First_STIG",
            vec![
                rule("SV-1", None, &["CCI-000001"]),
                rule("SV-2", None, &["CCI-123456"]),
            ],
        ),
        stig("Second_STIG", vec![rule("SV-3", None, &["CCI-000002"])]),
    ]);
    let summary = summarize_mapping(&checklist, &controls());
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0].stig_id, "First_STIG");
    assert_eq!(summary[0].display_name, "First STIG");
    assert_eq!((summary[0].rules, summary[0].resolved, summary[0].unknown), (2, 1, 1));
    assert_eq!((summary[1].rules, summary[1].resolved, summary[1].unknown), (1, 1, 0));
}
