use std::path::{Path, PathBuf};

use chrono::{TimeZone, Utc};
use stig_cli::pipeline::{catalog_report, check_checklist, generate_component};
use stig_cli::types::GenerateRequest;
use stig_map::{DEFAULT_SOURCE, SequentialIds};

const CHECKLIST: &str = r#"{
  "title": "Web Server Review",
  "id": "5c1f1c8e-0000-4000-8000-000000000001",
  "cklb_version": "1.0",
  "stigs": [
    {
      "stig_name": "Apache Server 2.4 UNIX Server",
      "display_name": "Apache 2.4 UNIX Server",
      "stig_id": "Apache_Server_2-4_UNIX_Server",
      "release_info": "Release: 5 Benchmark Date: 24 Jul 2024",
      "uuid": "11111111-1111-1111-1111-111111111111",
      "size": 3,
      "rules": [
        {
          "uuid": "r-1",
          "stig_uuid": "11111111-1111-1111-1111-111111111111",
          "group_id": "V-214228",
          "group_id_src": "V-214228",
          "rule_id": "SV-214228r881393_rule",
          "rule_id_src": "SV-214228r881393_rule",
          "rule_title": "The Apache web server must limit the number of allowed simultaneous session requests.",
          "ccis": ["CCI-000054"],
          "status": "open"
        },
        {
          "uuid": "r-2",
          "stig_uuid": "11111111-1111-1111-1111-111111111111",
          "group_id": "V-214229",
          "group_id_src": "V-214229",
          "rule_id": "SV-214229r881396_rule",
          "rule_id_src": "SV-214229r881396_rule",
          "rule_title": "The Apache web server must use a logging mechanism.",
          "ccis": ["CCI-999999", "CCI-000366"],
          "status": "not_a_finding"
        },
        {
          "uuid": "r-3",
          "stig_uuid": "11111111-1111-1111-1111-111111111111",
          "group_id": "V-214230",
          "group_id_src": "V-214230",
          "rule_id": "SV-214230r881399_rule",
          "rule_id_src": "SV-214230r881399_rule",
          "ccis": [],
          "status": "not_reviewed"
        }
      ]
    }
  ]
}"#;

const CATALOG: &str = r#"<cci_list xmlns="http://iase.disa.mil/cci">
  <metadata><version>test</version><publishdate>2024-01-01</publishdate></metadata>
  <cci_items>
    <cci_item id="CCI-000054">
      <references>
        <reference title="NIST SP 800-53 Revision 5" index="SC-10" />
      </references>
    </cci_item>
  </cci_items>
</cci_list>"#;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn request(input: PathBuf, output: PathBuf) -> GenerateRequest {
    GenerateRequest {
        input,
        output,
        cci_file: None,
        title: None,
        source: DEFAULT_SOURCE.to_string(),
        back_matter: true,
    }
}

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap()
}

#[test]
fn generates_component_with_embedded_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "web.cklb", CHECKLIST);
    let output = dir.path().join("out").join("nested").join("component.json");

    let result = generate_component(
        &request(input, output.clone()),
        now(),
        &mut SequentialIds::default(),
    )
    .unwrap();

    assert_eq!(result.checklist_title, "Web Server Review");
    assert_eq!(result.catalog, "embedded");
    assert!(result.embedded_catalog);
    assert_eq!(result.mapped_ccis, 31);
    assert_eq!(result.requirement_count, 3);
    assert_eq!(result.stigs.len(), 1);
    assert_eq!((result.stigs[0].resolved, result.stigs[0].unknown), (2, 1));
    assert_eq!(result.unknown_count(), 1);

    let json = read_json(&output);
    let definition = &json["component-definition"];
    assert_eq!(definition["metadata"]["title"], "Web Server Review");
    assert_eq!(definition["metadata"]["last-modified"], "2025-06-01T12:00:00Z");

    let requirements = definition["components"][0]["control-implementations"][0]
        ["implemented-requirements"]
        .as_array()
        .unwrap();
    let controls: Vec<_> = requirements
        .iter()
        .map(|r| r["control-id"].as_str().unwrap())
        .collect();
    assert_eq!(controls, vec!["ac-10", "cm-6", "unknown"]);
    assert_eq!(requirements[2]["description"], "");
    assert_eq!(requirements[2]["remarks"], "SV-214230r881399_rule");

    let resource = &definition["back-matter"]["resources"][0];
    assert_eq!(resource["title"], "Original STIG Checklist");
    assert_eq!(resource["base64"]["filename"], "web.cklb");
    assert_eq!(resource["base64"]["media-type"], "application/json");
}

#[test]
fn external_catalog_and_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "web.cklb", CHECKLIST);
    let catalog = write(dir.path(), "U_CCI_List.xml", CATALOG);
    let output = dir.path().join("component.json");

    let mut request = request(input, output.clone());
    request.cci_file = Some(catalog.clone());
    request.title = Some("Web Tier".to_string());
    request.source = "https://example.test/catalog.json".to_string();
    request.back_matter = false;

    let result = generate_component(&request, now(), &mut SequentialIds::default()).unwrap();
    assert_eq!(result.catalog, catalog.display().to_string());
    assert!(!result.embedded_catalog);
    assert_eq!(result.mapped_ccis, 1);

    let json = read_json(&output);
    let definition = &json["component-definition"];
    assert_eq!(definition["metadata"]["title"], "Web Tier");
    assert!(definition.get("back-matter").is_none());
    let set = &definition["components"][0]["control-implementations"][0];
    assert_eq!(set["source"], "https://example.test/catalog.json");
    assert_eq!(set["implemented-requirements"][0]["control-id"], "sc-10");
    assert_eq!(set["implemented-requirements"][1]["control-id"], "unknown");
}

#[test]
fn invalid_checklist_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "broken.cklb", r#"{"title": "", "stigs": []}"#);
    let output = dir.path().join("component.json");

    let error = generate_component(
        &request(input, output.clone()),
        now(),
        &mut SequentialIds::default(),
    )
    .unwrap_err();
    let message = format!("{error:#}");
    assert!(message.starts_with("failed to read STIG checklist"), "{message}");
    assert!(message.contains("Missing title"), "{message}");
    assert!(!output.exists());
}

#[test]
fn malformed_catalog_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "web.cklb", CHECKLIST);
    let catalog = write(dir.path(), "bad.xml", "<cci_list><cci_items>");
    let output = dir.path().join("component.json");

    let mut request = request(input, output.clone());
    request.cci_file = Some(catalog);
    let error = generate_component(&request, now(), &mut SequentialIds::default()).unwrap_err();
    assert!(format!("{error:#}").starts_with("failed to parse CCI document"));
    assert!(!output.exists());
}

#[test]
fn check_reports_validation_errors() {
    let dir = tempfile::tempdir().unwrap();
    let valid = write(dir.path(), "web.cklb", CHECKLIST);
    let (checklist, report) = check_checklist(&valid).unwrap();
    assert!(report.is_valid());
    assert_eq!(checklist.rule_count(), 3);

    let invalid = write(dir.path(), "broken.cklb", r#"{"id": "x"}"#);
    let (_, report) = check_checklist(&invalid).unwrap();
    assert_eq!(report.errors, vec!["Missing title".to_string()]);

    assert!(check_checklist(&dir.path().join("absent.cklb")).is_err());
}

#[test]
fn catalog_report_for_file() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write(dir.path(), "U_CCI_List.xml", CATALOG);
    let report = catalog_report(Some(&catalog)).unwrap();
    assert_eq!(report.metadata.version.as_deref(), Some("test"));
    assert_eq!(report.counts.items, 1);
    assert_eq!(report.counts.mapped, 1);

    let embedded = catalog_report(None).unwrap();
    assert_eq!(embedded.source, "embedded");
    assert_eq!(embedded.counts.mapped, 31);
}
