use std::path::Path;
use std::process::{Command, Output};

const CHECKLIST: &str = r#"{
  "title": "Web Server Review",
  "id": "checklist-1",
  "stigs": [
    {
      "stig_name": "Apache Server 2.4 UNIX Server",
      "display_name": "Apache 2.4 UNIX Server",
      "stig_id": "Apache_Server_2-4_UNIX_Server",
      "release_info": "Release: 5",
      "uuid": "stig-1",
      "size": 1,
      "rules": [
        {
          "uuid": "r-1",
          "stig_uuid": "stig-1",
          "group_id": "V-214228",
          "group_id_src": "V-214228",
          "rule_id": "SV-214228r881393_rule",
          "rule_id_src": "SV-214228r881393_rule",
          "ccis": ["CCI-000054"],
          "status": "open"
        }
      ]
    }
  ]
}"#;

/// Run `stigctl` in `dir` with no configuration from the real environment.
fn stigctl(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_stigctl"))
        .args(args)
        .current_dir(dir)
        .env("HOME", dir)
        .env_remove("STIGCTL_OSCAL_TITLE")
        .env_remove("STIGCTL_OSCAL_SOURCE")
        .env_remove("STIGCTL_CCI_FILE")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn validate_ignores_a_broken_config_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("stigctl.toml"), "[oscal\n").unwrap();
    std::fs::write(dir.path().join("web.cklb"), CHECKLIST).unwrap();

    let output = stigctl(dir.path(), &["validate", "web.cklb"]);
    assert!(output.status.success(), "{output:?}");
    assert!(String::from_utf8_lossy(&output.stdout).contains("web.cklb: valid"));

    let output = stigctl(dir.path(), &["--config", "stigctl.toml", "validate", "web.cklb"]);
    assert!(output.status.success(), "{output:?}");
}

#[test]
fn commands_that_read_settings_reject_a_broken_config_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("stigctl.toml"), "[oscal\n").unwrap();
    std::fs::write(dir.path().join("web.cklb"), CHECKLIST).unwrap();

    let output = stigctl(dir.path(), &["catalog"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid configuration"));

    let output = stigctl(
        dir.path(),
        &["generate", "component", "-i", "web.cklb", "-o", "out.json"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("out.json").exists());
}

#[test]
fn embedded_catalog_is_flagged_in_the_summary() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("web.cklb"), CHECKLIST).unwrap();

    let output = stigctl(
        dir.path(),
        &["generate", "component", "-i", "web.cklb", "-o", "out.json"],
    );
    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--cci-file"), "{stdout}");
    assert!(dir.path().join("out.json").exists());
}
