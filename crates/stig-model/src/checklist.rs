//! CKLB checklist document types.
//!
//! CKLB is the JSON checklist format written by DISA STIG Viewer 3. Fields the
//! format requires are plain values that default to empty when absent, so the
//! presence validator can report them instead of failing the parse. Optional
//! fields are `Option` and are omitted on serialization when `None`;
//! collections are omitted when empty.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ModelError, Result};
use crate::status::RuleStatus;

/// Root of a CKLB document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Checklist {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cklb_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_path: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_data: Option<TargetData>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub stigs: Vec<Stig>,
}

/// Information about the assessed system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fqdn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_web_database: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technology_area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_db_site: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_db_instance: Option<String>,
}

/// One STIG benchmark inside a checklist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stig {
    #[serde(default)]
    pub stig_name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub stig_id: String,
    #[serde(default)]
    pub release_info: String,
    #[serde(default)]
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_identifier: Option<String>,
    #[serde(default)]
    pub size: i64,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub rules: Vec<Rule>,
}

/// A single STIG rule and its review state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub stig_uuid: String,
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub group_id_src: String,
    #[serde(default)]
    pub rule_id: String,
    #[serde(default)]
    pub rule_id_src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stig_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub false_positives: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub false_negatives: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discussion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentable: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mitigations: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potential_impacts: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub third_party_tools: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mitigation_control: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsibility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_override_guidance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ia_controls: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_content_ref: Option<CheckContentRef>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub legacy_ids: Vec<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub ccis: Vec<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub group_tree: Vec<GroupTree>,
    #[serde(
        rename = "createdAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,
    #[serde(
        rename = "updatedAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finding_details: Option<String>,
    /// Legacy spelling of `stig_uuid` written by older STIG Viewer builds.
    #[serde(rename = "STIGUuid", default, skip_serializing_if = "Option::is_none")]
    pub stig_uuid_legacy: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckContentRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// One level of the rule's group hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupTree {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl Checklist {
    pub fn stigs(&self) -> &[Stig] {
        &self.stigs
    }

    /// All rules in STIG-then-rule document order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.stigs.iter().flat_map(|stig| stig.rules.iter())
    }

    pub fn rule_count(&self) -> usize {
        self.stigs.iter().map(|stig| stig.rules.len()).sum()
    }

    pub fn rules_with_status(&self, status: RuleStatus) -> Vec<&Rule> {
        self.rules()
            .filter(|rule| rule.status.as_deref() == Some(status.as_str()))
            .collect()
    }

    /// Sets the status of the first rule with `rule_id`.
    pub fn update_rule_status(&mut self, rule_id: &str, status: RuleStatus) -> Result<()> {
        let rule = self.rule_mut(rule_id)?;
        rule.status = Some(status.as_str().to_string());
        Ok(())
    }

    /// Replaces the comments of the first rule with `rule_id`.
    pub fn add_comment(&mut self, rule_id: &str, comment: impl Into<String>) -> Result<()> {
        let rule = self.rule_mut(rule_id)?;
        rule.comments = Some(comment.into());
        Ok(())
    }

    pub fn target_data(&self) -> Option<&TargetData> {
        self.target_data.as_ref()
    }

    pub fn set_target_data(&mut self, target_data: TargetData) {
        self.target_data = Some(target_data);
    }

    fn rule_mut(&mut self, rule_id: &str) -> Result<&mut Rule> {
        self.stigs
            .iter_mut()
            .flat_map(|stig| stig.rules.iter_mut())
            .find(|rule| rule.rule_id == rule_id)
            .ok_or_else(|| ModelError::RuleNotFound(rule_id.to_string()))
    }
}

impl Rule {
    /// CCI identifiers with empty entries removed, order preserved.
    pub fn cci_refs(&self) -> Vec<&str> {
        self.ccis
            .iter()
            .map(String::as_str)
            .filter(|cci| !cci.is_empty())
            .collect()
    }

    /// Parsed review status, `None` when the field is absent or empty.
    pub fn parsed_status(&self) -> Option<Result<RuleStatus>> {
        self.status
            .as_deref()
            .filter(|status| !status.is_empty())
            .map(str::parse)
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
