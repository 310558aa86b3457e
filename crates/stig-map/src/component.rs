//! Component-definition assembly.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use stig_model::{
    BackMatter, Base64, CciControlMap, Checklist, ComponentDefinition, DefinedComponent, Metadata,
    OSCAL_VERSION, OscalDocument, Resource,
};
use tracing::{info, info_span, warn};

use crate::error::MapError;
use crate::ids::IdGenerator;
use crate::requirements::build_control_implementation_set;

/// NIST SP 800-53 rev5 OSCAL catalog, the default implementation-set source.
pub const DEFAULT_SOURCE: &str = "https://raw.githubusercontent.com/usnistgov/oscal-content/main/nist.gov/SP800-53/rev5/json/NIST_SP-800-53_rev5_catalog.json";

pub const DOCUMENT_VERSION: &str = "1.0.0";
pub const COMPONENT_TYPE: &str = "software";

pub const BACK_MATTER_TITLE: &str = "Original STIG Checklist";
pub const BACK_MATTER_DESCRIPTION: &str =
    "Base64 encoded CKLB(json) STIG checklist used to generate this component definition";
const CHECKLIST_MEDIA_TYPE: &str = "application/json";

#[derive(Debug, Clone)]
pub struct ComponentOptions {
    /// Replaces the checklist title on the document and the component.
    pub title: Option<String>,
    pub source: String,
    pub last_modified: DateTime<Utc>,
    /// Embed the checklist as back-matter under this file name.
    pub back_matter_filename: Option<String>,
}

impl ComponentOptions {
    pub fn new(last_modified: DateTime<Utc>) -> Self {
        Self {
            title: None,
            source: DEFAULT_SOURCE.to_string(),
            last_modified,
            back_matter_filename: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_back_matter(mut self, filename: impl Into<String>) -> Self {
        self.back_matter_filename = Some(filename.into());
        self
    }

    fn effective_title<'a>(&'a self, checklist: &'a Checklist) -> &'a str {
        self.title
            .as_deref()
            .filter(|title| !title.is_empty())
            .unwrap_or(checklist.title.as_str())
    }
}

/// Build the component definition for a validated checklist.
pub fn build_component_definition(
    checklist: &Checklist,
    controls: &CciControlMap,
    options: &ComponentOptions,
    ids: &mut dyn IdGenerator,
) -> OscalDocument {
    let span = info_span!("build_component", checklist = %checklist.title);
    let _guard = span.enter();

    let title = options.effective_title(checklist).to_string();
    let definition_uuid = ids.next_id();
    let component_uuid = ids.next_id();
    let set = build_control_implementation_set(checklist, controls, &options.source, ids);
    let requirement_count = set.implemented_requirements.len();

    let component = DefinedComponent {
        uuid: component_uuid,
        component_type: COMPONENT_TYPE.to_string(),
        title: title.clone(),
        description: format!(
            "Component definition generated from Checklist: {}",
            checklist.title
        ),
        control_implementations: vec![set],
    };

    let back_matter = options.back_matter_filename.as_deref().and_then(|filename| {
        match checklist_resource(checklist, filename, ids) {
            Ok(resource) => Some(BackMatter {
                resources: vec![resource],
            }),
            Err(error) => {
                warn!(%error, "component definition written without back-matter");
                None
            }
        }
    });

    info!(requirement_count, "component definition built");

    OscalDocument {
        component_definition: ComponentDefinition {
            uuid: definition_uuid,
            metadata: Metadata {
                title,
                last_modified: options.last_modified,
                version: DOCUMENT_VERSION.to_string(),
                oscal_version: OSCAL_VERSION.to_string(),
            },
            components: vec![component],
            back_matter,
        },
    }
}

/// Base64 (standard alphabet) of the checklist's JSON serialization.
pub fn encode_checklist(checklist: &Checklist) -> Result<String, MapError> {
    let json = serde_json::to_vec(checklist)
        .map_err(|source| MapError::SerializeChecklist { source })?;
    Ok(STANDARD.encode(json))
}

/// Back-matter resource embedding the checklist.
pub fn checklist_resource(
    checklist: &Checklist,
    filename: &str,
    ids: &mut dyn IdGenerator,
) -> Result<Resource, MapError> {
    let value = encode_checklist(checklist)?;
    Ok(Resource {
        uuid: ids.next_id(),
        title: Some(BACK_MATTER_TITLE.to_string()),
        description: Some(BACK_MATTER_DESCRIPTION.to_string()),
        base64: Some(Base64 {
            filename: Some(filename.to_string()),
            media_type: Some(CHECKLIST_MEDIA_TYPE.to_string()),
            value,
        }),
    })
}
