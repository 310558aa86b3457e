pub mod checklist;
pub mod error;
pub mod oscal;
pub mod status;
pub mod token;

pub use checklist::{CheckContentRef, Checklist, GroupTree, Rule, Stig, TargetData};
pub use error::{ModelError, Result};
pub use oscal::{
    BackMatter, Base64, ComponentDefinition, ControlImplementationSet, DefinedComponent,
    ImplementedRequirement, Metadata, OSCAL_VERSION, OscalDocument, Resource,
};
pub use status::RuleStatus;
pub use token::{CciControlMap, ControlId, UNKNOWN_CONTROL_ID, is_valid_token};
