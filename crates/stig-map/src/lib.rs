#![deny(unsafe_code)]

pub mod component;
pub mod error;
pub mod ids;
pub mod requirements;

pub use crate::component::{
    ComponentOptions, DEFAULT_SOURCE, build_component_definition, checklist_resource,
    encode_checklist,
};
pub use crate::error::MapError;
pub use crate::ids::{IdGenerator, RandomIds, SequentialIds};
pub use crate::requirements::{
    StigSummary, build_control_implementation_set, build_requirement, render_cci_list,
    requirement_remarks, resolve_control_id, summarize_mapping,
};
