#![deny(unsafe_code)]

pub mod error;
pub mod loader;
pub mod validate;

pub use error::ChecklistError;
pub use loader::{load_checklist, load_valid_checklist, parse_checklist, save_checklist};
pub use validate::{ValidationReport, validate_checklist};
