#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::fmt;

use crate::ModelError;

/// Control identifier used when none of a rule's CCIs resolve.
pub const UNKNOWN_CONTROL_ID: &str = "unknown";

/// Returns true when `value` matches the OSCAL token grammar.
///
/// The first character must be an ASCII letter or `_`; the rest may be ASCII
/// letters, digits, `.`, `-` or `_`. The empty string is not a token.
pub fn is_valid_token(value: &str) -> bool {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
}

/// A normalized control identifier such as `ac-2.4`.
///
/// Construction enforces the OSCAL token grammar, so a `ControlId` can be
/// written into a component definition without further checks.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ControlId(String);

impl ControlId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        if !is_valid_token(&value) {
            return Err(ModelError::InvalidToken(value));
        }
        Ok(Self(value))
    }

    /// The `unknown` fallback marker.
    pub fn unknown() -> Self {
        Self(UNKNOWN_CONTROL_ID.to_string())
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_CONTROL_ID
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ControlId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ControlId> for String {
    fn from(value: ControlId) -> Self {
        value.0
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mapping from CCI identifier (`CCI-000001`) to its preferred control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CciControlMap {
    entries: BTreeMap<String, ControlId>,
}

impl CciControlMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a mapping, returning the control it replaced.
    pub fn insert(&mut self, cci: impl Into<String>, control: ControlId) -> Option<ControlId> {
        self.entries.insert(cci.into(), control)
    }

    pub fn get(&self, cci: &str) -> Option<&ControlId> {
        self.entries.get(cci)
    }

    pub fn contains(&self, cci: &str) -> bool {
        self.entries.contains_key(cci)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ControlId)> {
        self.entries.iter().map(|(cci, control)| (cci.as_str(), control))
    }
}

impl FromIterator<(String, ControlId)> for CciControlMap {
    fn from_iter<I: IntoIterator<Item = (String, ControlId)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
