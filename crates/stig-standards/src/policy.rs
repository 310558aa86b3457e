//! Reference preference policy.

use crate::catalog::CciReference;

/// Reference titles in descending priority.
pub const DEFAULT_REFERENCE_TITLES: &[&str] = &[
    "NIST SP 800-53 Revision 5",
    "NIST SP 800-53 Revision 4",
    "NIST SP 800-53",
    "NIST SP 800-53A",
];

/// Ordered list of reference titles used to pick one reference per CCI.
///
/// The first title with any matching reference wins, and within that title
/// the first reference in catalog order is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferencePolicy {
    titles: Vec<String>,
}

impl Default for ReferencePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_REFERENCE_TITLES.iter().copied())
    }
}

impl ReferencePolicy {
    pub fn new<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            titles: titles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn select<'a>(&self, references: &'a [CciReference]) -> Option<&'a CciReference> {
        self.titles.iter().find_map(|title| {
            references
                .iter()
                .find(|reference| reference.title == *title)
        })
    }
}
