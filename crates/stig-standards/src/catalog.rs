//! DISA CCI list parsing.
//!
//! The CCI list is an XML document of the form
//!
//! ```xml
//! <cci_list xmlns="http://iase.disa.mil/cci">
//!   <metadata><version>2025-09-19</version><publishdate>2025-09-19</publishdate></metadata>
//!   <cci_items>
//!     <cci_item id="CCI-000001">
//!       <status>draft</status>
//!       <definition>...</definition>
//!       <references>
//!         <reference creator="NIST" title="NIST SP 800-53 Revision 5" version="5"
//!                    location="..." index="AC-1 a 1 (a)" />
//!       </references>
//!     </cci_item>
//!   </cci_items>
//! </cci_list>
//! ```
//!
//! Elements are matched by local name so the default namespace is irrelevant.
//! Unrecognized elements are skipped but still checked: a malformed attribute
//! or an undefined entity anywhere fails the whole parse, as does a missing or
//! foreign root element or an element left open at end of input.

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use serde::Serialize;
use stig_model::{CciControlMap, ControlId, ModelError};
use tracing::debug;

use crate::error::CatalogError;
use crate::normalize::normalize_control_id;
use crate::policy::ReferencePolicy;

const ROOT: &[u8] = b"cci_list";
const METADATA: &[u8] = b"metadata";
const ITEMS: &[u8] = b"cci_items";
const ITEM: &[u8] = b"cci_item";
const REFERENCES: &[u8] = b"references";
const REFERENCE: &[u8] = b"reference";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogMetadata {
    pub version: Option<String>,
    pub publish_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CciCatalog {
    pub metadata: CatalogMetadata,
    pub items: Vec<CciItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CciItem {
    pub id: String,
    pub status: Option<String>,
    pub publish_date: Option<String>,
    pub contributor: Option<String>,
    pub definition: Option<String>,
    pub item_type: Option<String>,
    pub references: Vec<CciReference>,
}

/// A citation of a control in a specific standard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CciReference {
    pub creator: Option<String>,
    pub title: String,
    pub version: Option<String>,
    pub location: Option<String>,
    pub index: String,
}

/// How a single catalog item resolved under a policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Mapped(ControlId),
    /// No reference title matched the policy.
    NoPreferredReference,
    /// The preferred reference index has no `XX-N` control.
    UnmatchedIndex(String),
    /// The normalized value failed the OSCAL token grammar.
    InvalidToken(String),
}

impl CciItem {
    pub fn resolve(&self, policy: &ReferencePolicy) -> Resolution {
        let Some(reference) = policy.select(&self.references) else {
            return Resolution::NoPreferredReference;
        };
        let normalized = normalize_control_id(&reference.index);
        if normalized.is_empty() {
            return Resolution::UnmatchedIndex(reference.index.clone());
        }
        // ControlId::new enforces the OSCAL token grammar
        match ControlId::new(normalized) {
            Ok(control) => Resolution::Mapped(control),
            Err(ModelError::InvalidToken(value)) => Resolution::InvalidToken(value),
            Err(other) => Resolution::InvalidToken(other.to_string()),
        }
    }
}

impl CciCatalog {
    pub fn parse(bytes: &[u8]) -> Result<Self, CatalogError> {
        let mut reader = Reader::from_reader(bytes);
        reader.config_mut().trim_text(true);

        let mut catalog = CciCatalog::default();
        let mut stack: Vec<Vec<u8>> = Vec::new();
        let mut current: Option<CciItem> = None;
        let mut saw_root = false;

        loop {
            match reader.read_event()? {
                Event::Start(element) => {
                    check_attributes(&element)?;
                    let name = element.local_name().as_ref().to_vec();
                    if stack.is_empty() {
                        check_root(&name, saw_root)?;
                        saw_root = true;
                        stack.push(name);
                        continue;
                    }

                    if let Some(field) = text_field(&stack, &name) {
                        let raw = reader.read_text(element.name())?;
                        let value = unescape(&raw)?.trim().to_string();
                        assign_text(field, value, &mut catalog.metadata, current.as_mut());
                        continue;
                    }

                    if name == ITEM && in_items(&stack) {
                        current = Some(start_item(&element)?);
                    } else if name == REFERENCE && in_references(&stack) {
                        if let Some(item) = current.as_mut() {
                            item.references.push(read_reference(&element)?);
                        }
                    }
                    stack.push(name);
                }
                Event::Empty(element) => {
                    check_attributes(&element)?;
                    let name = element.local_name().as_ref().to_vec();
                    if stack.is_empty() {
                        // `<cci_list/>`: a valid, empty catalog
                        check_root(&name, saw_root)?;
                        break;
                    }
                    if name == ITEM && in_items(&stack) {
                        catalog.items.push(start_item(&element)?);
                    } else if name == REFERENCE && in_references(&stack) {
                        if let Some(item) = current.as_mut() {
                            item.references.push(read_reference(&element)?);
                        }
                    }
                }
                Event::End(_) => {
                    let closed = stack.pop();
                    if closed.as_deref() == Some(ITEM) && in_items(&stack) {
                        if let Some(item) = current.take() {
                            catalog.items.push(item);
                        }
                    }
                    if stack.is_empty() {
                        break;
                    }
                }
                Event::Eof => {
                    if !saw_root {
                        return Err(CatalogError::structure("missing <cci_list> root element"));
                    }
                    if let Some(open) = stack.last() {
                        return Err(CatalogError::structure(format!(
                            "unexpected end of document inside <{}>",
                            String::from_utf8_lossy(open)
                        )));
                    }
                    break;
                }
                // Content outside the fields read above must still be well formed.
                Event::Text(text) => {
                    unescape(&text.decode().map_err(quick_xml::Error::from)?)?;
                }
                Event::GeneralRef(reference) => {
                    let name = reference.decode().map_err(quick_xml::Error::from)?;
                    unescape(&format!("&{name};"))?;
                }
                _ => {}
            }
        }

        debug!(
            item_count = catalog.items.len(),
            version = catalog.metadata.version.as_deref().unwrap_or(""),
            "CCI catalog parsed"
        );
        Ok(catalog)
    }

    /// Build the CCI to control mapping under `policy`.
    ///
    /// Items without an identifier or without a resolvable control are
    /// skipped. When an identifier appears more than once the later item wins.
    pub fn control_map(&self, policy: &ReferencePolicy) -> CciControlMap {
        let mut map = CciControlMap::new();
        for item in &self.items {
            if item.id.is_empty() {
                debug!("skipping CCI item without id");
                continue;
            }
            match item.resolve(policy) {
                Resolution::Mapped(control) => {
                    if let Some(previous) = map.insert(item.id.clone(), control) {
                        debug!(cci = %item.id, %previous, "duplicate CCI id, later entry wins");
                    }
                }
                Resolution::NoPreferredReference => {
                    debug!(cci = %item.id, "no preferred reference");
                }
                Resolution::UnmatchedIndex(index) => {
                    debug!(cci = %item.id, %index, "reference index has no control");
                }
                Resolution::InvalidToken(value) => {
                    debug!(cci = %item.id, %value, "control is not a valid OSCAL token");
                }
            }
        }
        map
    }
}

#[derive(Debug, Clone, Copy)]
enum TextField {
    Version,
    CatalogPublishDate,
    Status,
    PublishDate,
    Contributor,
    Definition,
    Type,
}

fn text_field(stack: &[Vec<u8>], name: &[u8]) -> Option<TextField> {
    match stack {
        [_, parent] if parent.as_slice() == METADATA => match name {
            b"version" => Some(TextField::Version),
            b"publishdate" => Some(TextField::CatalogPublishDate),
            _ => None,
        },
        [_, items, item] if items.as_slice() == ITEMS && item.as_slice() == ITEM => match name {
            b"status" => Some(TextField::Status),
            b"publishdate" => Some(TextField::PublishDate),
            b"contributor" => Some(TextField::Contributor),
            b"definition" => Some(TextField::Definition),
            b"type" => Some(TextField::Type),
            _ => None,
        },
        _ => None,
    }
}

fn assign_text(
    field: TextField,
    value: String,
    metadata: &mut CatalogMetadata,
    item: Option<&mut CciItem>,
) {
    match field {
        TextField::Version => metadata.version = Some(value),
        TextField::CatalogPublishDate => metadata.publish_date = Some(value),
        _ => {
            let Some(item) = item else {
                return;
            };
            let slot = match field {
                TextField::Status => &mut item.status,
                TextField::PublishDate => &mut item.publish_date,
                TextField::Contributor => &mut item.contributor,
                TextField::Definition => &mut item.definition,
                _ => &mut item.item_type,
            };
            *slot = Some(value);
        }
    }
}

fn check_root(name: &[u8], saw_root: bool) -> Result<(), CatalogError> {
    if saw_root {
        return Err(CatalogError::structure("multiple root elements"));
    }
    if name != ROOT {
        return Err(CatalogError::structure(format!(
            "expected root element <cci_list>, found <{}>",
            String::from_utf8_lossy(name)
        )));
    }
    Ok(())
}

fn in_items(stack: &[Vec<u8>]) -> bool {
    matches!(stack, [_, items] if items.as_slice() == ITEMS)
}

fn in_references(stack: &[Vec<u8>]) -> bool {
    matches!(
        stack,
        [_, _, item, references] if item.as_slice() == ITEM && references.as_slice() == REFERENCES
    )
}

fn start_item(element: &BytesStart<'_>) -> Result<CciItem, CatalogError> {
    Ok(CciItem {
        id: attribute(element, b"id")?.unwrap_or_default(),
        ..CciItem::default()
    })
}

fn read_reference(element: &BytesStart<'_>) -> Result<CciReference, CatalogError> {
    Ok(CciReference {
        creator: attribute(element, b"creator")?,
        title: attribute(element, b"title")?.unwrap_or_default(),
        version: attribute(element, b"version")?,
        location: attribute(element, b"location")?,
        index: attribute(element, b"index")?.unwrap_or_default(),
    })
}

fn check_attributes(element: &BytesStart<'_>) -> Result<(), CatalogError> {
    for attr in element.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        unescape(std::str::from_utf8(&attr.value)?)?;
    }
    Ok(())
}

fn attribute(element: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>, CatalogError> {
    for attr in element.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.local_name().as_ref() == name {
            let raw = std::str::from_utf8(&attr.value)?;
            return Ok(Some(unescape(raw)?.into_owned()));
        }
    }
    Ok(None)
}
