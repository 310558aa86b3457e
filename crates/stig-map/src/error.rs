#![deny(unsafe_code)]

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("failed to serialize checklist for back-matter: {source}")]
    SerializeChecklist {
        #[source]
        source: serde_json::Error,
    },
}
