#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read CCI catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CCI catalog XML: {source}")]
    Xml {
        #[source]
        source: quick_xml::Error,
    },

    #[error("malformed CCI catalog value: {source}")]
    Escape {
        #[source]
        source: quick_xml::escape::EscapeError,
    },

    #[error("CCI catalog is not valid UTF-8: {source}")]
    Utf8 {
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("invalid CCI catalog structure: {message}")]
    Structure { message: String },
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn structure(message: impl Into<String>) -> Self {
        Self::Structure {
            message: message.into(),
        }
    }
}

impl From<quick_xml::Error> for CatalogError {
    fn from(source: quick_xml::Error) -> Self {
        Self::Xml { source }
    }
}

impl From<quick_xml::escape::EscapeError> for CatalogError {
    fn from(source: quick_xml::escape::EscapeError) -> Self {
        Self::Escape { source }
    }
}

impl From<std::str::Utf8Error> for CatalogError {
    fn from(source: std::str::Utf8Error) -> Self {
        Self::Utf8 { source }
    }
}
