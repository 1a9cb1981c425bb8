//! Error types for linch-pptx-rs

use thiserror::Error;

/// Main error type
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// A property setter was handed a value outside its domain.
    /// Raised before the tree is touched.
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Missing required part: {0}")]
    MissingPart(String),

    #[error("Invalid part URI: {0}")]
    InvalidPartUri(String),

    #[error("Missing attribute '{attr}' on element '{element}'")]
    MissingAttribute { element: String, attr: String },

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Part not found: {0}")]
    PartNotFound(String),
}

impl From<std::convert::Infallible> for Error {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
