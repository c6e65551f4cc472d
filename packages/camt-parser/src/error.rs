//! Error types for the camt.052 parser.
//!
//! Every schema violation is fatal and surfaces as one of the structural
//! variants (`UnknownElement`, `MissingElement`, `Structure`). The remaining
//! variants belong to the layers around the parser (input decoding, file
//! access, output rendering).

use thiserror::Error;

/// Main error type for the parser library.
#[derive(Debug, Error)]
pub enum CamtError {
    /// Input is not well-formed XML.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Input bytes are not valid UTF-8.
    #[error("Input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// Unrecognized child element inside a closed-world entity.
    #[error("No handler for element <{tag_name}>{}", .context.as_ref().map(|c| format!(" in {c}")).unwrap_or_default())]
    UnknownElement {
        tag_name: String,
        context: Option<String>,
    },

    /// Required child element absent.
    #[error("Missing required XML element: {element} in {context}")]
    MissingElement { element: String, context: String },

    /// Shape violation or undecodable value.
    #[error("Invalid structure in {context}: {message}")]
    Structure { context: String, message: String },

    /// Input file exceeds the configured size limit.
    #[error("Input is {size} bytes, exceeding the limit of {limit} bytes")]
    InputTooLarge { size: u64, limit: u64 },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON rendering failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML rendering failed.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl CamtError {
    /// Build an `UnknownElement` error for a tag found inside `entity`.
    pub fn unknown(tag_name: impl Into<String>, entity: impl Into<String>) -> Self {
        Self::UnknownElement {
            tag_name: tag_name.into(),
            context: Some(entity.into()),
        }
    }

    /// Build a `MissingElement` error.
    pub fn missing(element: impl Into<String>, entity: impl Into<String>) -> Self {
        Self::MissingElement {
            element: element.into(),
            context: entity.into(),
        }
    }

    /// Build a `Structure` error.
    pub fn structure(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Structure {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Whether this error is a violation of the expected document shape.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::UnknownElement { .. } | Self::MissingElement { .. } | Self::Structure { .. }
        )
    }
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, CamtError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_element_with_context() {
        let err = CamtError::unknown("Foo", "Entry");
        assert_eq!(err.to_string(), "No handler for element <Foo> in Entry");
    }

    #[test]
    fn test_unknown_element_without_context() {
        let err = CamtError::UnknownElement {
            tag_name: "Foo".to_string(),
            context: None,
        };
        assert_eq!(err.to_string(), "No handler for element <Foo>");
    }

    #[test]
    fn test_missing_element_display() {
        let err = CamtError::missing("MsgId", "GroupHeader");
        assert_eq!(
            err.to_string(),
            "Missing required XML element: MsgId in GroupHeader"
        );
    }

    #[test]
    fn test_structure_display() {
        let err = CamtError::structure("Balance", "unknown balance type code 'XXXX'");
        assert_eq!(
            err.to_string(),
            "Invalid structure in Balance: unknown balance type code 'XXXX'"
        );
    }

    #[test]
    fn test_is_structural() {
        assert!(CamtError::unknown("Foo", "Entry").is_structural());
        assert!(CamtError::missing("Id", "Report").is_structural());
        assert!(CamtError::structure("Dt", "bad").is_structural());
        assert!(!CamtError::InputTooLarge { size: 2, limit: 1 }.is_structural());
    }
}
