//! Configuration constants and parse options.

use crate::error::{CamtError, Result};

/// Local name of the document root element.
pub const DOCUMENT_TAG: &str = "Document";

/// Local name of the single message element below the root.
pub const REPORT_MESSAGE_TAG: &str = "BkToCstmrAcctRpt";

/// camt.052 namespace URIs seen in the wild.
///
/// The parser accepts any namespace; documents in other namespaces are only
/// logged.
pub const KNOWN_NAMESPACES: &[&str] = &[
    "urn:iso:std:iso:20022:tech:xsd:camt.052.001.02",
    "urn:iso:std:iso:20022:tech:xsd:camt.052.001.03",
    "urn:iso:std:iso:20022:tech:xsd:camt.052.001.04",
    "urn:iso:std:iso:20022:tech:xsd:camt.052.001.05",
    "urn:iso:std:iso:20022:tech:xsd:camt.052.001.06",
    "urn:iso:std:iso:20022:tech:xsd:camt.052.001.07",
    "urn:iso:std:iso:20022:tech:xsd:camt.052.001.08",
];

/// Default maximum input file size in bytes (100 MB).
///
/// The whole document is materialized in memory, so very large files are
/// refused before reading.
pub const DEFAULT_MAX_INPUT_SIZE: u64 = 100 * 1024 * 1024;

/// Check whether a namespace URI is a known camt.052 namespace.
///
/// # Examples
/// ```
/// use camt_parser::config::is_known_namespace;
///
/// assert!(is_known_namespace("urn:iso:std:iso:20022:tech:xsd:camt.052.001.02"));
/// assert!(!is_known_namespace("urn:iso:std:iso:20022:tech:xsd:camt.053.001.02"));
/// ```
#[must_use]
pub fn is_known_namespace(uri: &str) -> bool {
    KNOWN_NAMESPACES.contains(&uri)
}

/// Validate an input size against a limit.
///
/// # Returns
/// * `Ok(())` if `size <= limit`
/// * `Err(CamtError::InputTooLarge)` otherwise
pub fn validate_input_size(size: u64, limit: u64) -> Result<()> {
    if size > limit {
        return Err(CamtError::InputTooLarge { size, limit });
    }
    Ok(())
}

/// What to do when an entity contains a singular child more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// The later occurrence overwrites the earlier one (logged as a warning).
    #[default]
    LastWins,
    /// A repeated singular child is a structural error.
    Reject,
}

/// Options controlling a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Handling of repeated singular children.
    pub duplicate_policy: DuplicatePolicy,

    /// Maximum accepted input size in bytes for file input.
    pub max_input_size: u64,
}

impl ParseOptions {
    /// Create options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::default(),
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
        }
    }

    /// Set the duplicate policy.
    #[must_use]
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Set the maximum input size.
    #[must_use]
    pub fn with_max_input_size(mut self, bytes: u64) -> Self {
        self.max_input_size = bytes;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_namespaces() {
        for ns in KNOWN_NAMESPACES {
            assert!(ns.contains("camt.052"));
            assert!(is_known_namespace(ns));
        }
        assert!(!is_known_namespace(""));
    }

    #[test]
    fn test_validate_input_size() {
        assert!(validate_input_size(10, 10).is_ok());
        assert!(validate_input_size(0, DEFAULT_MAX_INPUT_SIZE).is_ok());

        let err = validate_input_size(11, 10).unwrap_err();
        assert!(matches!(
            err,
            CamtError::InputTooLarge { size: 11, limit: 10 }
        ));
    }

    #[test]
    fn test_parse_options_defaults() {
        let options = ParseOptions::default();
        assert_eq!(options.duplicate_policy, DuplicatePolicy::LastWins);
        assert_eq!(options.max_input_size, DEFAULT_MAX_INPUT_SIZE);
    }

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new()
            .with_duplicate_policy(DuplicatePolicy::Reject)
            .with_max_input_size(1024);
        assert_eq!(options.duplicate_policy, DuplicatePolicy::Reject);
        assert_eq!(options.max_input_size, 1024);
    }
}
