//! camt-parser - Strict parser for ISO 20022 camt.052 account reports.
//!
//! This crate reads a "Bank To Customer Account Report" (camt.052) XML
//! document into a typed, immutable [`Document`] and converts it into a
//! generic ordered tree for JSON or YAML output.
//!
//! Parsing is closed-world: every entity recognizes a fixed set of child
//! elements and the first unknown, missing or malformed element aborts the
//! parse. Nothing partial is returned.
//!
//! # Example
//!
//! ```
//! let xml = r#"<Document xmlns="urn:iso:std:iso:20022:tech:xsd:camt.052.001.02">
//!   <BkToCstmrAcctRpt>
//!     <GrpHdr><MsgId>MSG1</MsgId><CreDtTm>2024-01-01T10:00:00</CreDtTm></GrpHdr>
//!     <Rpt>
//!       <Id>RPT1</Id>
//!       <Acct><Id><IBAN>DE89370400440532013000</IBAN></Id></Acct>
//!       <Ntry>
//!         <Amt Ccy="EUR">12.34</Amt>
//!         <CdtDbtInd>CRDT</CdtDbtInd>
//!         <Sts>BOOK</Sts>
//!       </Ntry>
//!     </Rpt>
//!   </BkToCstmrAcctRpt>
//! </Document>"#;
//!
//! let document = camt_parser::parse_str(xml).unwrap();
//! assert_eq!(document.reports[0].identification, "RPT1");
//!
//! let tree = camt_parser::to_tree(&document);
//! assert_eq!(
//!     tree["reports"][0]["entries"][0]["amount"],
//!     serde_json::json!({"value": 12.34, "currency": "EUR"})
//! );
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants and parse options
//! - [`types`]: Document data model
//! - [`error`]: Error types and Result alias
//! - [`xml`]: Namespace-aware tag reading
//! - [`decode`]: Primitive value decoders
//! - [`parser`]: Per-entity parsers and the document assembler
//! - [`output`]: Generic tree and JSON/YAML rendering
//! - [`cli`]: Command-line interface

use std::fs;
use std::path::Path;

pub mod cli;
pub mod config;
pub mod decode;
pub mod error;
pub mod output;
pub mod parser;
pub mod types;
pub mod xml;

pub use config::{DuplicatePolicy, ParseOptions};
pub use error::{CamtError, Result};
pub use output::{to_tree, OutputFormat, ToTree};
pub use types::{
    Account, Amount, Balance, BalanceType, BankTransactionCode, CashAccount, CreditDebit,
    Document, Entry, EntryDetail, EntryStatus, ExtensionData, FinancialInstitution, GroupHeader,
    Pagination, Party, PartyChoice, PrivateIdentification, ProprietaryReference, References,
    RelatedAgents, RelatedParties, RemittanceInfo, Report, Servicer, Timestamp,
    TransactionDetails,
};

const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Document>();
};

/// Byte order mark some banks prepend to their exports.
const UTF8_BOM: &str = "\u{feff}";

/// Parse a camt.052 document from text with default options.
pub fn parse_str(xml: &str) -> Result<Document> {
    parse_str_with_options(xml, ParseOptions::default())
}

/// Parse a camt.052 document from text.
pub fn parse_str_with_options(xml: &str, options: ParseOptions) -> Result<Document> {
    let xml = xml.strip_prefix(UTF8_BOM).unwrap_or(xml);
    let dom = roxmltree::Document::parse(xml)?;
    parser::parse_document(&dom, &parser::ParseContext::new(options))
}

/// Parse a camt.052 document from UTF-8 bytes with default options.
///
/// # Examples
/// ```
/// let err = camt_parser::parse_bytes(b"<Report/>").unwrap_err();
/// assert!(err.is_structural());
///
/// let err = camt_parser::parse_bytes(b"\xff\xfe").unwrap_err();
/// assert!(matches!(err, camt_parser::CamtError::InvalidUtf8(_)));
/// ```
pub fn parse_bytes(bytes: &[u8]) -> Result<Document> {
    parse_bytes_with_options(bytes, ParseOptions::default())
}

/// Parse a camt.052 document from UTF-8 bytes.
pub fn parse_bytes_with_options(bytes: &[u8], options: ParseOptions) -> Result<Document> {
    let xml = std::str::from_utf8(bytes)?;
    parse_str_with_options(xml, options)
}

/// Parse a camt.052 file with default options.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Document> {
    parse_file_with_options(path, ParseOptions::default())
}

/// Parse a camt.052 file.
///
/// Files larger than `options.max_input_size` are refused before reading.
pub fn parse_file_with_options(path: impl AsRef<Path>, options: ParseOptions) -> Result<Document> {
    let path = path.as_ref();
    let size = fs::metadata(path)?.len();
    config::validate_input_size(size, options.max_input_size)?;

    tracing::debug!(path = %path.display(), size, "Reading account report");
    let bytes = fs::read(path)?;
    parse_bytes_with_options(&bytes, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MINIMAL: &str = "<Document><BkToCstmrAcctRpt>\
                             <GrpHdr><MsgId>M</MsgId><CreDtTm>2024-01-01</CreDtTm></GrpHdr>\
                           </BkToCstmrAcctRpt></Document>";

    #[test]
    fn test_parse_str() {
        let document = parse_str(MINIMAL).unwrap();
        assert_eq!(document.group_header.message_identification, "M");
    }

    #[test]
    fn test_parse_bytes_strips_bom() {
        let mut bytes = UTF8_BOM.as_bytes().to_vec();
        bytes.extend_from_slice(MINIMAL.as_bytes());
        assert!(parse_bytes(&bytes).is_ok());
    }

    #[test]
    fn test_parse_malformed_xml() {
        let err = parse_str("<Document><BkToCstmrAcctRpt></Document>").unwrap_err();
        assert!(matches!(err, CamtError::XmlParse(_)));
        assert!(!err.is_structural());
    }

    #[test]
    fn test_parse_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let document = parse_file(file.path()).unwrap();
        assert!(document.reports.is_empty());
    }

    #[test]
    fn test_parse_file_too_large() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let options = ParseOptions::new().with_max_input_size(10);
        let err = parse_file_with_options(file.path(), options).unwrap_err();
        assert!(matches!(err, CamtError::InputTooLarge { limit: 10, .. }));
    }

    #[test]
    fn test_parse_file_missing() {
        let err = parse_file("/nonexistent/report.xml").unwrap_err();
        assert!(matches!(err, CamtError::Io(_)));
    }
}
