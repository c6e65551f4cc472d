//! Document assembler: root checks, group header and reports.

use roxmltree::Node;

use super::{required, FromElement, ParseContext};
use crate::config::{is_known_namespace, DOCUMENT_TAG, REPORT_MESSAGE_TAG};
use crate::decode;
use crate::error::{CamtError, Result};
use crate::types::{Account, Balance, Document, Entry, GroupHeader, Report};
use crate::xml::{element_children, get_namespace, get_tag_name, get_text, single_child};

/// Parse a complete camt.052 document from a `roxmltree` DOM.
///
/// The root must be `Document` holding exactly one `BkToCstmrAcctRpt`.
/// The namespace is not enforced.
///
/// # Errors
/// Returns the first structural violation found in document order.
pub fn parse_document(dom: &roxmltree::Document<'_>, ctx: &ParseContext) -> Result<Document> {
    let root = dom.root_element();
    if get_tag_name(root) != DOCUMENT_TAG {
        return Err(CamtError::structure(
            DOCUMENT_TAG,
            format!("root element must be <{DOCUMENT_TAG}>, found <{}>", get_tag_name(root)),
        ));
    }

    let namespace = get_namespace(root);
    if !namespace.is_some_and(is_known_namespace) {
        tracing::debug!(?namespace, "Document namespace is not a known camt.052 namespace");
    }

    let message = single_child(root, DOCUMENT_TAG)?;
    if get_tag_name(message) != REPORT_MESSAGE_TAG {
        return Err(CamtError::structure(
            DOCUMENT_TAG,
            format!(
                "document must contain <{REPORT_MESSAGE_TAG}>, found <{}>",
                get_tag_name(message)
            ),
        ));
    }

    let document: Document = ctx.parse(message)?;
    tracing::info!(
        message_id = %document.group_header.message_identification,
        reports = document.reports.len(),
        entries = document.entry_count(),
        "Parsed account report"
    );
    Ok(document)
}

/// The `BkToCstmrAcctRpt` message element.
impl FromElement for Document {
    const ENTITY: &'static str = REPORT_MESSAGE_TAG;

    fn from_element(node: Node<'_, '_>, ctx: &ParseContext) -> Result<Self> {
        let mut group_header: Option<GroupHeader> = None;
        let mut reports: Vec<Report> = Vec::new();

        for child in element_children(node) {
            let tag = get_tag_name(child);
            match tag {
                "GrpHdr" => ctx.set(&mut group_header, ctx.parse(child)?, tag, Self::ENTITY)?,
                "Rpt" => reports.push(ctx.parse(child)?),
                _ => return Err(CamtError::unknown(tag, Self::ENTITY)),
            }
        }

        Ok(Self {
            group_header: required(group_header, "GrpHdr", Self::ENTITY)?,
            reports,
        })
    }
}

impl FromElement for Report {
    const ENTITY: &'static str = "Report";

    fn from_element(node: Node<'_, '_>, ctx: &ParseContext) -> Result<Self> {
        let mut identification = None;
        let mut electronic_sequence_number = None;
        let mut creation_time = None;
        let mut account: Option<Account> = None;
        let mut balances: Vec<Balance> = Vec::new();
        let mut entries: Vec<Entry> = Vec::new();

        for child in element_children(node) {
            let tag = get_tag_name(child);
            match tag {
                "Id" => ctx.set(
                    &mut identification,
                    get_text(child).unwrap_or_default().to_string(),
                    tag,
                    Self::ENTITY,
                )?,
                "ElctrncSeqNb" => ctx.set(
                    &mut electronic_sequence_number,
                    decode::integer(child, Self::ENTITY)?,
                    tag,
                    Self::ENTITY,
                )?,
                "CreDtTm" => ctx.set(
                    &mut creation_time,
                    decode::timestamp(child, Self::ENTITY)?,
                    tag,
                    Self::ENTITY,
                )?,
                "Acct" => ctx.set(&mut account, ctx.parse(child)?, tag, Self::ENTITY)?,
                "Bal" => balances.push(ctx.parse(child)?),
                "Ntry" => entries.push(ctx.parse(child)?),
                _ => return Err(CamtError::unknown(tag, Self::ENTITY)),
            }
        }

        Ok(Self {
            identification: required(identification, "Id", Self::ENTITY)?,
            electronic_sequence_number,
            creation_time,
            account: required(account, "Acct", Self::ENTITY)?,
            balances,
            entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DuplicatePolicy, ParseOptions};

    const REPORT: &str = "<Rpt>\
                            <Id>RPT1</Id>\
                            <ElctrncSeqNb>42</ElctrncSeqNb>\
                            <CreDtTm>2024-01-01T10:00:00</CreDtTm>\
                            <Acct><Id><IBAN>DE89370400440532013000</IBAN></Id></Acct>\
                          </Rpt>";

    fn parse_xml(xml: &str) -> Result<Document> {
        let dom = roxmltree::Document::parse(xml).unwrap();
        parse_document(&dom, &ParseContext::default())
    }

    fn wrap(message: &str) -> String {
        format!(
            "<Document xmlns=\"urn:iso:std:iso:20022:tech:xsd:camt.052.001.02\">{message}</Document>"
        )
    }

    fn message(body: &str) -> String {
        wrap(&format!(
            "<BkToCstmrAcctRpt>\
               <GrpHdr><MsgId>MSG1</MsgId><CreDtTm>2024-01-01T10:00:00</CreDtTm></GrpHdr>\
               {body}\
             </BkToCstmrAcctRpt>"
        ))
    }

    #[test]
    fn test_document_with_report() {
        let document = parse_xml(&message(REPORT)).unwrap();
        assert_eq!(document.group_header.message_identification, "MSG1");
        assert_eq!(document.reports.len(), 1);

        let report = &document.reports[0];
        assert_eq!(report.identification, "RPT1");
        assert_eq!(report.electronic_sequence_number, Some(42));
        assert_eq!(report.account.iban, "DE89370400440532013000");
        assert!(report.balances.is_empty());
        assert!(report.entries.is_empty());
    }

    #[test]
    fn test_document_without_reports() {
        let document = parse_xml(&message("")).unwrap();
        assert!(document.reports.is_empty());
        assert_eq!(document.entry_count(), 0);
    }

    #[test]
    fn test_reports_keep_document_order() {
        let second = REPORT.replace("RPT1", "RPT2");
        let document = parse_xml(&message(&format!("{REPORT}{second}"))).unwrap();
        let ids: Vec<&str> = document
            .reports
            .iter()
            .map(|r| r.identification.as_str())
            .collect();
        assert_eq!(ids, ["RPT1", "RPT2"]);
    }

    #[test]
    fn test_document_without_namespace() {
        let xml = message(REPORT).replace(
            " xmlns=\"urn:iso:std:iso:20022:tech:xsd:camt.052.001.02\"",
            "",
        );
        assert!(parse_xml(&xml).is_ok());
    }

    #[test]
    fn test_wrong_root() {
        let err = parse_xml("<Report><BkToCstmrAcctRpt/></Report>").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid structure in Document: root element must be <Document>, found <Report>"
        );
    }

    #[test]
    fn test_wrong_message() {
        let err = parse_xml(&wrap("<BkToCstmrStmt/>")).unwrap_err();
        assert!(err.is_structural());
        assert!(err.to_string().contains("<BkToCstmrStmt>"));
    }

    #[test]
    fn test_two_messages() {
        let err = parse_xml(&wrap("<BkToCstmrAcctRpt/><BkToCstmrAcctRpt/>")).unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn test_group_header_required() {
        let err = parse_xml(&wrap("<BkToCstmrAcctRpt/>")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required XML element: GrpHdr in BkToCstmrAcctRpt"
        );
    }

    #[test]
    fn test_unknown_message_child() {
        let err = parse_xml(&message("<SplmtryData/>")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "No handler for element <SplmtryData> in BkToCstmrAcctRpt"
        );
    }

    #[test]
    fn test_report_requires_account() {
        let err = parse_xml(&message("<Rpt><Id>R</Id></Rpt>")).unwrap_err();
        assert_eq!(err.to_string(), "Missing required XML element: Acct in Report");
    }

    #[test]
    fn test_report_unknown_child() {
        let body = REPORT.replace("<Id>RPT1</Id>", "<Id>RPT1</Id><FrToDt/>");
        let err = parse_xml(&message(&body)).unwrap_err();
        assert_eq!(err.to_string(), "No handler for element <FrToDt> in Report");
    }

    #[test]
    fn test_report_bad_sequence_number() {
        let body = REPORT.replace("42", "forty-two");
        let err = parse_xml(&message(&body)).unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn test_duplicate_report_id() {
        let body = REPORT.replace("<Id>RPT1</Id>", "<Id>OLD</Id><Id>NEW</Id>");
        let document = parse_xml(&message(&body)).unwrap();
        assert_eq!(document.reports[0].identification, "NEW");

        let xml = message(&body);
        let dom = roxmltree::Document::parse(&xml).unwrap();
        let ctx = ParseContext::new(
            ParseOptions::new().with_duplicate_policy(DuplicatePolicy::Reject),
        );
        let err = parse_document(&dom, &ctx).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid structure in Report: <Id> occurs more than once"
        );
    }
}
