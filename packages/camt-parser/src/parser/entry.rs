//! Account entries.

use roxmltree::Node;

use super::{required, FromElement, ParseContext};
use crate::decode;
use crate::error::{CamtError, Result};
use crate::types::{CreditDebit, Entry, EntryDetail, EntryStatus, TransactionDetails};
use crate::xml::{element_children, get_tag_name, get_text_owned};

impl FromElement for Entry {
    const ENTITY: &'static str = "Entry";

    fn from_element(node: Node<'_, '_>, ctx: &ParseContext) -> Result<Self> {
        let mut amount = None;
        let mut credit_debit: Option<CreditDebit> = None;
        let mut status: Option<EntryStatus> = None;
        let mut booking_date = None;
        let mut value_date = None;
        let mut account_service_reference = None;
        let mut details: Vec<EntryDetail> = Vec::new();
        let mut additional_information = None;

        for child in element_children(node) {
            let tag = get_tag_name(child);
            match tag {
                "Amt" => ctx.set(
                    &mut amount,
                    decode::amount(child, Self::ENTITY)?,
                    tag,
                    Self::ENTITY,
                )?,
                "CdtDbtInd" => ctx.set(
                    &mut credit_debit,
                    decode::code(child, Self::ENTITY)?,
                    tag,
                    Self::ENTITY,
                )?,
                "Sts" => ctx.set(
                    &mut status,
                    decode::code(child, Self::ENTITY)?,
                    tag,
                    Self::ENTITY,
                )?,
                "BookgDt" => ctx.set(
                    &mut booking_date,
                    decode::date_or_datetime(child, Self::ENTITY)?,
                    tag,
                    Self::ENTITY,
                )?,
                "ValDt" => ctx.set(
                    &mut value_date,
                    decode::date_or_datetime(child, Self::ENTITY)?,
                    tag,
                    Self::ENTITY,
                )?,
                "AcctSvcrRef" => ctx.set(
                    &mut account_service_reference,
                    get_text_owned(child),
                    tag,
                    Self::ENTITY,
                )?,
                "NtryDtls" => details.push(ctx.parse(child)?),
                "AddtlNtryInf" => ctx.set(
                    &mut additional_information,
                    get_text_owned(child),
                    tag,
                    Self::ENTITY,
                )?,
                // Banks emit a stray, often empty, entry-level code; it carries nothing we model
                "BkTxCd" => {
                    tracing::debug!(entity = Self::ENTITY, "Ignoring entry-level <BkTxCd>");
                }
                _ => return Err(CamtError::unknown(tag, Self::ENTITY)),
            }
        }

        Ok(Self {
            amount: required(amount, "Amt", Self::ENTITY)?,
            credit_debit: required(credit_debit, "CdtDbtInd", Self::ENTITY)?,
            status: required(status, "Sts", Self::ENTITY)?,
            booking_date,
            value_date,
            account_service_reference: account_service_reference.flatten(),
            details,
            additional_information: additional_information.flatten(),
        })
    }
}

impl FromElement for EntryDetail {
    const ENTITY: &'static str = "EntryDetail";

    fn from_element(node: Node<'_, '_>, ctx: &ParseContext) -> Result<Self> {
        let mut transaction_details: Option<TransactionDetails> = None;

        for child in element_children(node) {
            let tag = get_tag_name(child);
            match tag {
                "TxDtls" => {
                    ctx.set(&mut transaction_details, ctx.parse(child)?, tag, Self::ENTITY)?
                }
                _ => return Err(CamtError::unknown(tag, Self::ENTITY)),
            }
        }

        Ok(Self {
            transaction_details: required(transaction_details, "TxDtls", Self::ENTITY)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    const MINIMAL: &str = "<Ntry>\
                             <Amt Ccy=\"EUR\">12.34</Amt>\
                             <CdtDbtInd>CRDT</CdtDbtInd>\
                             <Sts>BOOK</Sts>\
                           </Ntry>";

    fn parse<T: FromElement>(xml: &str) -> Result<T> {
        let doc = Document::parse(xml).unwrap();
        ParseContext::default().parse(doc.root_element())
    }

    #[test]
    fn test_minimal_entry() {
        let entry: Entry = parse(MINIMAL).unwrap();
        assert_eq!(entry.amount.value, 12.34);
        assert_eq!(entry.credit_debit, CreditDebit::Credit);
        assert_eq!(entry.status, EntryStatus::Booked);
        assert!(entry.booking_date.is_none());
        assert!(entry.value_date.is_none());
        assert!(entry.details.is_empty());
        assert!(entry.additional_information.is_none());
    }

    #[test]
    fn test_full_entry() {
        let entry: Entry = parse(
            "<Ntry>\
               <Amt Ccy=\"EUR\">100.00</Amt>\
               <CdtDbtInd>DBIT</CdtDbtInd>\
               <Sts>PDNG</Sts>\
               <BookgDt><Dt>2024-02-01</Dt></BookgDt>\
               <ValDt><DtTm>2024-02-02T08:15:00+01:00</DtTm></ValDt>\
               <AcctSvcrRef>REF-9</AcctSvcrRef>\
               <BkTxCd/>\
               <NtryDtls><TxDtls/></NtryDtls>\
               <NtryDtls><TxDtls/></NtryDtls>\
               <AddtlNtryInf>Card payment</AddtlNtryInf>\
             </Ntry>",
        )
        .unwrap();

        assert_eq!(entry.status, EntryStatus::Pending);
        assert_eq!(
            entry.booking_date.map(|d| d.to_string()).as_deref(),
            Some("2024-02-01T00:00:00")
        );
        assert_eq!(
            entry.value_date.map(|d| d.to_string()).as_deref(),
            Some("2024-02-02T08:15:00+01:00")
        );
        assert_eq!(entry.account_service_reference.as_deref(), Some("REF-9"));
        assert_eq!(entry.details.len(), 2);
        assert_eq!(entry.additional_information.as_deref(), Some("Card payment"));
    }

    #[test]
    fn test_entry_ignores_bank_transaction_code_with_content() {
        let xml = "<Ntry>\
                     <Amt Ccy=\"EUR\">1</Amt>\
                     <CdtDbtInd>CRDT</CdtDbtInd>\
                     <Sts>INFO</Sts>\
                     <BkTxCd><Domn><Cd>PMNT</Cd></Domn></BkTxCd>\
                   </Ntry>";
        let entry: Entry = parse(xml).unwrap();
        assert_eq!(entry.status, EntryStatus::Information);
    }

    #[test]
    fn test_entry_unknown_status() {
        let xml = MINIMAL.replace("BOOK", "DONE");
        let err = parse::<Entry>(&xml).unwrap_err();
        assert!(err.is_structural());
        assert!(err.to_string().contains("'DONE'"));
    }

    #[test]
    fn test_entry_unknown_child() {
        let xml = MINIMAL.replace("<Sts>", "<RvslInd>true</RvslInd><Sts>");
        let err = parse::<Entry>(&xml).unwrap_err();
        assert_eq!(err.to_string(), "No handler for element <RvslInd> in Entry");
    }

    #[test]
    fn test_entry_missing_status() {
        let xml = MINIMAL.replace("<Sts>BOOK</Sts>", "");
        let err = parse::<Entry>(&xml).unwrap_err();
        assert_eq!(err.to_string(), "Missing required XML element: Sts in Entry");
    }

    #[test]
    fn test_entry_detail_requires_transaction_details() {
        let err = parse::<EntryDetail>("<NtryDtls/>").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required XML element: TxDtls in EntryDetail"
        );

        let err = parse::<EntryDetail>("<NtryDtls><Btch/></NtryDtls>").unwrap_err();
        assert_eq!(err.to_string(), "No handler for element <Btch> in EntryDetail");
    }
}
