//! Conversion of a parsed document into a generic ordered tree.
//!
//! The tree is a `serde_json::Value` whose objects keep insertion order.
//! Keys are camelCase, absent optionals become `null` and list fields are
//! always arrays, even when empty.

use serde_json::{json, Value};

use crate::types::{
    Account, Amount, Balance, BalanceType, BankTransactionCode, CashAccount, CreditDebit,
    Document, Entry, EntryDetail, EntryStatus, ExtensionData, FinancialInstitution, GroupHeader,
    Pagination, Party, PartyChoice, PrivateIdentification, ProprietaryReference, References,
    RelatedAgents, RelatedParties, RemittanceInfo, Report, Servicer, Timestamp,
    TransactionDetails,
};

/// Conversion of one entity into its tree form.
pub trait ToTree {
    fn to_tree(&self) -> Value;
}

/// Convert a parsed document into a generic tree.
///
/// # Examples
/// ```
/// let xml = r#"<Document><BkToCstmrAcctRpt>
///   <GrpHdr><MsgId>MSG1</MsgId><CreDtTm>2024-01-01T10:00:00</CreDtTm></GrpHdr>
/// </BkToCstmrAcctRpt></Document>"#;
/// let document = camt_parser::parse_str(xml).unwrap();
/// let tree = camt_parser::to_tree(&document);
///
/// assert_eq!(tree["groupHeader"]["messageIdentification"], "MSG1");
/// assert_eq!(tree["groupHeader"]["messagePagination"], serde_json::Value::Null);
/// assert_eq!(tree["reports"], serde_json::json!([]));
/// ```
#[must_use]
pub fn to_tree(document: &Document) -> Value {
    document.to_tree()
}

impl<T: ToTree> ToTree for Option<T> {
    fn to_tree(&self) -> Value {
        self.as_ref().map_or(Value::Null, ToTree::to_tree)
    }
}

impl<T: ToTree> ToTree for Vec<T> {
    fn to_tree(&self) -> Value {
        Value::Array(self.iter().map(ToTree::to_tree).collect())
    }
}

impl ToTree for String {
    fn to_tree(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToTree for i64 {
    fn to_tree(&self) -> Value {
        json!(self)
    }
}

impl ToTree for Timestamp {
    fn to_tree(&self) -> Value {
        Value::String(self.to_string())
    }
}

macro_rules! display_to_tree {
    ($($name:ty),+) => {
        $(
            impl ToTree for $name {
                fn to_tree(&self) -> Value {
                    Value::String(self.to_string())
                }
            }
        )+
    };
}

display_to_tree!(BalanceType, CreditDebit, EntryStatus);

impl ToTree for ExtensionData {
    fn to_tree(&self) -> Value {
        Value::Object(self.as_map().clone())
    }
}

/// Empty strings and empty maps collapse to `null`.
fn non_empty_text(value: Option<&String>) -> Value {
    match value {
        Some(text) if !text.is_empty() => Value::String(text.clone()),
        _ => Value::Null,
    }
}

impl ToTree for Document {
    fn to_tree(&self) -> Value {
        json!({
            "groupHeader": self.group_header.to_tree(),
            "reports": self.reports.to_tree(),
        })
    }
}

impl ToTree for GroupHeader {
    fn to_tree(&self) -> Value {
        json!({
            "messageIdentification": self.message_identification,
            "creationTime": self.creation_time.to_tree(),
            "messagePagination": self.message_pagination.to_tree(),
        })
    }
}

impl ToTree for Pagination {
    fn to_tree(&self) -> Value {
        json!({
            "pageNumber": self.page_number,
            "lastPageIndication": self.last_page_indication,
        })
    }
}

impl ToTree for Report {
    fn to_tree(&self) -> Value {
        json!({
            "identification": self.identification,
            "electronicSequenceNumber": self.electronic_sequence_number.to_tree(),
            "creationTime": self.creation_time.to_tree(),
            "account": self.account.to_tree(),
            "balances": self.balances.to_tree(),
            "entries": self.entries.to_tree(),
        })
    }
}

impl ToTree for Account {
    fn to_tree(&self) -> Value {
        json!({
            "iban": self.iban,
            "currency": self.currency.to_tree(),
            "servicer": self.servicer.to_tree(),
        })
    }
}

impl ToTree for Servicer {
    fn to_tree(&self) -> Value {
        json!({
            "financialInstitutionIdentification": self.financial_institution.to_tree(),
        })
    }
}

impl ToTree for FinancialInstitution {
    fn to_tree(&self) -> Value {
        let other = match &self.other {
            Some(data) if !data.is_empty() => data.to_tree(),
            _ => Value::Null,
        };
        json!({
            "bicfi": non_empty_text(self.bic.as_ref()),
            "name": non_empty_text(self.name.as_ref()),
            "other": other,
        })
    }
}

impl ToTree for Balance {
    fn to_tree(&self) -> Value {
        json!({
            "balanceType": self.balance_type.to_tree(),
            "amount": self.amount.to_tree(),
            "creditDebit": self.credit_debit.to_tree(),
            "date": self.date.to_tree(),
        })
    }
}

impl ToTree for Amount {
    fn to_tree(&self) -> Value {
        json!({
            "value": self.value,
            "currency": self.currency,
        })
    }
}

impl ToTree for Entry {
    fn to_tree(&self) -> Value {
        json!({
            "amount": self.amount.to_tree(),
            "creditDebit": self.credit_debit.to_tree(),
            "status": self.status.to_tree(),
            "bookingDate": self.booking_date.to_tree(),
            "valueDate": self.value_date.to_tree(),
            "accountServiceReference": self.account_service_reference.to_tree(),
            "details": self.details.to_tree(),
            "additionalInformation": self.additional_information.to_tree(),
        })
    }
}

impl ToTree for EntryDetail {
    fn to_tree(&self) -> Value {
        json!({
            "transactionDetails": self.transaction_details.to_tree(),
        })
    }
}

impl ToTree for TransactionDetails {
    fn to_tree(&self) -> Value {
        json!({
            "references": self.references.to_tree(),
            "bankTransactionCode": self.bank_transaction_code.to_tree(),
            "relatedAgents": self.related_agents.to_tree(),
            "relatedParties": self.related_parties.to_tree(),
            "relatedRemittanceInformation": self.remittance_information.to_tree(),
        })
    }
}

impl ToTree for References {
    fn to_tree(&self) -> Value {
        json!({
            "endToEndIdentification": self.end_to_end_identification.to_tree(),
            "mandateIdentification": self.mandate_identification.to_tree(),
            "proprietaryReference": self.proprietary.to_tree(),
        })
    }
}

impl ToTree for ProprietaryReference {
    fn to_tree(&self) -> Value {
        json!({
            "type": self.reference_type,
            "reference": self.reference,
        })
    }
}

impl ToTree for BankTransactionCode {
    fn to_tree(&self) -> Value {
        json!({
            "code": self.code,
            "issuer": self.issuer,
        })
    }
}

impl ToTree for RelatedParties {
    fn to_tree(&self) -> Value {
        json!({
            "debtor": self.debtor.to_tree(),
            "debtorAccount": self.debtor_account.to_tree(),
            "creditor": self.creditor.to_tree(),
            "creditorAccount": self.creditor_account.to_tree(),
        })
    }
}

impl ToTree for RelatedAgents {
    fn to_tree(&self) -> Value {
        json!({
            "debtorAgent": self.debtor_agent.to_tree(),
            "creditorAgent": self.creditor_agent.to_tree(),
        })
    }
}

/// The chosen variant's map, without a discriminator.
impl ToTree for PartyChoice {
    fn to_tree(&self) -> Value {
        match self {
            Self::Party(party) => party.to_tree(),
            Self::Institution(institution) => institution.to_tree(),
        }
    }
}

impl ToTree for Party {
    fn to_tree(&self) -> Value {
        json!({
            "name": non_empty_text(self.name.as_ref()),
            "identification": self.identification.to_tree(),
        })
    }
}

impl ToTree for PrivateIdentification {
    fn to_tree(&self) -> Value {
        let other = match &self.other {
            Some(data) if !data.is_empty() => data.to_tree(),
            _ => Value::Null,
        };
        json!({ "other": other })
    }
}

impl ToTree for CashAccount {
    fn to_tree(&self) -> Value {
        json!({ "iban": self.iban })
    }
}

impl ToTree for RemittanceInfo {
    fn to_tree(&self) -> Value {
        json!({ "unstructured": self.unstructured })
    }
}
