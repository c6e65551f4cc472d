//! Core data types for a camt.052 Bank To Customer Account Report.
//!
//! Each record corresponds to one schema concept and is built exactly once by
//! its parser. Records own their children by value; nothing is shared and
//! nothing points back to a parent.

use std::fmt;
use std::str::FromStr;

use chrono::{FixedOffset, NaiveDateTime, Timelike};
use serde_json::{Map, Value};

/// Declare a code-list enum with its wire codes and display names.
macro_rules! code_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $code:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// All variants in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Get the ISO 20022 wire code.
            #[must_use]
            pub fn code(&self) -> &'static str {
                match self {
                    $( Self::$variant => $code ),+
                }
            }

            /// Get the variant name without the type prefix.
            #[must_use]
            pub fn variant_name(&self) -> &'static str {
                match self {
                    $( Self::$variant => stringify!($variant) ),+
                }
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(code: &str) -> std::result::Result<Self, Self::Err> {
                match code {
                    $( $code => Ok(Self::$variant), )+
                    other => Err(format!(
                        "'{}' is not a valid {} code",
                        other,
                        stringify!($name)
                    )),
                }
            }
        }

        /// Output form used by the tree serializer, e.g. `CreditDebit.Credit`.
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}.{}", stringify!($name), self.variant_name())
            }
        }
    };
}

code_enum! {
    /// Balance type code (`Bal/Tp/CdOrPrtry/Cd`).
    BalanceType {
        /// Closing available.
        ClosingAvailable => "CLAV",
        /// Closing booked.
        ClosingBooked => "CLBD",
        /// Forward available.
        ForwardAvailable => "FWAV",
        /// Opening booked.
        OpeningBooked => "OPBD",
        /// Previously closed booked.
        PreviouslyClosed => "PRCD",
        /// Opening available.
        OpeningAvailable => "OPAV",
    }
}

code_enum! {
    /// Credit/debit indicator (`CdtDbtInd`).
    CreditDebit {
        Credit => "CRDT",
        Debit => "DBIT",
    }
}

code_enum! {
    /// Status of an entry (`Ntry/Sts`).
    EntryStatus {
        Booked => "BOOK",
        Information => "INFO",
        Pending => "PDNG",
        Future => "FUTR",
    }
}

/// A point in time from a `Dt`, `DtTm` or `CreDtTm` element.
///
/// Date-only values are stored as midnight without offset, so `2024-01-01`
/// and `2024-01-01T00:00:00` compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timestamp {
    /// Wall-clock date and time as written in the document.
    pub local: NaiveDateTime,

    /// UTC offset, when the document carried one.
    pub offset: Option<FixedOffset>,
}

impl Timestamp {
    /// Create a timestamp without offset.
    #[must_use]
    pub fn naive(local: NaiveDateTime) -> Self {
        Self {
            local,
            offset: None,
        }
    }

    /// Create a timestamp with a UTC offset.
    #[must_use]
    pub fn with_offset(local: NaiveDateTime, offset: FixedOffset) -> Self {
        Self {
            local,
            offset: Some(offset),
        }
    }
}

/// ISO-8601 rendering: seconds always, microseconds only when non-zero,
/// offset only when present.
impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.local.format("%Y-%m-%dT%H:%M:%S"))?;
        let micros = self.local.nanosecond() / 1_000;
        if micros != 0 {
            write!(f, ".{micros:06}")?;
        }
        if let Some(offset) = self.offset {
            let secs = offset.local_minus_utc();
            let sign = if secs < 0 { '-' } else { '+' };
            let secs = secs.abs();
            write!(f, "{sign}{:02}:{:02}", secs / 3600, (secs % 3600) / 60)?;
        }
        Ok(())
    }
}

/// Unvalidated extension data.
///
/// Ordered key/value pairs taken verbatim from the direct children of an
/// identification element (`Othr`) whose scheme is not modeled. Keys are
/// unique; inserting an existing key replaces its value in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtensionData {
    entries: Map<String, Value>,
}

impl ExtensionData {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing the value of an existing key in place.
    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        self.entries
            .insert(key.into(), value.map_or(Value::Null, Value::String));
    }

    /// Look up a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    /// Iterate over entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The entries as an ordered JSON object.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Complete camt.052 document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Group header (`GrpHdr`).
    pub group_header: GroupHeader,

    /// Reports (`Rpt`) in document order.
    pub reports: Vec<Report>,
}

impl Document {
    /// Total number of entries over all reports.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.reports.iter().map(|r| r.entries.len()).sum()
    }
}

/// Message-level header (`GrpHdr`).
#[derive(Debug, Clone, PartialEq)]
pub struct GroupHeader {
    /// `MsgId`.
    pub message_identification: String,

    /// `CreDtTm`.
    pub creation_time: Timestamp,

    /// `MsgPgntn`.
    pub message_pagination: Option<Pagination>,
}

/// Message pagination (`MsgPgntn`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// `PgNb`.
    pub page_number: i64,

    /// `LastPgInd`.
    pub last_page_indication: bool,
}

/// One account report (`Rpt`).
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// `Id`.
    pub identification: String,

    /// `ElctrncSeqNb`.
    pub electronic_sequence_number: Option<i64>,

    /// `CreDtTm`.
    pub creation_time: Option<Timestamp>,

    /// `Acct`.
    pub account: Account,

    /// `Bal`, in document order.
    pub balances: Vec<Balance>,

    /// `Ntry`, in document order.
    pub entries: Vec<Entry>,
}

/// Reported account (`Acct`). Only IBAN identification is modeled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// `Id/IBAN`.
    pub iban: String,

    /// `Ccy`.
    pub currency: Option<String>,

    /// `Svcr`.
    pub servicer: Option<Servicer>,
}

/// Account servicer (`Svcr`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Servicer {
    /// `FinInstnId`.
    pub financial_institution: FinancialInstitution,
}

/// Financial institution identification (`FinInstnId`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FinancialInstitution {
    /// `BIC`.
    pub bic: Option<String>,

    /// `Nm`.
    pub name: Option<String>,

    /// `Othr`, kept as unvalidated extension data.
    pub other: Option<ExtensionData>,
}

/// Balance (`Bal`).
#[derive(Debug, Clone, PartialEq)]
pub struct Balance {
    /// `Tp/CdOrPrtry/Cd`.
    pub balance_type: BalanceType,

    /// `Amt`.
    pub amount: Amount,

    /// `CdtDbtInd`.
    pub credit_debit: CreditDebit,

    /// `Dt/Dt` or `Dt/DtTm`.
    pub date: Timestamp,
}

/// Amount with currency (`Amt` with `Ccy` attribute).
///
/// The value is a floating-point approximation of the decimal in the
/// document.
#[derive(Debug, Clone, PartialEq)]
pub struct Amount {
    pub value: f64,
    pub currency: String,
}

/// Account entry (`Ntry`).
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// `Amt`.
    pub amount: Amount,

    /// `CdtDbtInd`.
    pub credit_debit: CreditDebit,

    /// `Sts`.
    pub status: EntryStatus,

    /// `BookgDt`.
    pub booking_date: Option<Timestamp>,

    /// `ValDt`.
    pub value_date: Option<Timestamp>,

    /// `AcctSvcrRef`.
    pub account_service_reference: Option<String>,

    /// `NtryDtls`, in document order.
    pub details: Vec<EntryDetail>,

    /// `AddtlNtryInf`.
    pub additional_information: Option<String>,
}

/// Entry details (`NtryDtls`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDetail {
    /// `TxDtls`.
    pub transaction_details: TransactionDetails,
}

/// Transaction details (`TxDtls`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionDetails {
    pub references: Option<References>,
    pub bank_transaction_code: Option<BankTransactionCode>,
    pub related_parties: Option<RelatedParties>,
    pub related_agents: Option<RelatedAgents>,
    pub remittance_information: Vec<RemittanceInfo>,
}

/// Transaction references (`Refs`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct References {
    /// `EndToEndId`.
    pub end_to_end_identification: Option<String>,

    /// `MndtId`.
    pub mandate_identification: Option<String>,

    /// `Prtry`, in document order.
    pub proprietary: Vec<ProprietaryReference>,
}

/// Proprietary reference (`Refs/Prtry`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProprietaryReference {
    /// `Tp`.
    pub reference_type: String,

    /// `Ref`.
    pub reference: String,
}

/// Bank transaction code (`TxDtls/BkTxCd/Prtry`).
///
/// Only the proprietary variant is modeled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankTransactionCode {
    /// `Cd`.
    pub code: String,

    /// `Issr`.
    pub issuer: String,
}

/// Related parties (`RltdPties`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RelatedParties {
    pub debtor: Option<PartyChoice>,
    pub debtor_account: Option<CashAccount>,
    pub creditor: Option<PartyChoice>,
    pub creditor_account: Option<CashAccount>,
}

/// Related agents (`RltdAgts`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RelatedAgents {
    /// `DbtrAgt/FinInstnId`.
    pub debtor_agent: Option<FinancialInstitution>,

    /// `CdtrAgt/FinInstnId`.
    pub creditor_agent: Option<FinancialInstitution>,
}

/// A debtor or creditor: either a party or a financial institution.
///
/// Resolved from the element's shape, see
/// [`resolve_party_choice`](crate::parser::resolve_party_choice).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartyChoice {
    Party(Party),
    Institution(FinancialInstitution),
}

/// Party identification (`Nm`, `Id`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Party {
    /// `Nm`.
    pub name: Option<String>,

    /// `Id/PrvtId`. Only the private person variant is modeled.
    pub identification: Option<PrivateIdentification>,
}

/// Private person identification (`PrvtId`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrivateIdentification {
    /// `Othr`, kept as unvalidated extension data.
    pub other: Option<ExtensionData>,
}

/// Remittance information (`RmtInf`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemittanceInfo {
    /// `Ustrd`.
    pub unstructured: String,
}

/// Counterparty account (`DbtrAcct`, `CdtrAcct`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashAccount {
    /// `Id/IBAN`.
    pub iban: String,
}
