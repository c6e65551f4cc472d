//! Primitive decoders for leaf values.
//!
//! Every failure is reported as a structural error naming the offending tag
//! and the entity being parsed.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use roxmltree::Node;

use crate::error::{CamtError, Result};
use crate::types::{Amount, ExtensionData, Timestamp};
use crate::xml::{element_children, get_attribute, get_tag_name, get_text, single_child};

/// Naive date-time layouts accepted after the offset-aware attempts fail.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Offset-aware layouts not covered by RFC 3339 (no seconds).
const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%:z", "%Y-%m-%d %H:%M%:z"];

/// Parse an ISO-8601 date or date-time string.
///
/// A date without time becomes midnight without offset.
///
/// # Examples
/// ```
/// use camt_parser::decode::parse_timestamp;
///
/// let date = parse_timestamp("2024-01-01").unwrap();
/// let datetime = parse_timestamp("2024-01-01T00:00:00").unwrap();
/// assert_eq!(date, datetime);
/// assert_eq!(
///     parse_timestamp("2024-01-01T10:00:00+01:00").unwrap().to_string(),
///     "2024-01-01T10:00:00+01:00"
/// );
/// assert!(parse_timestamp("yesterday").is_none());
/// ```
#[must_use]
pub fn parse_timestamp(text: &str) -> Option<Timestamp> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(Timestamp::with_offset(dt.naive_local(), *dt.offset()));
    }
    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return Some(Timestamp::with_offset(dt.naive_local(), *dt.offset()));
        }
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(local) = NaiveDateTime::parse_from_str(text, format) {
            return Some(Timestamp::naive(local));
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(Timestamp::naive)
}

/// Decode the text of an element as a timestamp (e.g. `CreDtTm`).
pub fn timestamp(node: Node<'_, '_>, entity: &str) -> Result<Timestamp> {
    let text = get_text(node).unwrap_or_default();
    parse_timestamp(text).ok_or_else(|| {
        CamtError::structure(
            entity,
            format!(
                "<{}> is not an ISO-8601 date or date-time: '{text}'",
                get_tag_name(node)
            ),
        )
    })
}

/// Decode a date-or-datetime choice element.
///
/// The element must have exactly one child, `Dt` or `DtTm`, holding an
/// ISO-8601 value.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use camt_parser::decode::date_or_datetime;
///
/// let a = Document::parse("<BookgDt><Dt>2024-01-01</Dt></BookgDt>").unwrap();
/// let b = Document::parse("<BookgDt><DtTm>2024-01-01T00:00:00</DtTm></BookgDt>").unwrap();
/// assert_eq!(
///     date_or_datetime(a.root_element(), "Entry").unwrap(),
///     date_or_datetime(b.root_element(), "Entry").unwrap()
/// );
/// ```
pub fn date_or_datetime(node: Node<'_, '_>, entity: &str) -> Result<Timestamp> {
    let child = single_child(node, entity)?;
    match get_tag_name(child) {
        "Dt" | "DtTm" => timestamp(child, entity),
        other => Err(CamtError::structure(
            entity,
            format!(
                "child of <{}> must be <Dt> or <DtTm>, found <{other}>",
                get_tag_name(node)
            ),
        )),
    }
}

/// Decode the text of an element as a base-10 integer.
pub fn integer(node: Node<'_, '_>, entity: &str) -> Result<i64> {
    let text = get_text(node).unwrap_or_default();
    text.trim().parse::<i64>().map_err(|_| {
        CamtError::structure(
            entity,
            format!("<{}> is not an integer: '{text}'", get_tag_name(node)),
        )
    })
}

/// Loose boolean: true when the text contains `true`, ignoring case.
///
/// Anything else, including missing text, is false.
///
/// # Examples
/// ```
/// use camt_parser::decode::loose_bool;
///
/// assert!(loose_bool(Some("TRUE")));
/// assert!(loose_bool(Some(" true\n")));
/// assert!(!loose_bool(Some("1")));
/// assert!(!loose_bool(None));
/// ```
#[must_use]
pub fn loose_bool(text: Option<&str>) -> bool {
    text.is_some_and(|t| t.to_lowercase().contains("true"))
}

/// Flatten the direct children of an element into key/value pairs.
///
/// Keys are local tag names, values the raw child text. Nested structure
/// below a child is not inspected.
pub fn key_values(node: Node<'_, '_>) -> ExtensionData {
    let mut data = ExtensionData::new();
    for child in element_children(node) {
        data.insert(get_tag_name(child), get_text(child).map(str::to_string));
    }
    data
}

/// Decode an amount element: numeric text plus mandatory `Ccy` attribute.
pub fn amount(node: Node<'_, '_>, entity: &str) -> Result<Amount> {
    let tag = get_tag_name(node);
    let text = get_text(node).ok_or_else(|| {
        CamtError::structure(entity, format!("<{tag}> has no amount value"))
    })?;
    let value = text.trim().parse::<f64>().map_err(|_| {
        CamtError::structure(entity, format!("<{tag}> is not a number: '{text}'"))
    })?;
    if !value.is_finite() {
        return Err(CamtError::structure(
            entity,
            format!("<{tag}> is not a finite number: '{text}'"),
        ));
    }
    let currency = get_attribute(node, "Ccy").ok_or_else(|| {
        CamtError::structure(entity, format!("<{tag}> is missing the Ccy attribute"))
    })?;

    Ok(Amount {
        value,
        currency: currency.to_string(),
    })
}

/// Decode the text of an element as a code-list value.
///
/// The text must match one of the codes of `T` exactly.
pub fn code<T>(node: Node<'_, '_>, entity: &str) -> Result<T>
where
    T: FromStr<Err = String>,
{
    let text = get_text(node).unwrap_or_default();
    text.parse::<T>().map_err(|reason| {
        CamtError::structure(entity, format!("<{}>: {reason}", get_tag_name(node)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BalanceType, CreditDebit};
    use roxmltree::Document;

    #[test]
    fn test_parse_timestamp_forms() {
        assert_eq!(
            parse_timestamp("2024-01-01").unwrap().to_string(),
            "2024-01-01T00:00:00"
        );
        assert_eq!(
            parse_timestamp("2024-01-01T12:30").unwrap().to_string(),
            "2024-01-01T12:30:00"
        );
        assert_eq!(
            parse_timestamp("2024-01-01T12:30:15.5").unwrap().to_string(),
            "2024-01-01T12:30:15.500000"
        );
        assert_eq!(
            parse_timestamp("2024-01-01T12:30:15Z").unwrap().to_string(),
            "2024-01-01T12:30:15+00:00"
        );
        assert_eq!(
            parse_timestamp("2024-01-01T12:30+02:00").unwrap().to_string(),
            "2024-01-01T12:30:00+02:00"
        );
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("2024-13-01").is_none());
        assert!(parse_timestamp("01.01.2024").is_none());
    }

    #[test]
    fn test_date_and_midnight_datetime_are_equal() {
        assert_eq!(
            parse_timestamp("2023-12-31"),
            parse_timestamp("2023-12-31T00:00:00")
        );
    }

    #[test]
    fn test_date_or_datetime_wrong_child() {
        let doc = Document::parse("<Dt><Tm>2024-01-01</Tm></Dt>").unwrap();
        let err = date_or_datetime(doc.root_element(), "Balance").unwrap_err();
        assert!(err.is_structural());
        assert!(err.to_string().contains("<Tm>"));
    }

    #[test]
    fn test_date_or_datetime_wrong_count() {
        let doc = Document::parse("<Dt/>").unwrap();
        assert!(date_or_datetime(doc.root_element(), "Balance").is_err());

        let doc = Document::parse("<Dt><Dt>2024-01-01</Dt><Dt>2024-01-02</Dt></Dt>").unwrap();
        assert!(date_or_datetime(doc.root_element(), "Balance").is_err());
    }

    #[test]
    fn test_date_or_datetime_bad_text() {
        let doc = Document::parse("<Dt><Dt>soon</Dt></Dt>").unwrap();
        let err = date_or_datetime(doc.root_element(), "Balance").unwrap_err();
        assert!(err.to_string().contains("'soon'"));
    }

    #[test]
    fn test_integer() {
        let doc = Document::parse("<PgNb> 7 </PgNb>").unwrap();
        assert_eq!(integer(doc.root_element(), "Pagination").unwrap(), 7);

        let doc = Document::parse("<PgNb>seven</PgNb>").unwrap();
        let err = integer(doc.root_element(), "Pagination").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid structure in Pagination: <PgNb> is not an integer: 'seven'"
        );
    }

    #[test]
    fn test_loose_bool_substring() {
        assert!(loose_bool(Some("true")));
        assert!(loose_bool(Some("True")));
        assert!(loose_bool(Some("untrue")));
        assert!(!loose_bool(Some("false")));
        assert!(!loose_bool(Some("yes")));
        assert!(!loose_bool(Some("")));
    }

    #[test]
    fn test_key_values() {
        let xml = "<Othr><Id>123</Id><SchmeNm/><Issr>Bank</Issr></Othr>";
        let doc = Document::parse(xml).unwrap();
        let data = key_values(doc.root_element());

        let pairs: Vec<_> = data.iter().collect();
        assert_eq!(
            pairs,
            [("Id", Some("123")), ("SchmeNm", None), ("Issr", Some("Bank"))]
        );
    }

    #[test]
    fn test_amount() {
        let doc = Document::parse(r#"<Amt Ccy="EUR">12.34</Amt>"#).unwrap();
        let amt = amount(doc.root_element(), "Entry").unwrap();
        assert_eq!(amt.value, 12.34);
        assert_eq!(amt.currency, "EUR");
    }

    #[test]
    fn test_amount_requires_currency_and_value() {
        let doc = Document::parse("<Amt>12.34</Amt>").unwrap();
        let err = amount(doc.root_element(), "Entry").unwrap_err();
        assert!(err.to_string().contains("Ccy"));

        let doc = Document::parse(r#"<Amt Ccy="EUR"/>"#).unwrap();
        assert!(amount(doc.root_element(), "Entry").is_err());

        let doc = Document::parse(r#"<Amt Ccy="EUR">12,34</Amt>"#).unwrap();
        assert!(amount(doc.root_element(), "Entry").is_err());
    }

    #[test]
    fn test_amount_rejects_non_finite_values() {
        for text in ["NaN", "inf", "-infinity", "Infinity"] {
            let xml = format!(r#"<Amt Ccy="EUR">{text}</Amt>"#);
            let doc = Document::parse(&xml).unwrap();
            let err = amount(doc.root_element(), "Entry").unwrap_err();
            assert!(err.is_structural());
            assert!(err.to_string().contains("not a finite number"), "{text}");
        }
    }

    #[test]
    fn test_code() {
        let doc = Document::parse("<CdtDbtInd>DBIT</CdtDbtInd>").unwrap();
        let value: CreditDebit = code(doc.root_element(), "Entry").unwrap();
        assert_eq!(value, CreditDebit::Debit);

        let doc = Document::parse("<Cd>XXXX</Cd>").unwrap();
        let err = code::<BalanceType>(doc.root_element(), "Balance").unwrap_err();
        assert!(err.is_structural());
        assert!(err.to_string().contains("XXXX"));
    }
}
