//! Balances.

use roxmltree::Node;

use super::{required, FromElement, ParseContext};
use crate::decode;
use crate::error::{CamtError, Result};
use crate::types::{Balance, BalanceType, CreditDebit};
use crate::xml::{element_children, get_tag_name, single_child_named};

/// Decode `Tp/CdOrPrtry/Cd`. Only the coded variant is accepted.
fn balance_type(tp: Node<'_, '_>, entity: &str) -> Result<BalanceType> {
    let code_or_proprietary = single_child_named(tp, "CdOrPrtry", entity)?;
    let code = single_child_named(code_or_proprietary, "Cd", entity)?;
    decode::code(code, entity)
}

impl FromElement for Balance {
    const ENTITY: &'static str = "Balance";

    fn from_element(node: Node<'_, '_>, ctx: &ParseContext) -> Result<Self> {
        let mut kind = None;
        let mut amount = None;
        let mut credit_debit: Option<CreditDebit> = None;
        let mut date = None;

        for child in element_children(node) {
            let tag = get_tag_name(child);
            match tag {
                "Tp" => ctx.set(&mut kind, balance_type(child, Self::ENTITY)?, tag, Self::ENTITY)?,
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
                "Dt" => ctx.set(
                    &mut date,
                    decode::date_or_datetime(child, Self::ENTITY)?,
                    tag,
                    Self::ENTITY,
                )?,
                _ => return Err(CamtError::unknown(tag, Self::ENTITY)),
            }
        }

        Ok(Self {
            balance_type: required(kind, "Tp", Self::ENTITY)?,
            amount: required(amount, "Amt", Self::ENTITY)?,
            credit_debit: required(credit_debit, "CdtDbtInd", Self::ENTITY)?,
            date: required(date, "Dt", Self::ENTITY)?,
        })
    }
}
