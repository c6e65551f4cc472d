//! Accounts, servicers and financial institutions.

use roxmltree::Node;

use super::{required, FromElement, ParseContext};
use crate::decode;
use crate::error::{CamtError, Result};
use crate::types::{Account, CashAccount, FinancialInstitution, Servicer};
use crate::xml::{element_children, get_tag_name, get_text, get_text_owned, single_child_named};

/// Read the IBAN from an account `Id`, which must hold exactly one `IBAN`.
fn iban(id: Node<'_, '_>, entity: &str) -> Result<String> {
    let iban = single_child_named(id, "IBAN", entity)?;
    Ok(get_text(iban).unwrap_or_default().to_string())
}

impl FromElement for Account {
    const ENTITY: &'static str = "Account";

    fn from_element(node: Node<'_, '_>, ctx: &ParseContext) -> Result<Self> {
        let mut iban_value = None;
        let mut currency = None;
        let mut servicer: Option<Servicer> = None;

        for child in element_children(node) {
            let tag = get_tag_name(child);
            match tag {
                "Id" => ctx.set(&mut iban_value, iban(child, Self::ENTITY)?, tag, Self::ENTITY)?,
                "Ccy" => ctx.set(&mut currency, get_text_owned(child), tag, Self::ENTITY)?,
                "Svcr" => ctx.set(&mut servicer, ctx.parse(child)?, tag, Self::ENTITY)?,
                _ => return Err(CamtError::unknown(tag, Self::ENTITY)),
            }
        }

        Ok(Self {
            iban: required(iban_value, "Id", Self::ENTITY)?,
            currency: currency.flatten(),
            servicer,
        })
    }
}

impl FromElement for Servicer {
    const ENTITY: &'static str = "Servicer";

    fn from_element(node: Node<'_, '_>, ctx: &ParseContext) -> Result<Self> {
        let mut financial_institution: Option<FinancialInstitution> = None;

        for child in element_children(node) {
            let tag = get_tag_name(child);
            match tag {
                "FinInstnId" => {
                    ctx.set(&mut financial_institution, ctx.parse(child)?, tag, Self::ENTITY)?
                }
                _ => return Err(CamtError::unknown(tag, Self::ENTITY)),
            }
        }

        Ok(Self {
            financial_institution: required(financial_institution, "FinInstnId", Self::ENTITY)?,
        })
    }
}

impl FromElement for FinancialInstitution {
    const ENTITY: &'static str = "FinancialInstitution";

    fn from_element(node: Node<'_, '_>, ctx: &ParseContext) -> Result<Self> {
        let mut bic = None;
        let mut name = None;
        let mut other = None;

        for child in element_children(node) {
            let tag = get_tag_name(child);
            match tag {
                // BICFI is the tag from camt.052.001.04 onwards
                "BIC" | "BICFI" => ctx.set(&mut bic, get_text_owned(child), tag, Self::ENTITY)?,
                "Nm" => ctx.set(&mut name, get_text_owned(child), tag, Self::ENTITY)?,
                "Othr" => ctx.set(&mut other, decode::key_values(child), tag, Self::ENTITY)?,
                _ => return Err(CamtError::unknown(tag, Self::ENTITY)),
            }
        }

        Ok(Self {
            bic: bic.flatten(),
            name: name.flatten(),
            other,
        })
    }
}

impl FromElement for CashAccount {
    const ENTITY: &'static str = "CashAccount";

    fn from_element(node: Node<'_, '_>, ctx: &ParseContext) -> Result<Self> {
        let mut iban_value = None;

        for child in element_children(node) {
            let tag = get_tag_name(child);
            match tag {
                "Id" => ctx.set(&mut iban_value, iban(child, Self::ENTITY)?, tag, Self::ENTITY)?,
                _ => return Err(CamtError::unknown(tag, Self::ENTITY)),
            }
        }

        Ok(Self {
            iban: required(iban_value, "Id", Self::ENTITY)?,
        })
    }
}
