//! Transaction details and their leaf records.

use roxmltree::Node;

use super::{required, FromElement, ParseContext};
use crate::error::{CamtError, Result};
use crate::types::{
    BankTransactionCode, ProprietaryReference, References, RelatedAgents, RelatedParties,
    RemittanceInfo, TransactionDetails,
};
use crate::xml::{element_children, get_tag_name, get_text, get_text_owned, single_child_named};

fn text(node: Node<'_, '_>) -> String {
    get_text(node).unwrap_or_default().to_string()
}

impl FromElement for TransactionDetails {
    const ENTITY: &'static str = "TransactionDetails";

    fn from_element(node: Node<'_, '_>, ctx: &ParseContext) -> Result<Self> {
        let mut references: Option<References> = None;
        let mut bank_transaction_code: Option<BankTransactionCode> = None;
        let mut related_parties: Option<RelatedParties> = None;
        let mut related_agents: Option<RelatedAgents> = None;
        let mut remittance_information: Vec<RemittanceInfo> = Vec::new();

        for child in element_children(node) {
            let tag = get_tag_name(child);
            match tag {
                "Refs" => ctx.set(&mut references, ctx.parse(child)?, tag, Self::ENTITY)?,
                "BkTxCd" => {
                    ctx.set(&mut bank_transaction_code, ctx.parse(child)?, tag, Self::ENTITY)?
                }
                "RltdPties" => {
                    ctx.set(&mut related_parties, ctx.parse(child)?, tag, Self::ENTITY)?
                }
                "RltdAgts" => ctx.set(&mut related_agents, ctx.parse(child)?, tag, Self::ENTITY)?,
                "RmtInf" => remittance_information.push(ctx.parse(child)?),
                _ => return Err(CamtError::unknown(tag, Self::ENTITY)),
            }
        }

        Ok(Self {
            references,
            bank_transaction_code,
            related_parties,
            related_agents,
            remittance_information,
        })
    }
}

impl FromElement for References {
    const ENTITY: &'static str = "References";

    fn from_element(node: Node<'_, '_>, ctx: &ParseContext) -> Result<Self> {
        let mut end_to_end_identification = None;
        let mut mandate_identification = None;
        let mut proprietary: Vec<ProprietaryReference> = Vec::new();

        for child in element_children(node) {
            let tag = get_tag_name(child);
            match tag {
                "EndToEndId" => ctx.set(
                    &mut end_to_end_identification,
                    get_text_owned(child),
                    tag,
                    Self::ENTITY,
                )?,
                "MndtId" => ctx.set(
                    &mut mandate_identification,
                    get_text_owned(child),
                    tag,
                    Self::ENTITY,
                )?,
                "Prtry" => proprietary.push(ctx.parse(child)?),
                _ => return Err(CamtError::unknown(tag, Self::ENTITY)),
            }
        }

        Ok(Self {
            end_to_end_identification: end_to_end_identification.flatten(),
            mandate_identification: mandate_identification.flatten(),
            proprietary,
        })
    }
}

impl FromElement for ProprietaryReference {
    const ENTITY: &'static str = "ProprietaryReference";

    fn from_element(node: Node<'_, '_>, ctx: &ParseContext) -> Result<Self> {
        let mut reference_type = None;
        let mut reference = None;

        for child in element_children(node) {
            let tag = get_tag_name(child);
            match tag {
                "Tp" => ctx.set(&mut reference_type, text(child), tag, Self::ENTITY)?,
                "Ref" => ctx.set(&mut reference, text(child), tag, Self::ENTITY)?,
                _ => return Err(CamtError::unknown(tag, Self::ENTITY)),
            }
        }

        Ok(Self {
            reference_type: required(reference_type, "Tp", Self::ENTITY)?,
            reference: required(reference, "Ref", Self::ENTITY)?,
        })
    }
}

/// `BkTxCd` below `TxDtls`: exactly one `Prtry` child carrying `Cd` and
/// `Issr`. The domain-coded variant is not modeled.
impl FromElement for BankTransactionCode {
    const ENTITY: &'static str = "BankTransactionCode";

    fn from_element(node: Node<'_, '_>, ctx: &ParseContext) -> Result<Self> {
        let proprietary = single_child_named(node, "Prtry", Self::ENTITY)?;

        let mut code = None;
        let mut issuer = None;
        for child in element_children(proprietary) {
            let tag = get_tag_name(child);
            match tag {
                "Cd" => ctx.set(&mut code, text(child), tag, Self::ENTITY)?,
                "Issr" => ctx.set(&mut issuer, text(child), tag, Self::ENTITY)?,
                _ => return Err(CamtError::unknown(tag, Self::ENTITY)),
            }
        }

        Ok(Self {
            code: required(code, "Cd", Self::ENTITY)?,
            issuer: required(issuer, "Issr", Self::ENTITY)?,
        })
    }
}

impl FromElement for RemittanceInfo {
    const ENTITY: &'static str = "RemittanceInfo";

    fn from_element(node: Node<'_, '_>, ctx: &ParseContext) -> Result<Self> {
        let mut unstructured = None;

        for child in element_children(node) {
            let tag = get_tag_name(child);
            match tag {
                "Ustrd" => ctx.set(&mut unstructured, text(child), tag, Self::ENTITY)?,
                _ => return Err(CamtError::unknown(tag, Self::ENTITY)),
            }
        }

        Ok(Self {
            unstructured: required(unstructured, "Ustrd", Self::ENTITY)?,
        })
    }
}
