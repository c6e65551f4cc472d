//! Related parties, related agents and the party/institution choice.

use roxmltree::Node;

use super::{FromElement, ParseContext};
use crate::decode;
use crate::error::{CamtError, Result};
use crate::types::{
    CashAccount, FinancialInstitution, Party, PartyChoice, PrivateIdentification, RelatedAgents,
    RelatedParties,
};
use crate::xml::{
    element_children, get_tag_name, get_text_owned, has_tag, single_child_named,
};

/// Resolve a debtor or creditor element into a party or an institution.
///
/// An element whose only child is `FinInstnId` is an institution; every
/// other shape is parsed as a party. A `FinInstnId` next to other children
/// therefore fails as an unknown element of the party.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use camt_parser::parser::{resolve_party_choice, ParseContext};
/// use camt_parser::PartyChoice;
///
/// let ctx = ParseContext::default();
///
/// let xml = "<Dbtr><FinInstnId><BIC>GEBABEBB</BIC></FinInstnId></Dbtr>";
/// let doc = Document::parse(xml).unwrap();
/// let choice = resolve_party_choice(doc.root_element(), &ctx).unwrap();
/// assert!(matches!(choice, PartyChoice::Institution(_)));
///
/// let xml = "<Dbtr><Nm>Jane Doe</Nm></Dbtr>";
/// let doc = Document::parse(xml).unwrap();
/// let choice = resolve_party_choice(doc.root_element(), &ctx).unwrap();
/// assert!(matches!(choice, PartyChoice::Party(_)));
/// ```
pub fn resolve_party_choice(node: Node<'_, '_>, ctx: &ParseContext) -> Result<PartyChoice> {
    let mut children = element_children(node);
    match (children.next(), children.next()) {
        (Some(only), None) if has_tag(only, "FinInstnId") => {
            Ok(PartyChoice::Institution(ctx.parse(only)?))
        }
        _ => Ok(PartyChoice::Party(ctx.parse(node)?)),
    }
}

impl FromElement for RelatedParties {
    const ENTITY: &'static str = "RelatedParties";

    fn from_element(node: Node<'_, '_>, ctx: &ParseContext) -> Result<Self> {
        let mut debtor = None;
        let mut debtor_account: Option<CashAccount> = None;
        let mut creditor = None;
        let mut creditor_account: Option<CashAccount> = None;

        for child in element_children(node) {
            let tag = get_tag_name(child);
            match tag {
                "Dbtr" => ctx.set(
                    &mut debtor,
                    resolve_party_choice(child, ctx)?,
                    tag,
                    Self::ENTITY,
                )?,
                "DbtrAcct" => ctx.set(&mut debtor_account, ctx.parse(child)?, tag, Self::ENTITY)?,
                "Cdtr" => ctx.set(
                    &mut creditor,
                    resolve_party_choice(child, ctx)?,
                    tag,
                    Self::ENTITY,
                )?,
                "CdtrAcct" => {
                    ctx.set(&mut creditor_account, ctx.parse(child)?, tag, Self::ENTITY)?
                }
                _ => return Err(CamtError::unknown(tag, Self::ENTITY)),
            }
        }

        Ok(Self {
            debtor,
            debtor_account,
            creditor,
            creditor_account,
        })
    }
}

impl FromElement for RelatedAgents {
    const ENTITY: &'static str = "RelatedAgents";

    fn from_element(node: Node<'_, '_>, ctx: &ParseContext) -> Result<Self> {
        let mut debtor_agent = None;
        let mut creditor_agent = None;

        for child in element_children(node) {
            let tag = get_tag_name(child);
            let slot = match tag {
                "DbtrAgt" => &mut debtor_agent,
                "CdtrAgt" => &mut creditor_agent,
                _ => return Err(CamtError::unknown(tag, Self::ENTITY)),
            };
            let institution = single_child_named(child, "FinInstnId", Self::ENTITY)?;
            let agent: FinancialInstitution = ctx.parse(institution)?;
            ctx.set(slot, agent, tag, Self::ENTITY)?;
        }

        Ok(Self {
            debtor_agent,
            creditor_agent,
        })
    }
}

impl FromElement for Party {
    const ENTITY: &'static str = "Party";

    fn from_element(node: Node<'_, '_>, ctx: &ParseContext) -> Result<Self> {
        let mut name = None;
        let mut identification: Option<PrivateIdentification> = None;

        for child in element_children(node) {
            let tag = get_tag_name(child);
            match tag {
                "Nm" => ctx.set(&mut name, get_text_owned(child), tag, Self::ENTITY)?,
                "Id" => {
                    // Only the private person variant is modeled; OrgId is unknown.
                    let private = single_child_named(child, "PrvtId", Self::ENTITY)?;
                    ctx.set(&mut identification, ctx.parse(private)?, tag, Self::ENTITY)?;
                }
                _ => return Err(CamtError::unknown(tag, Self::ENTITY)),
            }
        }

        Ok(Self {
            name: name.flatten(),
            identification,
        })
    }
}

impl FromElement for PrivateIdentification {
    const ENTITY: &'static str = "PrivateIdentification";

    fn from_element(node: Node<'_, '_>, ctx: &ParseContext) -> Result<Self> {
        let mut other = None;

        for child in element_children(node) {
            let tag = get_tag_name(child);
            match tag {
                "Othr" => ctx.set(&mut other, decode::key_values(child), tag, Self::ENTITY)?,
                _ => return Err(CamtError::unknown(tag, Self::ENTITY)),
            }
        }

        Ok(Self { other })
    }
}
