//! Group header and pagination.

use roxmltree::Node;

use super::{required, FromElement, ParseContext};
use crate::decode;
use crate::error::{CamtError, Result};
use crate::types::{GroupHeader, Pagination};
use crate::xml::{element_children, get_tag_name, get_text};

impl FromElement for GroupHeader {
    const ENTITY: &'static str = "GroupHeader";

    fn from_element(node: Node<'_, '_>, ctx: &ParseContext) -> Result<Self> {
        let mut message_identification = None;
        let mut creation_time = None;
        let mut message_pagination: Option<Pagination> = None;

        for child in element_children(node) {
            let tag = get_tag_name(child);
            match tag {
                "MsgId" => ctx.set(
                    &mut message_identification,
                    get_text(child).unwrap_or_default().to_string(),
                    tag,
                    Self::ENTITY,
                )?,
                "CreDtTm" => ctx.set(
                    &mut creation_time,
                    decode::timestamp(child, Self::ENTITY)?,
                    tag,
                    Self::ENTITY,
                )?,
                "MsgPgntn" => {
                    ctx.set(&mut message_pagination, ctx.parse(child)?, tag, Self::ENTITY)?
                }
                _ => return Err(CamtError::unknown(tag, Self::ENTITY)),
            }
        }

        Ok(Self {
            message_identification: required(message_identification, "MsgId", Self::ENTITY)?,
            creation_time: required(creation_time, "CreDtTm", Self::ENTITY)?,
            message_pagination,
        })
    }
}

impl FromElement for Pagination {
    const ENTITY: &'static str = "Pagination";

    fn from_element(node: Node<'_, '_>, ctx: &ParseContext) -> Result<Self> {
        let mut page_number = None;
        let mut last_page_indication = None;

        for child in element_children(node) {
            let tag = get_tag_name(child);
            match tag {
                "PgNb" => ctx.set(
                    &mut page_number,
                    decode::integer(child, Self::ENTITY)?,
                    tag,
                    Self::ENTITY,
                )?,
                "LastPgInd" => ctx.set(
                    &mut last_page_indication,
                    decode::loose_bool(get_text(child)),
                    tag,
                    Self::ENTITY,
                )?,
                _ => return Err(CamtError::unknown(tag, Self::ENTITY)),
            }
        }

        Ok(Self {
            page_number: required(page_number, "PgNb", Self::ENTITY)?,
            last_page_indication: required(last_page_indication, "LastPgInd", Self::ENTITY)?,
        })
    }
}
