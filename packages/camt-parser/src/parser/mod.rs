//! Schema-validating parsers for the camt.052 entities.
//!
//! Every entity is parsed from a single element by walking its element
//! children once in document order and dispatching on the local tag name.
//! The set of recognized tags per entity is closed: anything else aborts the
//! parse with `UnknownElement`.

mod account;
mod balance;
mod document;
mod entry;
mod header;
mod party;
mod transaction;

use roxmltree::Node;

use crate::config::{DuplicatePolicy, ParseOptions};
use crate::error::{CamtError, Result};

pub use document::parse_document;
pub use party::resolve_party_choice;

/// An entity that can be built from one XML element.
pub trait FromElement: Sized {
    /// Entity name used in error messages and log events.
    const ENTITY: &'static str;

    /// Build the entity from `node`.
    ///
    /// # Errors
    /// Returns a structural error on the first unrecognized child, missing
    /// required child or undecodable value.
    fn from_element(node: Node<'_, '_>, ctx: &ParseContext) -> Result<Self>;
}

/// Context passed through parsing operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseContext {
    /// Options in effect for this parse.
    pub options: ParseOptions,
}

impl ParseContext {
    /// Create a context for the given options.
    #[must_use]
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Store a singular field, applying the duplicate policy when the slot
    /// is already filled.
    ///
    /// # Errors
    /// Returns a `Structure` error for a repeated tag under
    /// [`DuplicatePolicy::Reject`].
    pub fn set<T>(&self, slot: &mut Option<T>, value: T, tag: &str, entity: &str) -> Result<()> {
        if slot.is_some() {
            match self.options.duplicate_policy {
                DuplicatePolicy::LastWins => {
                    tracing::warn!(tag, entity, "Repeated element overwrites earlier value");
                }
                DuplicatePolicy::Reject => {
                    return Err(CamtError::structure(
                        entity,
                        format!("<{tag}> occurs more than once"),
                    ));
                }
            }
        }
        *slot = Some(value);
        Ok(())
    }

    /// Parse a child entity with this context.
    pub fn parse<T: FromElement>(&self, node: Node<'_, '_>) -> Result<T> {
        T::from_element(node, self)
    }
}

/// Unwrap a required field at the end of an entity.
///
/// # Errors
/// Returns `MissingElement` naming `tag` and `entity` when the slot is empty.
pub fn required<T>(slot: Option<T>, tag: &str, entity: &str) -> Result<T> {
    slot.ok_or_else(|| CamtError::missing(tag, entity))
}
