//! `SymbolTable`: the bijective name to [`Ident`] mapping.
//!
//! Identifiers are allocated from 1 in interning order and never reused.
//! Interning is idempotent: a name already present returns its existing id.
//! The table is built once by a loader and is read-only during search.

use std::collections::BTreeMap;

use crate::carrier::ident::Ident;
use crate::error::{KernelError, KernelResult};
use crate::proof::canon::{canonical_json_bytes, CanonError};
use crate::proof::hash::{canonical_hash, ContentHash};
use crate::proof::hash_domain::HashDomain;

/// Resolves identifiers back to names for rendering.
///
/// Implemented by [`SymbolTable`] and [`NumericNames`]. Rendering code takes
/// `&dyn NameLookup` so callers without a table can still print actions.
pub trait NameLookup {
    /// The interned name for `id`, if known.
    fn name_of(&self, id: Ident) -> Option<&str>;

    /// Name for display: the interned name, or `#<id>` when unknown.
    fn display_name(&self, id: Ident) -> String {
        self.name_of(id)
            .map_or_else(|| id.to_string(), str::to_string)
    }
}

/// A lookup that knows no names; every id renders as `#<id>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericNames;

impl NameLookup for NumericNames {
    fn name_of(&self, _id: Ident) -> Option<&str> {
        None
    }
}

/// Bijective name to identifier table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    by_name: BTreeMap<String, Ident>,
    by_id: BTreeMap<Ident, String>,
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a table from explicit allocations.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::DuplicateSymbol`] if a name or an identifier
    /// appears twice, or [`KernelError::IdentifierOutOfRange`] for a raw
    /// value outside `1..=2^21-1`.
    pub fn from_allocations<I, S>(allocations: I) -> KernelResult<Self>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (name, raw) in allocations {
            let name = name.into();
            let id = Ident::new(raw)?;
            if table.by_name.contains_key(&name) || table.by_id.contains_key(&id) {
                return Err(KernelError::DuplicateSymbol { name });
            }
            table.by_id.insert(id, name.clone());
            table.by_name.insert(name, id);
        }
        Ok(table)
    }

    /// Intern `name`, allocating the next identifier if it is new.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::IdentifierSpaceExhausted`] once all 21-bit
    /// identifiers are in use.
    pub fn intern(&mut self, name: &str) -> KernelResult<Ident> {
        if let Some(&id) = self.by_name.get(name) {
            return Ok(id);
        }
        let next = self.by_id.keys().next_back().map_or(1, |last| last.get() + 1);
        let id = Ident::new(next).map_err(|_| KernelError::IdentifierSpaceExhausted)?;
        self.by_name.insert(name.to_string(), id);
        self.by_id.insert(id, name.to_string());
        Ok(id)
    }

    /// Look up without allocating.
    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<Ident> {
        self.by_name.get(name).copied()
    }

    /// Look up, failing for names never interned.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::UnknownSymbol`].
    pub fn require(&self, name: &str) -> KernelResult<Ident> {
        self.id_of(name).ok_or_else(|| KernelError::UnknownSymbol {
            name: name.to_string(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Allocations in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (Ident, &str)> {
        self.by_id.iter().map(|(id, name)| (*id, name.as_str()))
    }

    /// Canonical JSON: `{"symbols":[["name",id],...]}` in identifier order.
    ///
    /// # Errors
    ///
    /// Propagates [`CanonError`]; integer-only content means this does not
    /// fail in practice.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, CanonError> {
        let symbols: Vec<serde_json::Value> = self
            .iter()
            .map(|(id, name)| serde_json::json!([name, id.get()]))
            .collect();
        canonical_json_bytes(&serde_json::json!({ "symbols": symbols }))
    }

    /// `sha256(SYMBOL_TABLE || canonical_bytes)`.
    ///
    /// # Errors
    ///
    /// Propagates [`CanonError`].
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        Ok(canonical_hash(HashDomain::SymbolTable, &self.canonical_bytes()?))
    }
}

impl NameLookup for SymbolTable {
    fn name_of(&self, id: Ident) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }
}
