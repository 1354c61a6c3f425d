//! `Ident`: 21-bit interned-name identifier.
//!
//! # Layout
//!
//! An identifier occupies the low 21 bits of a `u32`. Three identifiers plus
//! a truth bit pack into one 64-bit fact key (see [`crate::carrier::fact`]),
//! so the ceiling is engine-enforced: values above [`Ident::MAX`] are
//! rejected at construction.
//!
//! # Sentinel
//!
//! `0` is reserved. Grounding parameter rows use it for "slot not yet
//! bound", so no interned name ever receives it.

use std::fmt;

use crate::error::{KernelError, KernelResult};

/// Number of bits in one identifier field.
pub const IDENT_BITS: u32 = 21;

/// An opaque handle for an interned name.
///
/// Equality is integer equality. Derives `Ord` for use as `BTreeMap` keys
/// (canonical ordering).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ident(u32);

impl Ident {
    /// Largest representable identifier (`2^21 - 1`).
    pub const MAX: u32 = (1 << IDENT_BITS) - 1;

    /// Unbound-slot sentinel used inside grounding rows. Never interned.
    pub const UNBOUND: Self = Self(0);

    /// Construct from a raw value.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::IdentifierOutOfRange`] for `0` or values that
    /// do not fit in 21 bits.
    pub const fn new(raw: u32) -> KernelResult<Self> {
        if raw == 0 || raw > Self::MAX {
            return Err(KernelError::IdentifierOutOfRange { raw });
        }
        Ok(Self(raw))
    }

    /// Construct from a packed-key field. The mask guarantees the range.
    #[must_use]
    pub(crate) const fn from_masked(raw: u64) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        Self((raw & Self::MAX as u64) as u32)
    }

    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// True for the grounding sentinel.
    #[must_use]
    pub const fn is_unbound(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ident({})", self.0)
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
