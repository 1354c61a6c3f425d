//! `Fact`: a ground relation triple `(a rel b)` with a truth flag.
//!
//! # Packed key
//!
//! ```text
//! bit 63 .. 43   42 .. 22    21 .. 1    0
//!     a          rel         b          truth
//! ```
//!
//! The key is the fact's identity: `Eq`, `Ord`, and `Hash` agree with it.
//! Field-wise derived ordering over `(a, rel, b, truth)` is identical to
//! numeric key ordering, so a `BTreeSet<Fact>` iterates in key order.

use std::fmt;

use crate::carrier::ident::{Ident, IDENT_BITS};
use crate::carrier::relation::RelationTemplate;
use crate::carrier::symbol::NameLookup;

const B_SHIFT: u32 = 1;
const REL_SHIFT: u32 = B_SHIFT + IDENT_BITS;
const A_SHIFT: u32 = REL_SHIFT + IDENT_BITS;

/// A fully-instantiated relation triple.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fact {
    pub a: Ident,
    pub rel: Ident,
    pub b: Ident,
    pub truth: bool,
}

impl Fact {
    /// An asserted fact (`truth = true`).
    #[must_use]
    pub const fn new(a: Ident, rel: Ident, b: Ident) -> Self {
        Self {
            a,
            rel,
            b,
            truth: true,
        }
    }

    /// A negated fact (`truth = false`), used in goals to demand absence.
    #[must_use]
    pub const fn negated(a: Ident, rel: Ident, b: Ident) -> Self {
        Self {
            a,
            rel,
            b,
            truth: false,
        }
    }

    /// The 64-bit packed key.
    #[must_use]
    pub const fn key(&self) -> u64 {
        ((self.a.get() as u64) << A_SHIFT)
            | ((self.rel.get() as u64) << REL_SHIFT)
            | ((self.b.get() as u64) << B_SHIFT)
            | (self.truth as u64)
    }

    /// Decode a packed key. Each field is masked to 21 bits; a zero field
    /// decodes to [`Ident::UNBOUND`].
    #[must_use]
    pub const fn from_key(key: u64) -> Self {
        Self {
            a: Ident::from_masked(key >> A_SHIFT),
            rel: Ident::from_masked(key >> REL_SHIFT),
            b: Ident::from_masked(key >> B_SHIFT),
            truth: key & 1 == 1,
        }
    }

    /// This fact with `truth = true`.
    #[must_use]
    pub const fn proposition(&self) -> Self {
        Self::new(self.a, self.rel, self.b)
    }

    /// Same `(a, rel, b)` regardless of truth.
    #[must_use]
    pub fn same_proposition(&self, other: &Self) -> bool {
        self.a == other.a && self.rel == other.rel && self.b == other.b
    }

    /// True iff every Bound slot of `template` equals the corresponding
    /// identifier here. Free slots are unconstrained; truth is ignored.
    #[must_use]
    pub fn is_instance_of(&self, template: &RelationTemplate) -> bool {
        let [ta, trel, tb] = template.slots();
        [(ta, self.a), (trel, self.rel), (tb, self.b)]
            .into_iter()
            .all(|(slot, id)| slot.as_bound().map_or(true, |bound| bound == id))
    }

    /// `ball at room1`, or `not ball at room1` when negated.
    #[must_use]
    pub fn render(&self, names: &dyn NameLookup) -> String {
        let body = format!(
            "{} {} {}",
            names.display_name(self.a),
            names.display_name(self.rel),
            names.display_name(self.b)
        );
        if self.truth {
            body
        } else {
            format!("not {body}")
        }
    }
}

impl fmt::Debug for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.truth { "" } else { "!" };
        write!(f, "{sign}({} {} {})", self.a.get(), self.rel.get(), self.b.get())
    }
}
