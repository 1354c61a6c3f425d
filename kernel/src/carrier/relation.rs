//! Variables and relation templates: the vocabulary schemas are written in.
//!
//! A [`Variable`] is either a literal identifier or a positional parameter.
//! A [`RelationTemplate`] is a triple of variables plus a negation flag; with
//! a parameter vector it substitutes to a ground [`Fact`].

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::carrier::fact::Fact;
use crate::carrier::ident::Ident;
use crate::carrier::symbol::NameLookup;

/// A slot value inside a template.
///
/// `Free` compares and hashes by parameter index alone. The display name is
/// carried for rendering and never affects identity.
#[derive(Clone)]
pub enum Variable {
    Bound(Ident),
    Free { index: usize, name: Arc<str> },
}

impl Variable {
    #[must_use]
    pub fn free(index: usize, name: &str) -> Self {
        Self::Free {
            index,
            name: Arc::from(name),
        }
    }

    #[must_use]
    pub const fn as_bound(&self) -> Option<Ident> {
        match self {
            Self::Bound(id) => Some(*id),
            Self::Free { .. } => None,
        }
    }

    #[must_use]
    pub const fn free_index(&self) -> Option<usize> {
        match self {
            Self::Bound(_) => None,
            Self::Free { index, .. } => Some(*index),
        }
    }

    #[must_use]
    pub const fn is_bound(&self) -> bool {
        matches!(self, Self::Bound(_))
    }

    /// Resolve against a parameter vector. `None` if a Free index is out of
    /// range.
    #[must_use]
    pub fn resolve(&self, params: &[Ident]) -> Option<Ident> {
        match self {
            Self::Bound(id) => Some(*id),
            Self::Free { index, .. } => params.get(*index).copied(),
        }
    }

    /// Literal name, or `?name` for a parameter.
    #[must_use]
    pub fn render(&self, names: &dyn NameLookup) -> String {
        match self {
            Self::Bound(id) => names.display_name(*id),
            Self::Free { name, .. } => format!("?{name}"),
        }
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Variable {}

impl PartialOrd for Variable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Variable {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bound(a), Self::Bound(b)) => a.cmp(b),
            (Self::Bound(_), Self::Free { .. }) => Ordering::Less,
            (Self::Free { .. }, Self::Bound(_)) => Ordering::Greater,
            (Self::Free { index: a, .. }, Self::Free { index: b, .. }) => a.cmp(b),
        }
    }
}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Bound(id) => {
                0u8.hash(state);
                id.hash(state);
            }
            Self::Free { index, .. } => {
                1u8.hash(state);
                index.hash(state);
            }
        }
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bound(id) => write!(f, "{}", id.get()),
            Self::Free { index, name } => write!(f, "?{name}/{index}"),
        }
    }
}

/// A templated relation `(a rel b)`, possibly negated.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelationTemplate {
    pub a: Variable,
    pub rel: Variable,
    pub b: Variable,
    pub negated: bool,
}

impl RelationTemplate {
    #[must_use]
    pub const fn new(a: Variable, rel: Variable, b: Variable) -> Self {
        Self {
            a,
            rel,
            b,
            negated: false,
        }
    }

    /// Copy with the negation flag set to `negated`.
    #[must_use]
    pub fn with_negation(mut self, negated: bool) -> Self {
        self.negated = negated;
        self
    }

    /// Fully-bound template for a ground fact. A `truth = false` fact yields
    /// a negated template.
    #[must_use]
    pub fn from_fact(fact: &Fact) -> Self {
        Self {
            a: Variable::Bound(fact.a),
            rel: Variable::Bound(fact.rel),
            b: Variable::Bound(fact.b),
            negated: !fact.truth,
        }
    }

    #[must_use]
    pub const fn slots(&self) -> [&Variable; 3] {
        [&self.a, &self.rel, &self.b]
    }

    #[must_use]
    pub fn is_fully_bound(&self) -> bool {
        self.slots().iter().all(|v| v.is_bound())
    }

    /// Parameter indices referenced by Free slots, in slot order.
    pub fn free_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots().into_iter().filter_map(Variable::free_index)
    }

    /// Substitute `params`, yielding the asserted proposition. The negation
    /// flag is not applied; callers decide whether the fact must be present
    /// or absent.
    #[must_use]
    pub fn substitute(&self, params: &[Ident]) -> Option<Fact> {
        Some(Fact::new(
            self.a.resolve(params)?,
            self.rel.resolve(params)?,
            self.b.resolve(params)?,
        ))
    }

    /// Replace every Free slot at index `i` with `new_vars[i]`. Bound slots
    /// and out-of-range indices are left untouched.
    #[must_use]
    pub fn rebind(&self, new_vars: &[Variable]) -> Self {
        let swap = |v: &Variable| match v {
            Variable::Free { index, .. } => new_vars.get(*index).cloned().unwrap_or_else(|| v.clone()),
            Variable::Bound(_) => v.clone(),
        };
        Self {
            a: swap(&self.a),
            rel: swap(&self.rel),
            b: swap(&self.b),
            negated: self.negated,
        }
    }

    /// `(?obj at ?from)`, prefixed with `not ` when negated.
    #[must_use]
    pub fn render(&self, names: &dyn NameLookup) -> String {
        let body = format!(
            "({} {} {})",
            self.a.render(names),
            self.rel.render(names),
            self.b.render(names)
        );
        if self.negated {
            format!("not {body}")
        } else {
            body
        }
    }
}

impl fmt::Debug for RelationTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "!")?;
        }
        write!(f, "({:?} {:?} {:?})", self.a, self.rel, self.b)
    }
}
