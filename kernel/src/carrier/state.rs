//! `State`: an immutable set of ground facts with three lookup indices.
//!
//! # Indices
//!
//! `by_a`, `by_rel`, and `by_b` map an identifier to every fact holding it in
//! that slot. They are built eagerly in the constructor and never mutated;
//! a changed fact set is always a new `State`.
//!
//! # Identity
//!
//! Two states are equal iff their fact sets are equal. The declared object
//! universe and the indices do not participate in `Eq` or `Hash`.
//!
//! # Object universe
//!
//! Grounding enumerates parameters no precondition constrains over
//! [`State::object_domain`]: every first-slot identifier plus any objects
//! declared at load time. Successor states inherit the declared objects.

use std::collections::{BTreeSet, HashMap};
use std::hash::{Hash, Hasher};

use crate::carrier::fact::Fact;
use crate::carrier::ident::Ident;
use crate::carrier::symbol::NameLookup;
use crate::proof::hash::{canonical_hash, ContentHash};
use crate::proof::hash_domain::HashDomain;

type SlotIndex = HashMap<Ident, Vec<Fact>>;

#[derive(Debug, Clone, Default)]
pub struct State {
    facts: BTreeSet<Fact>,
    declared_objects: BTreeSet<Ident>,
    by_a: SlotIndex,
    by_rel: SlotIndex,
    by_b: SlotIndex,
}

impl State {
    /// Build from facts. Duplicates collapse.
    pub fn new(facts: impl IntoIterator<Item = Fact>) -> Self {
        Self::with_objects(facts, std::iter::empty())
    }

    /// Build from facts plus an explicit object universe.
    pub fn with_objects(
        facts: impl IntoIterator<Item = Fact>,
        objects: impl IntoIterator<Item = Ident>,
    ) -> Self {
        Self::from_parts(facts.into_iter().collect(), objects.into_iter().collect())
    }

    fn from_parts(facts: BTreeSet<Fact>, declared_objects: BTreeSet<Ident>) -> Self {
        let mut by_a = SlotIndex::new();
        let mut by_rel = SlotIndex::new();
        let mut by_b = SlotIndex::new();
        for fact in &facts {
            by_a.entry(fact.a).or_default().push(*fact);
            by_rel.entry(fact.rel).or_default().push(*fact);
            by_b.entry(fact.b).or_default().push(*fact);
        }
        Self {
            facts,
            declared_objects,
            by_a,
            by_rel,
            by_b,
        }
    }

    /// A new state: this fact set plus `adds`, minus `removes`, applied in
    /// that order. Declared objects carry over. `self` is untouched.
    #[must_use]
    pub fn successor(
        &self,
        adds: impl IntoIterator<Item = Fact>,
        removes: impl IntoIterator<Item = Fact>,
    ) -> Self {
        let mut facts = self.facts.clone();
        facts.extend(adds);
        for fact in removes {
            facts.remove(&fact);
        }
        Self::from_parts(facts, self.declared_objects.clone())
    }

    /// Facts in key order.
    pub fn facts(&self) -> impl ExactSizeIterator<Item = &Fact> + '_ {
        self.facts.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Full-key membership (truth included).
    #[must_use]
    pub fn contains(&self, fact: &Fact) -> bool {
        self.facts.contains(fact)
    }

    #[must_use]
    pub fn by_a(&self, id: Ident) -> &[Fact] {
        self.by_a.get(&id).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn by_rel(&self, id: Ident) -> &[Fact] {
        self.by_rel.get(&id).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn by_b(&self, id: Ident) -> &[Fact] {
        self.by_b.get(&id).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn declared_objects(&self) -> &BTreeSet<Ident> {
        &self.declared_objects
    }

    /// First-slot identifiers of every fact, plus declared objects.
    #[must_use]
    pub fn object_domain(&self) -> BTreeSet<Ident> {
        let mut domain = self.declared_objects.clone();
        domain.extend(self.by_a.keys().copied());
        domain
    }

    /// Partial-goal check. An asserted goal fact must be present; a negated
    /// goal fact requires its proposition to be absent. Extra facts here are
    /// permitted.
    #[must_use]
    pub fn satisfies(&self, goal: &State) -> bool {
        goal.facts.iter().all(|g| {
            if g.truth {
                self.facts.contains(g)
            } else {
                !self.facts.contains(&g.proposition())
            }
        })
    }

    /// Goal facts this state does not yet satisfy, in key order.
    #[must_use]
    pub fn unmet_goals<'g>(&self, goal: &'g State) -> Vec<&'g Fact> {
        goal.facts
            .iter()
            .filter(|g| {
                if g.truth {
                    !self.facts.contains(g)
                } else {
                    self.facts.contains(&g.proposition())
                }
            })
            .collect()
    }

    /// Packed keys in ascending order.
    #[must_use]
    pub fn fact_keys(&self) -> Vec<u64> {
        self.facts.iter().map(Fact::key).collect()
    }

    /// `sha256(STATE_FINGERPRINT || be64(key)*)` over sorted keys.
    #[must_use]
    pub fn fingerprint(&self) -> ContentHash {
        let mut bytes = Vec::with_capacity(self.facts.len() * 8);
        for fact in &self.facts {
            bytes.extend_from_slice(&fact.key().to_be_bytes());
        }
        canonical_hash(HashDomain::StateFingerprint, &bytes)
    }

    /// One rendered fact per line, in key order.
    #[must_use]
    pub fn render(&self, names: &dyn NameLookup) -> String {
        self.facts
            .iter()
            .map(|f| f.render(names))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.facts == other.facts
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.facts.hash(state);
    }
}

impl FromIterator<Fact> for State {
    fn from_iter<T: IntoIterator<Item = Fact>>(iter: T) -> Self {
        Self::new(iter)
    }
}
