//! Grounding: enumerate every applicable instance of a schema in a state.
//!
//! # Pipeline
//!
//! 1. **Seed/Join.** Each positive precondition becomes a [`ParamSet`] of
//!    partial parameter rows, one per matching fact. Sets are hash-joined on
//!    the parameter indices they share. A precondition with no matching fact
//!    ends grounding immediately.
//! 2. **Expand.** Parameters no positive precondition mentions are enumerated
//!    over [`State::object_domain`].
//! 3. **Except.** Each negative precondition becomes a `ParamSet`; rows that
//!    agree with any of its rows on the shared indices are removed.
//!
//! # No aliasing
//!
//! Distinct parameters never take the same identifier within one row. Rows
//! that would alias are dropped wherever they arise (seed, join, expand).
//! Two slots that must hold the same object are written with the same
//! parameter.
//!
//! # Determinism
//!
//! Rows are kept sorted and deduplicated, so [`ground`] returns instances in
//! ascending parameter order for identical inputs.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use crate::carrier::fact::Fact;
use crate::carrier::ident::Ident;
use crate::carrier::relation::RelationTemplate;
use crate::carrier::state::State;
use crate::operators::instance::ActionInstance;
use crate::operators::schema::ActionSchema;

/// A table of partial parameter vectors.
///
/// Every row has the owning schema's arity. Unbound slots hold
/// [`Ident::UNBOUND`]. `known` lists the indices bound in every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSet {
    arity: usize,
    known: BTreeSet<usize>,
    rows: BTreeSet<Vec<Ident>>,
}

impl ParamSet {
    /// One row with nothing bound: the identity for [`ParamSet::join`].
    #[must_use]
    pub fn unit(arity: usize) -> Self {
        Self {
            arity,
            known: BTreeSet::new(),
            rows: BTreeSet::from([vec![Ident::UNBOUND; arity]]),
        }
    }

    /// Rows contributed by `template`: one per asserted fact of `state` the
    /// template matches.
    ///
    /// Candidates come from the index of the first Bound slot (`a`, then
    /// `rel`, then `b`), or every fact when all slots are Free. A template
    /// that repeats one parameter only matches facts with equal values in
    /// those slots.
    #[must_use]
    pub fn from_template(template: &RelationTemplate, state: &State, arity: usize) -> Self {
        let candidates: Box<dyn Iterator<Item = &Fact> + '_> = if let Some(id) = template.a.as_bound() {
            Box::new(state.by_a(id).iter())
        } else if let Some(id) = template.rel.as_bound() {
            Box::new(state.by_rel(id).iter())
        } else if let Some(id) = template.b.as_bound() {
            Box::new(state.by_b(id).iter())
        } else {
            Box::new(state.facts())
        };

        let known: BTreeSet<usize> = template.free_indices().collect();
        let mut rows = BTreeSet::new();
        for fact in candidates.filter(|f| f.truth && f.is_instance_of(template)) {
            if let Some(row) = bind_row(template, fact, arity) {
                if !aliases(&row) {
                    rows.insert(row);
                }
            }
        }
        Self { arity, known, rows }
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.arity
    }

    #[must_use]
    pub fn known(&self) -> &BTreeSet<usize> {
        &self.known
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Ident]> {
        self.rows.iter().map(Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Natural join on the shared known indices.
    ///
    /// Row pairs that disagree on a shared index are discarded. The result
    /// knows the union of both index sets.
    #[must_use]
    pub fn join(&self, other: &Self) -> Self {
        let shared: Vec<usize> = self.known.intersection(&other.known).copied().collect();
        let added: Vec<usize> = other.known.difference(&self.known).copied().collect();

        let mut buckets: HashMap<Vec<Ident>, Vec<&Vec<Ident>>> = HashMap::new();
        for row in &other.rows {
            buckets.entry(project(row, &shared)).or_default().push(row);
        }

        let mut rows = BTreeSet::new();
        for left in &self.rows {
            let Some(matches) = buckets.get(&project(left, &shared)) else {
                continue;
            };
            for right in matches {
                let mut merged = left.clone();
                for &i in &added {
                    merged[i] = right[i];
                }
                if !aliases(&merged) {
                    rows.insert(merged);
                }
            }
        }
        Self {
            arity: self.arity,
            known: self.known.union(&other.known).copied().collect(),
            rows,
        }
    }

    /// Bind every unknown index to each object of `domain` in turn, skipping
    /// objects already used elsewhere in the row.
    #[must_use]
    pub fn expand(&self, domain: &BTreeSet<Ident>) -> Self {
        let mut rows = self.rows.clone();
        for slot in (0..self.arity).filter(|i| !self.known.contains(i)) {
            let mut next = BTreeSet::new();
            for row in &rows {
                for &object in domain {
                    if row.contains(&object) {
                        continue;
                    }
                    let mut extended = row.clone();
                    extended[slot] = object;
                    next.insert(extended);
                }
            }
            rows = next;
            if rows.is_empty() {
                break;
            }
        }
        Self {
            arity: self.arity,
            known: (0..self.arity).collect(),
            rows,
        }
    }

    /// Remove rows agreeing with any row of `negative` on the shared known
    /// indices.
    #[must_use]
    pub fn except(&self, negative: &Self) -> Self {
        if negative.is_empty() {
            return self.clone();
        }
        let shared: Vec<usize> = self.known.intersection(&negative.known).copied().collect();
        let banned: HashSet<Vec<Ident>> = negative.rows.iter().map(|r| project(r, &shared)).collect();
        Self {
            arity: self.arity,
            known: self.known.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| !banned.contains(&project(row, &shared)))
                .cloned()
                .collect(),
        }
    }
}

/// Every applicable instance of `schema` in `state`, in ascending parameter
/// order.
///
/// Identifiers that no fact mentions produce zero matches, never an error.
#[must_use]
pub fn ground(schema: &Arc<ActionSchema>, state: &State) -> Vec<ActionInstance> {
    let arity = schema.arity();
    let mut running = ParamSet::unit(arity);
    for template in schema.pos_pre() {
        let set = ParamSet::from_template(template, state, arity);
        if set.is_empty() {
            tracing::trace!(schema = schema.name(), "precondition has no matching fact");
            return Vec::new();
        }
        running = running.join(&set);
        tracing::trace!(schema = schema.name(), stage = "join", rows = running.len());
        if running.is_empty() {
            return Vec::new();
        }
    }

    running = running.expand(&state.object_domain());
    tracing::trace!(schema = schema.name(), stage = "expand", rows = running.len());
    for template in schema.neg_pre() {
        if running.is_empty() {
            break;
        }
        running = running.except(&ParamSet::from_template(template, state, arity));
        tracing::trace!(schema = schema.name(), stage = "except", rows = running.len());
    }

    let instances: Vec<ActionInstance> = running
        .rows
        .into_iter()
        .map(|row| ActionInstance::from_row(schema, row))
        .collect();
    tracing::trace!(schema = schema.name(), count = instances.len(), "grounded");
    instances
}

/// Ground every schema in order, concatenating the results.
#[must_use]
pub fn ground_all(schemas: &[Arc<ActionSchema>], state: &State) -> Vec<ActionInstance> {
    schemas.iter().flat_map(|s| ground(s, state)).collect()
}

fn bind_row(template: &RelationTemplate, fact: &Fact, arity: usize) -> Option<Vec<Ident>> {
    let mut row = vec![Ident::UNBOUND; arity];
    for (slot, value) in template.slots().into_iter().zip([fact.a, fact.rel, fact.b]) {
        if let Some(i) = slot.free_index() {
            let cell = row.get_mut(i)?;
            if !cell.is_unbound() && *cell != value {
                return None;
            }
            *cell = value;
        }
    }
    Some(row)
}

fn project(row: &[Ident], indices: &[usize]) -> Vec<Ident> {
    indices.iter().map(|&i| row[i]).collect()
}

fn aliases(row: &[Ident]) -> bool {
    let mut seen = HashSet::with_capacity(row.len());
    row.iter()
        .filter(|id| !id.is_unbound())
        .any(|id| !seen.insert(*id))
}
