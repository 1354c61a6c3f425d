//! `ActionSchema`: a parameterized STRIPS-style operator.
//!
//! # Validation
//!
//! Construction enforces two rules:
//!
//! 1. The parameter list is exactly `Free(0), Free(1), ..., Free(n-1)`.
//! 2. Every Free variable in any precondition or effect has an index below
//!    `n`.
//!
//! Templates are normalized on the way in: the negation flag follows the set
//! a template lives in, and duplicates within one set collapse (first
//! occurrence wins).
//!
//! # Derivation
//!
//! Schemas never change after construction. [`ActionSchema::rebind_variables`]
//! and [`ActionSchema::bind_variables`] produce new schemas with derived
//! names.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::carrier::ident::Ident;
use crate::carrier::relation::{RelationTemplate, Variable};
use crate::carrier::symbol::NameLookup;
use crate::error::{KernelError, KernelResult};

/// The four template sets of a schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SchemaBody {
    pub pos_pre: Vec<RelationTemplate>,
    pub neg_pre: Vec<RelationTemplate>,
    pub pos_eff: Vec<RelationTemplate>,
    pub neg_eff: Vec<RelationTemplate>,
}

impl SchemaBody {
    /// Every template with `new_vars` substituted (see
    /// [`RelationTemplate::rebind`]).
    #[must_use]
    pub fn rebind(&self, new_vars: &[Variable]) -> Self {
        let map = |set: &[RelationTemplate]| set.iter().map(|t| t.rebind(new_vars)).collect();
        Self {
            pos_pre: map(&self.pos_pre),
            neg_pre: map(&self.neg_pre),
            pos_eff: map(&self.pos_eff),
            neg_eff: map(&self.neg_eff),
        }
    }

    /// Append `other`'s templates to the matching sets.
    pub fn merge(&mut self, other: Self) {
        self.pos_pre.extend(other.pos_pre);
        self.neg_pre.extend(other.neg_pre);
        self.pos_eff.extend(other.pos_eff);
        self.neg_eff.extend(other.neg_eff);
    }

    /// Preconditions first (positive, then negative), then effects.
    pub fn templates(&self) -> impl Iterator<Item = &RelationTemplate> {
        self.pos_pre
            .iter()
            .chain(&self.neg_pre)
            .chain(&self.pos_eff)
            .chain(&self.neg_eff)
    }

    fn normalized(self) -> Self {
        fn norm(set: Vec<RelationTemplate>, negated: bool) -> Vec<RelationTemplate> {
            let mut seen = BTreeSet::new();
            set.into_iter()
                .map(|t| t.with_negation(negated))
                .filter(|t| seen.insert(t.clone()))
                .collect()
        }
        Self {
            pos_pre: norm(self.pos_pre, false),
            neg_pre: norm(self.neg_pre, true),
            pos_eff: norm(self.pos_eff, false),
            neg_eff: norm(self.neg_eff, true),
        }
    }
}

/// A validated, immutable action schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionSchema {
    name: String,
    params: Vec<Variable>,
    body: SchemaBody,
}

impl ActionSchema {
    /// Validate and construct.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::MalformedSchema`] when the parameter list is
    /// not `Free(0..n)` or a template uses an undeclared Free index.
    pub fn new(name: impl Into<String>, params: Vec<Variable>, body: SchemaBody) -> KernelResult<Self> {
        let name = name.into();
        for (i, param) in params.iter().enumerate() {
            if param.free_index() != Some(i) {
                return Err(KernelError::MalformedSchema {
                    schema: name,
                    detail: format!("parameter {i} is {param:?}, expected a free variable with index {i}"),
                });
            }
        }
        let mut names = BTreeSet::new();
        for param in &params {
            if let Variable::Free { name: pname, .. } = param {
                if !names.insert(pname.clone()) {
                    return Err(KernelError::MalformedSchema {
                        schema: name,
                        detail: format!("parameter name '{pname}' is declared twice"),
                    });
                }
            }
        }
        let body = body.normalized();
        if let Some(bad) = body
            .templates()
            .find(|t| t.free_indices().any(|idx| idx >= params.len()))
        {
            return Err(KernelError::MalformedSchema {
                detail: format!("{bad:?} uses a free variable not in the {}-parameter list", params.len()),
                schema: name,
            });
        }
        Ok(Self { name, params, body })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn params(&self) -> &[Variable] {
        &self.params
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    #[must_use]
    pub fn body(&self) -> &SchemaBody {
        &self.body
    }

    #[must_use]
    pub fn pos_pre(&self) -> &[RelationTemplate] {
        &self.body.pos_pre
    }

    #[must_use]
    pub fn neg_pre(&self) -> &[RelationTemplate] {
        &self.body.neg_pre
    }

    #[must_use]
    pub fn pos_eff(&self) -> &[RelationTemplate] {
        &self.body.pos_eff
    }

    #[must_use]
    pub fn neg_eff(&self) -> &[RelationTemplate] {
        &self.body.neg_eff
    }

    /// Substitute every Free variable at index `i` with `new_vars[i]`.
    ///
    /// The new parameter list is the Free variables surviving in `new_vars`,
    /// deduplicated and ordered by index; it must form `Free(0..m)`.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::MalformedSchema`] if the surviving variables do
    /// not form a contiguous `Free(0..m)` list.
    pub fn rebind_variables(&self, new_vars: &[Variable], new_name: impl Into<String>) -> KernelResult<Self> {
        let survivors: BTreeMap<usize, Variable> = new_vars
            .iter()
            .filter_map(|v| v.free_index().map(|idx| (idx, v.clone())))
            .collect();
        Self::new(new_name, survivors.into_values().collect(), self.body.rebind(new_vars))
    }

    /// Pin the parameters in `bindings` to literals.
    ///
    /// Unpinned parameters are renumbered to stay contiguous (keeping their
    /// display names). The derived name appends each pinned literal's name
    /// in parameter order: `move` with `{0: ball}` becomes `move_ball`.
    ///
    /// # Errors
    ///
    /// Propagates [`ActionSchema::rebind_variables`] failures; a schema that
    /// passed validation cannot trigger them.
    pub fn bind_variables(&self, bindings: &BTreeMap<usize, Ident>, names: &dyn NameLookup) -> KernelResult<Self> {
        let mut next = 0;
        let mut new_name = self.name.clone();
        let new_vars: Vec<Variable> = self
            .params
            .iter()
            .enumerate()
            .map(|(i, param)| {
                if let Some(&id) = bindings.get(&i) {
                    new_name.push('_');
                    new_name.push_str(&names.display_name(id));
                    Variable::Bound(id)
                } else {
                    let name = match param {
                        Variable::Free { name, .. } => name.clone(),
                        Variable::Bound(id) => Arc::from(names.display_name(*id)),
                    };
                    let v = Variable::Free { index: next, name };
                    next += 1;
                    v
                }
            })
            .collect();
        self.rebind_variables(&new_vars, new_name)
    }

    /// `move(?obj ?from ?to)` header line.
    #[must_use]
    pub fn signature(&self, names: &dyn NameLookup) -> String {
        let params: Vec<String> = self.params.iter().map(|p| p.render(names)).collect();
        format!("{}({})", self.name, params.join(" "))
    }
}
