//! `ActionInstance`: a schema paired with one identifier per parameter.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::carrier::fact::Fact;
use crate::carrier::ident::Ident;
use crate::carrier::relation::RelationTemplate;
use crate::carrier::symbol::NameLookup;
use crate::error::{KernelError, KernelResult};
use crate::operators::schema::ActionSchema;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ActionInstance {
    schema: Arc<ActionSchema>,
    params: Vec<Ident>,
}

impl ActionInstance {
    /// # Errors
    ///
    /// Returns [`KernelError::ArityMismatch`] if `params.len()` differs from
    /// the schema's parameter count.
    pub fn new(schema: Arc<ActionSchema>, params: Vec<Ident>) -> KernelResult<Self> {
        if schema.arity() != params.len() {
            return Err(KernelError::ArityMismatch {
                schema: schema.name().to_string(),
                expected: schema.arity(),
                actual: params.len(),
            });
        }
        Ok(Self { schema, params })
    }

    /// Grounding produces rows of exactly the schema's arity.
    pub(crate) fn from_row(schema: &Arc<ActionSchema>, params: Vec<Ident>) -> Self {
        debug_assert_eq!(schema.arity(), params.len());
        Self {
            schema: Arc::clone(schema),
            params,
        }
    }

    #[must_use]
    pub fn schema(&self) -> &Arc<ActionSchema> {
        &self.schema
    }

    #[must_use]
    pub fn params(&self) -> &[Ident] {
        &self.params
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.schema.name()
    }

    /// Ground facts for one template set. Arity is checked at construction,
    /// so every template resolves.
    fn ground_set<'a>(&'a self, set: &'a [RelationTemplate]) -> impl Iterator<Item = Fact> + 'a {
        set.iter().filter_map(|t| t.substitute(&self.params))
    }

    pub fn positive_preconditions(&self) -> impl Iterator<Item = Fact> + '_ {
        self.ground_set(self.schema.pos_pre())
    }

    pub fn negative_preconditions(&self) -> impl Iterator<Item = Fact> + '_ {
        self.ground_set(self.schema.neg_pre())
    }

    pub fn add_effects(&self) -> impl Iterator<Item = Fact> + '_ {
        self.ground_set(self.schema.pos_eff())
    }

    pub fn delete_effects(&self) -> impl Iterator<Item = Fact> + '_ {
        self.ground_set(self.schema.neg_eff())
    }

    /// `move ball room1 room2`.
    #[must_use]
    pub fn render(&self, names: &dyn NameLookup) -> String {
        let mut out = self.schema.name().to_string();
        for id in &self.params {
            out.push(' ');
            out.push_str(&names.display_name(*id));
        }
        out
    }
}

impl PartialOrd for ActionInstance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ActionInstance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.schema
            .name()
            .cmp(other.schema.name())
            .then_with(|| self.params.cmp(&other.params))
    }
}

impl fmt::Debug for ActionInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<u32> = self.params.iter().map(|p| p.get()).collect();
        write!(f, "{}{:?}", self.schema.name(), params)
    }
}
