//! `SchemaLibrary`: the name-keyed schema catalog handed to search.
//!
//! Schemas are stored behind `Arc` so ground instances, heuristic nodes, and
//! concurrent search runs share one immutable copy. Helper schemas exist only
//! to be composed into others via [`crate::operators::compose`]; they are
//! excluded from [`SchemaLibrary::searchable`].

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::error::{KernelError, KernelResult};
use crate::operators::schema::ActionSchema;

#[derive(Debug, Clone, Default)]
pub struct SchemaLibrary {
    schemas: BTreeMap<String, Arc<ActionSchema>>,
    helpers: BTreeSet<String>,
}

impl SchemaLibrary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a searchable schema.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::DuplicateSchema`] if the name is taken.
    pub fn insert(&mut self, schema: ActionSchema) -> KernelResult<Arc<ActionSchema>> {
        let name = schema.name().to_string();
        if self.schemas.contains_key(&name) {
            return Err(KernelError::DuplicateSchema { name });
        }
        let shared = Arc::new(schema);
        self.schemas.insert(name, Arc::clone(&shared));
        Ok(shared)
    }

    /// Register a composition-only schema.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::DuplicateSchema`] if the name is taken.
    pub fn insert_helper(&mut self, schema: ActionSchema) -> KernelResult<Arc<ActionSchema>> {
        let name = schema.name().to_string();
        let shared = self.insert(schema)?;
        self.helpers.insert(name);
        Ok(shared)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<ActionSchema>> {
        self.schemas.get(name)
    }

    /// Look up a schema referenced by composition.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::UnknownDependentSchema`] naming the missing
    /// schema.
    pub fn require(&self, name: &str) -> KernelResult<&Arc<ActionSchema>> {
        self.get(name).ok_or_else(|| KernelError::UnknownDependentSchema {
            name: name.to_string(),
        })
    }

    #[must_use]
    pub fn is_helper(&self, name: &str) -> bool {
        self.helpers.contains(name)
    }

    /// Non-helper schemas in name order.
    #[must_use]
    pub fn searchable(&self) -> Vec<Arc<ActionSchema>> {
        self.schemas
            .iter()
            .filter(|(name, _)| !self.helpers.contains(*name))
            .map(|(_, schema)| Arc::clone(schema))
            .collect()
    }

    /// All schemas (helpers included) in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ActionSchema>> {
        self.schemas.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
