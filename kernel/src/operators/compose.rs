//! `SchemaBuilder`: loader-facing schema construction and composition.
//!
//! Tokens are resolved by name. A token equal to one of the builder's
//! parameter names becomes that parameter's Free variable; any other token is
//! interned as a Bound literal.
//!
//! [`SchemaBuilder::include`] composes a dependent schema: the callee's
//! formal parameters are mapped onto the caller's argument tokens, the
//! callee is rebound through that map, and its four template sets are
//! merged into the caller's.
//!
//! Builder methods chain by value. The first failure is held and reported by
//! [`SchemaBuilder::build`].

use crate::carrier::relation::{RelationTemplate, Variable};
use crate::carrier::symbol::SymbolTable;
use crate::error::{KernelError, KernelResult};
use crate::operators::library::SchemaLibrary;
use crate::operators::schema::{ActionSchema, SchemaBody};

#[derive(Debug)]
pub struct SchemaBuilder<'t> {
    name: String,
    params: Vec<Variable>,
    body: SchemaBody,
    table: &'t mut SymbolTable,
    error: Option<KernelError>,
}

impl<'t> SchemaBuilder<'t> {
    /// Start a schema with the given parameter names (in order).
    pub fn new(name: &str, params: &[&str], table: &'t mut SymbolTable) -> Self {
        Self {
            name: name.to_string(),
            params: params
                .iter()
                .enumerate()
                .map(|(i, p)| Variable::free(i, p))
                .collect(),
            body: SchemaBody::default(),
            table,
            error: None,
        }
    }

    #[must_use]
    pub fn precondition(mut self, a: &str, rel: &str, b: &str) -> Self {
        if let Some(t) = self.template(a, rel, b) {
            self.body.pos_pre.push(t);
        }
        self
    }

    #[must_use]
    pub fn negative_precondition(mut self, a: &str, rel: &str, b: &str) -> Self {
        if let Some(t) = self.template(a, rel, b) {
            self.body.neg_pre.push(t);
        }
        self
    }

    #[must_use]
    pub fn effect(mut self, a: &str, rel: &str, b: &str) -> Self {
        if let Some(t) = self.template(a, rel, b) {
            self.body.pos_eff.push(t);
        }
        self
    }

    #[must_use]
    pub fn negative_effect(mut self, a: &str, rel: &str, b: &str) -> Self {
        if let Some(t) = self.template(a, rel, b) {
            self.body.neg_eff.push(t);
        }
        self
    }

    /// Inline `callee(args...)` from `library`.
    ///
    /// Fails (at [`build`](Self::build)) with
    /// [`KernelError::UnknownDependentSchema`] if `callee` is not registered,
    /// or [`KernelError::ArityMismatch`] if `args` does not match its
    /// parameter count.
    #[must_use]
    pub fn include(mut self, library: &SchemaLibrary, callee: &str, args: &[&str]) -> Self {
        if self.error.is_some() {
            return self;
        }
        let schema = match library.require(callee) {
            Ok(schema) => schema,
            Err(e) => {
                self.error = Some(e);
                return self;
            }
        };
        if schema.arity() != args.len() {
            self.error = Some(KernelError::ArityMismatch {
                schema: callee.to_string(),
                expected: schema.arity(),
                actual: args.len(),
            });
            return self;
        }
        let mut mapping = Vec::with_capacity(args.len());
        for arg in args {
            match self.resolve(arg) {
                Ok(v) => mapping.push(v),
                Err(e) => {
                    self.error = Some(e);
                    return self;
                }
            }
        }
        tracing::trace!(caller = %self.name, callee, "inlining dependent schema");
        self.body.merge(schema.body().rebind(&mapping));
        self
    }

    /// Validate and produce the schema.
    ///
    /// # Errors
    ///
    /// The first error recorded while building, or
    /// [`KernelError::MalformedSchema`] from validation.
    pub fn build(self) -> KernelResult<ActionSchema> {
        if let Some(e) = self.error {
            return Err(e);
        }
        ActionSchema::new(self.name, self.params, self.body)
    }

    fn resolve(&mut self, token: &str) -> KernelResult<Variable> {
        if let Some(param) = self.params.iter().find(|p| match p {
            Variable::Free { name, .. } => name.as_ref() == token,
            Variable::Bound(_) => false,
        }) {
            return Ok(param.clone());
        }
        self.table.intern(token).map(Variable::Bound)
    }

    fn template(&mut self, a: &str, rel: &str, b: &str) -> Option<RelationTemplate> {
        if self.error.is_some() {
            return None;
        }
        match self.resolve_triple(a, rel, b) {
            Ok(t) => Some(t),
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }

    fn resolve_triple(&mut self, a: &str, rel: &str, b: &str) -> KernelResult<RelationTemplate> {
        Ok(RelationTemplate::new(
            self.resolve(a)?,
            self.resolve(rel)?,
            self.resolve(b)?,
        ))
    }
}
