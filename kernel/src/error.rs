//! Typed kernel errors.
//!
//! Construction-time failures (schemas, symbols, composition) and the
//! fail-closed checked apply path. Grounding and unchecked transition never
//! fail: an identifier that no fact mentions simply yields zero matches.

use thiserror::Error;

/// Typed failure for kernel construction and checked application.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KernelError {
    /// A schema references a Free variable that is not declared at the
    /// matching parameter index, or its parameter list is not `Free(0..n)`.
    #[error("malformed schema '{schema}': {detail}")]
    MalformedSchema { schema: String, detail: String },

    /// A dependent schema was referenced by name but never registered.
    #[error("unknown dependent schema '{name}'")]
    UnknownDependentSchema { name: String },

    /// Two schemas were registered under one name.
    #[error("schema '{name}' is already registered")]
    DuplicateSchema { name: String },

    /// A raw value does not fit the 21-bit identifier field (or is the
    /// reserved sentinel 0).
    #[error("identifier {raw} is outside 1..=2^21-1")]
    IdentifierOutOfRange { raw: u32 },

    /// The symbol table has allocated every 21-bit identifier.
    #[error("symbol table exhausted the 21-bit identifier space")]
    IdentifierSpaceExhausted,

    /// A name was allocated twice while restoring a symbol table.
    #[error("symbol '{name}' is already allocated")]
    DuplicateSymbol { name: String },

    /// A name was looked up but never interned.
    #[error("unknown symbol '{name}'")]
    UnknownSymbol { name: String },

    /// An instance parameter vector does not match its schema's arity.
    #[error("schema '{schema}' takes {expected} parameters, got {actual}")]
    ArityMismatch {
        schema: String,
        expected: usize,
        actual: usize,
    },

    /// Checked apply rejected an instance whose preconditions do not hold.
    #[error("cannot apply '{action}': {detail}")]
    PreconditionNotMet { action: String, detail: String },
}

/// Result type for kernel operations.
pub type KernelResult<T> = std::result::Result<T, KernelError>;
