//! Carrier module: identifiers, the symbol table, facts, relation templates,
//! and `State`.
//!
//! This is the foundational layer. Nothing from `operators` is imported here.

pub mod fact;
pub mod ident;
pub mod relation;
pub mod state;
pub mod symbol;
