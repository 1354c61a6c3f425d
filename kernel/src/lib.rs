//! Relplan Kernel: the deterministic core of the action planner.
//!
//! # API Surface
//!
//! The kernel exposes the operations a search driver needs:
//!
//! - [`operators::ground::ground`] -- enumerate every applicable ground action
//!   of a schema against a state
//! - [`operators::apply::apply`] -- apply a ground action, producing a new state
//! - [`carrier::state::State::satisfies`] -- partial-goal satisfaction check
//!
//! plus the loader-facing construction surface ([`carrier::symbol::SymbolTable`],
//! [`operators::compose::SchemaBuilder`], [`operators::library::SchemaLibrary`]).
//!
//! # Module Dependency Direction
//!
//! `proof` ← `carrier` ← `operators`
//!
//! One-way only. No cycles. `operators` depends on `carrier`; `carrier`
//! depends on `proof` only for fingerprints and symbol table digests.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod carrier;
pub mod error;
pub mod operators;
pub mod proof;

pub use error::{KernelError, KernelResult};
