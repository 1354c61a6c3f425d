//! Relplan Harness: world-level orchestration for the planner.
//!
//! The harness builds a world's planning problem, runs the search crate on
//! it, replays the returned plan through the kernel's checked apply, and
//! packages the outcome as a canonical JSON run report.
//!
//! The harness does NOT implement planning logic; it delegates to the
//! kernel and search crates. Worlds provide domain data only; the harness
//! owns orchestration.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod policy;
pub mod runner;
pub mod worlds;
