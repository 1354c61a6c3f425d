//! Operators module: action schemas, composition, grounding, and transition.
//!
//! Depends on `carrier`. Nothing in `carrier` imports from here.

pub mod apply;
pub mod compose;
pub mod ground;
pub mod instance;
pub mod library;
pub mod schema;
