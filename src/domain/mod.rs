//! Storage-independent entities and their invariants.

pub mod article;
pub mod comment;
pub mod ordering;
pub mod tag;
pub mod validation;
