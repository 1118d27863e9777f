//! Business operations behind the HTTP handlers.
//!
//! Every operation is generic over the repository traits it needs so it can be
//! exercised with `repository::mock` in unit tests.

pub mod articles;
pub mod comments;
pub mod errors;
pub mod main;
pub mod tags;

pub use errors::{ServiceError, ServiceResult};
