//! Diesel row types and their conversions to and from the domain layer.

pub mod article;
pub mod article_tag;
pub mod comment;
pub mod tag;
