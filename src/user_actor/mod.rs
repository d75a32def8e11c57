//! User table: entity hooks and errors.

pub mod entity;
pub mod error;

pub use error::*;
