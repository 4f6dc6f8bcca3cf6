//! Job listing query composition.
//!
//! A filter set is turned into a list of [`Predicate`] descriptors once; the
//! Postgres backend compiles them to SQL (`sql`) and the in-memory backend
//! evaluates them directly, so listings and counts always agree.

pub mod filters;
pub mod predicate;
pub mod sql;

pub use filters::{JobFilters, PageWindow, RawJobQuery};
pub use predicate::Predicate;
