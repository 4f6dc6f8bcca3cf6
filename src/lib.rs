//! Job board backend: filtered job listings, company directory, category
//! vocabulary and saved-search email alerts over PostgreSQL.

pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod format;
pub mod logging;
pub mod markdown;
pub mod pagination;
pub mod query;
pub mod shutdown;

#[cfg(test)]
mod test_support;
