//! GP Practice Directory Search Library
//!
//! This library crate defines the core modules behind the practice-directory
//! service. It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! The service is composed of two loosely coupled subsystems:
//!
//! - **`directory`**: The data intake layer. Parses the delimited practice
//!   extract (headered or positional epraccur variants), maps columns via a
//!   synonym-driven heuristic, filters inactive and non-GP rows, and caches
//!   the resulting table for the lifetime of the process.
//! - **`search`**: The query layer. Scores and ranks cached records against
//!   free-text queries, with a whitespace-insensitive bonus for UK-postcode
//!   shaped input, and exposes the result over a single HTTP endpoint.

pub mod directory;
pub mod search;
