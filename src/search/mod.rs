//! Search Service Module
//!
//! The core component responsible for executing user queries against the
//! cached practice directory.
//!
//! ## Overview
//! This module bridges the HTTP API layer with the loaded directory table.
//! Queries never touch the filesystem: ranking is a pure function of the
//! cached records and the query string.
//!
//! ## Responsibilities
//! - **Normalization**: Trimming and lower-casing raw query strings, and
//!   recognising UK-postcode shaped input.
//! - **Ranking**: Additive substring scoring (name, address, postcode bonus)
//!   with a stable descending sort and a bounded result set.
//! - **API**: Exposing the query operation via the Axum web server, mapping
//!   load failures to a structured degraded response instead of a 5xx.
//!
//! ## Submodules
//! - **`engine`**: Contains the core scoring and ranking logic.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`types`**: Data Transfer Objects (DTOs) for API communication.

pub mod engine;
pub mod handlers;
pub mod types;
