//! Directory Intake Module
//!
//! Turns the raw practice extract into the in-memory table the search layer
//! queries.
//!
//! ## Workflow
//! 1. **Parse**: Splits the delimited text into rows of cells, honouring
//!    quoted cells with embedded delimiters and line breaks.
//! 2. **Detect**: Decides whether row 0 is a descriptive header or the first
//!    data row of the positional epraccur layout.
//! 3. **Map & Filter**: Resolves logical fields to column indices, drops
//!    nameless rows and rows that fail the active-status / GP-setting
//!    filters, and assembles the single-line address.
//! 4. **Cache**: Stores the table (or the load failure) once per process via
//!    `DirectoryStore`, together with diagnostics for introspection.
//!
//! ## Submodules
//! - **`csv`**: Quote-aware delimited-text parsing.
//! - **`loader`**: Schema detection, row mapping, and the cached store.
//! - **`types`**: Records, column map, diagnostics, and the error taxonomy.

pub mod csv;
pub mod loader;
pub mod types;
