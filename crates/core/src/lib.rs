//! Domain types and pure logic shared across the Agora backend.
//!
//! Contains the error type, entity enums, the civi scoring function, and
//! the bill enrichment contract (field mapping + the external data source
//! trait). No I/O happens here.

pub mod bill;
pub mod civi;
pub mod error;
pub mod scoring;
pub mod thread;
pub mod types;
