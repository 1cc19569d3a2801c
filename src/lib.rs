//! CDDB Lookup Library
//!
//! FreeDB/CDDB protocol client: disc ID calculation, server queries, XMCD
//! record parsing and serialization, and record export.

pub mod app;
pub mod cddb;
pub mod cli;
pub mod config;
pub mod disc;
pub mod error;
pub mod export;

pub use error::{CddbError, CddbResult};
