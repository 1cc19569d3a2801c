//! Disc table of contents module
//!
//! Provides the TOC value supplied by disc readers and the disc ID
//! calculations derived from it.

pub mod toc;

pub use toc::{compute_disc_id, TableOfContents, FRAMES_PER_SECOND};
