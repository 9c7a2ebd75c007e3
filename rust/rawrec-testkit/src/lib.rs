//! Test utilities for the rawrec crates.
//!
//! - [`fixtures`]: one column generator per physical kind, with expected decoded values
//! - [`split`]: random re-chunking of batches and dictionary re-encoding of columns
//! - [`files`]: temporary IPC, CSV and NDJSON files for command-line tests
//!
//! # Usage
//!
//! This crate is only meant to be used as a dev-dependency of the workspace crates.

pub mod files;
pub mod fixtures;
pub mod split;
