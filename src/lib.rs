//! `zip-afford` library crate.
//!
//! The binary (`afford`) is a thin wrapper around this library so that:
//!
//! - the normalization and metrics pipeline is testable without spawning processes
//! - the pipeline can be driven from other front-ends with in-memory tables
//! - I/O, reporting and CLI stay outside the core

pub mod afford;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod normalize;
pub mod report;
