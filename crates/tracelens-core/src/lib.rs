//! Tracelens Core Library
//!
//! Analysis of finished agent runs: step records, pricing, the run analyzer
//! and the token and timeline views built on the same step data.

pub mod analysis;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod pricing;
pub mod run;
pub mod step;
pub mod timeline;
pub mod tokens;
