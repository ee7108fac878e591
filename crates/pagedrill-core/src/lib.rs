//! pagedrill-core — Operation parsing, evaluation and session scoring.
//!
//! This crate defines the data model, the page parser, the arithmetic
//! evaluator and the per-page session scorer that the pagedrill CLI drives.

pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod parser;
pub mod review;
pub mod session;
pub mod traits;
