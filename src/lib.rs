//! cu-analyzer: NOSS competency unit analyzer
//!
//! Ingests NOSS documents, scores every CU against the Green Technology and
//! IR4.0 vocabularies with `cu_analyzer_common`, and exports the results.

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod parser;
pub mod scanner;
pub mod store;
