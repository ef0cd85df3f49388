//! Core library: playlist categorization and reorganization planning.

pub mod analyzer;
pub mod audit;
pub mod categories;
pub mod categorizer;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod plan;
