//! Data models for statements, report rows, and configuration.

pub mod config;
pub mod statement;
