//! Data models for extraction results and configuration.

pub mod config;
pub mod document;
