//! Pricecast - cryptocurrency price projection dashboard

pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod tui;
pub mod types;
