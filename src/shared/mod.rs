//! Cross-cutting helpers: configuration.

pub mod config;
