//! Infrastructure adapters. Implement ports.
//!
//! Persistence, course lookup, clock, terminal UI, HTTP endpoint. Map errors to DomainError.

pub mod clock;
pub mod http;
pub mod lookup;
pub mod persistence;
pub mod ui;
