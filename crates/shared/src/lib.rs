//! Shared types, errors, and configuration for Coveted Collection.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Configuration management
//! - JWT token service and claims
//! - Clock abstraction for deterministic time in tests
//! - Serde helpers for money-as-number JSON maps

pub mod auth;
pub mod clock;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
