//! # TUNEGEN Common Library
//!
//! Shared code for the TUNEGEN service including:
//! - Database initialization, models, and queries
//! - Configuration loading and root folder resolution
//! - Common error types

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
