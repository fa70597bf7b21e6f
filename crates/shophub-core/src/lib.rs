//! # shophub-core
//!
//! Core crate for ShopHub. Contains configuration schemas, typed
//! identifiers, the unified error system, and the logging bootstrap.
//!
//! This crate has **no** internal dependencies on other ShopHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
