//! # skillswap-core
//!
//! Core crate for the SkillSwap real-time platform. Contains the collaborator
//! traits, configuration schemas, typed identifiers, the profile snapshot
//! type, and the unified error system.
//!
//! This crate has **no** internal dependencies on other SkillSwap crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
