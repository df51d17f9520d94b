//! # fixwell-core
//!
//! Core types for the Fixwell appliance-repair backend.
//!
//! This crate provides the foundational types shared across all Fixwell crates:
//! - Entity structs for domain records (listings, reviews, site settings)
//! - Status enums
//! - ID prefix constants and formatting helpers
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
