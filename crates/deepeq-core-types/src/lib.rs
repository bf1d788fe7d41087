//! Core types shared across deepeq facilities
//!
//! This crate provides foundational types used by the comparison engine
//! and its logging facility:
//!
//! - **Identity**: [`Addr`], the storage identity of a borrowed referent
//! - **Schema constants**: Canonical field keys and event names

pub mod identity;
pub mod schema;

pub use identity::Addr;
