//! deepeq core - structural equality, difference and side-by-side rendering
//!
//! This crate compares values of arbitrary shape for test suites:
//! - Deep structural equality with cycle detection and an override for
//!   opaque message types that define their own equality
//! - A typed difference tree, aligning sequences by longest common subsequence
//! - Colorized rendering of both values with differences highlighted, laid
//!   out side by side
//!
//! Types take part by implementing [`value::Reflect`]; std collections,
//! pointers, scalars and `serde_json::Value` are covered out of the box, and
//! structs use [`reflect_record!`] or [`reflect_message!`].

pub mod diff;
pub mod equal;
pub mod errors;
pub mod logging_facility;
pub mod matcher;
pub mod options;
pub mod render;
pub mod report;
pub mod value;

// Re-export commonly used types
pub use diff::{difference, DiffNode, MapKey, Side};
pub use equal::equal;
pub use errors::{DeepEqError, ExError, ExErrorKind, Result};
pub use matcher::EqMatcher;
pub use options::RenderOptions;
pub use report::{side_by_side, TestReporter};
pub use value::{Handle, Message, Reflect};
