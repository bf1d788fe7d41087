//! Structural difference between two values
//!
//! - `model`: the difference tree and its map keys
//! - `engine`: builds the tree, aligning sequences by longest common subsequence

pub mod engine;
pub mod model;

pub use engine::difference;
pub use model::{DiffNode, FloatKey, MapKey, Side};
