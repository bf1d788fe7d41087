//! Textual rendering of values and their differences
//!
//! - `printer`: one value, highlighted where a difference tree has leaves
//! - `side_by_side`: two rendered panes aligned into columns
//! - `ansi`: escape sequences and visible-width measurement

pub mod ansi;
pub mod printer;
pub mod side_by_side;

pub use printer::{render_plain, Printer};
pub use side_by_side::compose;
