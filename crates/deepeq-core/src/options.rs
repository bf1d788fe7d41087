//! Rendering configuration

/// Header of the expected (left) pane
pub const DEFAULT_EXPECTED_LABEL: &str = "Expected";
/// Header of the actual (right) pane
pub const DEFAULT_ACTUAL_LABEL: &str = "Actual";

/// Options for the side-by-side report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub expected_label: String,
    pub actual_label: String,
    /// Annotate the root value with its type even where the literal would
    /// be unambiguous (`i32(5)` rather than `5`)
    pub show_root_type: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            expected_label: DEFAULT_EXPECTED_LABEL.to_string(),
            actual_label: DEFAULT_ACTUAL_LABEL.to_string(),
            show_root_type: true,
        }
    }
}
