use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static MODULE_PATH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z_][A-Za-z0-9_]*::").expect("Invalid module path regex")
});

/// Display form of a declared type name: module paths are dropped,
/// generic structure is kept (`alloc::vec::Vec<my::Item>` becomes
/// `Vec<Item>`).
pub fn short_type_name(full: &'static str) -> Cow<'static, str> {
    MODULE_PATH_REGEX.replace_all(full, "")
}
