//! Equality matcher for mock expectations

use crate::equal::equal;
use crate::render::render_plain;
use crate::value::{Handle, Reflect};
use std::fmt;

/// Matches candidates deep-equal to an expected value
///
/// ```
/// use deepeq_core::EqMatcher;
///
/// let matcher = EqMatcher::new(vec![1u8, 2]);
/// assert!(matcher.matches(&vec![1u8, 2]));
/// assert!(!matcher.matches(&vec![2u8, 1]));
/// ```
#[derive(Debug, Clone)]
pub struct EqMatcher<T> {
    expected: T,
}

impl<T: Reflect> EqMatcher<T> {
    pub fn new(expected: T) -> Self {
        Self { expected }
    }

    pub fn expected(&self) -> &T {
        &self.expected
    }

    /// Convert a copy of the expected value into the candidate's type and
    /// compare
    pub fn matches<U>(&self, candidate: &U) -> bool
    where
        T: Clone + Into<U>,
        U: Reflect,
    {
        let converted: U = self.expected.clone().into();
        equal(&converted, candidate)
    }

    /// Compare against a type-erased candidate without conversion
    ///
    /// An absent candidate never matches.
    pub fn matches_dyn(&self, candidate: Option<&dyn Reflect>) -> bool {
        equal(&self.expected, Handle::from(candidate))
    }
}

impl<T: Reflect> fmt::Display for EqMatcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_plain(&self.expected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_after_conversion() {
        let matcher = EqMatcher::new(5i32);
        assert!(matcher.matches(&5i64));
        assert!(!matcher.matches(&6i64));
        let text = EqMatcher::new("abc");
        assert!(text.matches(&"abc".to_string()));
    }

    #[test]
    fn test_dyn_candidates() {
        let matcher = EqMatcher::new(3u8);
        let same: &dyn Reflect = &3u8;
        let other_type: &dyn Reflect = &3u16;
        assert!(matcher.matches_dyn(Some(same)));
        assert!(!matcher.matches_dyn(Some(other_type)));
        assert!(!matcher.matches_dyn(None));
    }

    #[test]
    fn test_display_is_plain_rendering() {
        assert_eq!(EqMatcher::new(vec![1]).to_string(), "Vec<i32>{\n  1,\n}");
        assert_eq!(EqMatcher::new(7u8).expected(), &7u8);
    }
}
