//! Storage identity for reference-like values
//!
//! Cycle detection and back-reference rendering need to recognise "the same
//! referent" across a traversal. An [`Addr`] is the address of a borrowed
//! referent; it is only meaningful while that borrow is alive, which is
//! exactly the lifetime of a single comparison or rendering call.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Address of a borrowed referent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Addr(usize);

impl Addr {
    /// Identity of the referent behind `value`
    ///
    /// Fat pointers (slices, trait objects) are reduced to their data pointer,
    /// so a slice and its first element share an address.
    pub fn of<T: ?Sized>(value: &T) -> Self {
        Self(value as *const T as *const () as usize)
    }

    /// Identity of a raw pointer value
    pub fn from_ptr<T: ?Sized>(ptr: *const T) -> Self {
        Self(ptr as *const () as usize)
    }

    /// Build from a raw numeric address
    pub fn from_usize(raw: usize) -> Self {
        Self(raw)
    }

    /// True for the null address
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_referent_same_addr() {
        let value = 42u64;
        let a = &value;
        let b = &value;
        assert_eq!(Addr::of(a), Addr::of(b));
    }

    #[test]
    fn test_distinct_referents_distinct_addr() {
        let values = [1u32, 2u32];
        assert_ne!(Addr::of(&values[0]), Addr::of(&values[1]));
    }

    #[test]
    fn test_slice_addr_is_data_pointer() {
        let values = vec![7u8, 8, 9];
        assert_eq!(Addr::of(values.as_slice()), Addr::of(&values[0]));
    }

    #[test]
    fn test_null_pointer() {
        let ptr: *const u8 = std::ptr::null();
        assert!(Addr::from_ptr(ptr).is_null());
    }

    #[test]
    fn test_display_is_hex() {
        assert_eq!(Addr::from_usize(255).to_string(), "0xff");
    }

    #[test]
    fn test_serde_round_trip() {
        let addr = Addr::from_usize(4096);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "4096");
        let back: Addr = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
