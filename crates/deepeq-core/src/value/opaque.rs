//! Semantic-equality capability of opaque message types
//!
//! Generated message types carry internal bookkeeping (size caches, unknown
//! field buffers) that must not take part in a comparison. Such a type
//! implements [`Message`] and is registered with
//! [`reflect_message!`](crate::reflect_message); the equality engine then
//! defers to [`Message::declared_eq`] instead of walking members.

use super::{Reflect, Value};
use std::any::Any;

/// Equality over declared members only
pub trait Message: Any {
    fn declared_eq(&self, other: &Self) -> bool;
}

/// Object-safe form of [`Message`]
pub trait OpaqueEq {
    /// False whenever `other` is of a different concrete type
    fn opaque_eq(&self, other: &dyn OpaqueEq) -> bool;

    fn as_any(&self) -> &dyn Any;
}

impl<M: Message> OpaqueEq for M {
    fn opaque_eq(&self, other: &dyn OpaqueEq) -> bool {
        other
            .as_any()
            .downcast_ref::<M>()
            .is_some_and(|other| self.declared_eq(other))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The opaque capability of `value`, if it is a canonical opaque type
///
/// Only records qualify, and a record that flattens another record in
/// (an `#[embedded]` member) is not canonical.
pub fn opaque_capability(value: &dyn Reflect) -> Option<&dyn OpaqueEq> {
    let opaque = value.as_opaque()?;
    match value.reflect() {
        Value::Struct(record) if !record.fields().iter().any(|f| f.embedded) => Some(opaque),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Beacon {
        pub id: u32,
        cache: u32,
    }

    impl Message for Beacon {
        fn declared_eq(&self, other: &Self) -> bool {
            self.id == other.id
        }
    }

    crate::reflect_message!(Beacon { pub id, cache });

    struct Extended {
        pub base: Beacon,
    }

    impl Message for Extended {
        fn declared_eq(&self, other: &Self) -> bool {
            self.base.declared_eq(&other.base)
        }
    }

    crate::reflect_message!(Extended { #[embedded] pub base });

    #[test]
    fn test_capability_compares_declared_members() {
        let a = Beacon { id: 1, cache: 0 };
        let b = Beacon { id: 1, cache: 12 };
        let (Some(x), Some(y)) = (opaque_capability(&a), opaque_capability(&b)) else {
            panic!("records registered as messages expose the capability");
        };
        assert!(x.opaque_eq(y));
        assert_ne!(a.cache, b.cache);
    }

    #[test]
    fn test_capability_rejects_other_types() {
        let a = Beacon { id: 1, cache: 0 };
        let e = Extended {
            base: Beacon { id: 1, cache: 0 },
        };
        assert!(opaque_capability(&e).is_none());
        let other: &dyn OpaqueEq = &e;
        let Some(x) = opaque_capability(&a) else {
            panic!("capability expected");
        };
        assert!(!x.opaque_eq(other));
    }

    #[test]
    fn test_plain_values_are_not_opaque() {
        assert!(opaque_capability(&5i32).is_none());
        assert!(opaque_capability(&vec![1u8]).is_none());
    }
}
