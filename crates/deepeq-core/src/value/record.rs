//! Records: structs, tuples and the unit type

use super::{Reflect, Value};

/// Static description of one record member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDesc {
    pub name: &'static str,
    /// Part of the type's public surface (`pub` or a restricted `pub(...)`)
    pub declared: bool,
    /// Flattened-in member marked `#[embedded]`
    pub embedded: bool,
}

impl FieldDesc {
    pub const fn new(name: &'static str, declared: bool, embedded: bool) -> Self {
        Self {
            name,
            declared,
            embedded,
        }
    }
}

/// Privileged member access for record kinds
///
/// Implementations live next to the type (normally generated by
/// [`reflect_record!`](crate::reflect_record)), so private members are
/// readable without any accessibility check.
pub trait Record {
    fn fields(&self) -> &'static [FieldDesc];

    /// Member at `index` in `fields()` order
    fn read_member(&self, index: usize) -> Option<&dyn Reflect>;
}

/// Implement [`Record`] and [`Reflect`](crate::value::Reflect) for a struct
/// with named fields
///
/// Visibility is copied from the field list: `pub` members are declared,
/// the rest are internal. Mark flattened members with `#[embedded]`.
///
/// ```
/// use deepeq_core::reflect_record;
///
/// pub struct Point {
///     pub x: i32,
///     pub y: i32,
///     cached_norm: u64,
/// }
///
/// reflect_record!(Point { pub x, pub y, cached_norm });
///
/// let a = Point { x: 1, y: 2, cached_norm: 0 };
/// let b = Point { x: 1, y: 2, cached_norm: 5 };
/// assert!(!deepeq_core::equal(&a, &b));
/// ```
#[macro_export]
macro_rules! reflect_record {
    ($ty:ty { $($body:tt)* }) => {
        $crate::__record_members!($ty { $($body)* });

        impl $crate::value::Reflect for $ty {
            fn reflect(&self) -> $crate::value::Value<'_> {
                $crate::value::Value::Struct(self)
            }
        }
    };
}

/// Like [`reflect_record!`], and also registers the type's
/// [`Message`](crate::value::Message) implementation as its opaque equality
///
/// ```
/// use deepeq_core::{reflect_message, value::Message};
///
/// pub struct Ping {
///     pub seq: u32,
///     size_cache: u32,
/// }
///
/// impl Message for Ping {
///     fn declared_eq(&self, other: &Self) -> bool {
///         self.seq == other.seq
///     }
/// }
///
/// reflect_message!(Ping { pub seq, size_cache });
///
/// let a = Ping { seq: 1, size_cache: 0 };
/// let b = Ping { seq: 1, size_cache: 8 };
/// assert!(deepeq_core::equal(&a, &b));
/// ```
#[macro_export]
macro_rules! reflect_message {
    ($ty:ty { $($body:tt)* }) => {
        $crate::__record_members!($ty { $($body)* });

        impl $crate::value::Reflect for $ty {
            fn reflect(&self) -> $crate::value::Value<'_> {
                $crate::value::Value::Struct(self)
            }

            fn as_opaque(&self) -> Option<&dyn $crate::value::OpaqueEq> {
                Some(self)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_members {
    ($ty:ty { $($(#[$marker:ident])? $vis:vis $field:ident),* $(,)? }) => {
        impl $crate::value::Record for $ty {
            fn fields(&self) -> &'static [$crate::value::FieldDesc] {
                const FIELDS: &[$crate::value::FieldDesc] = &[$(
                    $crate::value::FieldDesc::new(
                        stringify!($field),
                        !stringify!($vis).is_empty(),
                        $crate::__embedded_marker!($($marker)?),
                    ),
                )*];
                FIELDS
            }

            fn read_member(&self, index: usize) -> Option<&dyn $crate::value::Reflect> {
                let members: &[&dyn $crate::value::Reflect] = &[$(&self.$field),*];
                members.get(index).copied()
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __embedded_marker {
    () => {
        false
    };
    (embedded) => {
        true
    };
}

impl Record for () {
    fn fields(&self) -> &'static [FieldDesc] {
        &[]
    }

    fn read_member(&self, _index: usize) -> Option<&dyn Reflect> {
        None
    }
}

impl Reflect for () {
    fn reflect(&self) -> Value<'_> {
        Value::Struct(self)
    }
}

macro_rules! tuple_record {
    ($(($($name:ident : $index:tt),+)),* $(,)?) => {
        $(
            impl<$($name: Reflect),+> Record for ($($name,)+) {
                fn fields(&self) -> &'static [FieldDesc] {
                    const FIELDS: &[FieldDesc] =
                        &[$(FieldDesc::new(stringify!($index), true, false)),+];
                    FIELDS
                }

                fn read_member(&self, index: usize) -> Option<&dyn Reflect> {
                    match index {
                        $($index => Some(&self.$index as &dyn Reflect),)+
                        _ => None,
                    }
                }
            }

            impl<$($name: Reflect),+> Reflect for ($($name,)+) {
                fn reflect(&self) -> Value<'_> {
                    Value::Struct(self)
                }
            }
        )*
    };
}

tuple_record! {
    (A: 0),
    (A: 0, B: 1),
    (A: 0, B: 1, C: 2),
    (A: 0, B: 1, C: 2, D: 3),
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Wrapper {
        pub id: u32,
        pub(crate) label: String,
        secret: i64,
        base: (),
    }

    crate::reflect_record!(Wrapper { pub id, pub(crate) label, secret, #[embedded] base });

    #[test]
    fn test_field_descriptors_follow_visibility() {
        let w = Wrapper {
            id: 1,
            label: "a".to_string(),
            secret: 9,
            base: (),
        };
        let names: Vec<_> = w.fields().iter().map(|f| (f.name, f.declared)).collect();
        assert_eq!(
            names,
            vec![("id", true), ("label", true), ("secret", false), ("base", false)]
        );
        assert!(w.fields()[3].embedded);
        assert!(!w.fields()[0].embedded);
        assert_eq!(w.secret, 9);
    }

    #[test]
    fn test_read_member_reaches_private_fields() {
        let w = Wrapper {
            id: 1,
            label: String::new(),
            secret: -4,
            base: (),
        };
        let member = w.read_member(2).map(|m| m.reflect().kind());
        assert_eq!(member, Some(crate::value::Kind::Int));
        assert!(w.read_member(4).is_none());
    }

    #[test]
    fn test_tuple_fields_are_positional() {
        let pair = (1u8, "x".to_string());
        let names: Vec<_> = pair.fields().iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["0", "1"]);
        assert!(pair.read_member(1).is_some());
        assert!(pair.read_member(2).is_none());
    }
}
