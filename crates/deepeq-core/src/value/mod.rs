//! Runtime-typed view of arbitrary values
//!
//! The engines never see concrete types. Every comparable type implements
//! [`Reflect`], which names its declared type and classifies the value into
//! one [`Value`] kind. Composite kinds hand out their members as further
//! `&dyn Reflect` views through [`Sequence`], [`Mapping`] and [`Record`].
//!
//! Records are exposed with [`reflect_record!`](crate::reflect_record) or
//! [`reflect_message!`](crate::reflect_message), invoked next to the type so
//! private members are reachable.

mod handle;
mod impls;
mod json;
mod opaque;
mod record;
mod sequence;
mod type_name;

use deepeq_core_types::Addr;
use std::fmt;

pub use handle::Handle;
pub use opaque::{opaque_capability, Message, OpaqueEq};
pub use record::{FieldDesc, Record};
pub use sequence::{Mapping, Sequence};
pub use type_name::short_type_name;

/// Classification of a reflected value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    Int,
    Uint,
    Float,
    Complex,
    Char,
    Str,
    Array,
    Slice,
    Map,
    Struct,
    Pointer,
    Interface,
    Func,
    Chan,
    RawPointer,
}

impl Kind {
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::Complex => "complex",
            Kind::Char => "char",
            Kind::Str => "string",
            Kind::Array => "array",
            Kind::Slice => "slice",
            Kind::Map => "map",
            Kind::Struct => "struct",
            Kind::Pointer => "pointer",
            Kind::Interface => "interface",
            Kind::Func => "func",
            Kind::Chan => "chan",
            Kind::RawPointer => "raw pointer",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A complex number with `f64` parts
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }
}

/// Target of a non-null pointer together with its identity
#[derive(Clone, Copy)]
pub struct Pointee<'a> {
    pub target: &'a dyn Reflect,
    pub addr: Addr,
}

impl<'a> Pointee<'a> {
    pub fn new(target: &'a dyn Reflect) -> Self {
        Self {
            target,
            addr: Addr::of(target),
        }
    }
}

/// Borrowed, classified view of one value
#[derive(Clone, Copy)]
pub enum Value<'a> {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Complex { re: f64, im: f64 },
    Char(char),
    Str(&'a str),
    /// Fixed-length sequence; never null
    Array(&'a dyn Sequence),
    /// Variable-length sequence; `None` is the null sequence
    Slice(Option<&'a dyn Sequence>),
    Map(Option<&'a dyn Mapping>),
    Struct(&'a dyn Record),
    Pointer(Option<Pointee<'a>>),
    /// Dynamic box holding a value of any type
    Interface(Option<&'a dyn Reflect>),
    Func { nil: bool },
    Chan,
    RawPointer(Addr),
}

impl Value<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Uint(_) => Kind::Uint,
            Value::Float(_) => Kind::Float,
            Value::Complex { .. } => Kind::Complex,
            Value::Char(_) => Kind::Char,
            Value::Str(_) => Kind::Str,
            Value::Array(_) => Kind::Array,
            Value::Slice(_) => Kind::Slice,
            Value::Map(_) => Kind::Map,
            Value::Struct(_) => Kind::Struct,
            Value::Pointer(_) => Kind::Pointer,
            Value::Interface(_) => Kind::Interface,
            Value::Func { .. } => Kind::Func,
            Value::Chan => Kind::Chan,
            Value::RawPointer(_) => Kind::RawPointer,
        }
    }

    /// True for the null form of a nullable kind
    pub fn is_nil(&self) -> bool {
        matches!(
            self,
            Value::Slice(None)
                | Value::Map(None)
                | Value::Pointer(None)
                | Value::Interface(None)
                | Value::Func { nil: true }
        )
    }

    /// Storage identity of a non-null reference-like value
    ///
    /// Empty sequences have no storage of their own and report no identity.
    pub fn identity(&self) -> Option<Identity> {
        match self {
            Value::Slice(Some(seq)) if !seq.is_empty() => Some(Identity {
                addr: seq.addr(),
                len: seq.len(),
                referent: "",
            }),
            Value::Map(Some(map)) => Some(Identity {
                addr: map.addr(),
                len: map.len(),
                referent: "",
            }),
            Value::Pointer(Some(pointee)) => Some(Identity {
                addr: pointee.addr,
                len: 1,
                referent: pointee.target.type_name(),
            }),
            Value::Interface(Some(inner)) => Some(Identity {
                addr: Addr::of(*inner),
                len: 1,
                referent: inner.type_name(),
            }),
            _ => None,
        }
    }
}

/// What a reference-like value refers to
///
/// An address alone is ambiguous: a sub-slice starts where its parent does,
/// and a record starts where its first member does. The length and the
/// referent's declared type tell those apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity {
    pub addr: Addr,
    /// Element count for sequences and maps, 1 otherwise
    pub len: usize,
    /// Declared type behind a pointer or dynamic box
    pub referent: &'static str,
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.addr)
    }
}

/// Reflection contract implemented by every comparable type
pub trait Reflect {
    /// Declared type, fully qualified
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn reflect(&self) -> Value<'_>;

    /// Semantic-equality capability of canonical opaque types
    fn as_opaque(&self) -> Option<&dyn OpaqueEq> {
        None
    }

    /// Null form of a nullable kind, used when the type sits inside `Option`
    #[doc(hidden)]
    fn null_form() -> Option<Value<'static>>
    where
        Self: Sized,
    {
        None
    }

    /// Contiguous byte view of a slice of this element type
    #[doc(hidden)]
    fn byte_slice(items: &[Self]) -> Option<&[u8]>
    where
        Self: Sized,
    {
        let _ = items;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_value_kinds() {
        assert_eq!(3i32.reflect().kind(), Kind::Int);
        assert_eq!(3u8.reflect().kind(), Kind::Uint);
        assert_eq!("x".to_string().reflect().kind(), Kind::Str);
        assert_eq!(vec![1].reflect().kind(), Kind::Slice);
        assert_eq!([1, 2].reflect().kind(), Kind::Array);
        assert_eq!(Rc::new(1).reflect().kind(), Kind::Pointer);
    }

    #[test]
    fn test_nil_forms() {
        let none: Option<Vec<i32>> = None;
        assert!(none.reflect().is_nil());
        assert_eq!(none.reflect().kind(), Kind::Slice);
        assert!(!Some(Vec::<i32>::new()).reflect().is_nil());
        let absent: Option<i32> = None;
        assert_eq!(absent.reflect().kind(), Kind::Pointer);
        assert!(absent.reflect().is_nil());
    }

    #[test]
    fn test_empty_slice_has_no_identity() {
        assert!(Vec::<i32>::new().reflect().identity().is_none());
        let items = vec![1];
        let id = items.reflect().identity().unwrap();
        assert_eq!(id.addr, Addr::of(items.as_slice()));
        assert_eq!(id.len, 1);
        assert!(5i32.reflect().identity().is_none());
    }

    #[test]
    fn test_sub_slice_identity_differs_from_parent() {
        let items = vec![1, 2];
        let (head, whole) = (&items[..1], &items[..]);
        let (a, b) = (head.reflect().identity(), whole.reflect().identity());
        assert_eq!(a.map(|id| id.addr), b.map(|id| id.addr));
        assert_ne!(a, b);
    }

    #[test]
    fn test_dynamic_box_identity_names_referent() {
        let pair = (7i32, 8i32);
        let whole: &dyn Reflect = &pair;
        let first: &dyn Reflect = &pair.0;
        let a = <&dyn Reflect as Reflect>::reflect(&whole).identity();
        let b = <&dyn Reflect as Reflect>::reflect(&first).identity();
        assert_eq!(a.map(|id| id.referent), Some("(i32, i32)"));
        assert_eq!(b.map(|id| id.referent), Some("i32"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(Kind::Chan.to_string(), "chan");
        assert_eq!(Kind::RawPointer.to_string(), "raw pointer");
    }
}
