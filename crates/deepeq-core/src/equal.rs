//! Deep structural equality
//!
//! Two values are equal when their declared types match and, recursively,
//! their contents do. Reference-like pairs already under comparison are
//! assumed equal, which makes cyclic structures terminate. Canonical opaque
//! types are compared through their own declared-member equality.

use crate::value::{
    opaque_capability, Handle, Identity, Mapping, Reflect, Record, Sequence, Value,
};
use std::collections::HashSet;

/// Deep equality of two handles
///
/// Two absent handles are equal; an absent and a present handle are not.
///
/// ```
/// use deepeq_core::equal;
///
/// assert!(equal(&Some(vec![1, 2]), &Some(vec![1, 2])));
/// assert!(!equal(&Some(Vec::<i32>::new()), &None::<Vec<i32>>));
/// assert!(!equal(&1i32, &1i64));
/// ```
pub fn equal<'a>(a: impl Into<Handle<'a>>, b: impl Into<Handle<'a>>) -> bool {
    match (a.into().get(), b.into().get()) {
        (None, None) => true,
        (Some(a), Some(b)) => equal_values(a, b),
        _ => false,
    }
}

/// Deep equality of two present values with a fresh visited set
pub fn equal_values(a: &dyn Reflect, b: &dyn Reflect) -> bool {
    Comparison::default().deep_equal(a, b)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Visit {
    first: Identity,
    second: Identity,
    type_name: &'static str,
}

impl Visit {
    // The pair is unordered so (a, b) and (b, a) share an entry.
    fn new(a: Identity, b: Identity, type_name: &'static str) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self {
            first,
            second,
            type_name,
        }
    }
}

#[derive(Default)]
struct Comparison {
    visited: HashSet<Visit>,
}

impl Comparison {
    fn deep_equal(&mut self, x: &dyn Reflect, y: &dyn Reflect) -> bool {
        if x.type_name() != y.type_name() {
            return false;
        }

        if let (Some(ox), Some(oy)) = (opaque_capability(x), opaque_capability(y)) {
            return ox.opaque_eq(oy);
        }

        let (xv, yv) = (x.reflect(), y.reflect());

        if let (Some(ax), Some(ay)) = (xv.identity(), yv.identity()) {
            if !self.visited.insert(Visit::new(ax, ay, x.type_name())) {
                tracing::trace!(left = %ax, right = %ay, "revisited pair assumed equal");
                return true;
            }
        }

        match (xv, yv) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Uint(a), Value::Uint(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Complex { re: ar, im: ai }, Value::Complex { re: br, im: bi }) => {
                ar == br && ai == bi
            }
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => self.sequences_equal(a, b),
            (Value::Slice(a), Value::Slice(b)) => match (a, b) {
                (None, None) => true,
                (Some(a), Some(b)) => self.slices_equal(a, b),
                _ => false,
            },
            (Value::Interface(a), Value::Interface(b)) => match (a, b) {
                (None, None) => true,
                (Some(a), Some(b)) => self.deep_equal(a, b),
                _ => false,
            },
            (Value::Pointer(a), Value::Pointer(b)) => match (a, b) {
                (None, None) => true,
                (Some(a), Some(b)) => a.addr == b.addr || self.deep_equal(a.target, b.target),
                _ => false,
            },
            (Value::Struct(a), Value::Struct(b)) => self.records_equal(a, b),
            (Value::Map(a), Value::Map(b)) => match (a, b) {
                (None, None) => true,
                (Some(a), Some(b)) => self.maps_equal(a, b),
                _ => false,
            },
            (Value::Func { nil: a }, Value::Func { nil: b }) => a && b,
            // Channels and raw pointers are never structurally equal, and a
            // kind mismatch under one declared type is a plain inequality.
            _ => false,
        }
    }

    fn sequences_equal(&mut self, a: &dyn Sequence, b: &dyn Sequence) -> bool {
        a.len() == b.len()
            && a.items()
                .zip(b.items())
                .all(|(x, y)| self.deep_equal(x, y))
    }

    fn slices_equal(&mut self, a: &dyn Sequence, b: &dyn Sequence) -> bool {
        if a.len() != b.len() {
            return false;
        }
        if a.addr() == b.addr() {
            return true;
        }
        if let (Some(x), Some(y)) = (a.as_bytes(), b.as_bytes()) {
            return x == y;
        }
        self.sequences_equal(a, b)
    }

    fn records_equal(&mut self, a: &dyn Record, b: &dyn Record) -> bool {
        (0..a.fields().len()).all(|index| match (a.read_member(index), b.read_member(index)) {
            (Some(x), Some(y)) => self.deep_equal(x, y),
            (None, None) => true,
            _ => false,
        })
    }

    fn maps_equal(&mut self, a: &dyn Mapping, b: &dyn Mapping) -> bool {
        if a.len() != b.len() {
            return false;
        }
        if a.addr() == b.addr() {
            return true;
        }
        let others = b.entries();
        a.entries().into_iter().all(|(key, value)| {
            lookup(&others, key).is_some_and(|other| self.deep_equal(value, other))
        })
    }
}

/// Value stored under a key deep-equal to `key`
pub(crate) fn lookup<'m>(
    entries: &[(&'m dyn Reflect, &'m dyn Reflect)],
    key: &dyn Reflect,
) -> Option<&'m dyn Reflect> {
    entries
        .iter()
        .find(|(candidate, _)| equal_values(*candidate, key))
        .map(|(_, value)| *value)
}
