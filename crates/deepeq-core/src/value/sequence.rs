//! Ordered and keyed collections

use super::{Reflect, Value};
use deepeq_core_types::Addr;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::BuildHasher;

/// Ordered run of elements
pub trait Sequence {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn items(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_>;

    /// Identity of the backing storage
    fn addr(&self) -> Addr;

    /// Contiguous byte contents, for byte sequences only
    fn as_bytes(&self) -> Option<&[u8]> {
        None
    }
}

/// Unordered key/value collection
pub trait Mapping {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entries(&self) -> Vec<(&dyn Reflect, &dyn Reflect)>;

    fn addr(&self) -> Addr;
}

fn elements<T: Reflect>(items: &[T]) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
    Box::new(items.iter().map(|item| item as &dyn Reflect))
}

macro_rules! contiguous_sequence {
    ($([$($generics:tt)*] $ty:ty),* $(,)?) => {
        $(
            impl<$($generics)*> Sequence for $ty {
                fn len(&self) -> usize {
                    <[T]>::len(self)
                }

                fn items(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
                    elements(self)
                }

                fn addr(&self) -> Addr {
                    Addr::of::<[T]>(self)
                }

                fn as_bytes(&self) -> Option<&[u8]> {
                    T::byte_slice(self)
                }
            }
        )*
    };
}

contiguous_sequence! {
    [T: Reflect] Vec<T>,
    [T: Reflect] Box<[T]>,
    [T: Reflect, const N: usize] [T; N],
}

impl<T: Reflect> Sequence for &[T] {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn items(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
        elements(self)
    }

    fn addr(&self) -> Addr {
        Addr::of::<[T]>(*self)
    }

    fn as_bytes(&self) -> Option<&[u8]> {
        T::byte_slice(self)
    }
}

impl<T: Reflect> Sequence for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn items(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
        Box::new(VecDeque::iter(self).map(|item| item as &dyn Reflect))
    }

    fn addr(&self) -> Addr {
        Addr::of(self)
    }
}

macro_rules! slice_reflect {
    ($([$($generics:tt)*] $ty:ty),* $(,)?) => {
        $(
            impl<$($generics)*> Reflect for $ty {
                fn reflect(&self) -> Value<'_> {
                    Value::Slice(Some(self))
                }

                fn null_form() -> Option<Value<'static>> {
                    Some(Value::Slice(None))
                }
            }
        )*
    };
}

slice_reflect! {
    [T: Reflect] Vec<T>,
    [T: Reflect] Box<[T]>,
    [T: Reflect] VecDeque<T>,
    ['a, T: Reflect] &'a [T],
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn reflect(&self) -> Value<'_> {
        Value::Array(self)
    }
}

impl<K: Reflect, V: Reflect, S: BuildHasher> Mapping for HashMap<K, V, S> {
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn entries(&self) -> Vec<(&dyn Reflect, &dyn Reflect)> {
        self.iter()
            .map(|(k, v)| (k as &dyn Reflect, v as &dyn Reflect))
            .collect()
    }

    fn addr(&self) -> Addr {
        Addr::of(self)
    }
}

impl<K: Reflect, V: Reflect> Mapping for BTreeMap<K, V> {
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn entries(&self) -> Vec<(&dyn Reflect, &dyn Reflect)> {
        self.iter()
            .map(|(k, v)| (k as &dyn Reflect, v as &dyn Reflect))
            .collect()
    }

    fn addr(&self) -> Addr {
        Addr::of(self)
    }
}

impl<K: Reflect, V: Reflect, S: BuildHasher> Reflect for HashMap<K, V, S> {
    fn reflect(&self) -> Value<'_> {
        Value::Map(Some(self))
    }

    fn null_form() -> Option<Value<'static>> {
        Some(Value::Map(None))
    }
}

impl<K: Reflect, V: Reflect> Reflect for BTreeMap<K, V> {
    fn reflect(&self) -> Value<'_> {
        Value::Map(Some(self))
    }

    fn null_form() -> Option<Value<'static>> {
        Some(Value::Map(None))
    }
}
