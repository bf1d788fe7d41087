//! `Reflect` for std scalars, text, pointers and handles

use super::{Complex, Pointee, Reflect, Value};
use deepeq_core_types::Addr;
use std::cell::OnceCell;
use std::rc::Rc;
use std::sync::mpsc::{Receiver, Sender, SyncSender};
use std::sync::Arc;

macro_rules! scalar_reflect {
    ($variant:ident as $wide:ty: $($ty:ty),*) => {
        $(
            impl Reflect for $ty {
                fn reflect(&self) -> Value<'_> {
                    Value::$variant(<$wide>::from(*self))
                }
            }
        )*
    };
}

scalar_reflect!(Int as i64: i8, i16, i32, i64);
scalar_reflect!(Uint as u64: u16, u32, u64);
scalar_reflect!(Float as f64: f32, f64);

impl Reflect for u8 {
    fn reflect(&self) -> Value<'_> {
        Value::Uint(u64::from(*self))
    }

    fn byte_slice(items: &[Self]) -> Option<&[u8]> {
        Some(items)
    }
}

impl Reflect for isize {
    fn reflect(&self) -> Value<'_> {
        Value::Int(*self as i64)
    }
}

impl Reflect for usize {
    fn reflect(&self) -> Value<'_> {
        Value::Uint(*self as u64)
    }
}

impl Reflect for bool {
    fn reflect(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl Reflect for char {
    fn reflect(&self) -> Value<'_> {
        Value::Char(*self)
    }
}

impl Reflect for Complex {
    fn reflect(&self) -> Value<'_> {
        Value::Complex {
            re: self.re,
            im: self.im,
        }
    }
}

impl Reflect for String {
    fn reflect(&self) -> Value<'_> {
        Value::Str(self)
    }
}

impl Reflect for &str {
    fn reflect(&self) -> Value<'_> {
        Value::Str(self)
    }
}

impl Reflect for Box<str> {
    fn reflect(&self) -> Value<'_> {
        Value::Str(self)
    }
}

impl Reflect for Rc<str> {
    fn reflect(&self) -> Value<'_> {
        Value::Str(self)
    }
}

impl Reflect for Arc<str> {
    fn reflect(&self) -> Value<'_> {
        Value::Str(self)
    }
}

// Pointers to sized values. The pointee identity is the referent address.
macro_rules! pointer_reflect {
    ($([$($generics:tt)*] $ty:ty),* $(,)?) => {
        $(
            impl<$($generics)*> Reflect for $ty {
                fn reflect(&self) -> Value<'_> {
                    let target: &T = self;
                    Value::Pointer(Some(Pointee::new(target)))
                }

                fn null_form() -> Option<Value<'static>> {
                    Some(Value::Pointer(None))
                }
            }
        )*
    };
}

pointer_reflect! {
    ['a, T: Reflect] &'a T,
    [T: Reflect] Box<T>,
    [T: Reflect] Rc<T>,
    [T: Reflect] Arc<T>,
}

// Dynamic boxes: the declared type says nothing about the contained value.
macro_rules! interface_reflect {
    ($([$($generics:tt)*] $ty:ty),* $(,)?) => {
        $(
            impl<$($generics)*> Reflect for $ty {
                fn reflect(&self) -> Value<'_> {
                    let inner: &dyn Reflect = &**self;
                    Value::Interface(Some(inner))
                }

                fn null_form() -> Option<Value<'static>> {
                    Some(Value::Interface(None))
                }
            }
        )*
    };
}

interface_reflect! {
    ['a] &'a dyn Reflect,
    [] Box<dyn Reflect>,
    [] Rc<dyn Reflect>,
    [] Arc<dyn Reflect>,
}

/// Shared by `Option` and `OnceCell`: collapses onto a nullable inner kind,
/// otherwise behaves as an optional pointer.
fn optional<T: Reflect>(value: Option<&T>) -> Value<'_> {
    match (value, T::null_form()) {
        (None, Some(null)) => null,
        (None, None) => Value::Pointer(None),
        (Some(inner), Some(_)) => inner.reflect(),
        (Some(inner), None) => Value::Pointer(Some(Pointee::new(inner))),
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn reflect(&self) -> Value<'_> {
        optional(self.as_ref())
    }
}

impl<T: Reflect> Reflect for OnceCell<T> {
    fn reflect(&self) -> Value<'_> {
        optional(self.get())
    }
}

macro_rules! func_reflect {
    ($(($($arg:ident),*)),* $(,)?) => {
        $(
            impl<R, $($arg),*> Reflect for fn($($arg),*) -> R {
                fn reflect(&self) -> Value<'_> {
                    Value::Func { nil: false }
                }

                fn null_form() -> Option<Value<'static>> {
                    Some(Value::Func { nil: true })
                }
            }
        )*
    };
}

func_reflect!((), (A), (A, B), (A, B, C));

impl<T> Reflect for Sender<T> {
    fn reflect(&self) -> Value<'_> {
        Value::Chan
    }
}

impl<T> Reflect for SyncSender<T> {
    fn reflect(&self) -> Value<'_> {
        Value::Chan
    }
}

impl<T> Reflect for Receiver<T> {
    fn reflect(&self) -> Value<'_> {
        Value::Chan
    }
}

impl<T: ?Sized> Reflect for *const T {
    fn reflect(&self) -> Value<'_> {
        Value::RawPointer(Addr::from_ptr(*self))
    }
}

impl<T: ?Sized> Reflect for *mut T {
    fn reflect(&self) -> Value<'_> {
        Value::RawPointer(Addr::from_ptr(*self as *const T))
    }
}
