use super::Reflect;

/// Borrowed reference to a value of any reflectable type, or nothing
///
/// Entry points take `impl Into<Handle>`, so plain references work:
///
/// ```
/// use deepeq_core::equal;
///
/// assert!(equal(&vec![1, 2], &vec![1, 2]));
/// ```
#[derive(Clone, Copy, Default)]
pub struct Handle<'a> {
    value: Option<&'a dyn Reflect>,
}

impl<'a> Handle<'a> {
    pub fn new(value: &'a dyn Reflect) -> Self {
        Self { value: Some(value) }
    }

    /// A handle that refers to no value at all
    pub fn absent() -> Self {
        Self { value: None }
    }

    pub fn get(&self) -> Option<&'a dyn Reflect> {
        self.value
    }

    pub fn is_absent(&self) -> bool {
        self.value.is_none()
    }

    pub fn type_name(&self) -> Option<&'static str> {
        self.value.map(|value| value.type_name())
    }
}

impl<'a, T: Reflect> From<&'a T> for Handle<'a> {
    fn from(value: &'a T) -> Self {
        Self::new(value)
    }
}

impl<'a> From<&'a dyn Reflect> for Handle<'a> {
    fn from(value: &'a dyn Reflect) -> Self {
        Self::new(value)
    }
}

impl<'a> From<Option<&'a dyn Reflect>> for Handle<'a> {
    fn from(value: Option<&'a dyn Reflect>) -> Self {
        Self { value }
    }
}

impl std::fmt::Debug for Handle<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.type_name() {
            Some(name) => write!(f, "Handle({})", name),
            None => f.write_str("Handle(absent)"),
        }
    }
}
