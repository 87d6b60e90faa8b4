//! Typed keys naming one dimension of a [`KaseMatrix`](crate::KaseMatrix).

use std::any::{type_name, TypeId};
use std::fmt;
use std::marker::PhantomData;

/// Names one bucket of values of type `T`.
///
/// Keys are plain values meant to live in `const`s:
///
/// ```
/// use kase_matrix::KaseMatrixKey;
///
/// const SIZE: KaseMatrixKey<u32> = KaseMatrixKey::new("size");
/// assert_eq!(SIZE.name(), "size");
/// ```
///
/// A key's identity is its name together with `T`, so `KaseMatrixKey<u32>`
/// and `KaseMatrixKey<String>` named `"size"` address different buckets.
pub struct KaseMatrixKey<T> {
    name: &'static str,
    _value: PhantomData<fn() -> T>,
}

impl<T> KaseMatrixKey<T> {
    /// Create a key named `name`.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _value: PhantomData,
        }
    }

    /// The key's name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Name of the value type, for diagnostics.
    pub fn value_type(&self) -> &'static str {
        type_name::<T>()
    }
}

impl<T: 'static> KaseMatrixKey<T> {
    pub(crate) fn id(&self) -> BucketId {
        BucketId {
            name: self.name,
            value: TypeId::of::<T>(),
        }
    }
}

// Manual impls: `T` itself need not be Clone/Copy/Debug.
impl<T> Clone for KaseMatrixKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for KaseMatrixKey<T> {}

impl<T> fmt::Debug for KaseMatrixKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KaseMatrixKey")
            .field("name", &self.name)
            .field("value_type", &type_name::<T>())
            .finish()
    }
}

impl<T> fmt::Display for KaseMatrixKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Type-erased bucket identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct BucketId {
    pub(crate) name: &'static str,
    pub(crate) value: TypeId,
}
