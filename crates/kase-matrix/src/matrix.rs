//! The [`KaseMatrix`] bucket store and matrix-driven generation.

use crate::error::MatrixError;
use crate::key::{BucketId, KaseMatrixKey};
use indexmap::IndexMap;
use kase_core::{Dimensions, DisplayTuple, Kase, KaseSeq, KaseTuple, LabeledValue};
use std::any::Any;
use std::fmt;

/// A [`LabeledValue`] stored in a matrix bucket.
pub type KaseMatrixElement<T> = LabeledValue<T>;

/// One type-erased bucket.
trait Bucket: Any {
    fn len(&self) -> usize;
}

impl<T: 'static> Bucket for Vec<KaseMatrixElement<T>> {
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

/// Named, typed buckets of labeled values.
///
/// Buckets keep their insertion order, and so do the elements inside each
/// bucket; generation enumerates them in that order. Generation never
/// mutates the matrix: every call snapshots the buckets it selects.
///
/// ```
/// use kase_matrix::{KaseMatrix, KaseMatrixKey};
///
/// const SIZE: KaseMatrixKey<u32> = KaseMatrixKey::new("size");
/// const MODE: KaseMatrixKey<&str> = KaseMatrixKey::new("mode");
///
/// let mut matrix = KaseMatrix::new();
/// matrix.extend(SIZE, [1, 2]).insert_labeled(MODE, "m", "fast");
///
/// let all = matrix.kases((SIZE, MODE)).unwrap();
/// assert_eq!(all[0].display_name(), "size: 1 | m: fast");
/// assert_eq!(all[1].display_name(), "size: 2 | m: fast");
/// ```
#[derive(Default)]
pub struct KaseMatrix {
    buckets: IndexMap<BucketId, Box<dyn Bucket>>,
}

impl KaseMatrix {
    /// An empty matrix.
    pub fn new() -> Self {
        Self::default()
    }

    fn bucket_mut<T: 'static>(
        &mut self,
        key: KaseMatrixKey<T>,
    ) -> &mut Vec<KaseMatrixElement<T>> {
        let bucket = self
            .buckets
            .entry(key.id())
            .or_insert_with(|| {
                Box::new(Vec::<KaseMatrixElement<T>>::new()) as Box<dyn Bucket>
            });
        (&mut **bucket as &mut dyn Any)
            .downcast_mut()
            .expect("bucket id carries the element TypeId")
    }

    /// Append `value` to the bucket of `key`, labeled with the key's name.
    pub fn insert<T: 'static>(&mut self, key: KaseMatrixKey<T>, value: T) -> &mut Self {
        self.insert_labeled(key, key.name(), value)
    }

    /// Append `value` to the bucket of `key` under an explicit label.
    pub fn insert_labeled<T: 'static>(
        &mut self,
        key: KaseMatrixKey<T>,
        label: impl Into<String>,
        value: T,
    ) -> &mut Self {
        self.bucket_mut(key).push(KaseMatrixElement::new(label, value));
        self
    }

    /// Append every value to the bucket of `key`, labeled with the key's name.
    ///
    /// The bucket is created even when `values` is empty; an empty bucket
    /// is present and yields zero combinations.
    pub fn extend<T, I>(&mut self, key: KaseMatrixKey<T>, values: I) -> &mut Self
    where
        T: 'static,
        I: IntoIterator<Item = T>,
    {
        let bucket = self.bucket_mut(key);
        bucket.extend(
            values
                .into_iter()
                .map(|value| KaseMatrixElement::new(key.name(), value)),
        );
        self
    }

    /// The ordered bucket of `key`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::MissingKey`] if nothing was ever inserted under `key`.
    pub fn get<T: 'static>(
        &self,
        key: KaseMatrixKey<T>,
    ) -> Result<&[KaseMatrixElement<T>], MatrixError> {
        self.buckets
            .get(&key.id())
            .and_then(|bucket| {
                (&**bucket as &dyn Any).downcast_ref::<Vec<KaseMatrixElement<T>>>()
            })
            .map(Vec::as_slice)
            .ok_or(MatrixError::MissingKey {
                name: key.name(),
                value_type: key.value_type(),
            })
    }

    /// Whether a bucket exists for `key`, empty or not.
    pub fn contains_key<T: 'static>(&self, key: KaseMatrixKey<T>) -> bool {
        self.buckets.contains_key(&key.id())
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether the matrix has no buckets.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Bucket names in insertion order.
    pub fn bucket_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.buckets.keys().map(|id| id.name)
    }

    /// Every combination of the buckets named by `keys`, first key slowest.
    ///
    /// Slot labels come from the elements.
    ///
    /// # Errors
    ///
    /// [`MatrixError::MissingKey`] for the first key with no bucket.
    pub fn kases<K>(&self, keys: K) -> Result<Vec<Kase<K::Values>>, MatrixError>
    where
        K: MatrixKeys,
        K::Values: DisplayTuple,
    {
        Ok(self.kase_seq(keys)?.into_vec())
    }

    /// Like [`kases`](Self::kases), naming each Kase with `factory`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::MissingKey`] for the first key with no bucket.
    pub fn kases_with<K, F>(
        &self,
        keys: K,
        factory: F,
    ) -> Result<Vec<Kase<K::Values>>, MatrixError>
    where
        K: MatrixKeys,
        F: Fn(&Kase<K::Values>) -> String + Send + Sync + 'static,
    {
        let buckets = keys.select(self)?;
        Ok(KaseSeq::from_labeled_named(buckets, factory).into_vec())
    }

    /// Lazy counterpart of [`kases`](Self::kases).
    ///
    /// The sequence owns a snapshot of the selected buckets, so later
    /// inserts into the matrix do not affect it.
    ///
    /// # Errors
    ///
    /// [`MatrixError::MissingKey`] for the first key with no bucket.
    pub fn kase_seq<K>(&self, keys: K) -> Result<KaseSeq<K::Buckets, K::Values>, MatrixError>
    where
        K: MatrixKeys,
        K::Values: DisplayTuple,
    {
        Ok(KaseSeq::from_labeled(keys.select(self)?))
    }
}

impl fmt::Debug for KaseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.buckets.iter().map(|(id, bucket)| (id.name, bucket.len())))
            .finish()
    }
}

/// A tuple of [`KaseMatrixKey`]s selecting the dimensions to generate.
///
/// Implemented for key tuples of arity 1..=22.
pub trait MatrixKeys {
    /// One value per key.
    type Values: KaseTuple;

    /// Snapshot of the selected buckets, in key order.
    type Buckets: Dimensions<Values = <Self::Values as KaseTuple>::Labeled> + Clone;

    /// Copy out the bucket of every key.
    ///
    /// # Errors
    ///
    /// [`MatrixError::MissingKey`] for the first key with no bucket.
    fn select(&self, matrix: &KaseMatrix) -> Result<Self::Buckets, MatrixError>;
}

macro_rules! impl_matrix_keys {
    ($($t:ident . $idx:tt),+) => {
        impl<$($t: Clone + 'static),+> MatrixKeys for ($(KaseMatrixKey<$t>,)+) {
            type Values = ($($t,)+);
            type Buckets = ($(Vec<KaseMatrixElement<$t>>,)+);

            fn select(&self, matrix: &KaseMatrix) -> Result<Self::Buckets, MatrixError> {
                Ok(($(matrix.get(self.$idx)?.to_vec(),)+))
            }
        }
    };
}

impl_matrix_keys!(A1.0);
impl_matrix_keys!(A1.0, A2.1);
impl_matrix_keys!(A1.0, A2.1, A3.2);
impl_matrix_keys!(A1.0, A2.1, A3.2, A4.3);
impl_matrix_keys!(A1.0, A2.1, A3.2, A4.3, A5.4);
impl_matrix_keys!(A1.0, A2.1, A3.2, A4.3, A5.4, A6.5);
impl_matrix_keys!(A1.0, A2.1, A3.2, A4.3, A5.4, A6.5, A7.6);
impl_matrix_keys!(A1.0, A2.1, A3.2, A4.3, A5.4, A6.5, A7.6, A8.7);
impl_matrix_keys!(A1.0, A2.1, A3.2, A4.3, A5.4, A6.5, A7.6, A8.7, A9.8);
impl_matrix_keys!(A1.0, A2.1, A3.2, A4.3, A5.4, A6.5, A7.6, A8.7, A9.8, A10.9);
impl_matrix_keys!(A1.0, A2.1, A3.2, A4.3, A5.4, A6.5, A7.6, A8.7, A9.8, A10.9, A11.10);
impl_matrix_keys!(A1.0, A2.1, A3.2, A4.3, A5.4, A6.5, A7.6, A8.7, A9.8, A10.9, A11.10, A12.11);
impl_matrix_keys!(A1.0, A2.1, A3.2, A4.3, A5.4, A6.5, A7.6, A8.7, A9.8, A10.9, A11.10, A12.11,
    A13.12);
impl_matrix_keys!(A1.0, A2.1, A3.2, A4.3, A5.4, A6.5, A7.6, A8.7, A9.8, A10.9, A11.10, A12.11,
    A13.12, A14.13);
impl_matrix_keys!(A1.0, A2.1, A3.2, A4.3, A5.4, A6.5, A7.6, A8.7, A9.8, A10.9, A11.10, A12.11,
    A13.12, A14.13, A15.14);
impl_matrix_keys!(A1.0, A2.1, A3.2, A4.3, A5.4, A6.5, A7.6, A8.7, A9.8, A10.9, A11.10, A12.11,
    A13.12, A14.13, A15.14, A16.15);
impl_matrix_keys!(A1.0, A2.1, A3.2, A4.3, A5.4, A6.5, A7.6, A8.7, A9.8, A10.9, A11.10, A12.11,
    A13.12, A14.13, A15.14, A16.15, A17.16);
impl_matrix_keys!(A1.0, A2.1, A3.2, A4.3, A5.4, A6.5, A7.6, A8.7, A9.8, A10.9, A11.10, A12.11,
    A13.12, A14.13, A15.14, A16.15, A17.16, A18.17);
impl_matrix_keys!(A1.0, A2.1, A3.2, A4.3, A5.4, A6.5, A7.6, A8.7, A9.8, A10.9, A11.10, A12.11,
    A13.12, A14.13, A15.14, A16.15, A17.16, A18.17, A19.18);
impl_matrix_keys!(A1.0, A2.1, A3.2, A4.3, A5.4, A6.5, A7.6, A8.7, A9.8, A10.9, A11.10, A12.11,
    A13.12, A14.13, A15.14, A16.15, A17.16, A18.17, A19.18, A20.19);
impl_matrix_keys!(A1.0, A2.1, A3.2, A4.3, A5.4, A6.5, A7.6, A8.7, A9.8, A10.9, A11.10, A12.11,
    A13.12, A14.13, A15.14, A16.15, A17.16, A18.17, A19.18, A20.19, A21.20);
impl_matrix_keys!(A1.0, A2.1, A3.2, A4.3, A5.4, A6.5, A7.6, A8.7, A9.8, A10.9, A11.10, A12.11,
    A13.12, A14.13, A15.14, A16.15, A17.16, A18.17, A19.18, A20.19, A21.20, A22.21);

#[cfg(test)]
mod tests {
    use super::*;
    use kase_core::LabelSource;
    use proptest::prelude::*;

    const SIZE: KaseMatrixKey<u32> = KaseMatrixKey::new("size");
    const MODE: KaseMatrixKey<&str> = KaseMatrixKey::new("mode");
    const FLAG: KaseMatrixKey<bool> = KaseMatrixKey::new("flag");

    fn sample() -> KaseMatrix {
        let mut matrix = KaseMatrix::new();
        matrix
            .extend(SIZE, [1, 2])
            .insert_labeled(MODE, "fast", "f")
            .insert_labeled(MODE, "slow", "s");
        matrix
    }

    // ── Buckets ─────────────────────────────────────────────────

    #[test]
    fn get_returns_bucket_in_insertion_order() {
        let matrix = sample();
        let sizes = matrix.get(SIZE).unwrap();
        assert_eq!(sizes, [LabeledValue::new("size", 1), LabeledValue::new("size", 2)]);
        let modes = matrix.get(MODE).unwrap();
        assert_eq!(modes[0].label, "fast");
        assert_eq!(modes[1].value, "s");
    }

    #[test]
    fn missing_key_is_an_error() {
        let matrix = sample();
        let err = matrix.get(FLAG).unwrap_err();
        assert_eq!(
            err,
            MatrixError::MissingKey {
                name: "flag",
                value_type: "bool",
            }
        );
        assert!(err.to_string().contains("'flag'"));
    }

    #[test]
    fn same_name_different_type_is_a_different_bucket() {
        let mut matrix = sample();
        let text: KaseMatrixKey<String> = KaseMatrixKey::new("size");
        assert!(!matrix.contains_key(text));
        assert!(matrix.get(text).is_err());
        matrix.insert(text, "big".to_string());
        assert_eq!(matrix.get(text).unwrap().len(), 1);
        assert_eq!(matrix.get(SIZE).unwrap().len(), 2);
        assert_eq!(matrix.len(), 3);
    }

    #[test]
    fn bucket_names_keep_insertion_order() {
        let mut matrix = KaseMatrix::new();
        assert!(matrix.is_empty());
        matrix.insert(FLAG, true).insert(SIZE, 3).insert(FLAG, false);
        assert_eq!(matrix.bucket_names().collect::<Vec<_>>(), ["flag", "size"]);
        assert_eq!(format!("{matrix:?}"), r#"{"flag": 2, "size": 1}"#);
    }

    #[test]
    fn empty_extend_creates_empty_bucket() {
        let mut matrix = sample();
        matrix.extend(FLAG, []);
        assert!(matrix.contains_key(FLAG));
        assert!(matrix.get(FLAG).unwrap().is_empty());
        assert!(matrix.kases((SIZE, FLAG)).unwrap().is_empty());
    }

    // ── Generation ──────────────────────────────────────────────

    #[test]
    fn kases_use_element_labels() {
        let matrix = sample();
        let all = matrix.kases((SIZE, MODE)).unwrap();
        let names: Vec<&str> = all.iter().map(|k| k.display_name()).collect();
        assert_eq!(
            names,
            [
                "size: 1 | fast: f",
                "size: 1 | slow: s",
                "size: 2 | fast: f",
                "size: 2 | slow: s",
            ]
        );
        assert_eq!(all[0].label_source(0), Some(LabelSource::Explicit));
    }

    #[test]
    fn kases_fail_fast_on_missing_key() {
        let matrix = sample();
        assert_eq!(
            matrix.kases((SIZE, FLAG)).unwrap_err(),
            MatrixError::MissingKey {
                name: "flag",
                value_type: "bool",
            }
        );
        assert!(matrix.kase_seq((FLAG,)).is_err());
        assert!(matrix.kases_with((MODE, FLAG), |_| String::new()).is_err());
    }

    #[test]
    fn kases_with_sees_element_labels() {
        let matrix = sample();
        let all = matrix
            .kases_with((MODE,), |k| format!("{}={}", k.label(0).unwrap_or("?"), k.values().0))
            .unwrap();
        let names: Vec<&str> = all.iter().map(|k| k.display_name()).collect();
        assert_eq!(names, ["fast=f", "slow=s"]);
    }

    #[test]
    fn seq_snapshots_the_matrix() {
        let mut matrix = sample();
        let seq = matrix.kase_seq((SIZE,)).unwrap();
        matrix.insert(SIZE, 99);
        assert_eq!(seq.iter().count(), 2);
        assert_eq!(seq.iter().count(), 2);
        assert_eq!(matrix.kases((SIZE,)).unwrap().len(), 3);
    }

    #[test]
    fn widest_key_tuple() {
        const K: [KaseMatrixKey<u8>; 22] = [
            KaseMatrixKey::new("k1"),
            KaseMatrixKey::new("k2"),
            KaseMatrixKey::new("k3"),
            KaseMatrixKey::new("k4"),
            KaseMatrixKey::new("k5"),
            KaseMatrixKey::new("k6"),
            KaseMatrixKey::new("k7"),
            KaseMatrixKey::new("k8"),
            KaseMatrixKey::new("k9"),
            KaseMatrixKey::new("k10"),
            KaseMatrixKey::new("k11"),
            KaseMatrixKey::new("k12"),
            KaseMatrixKey::new("k13"),
            KaseMatrixKey::new("k14"),
            KaseMatrixKey::new("k15"),
            KaseMatrixKey::new("k16"),
            KaseMatrixKey::new("k17"),
            KaseMatrixKey::new("k18"),
            KaseMatrixKey::new("k19"),
            KaseMatrixKey::new("k20"),
            KaseMatrixKey::new("k21"),
            KaseMatrixKey::new("k22"),
        ];
        let mut matrix = KaseMatrix::new();
        for key in &K[..21] {
            matrix.insert(*key, 0);
        }
        matrix.extend(K[21], [1, 2]);
        assert_eq!(matrix.len(), 22);

        let keys = (
            K[0], K[1], K[2], K[3], K[4], K[5], K[6], K[7], K[8], K[9], K[10],
            K[11], K[12], K[13], K[14], K[15], K[16], K[17], K[18], K[19], K[20], K[21],
        );
        let all = matrix.kases(keys).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].arity(), kase_core::MAX_ARITY);
        assert_eq!(all[1].label(21), Some("k22"));
        assert_eq!(all[1].values().21, 2);
        assert!(all[1].display_name().ends_with("| k21: 0 | k22: 2"));
        assert_eq!(matrix.kase_seq(keys).unwrap().iter().count(), 2);
    }

    // ── Property tests ──────────────────────────────────────────

    proptest! {
        #[test]
        fn matrix_cardinality_is_product(
            sizes in prop::collection::vec(any::<u32>(), 0..6),
            flags in prop::collection::vec(any::<bool>(), 0..4),
        ) {
            let mut matrix = KaseMatrix::new();
            matrix.extend(SIZE, sizes.clone()).extend(FLAG, flags.clone());
            let all = matrix.kases((SIZE, FLAG)).unwrap();
            prop_assert_eq!(all.len(), sizes.len() * flags.len());
            let firsts: Vec<u32> = all.iter().map(|k| k.values().0).collect();
            let expected: Vec<u32> = sizes
                .iter()
                .flat_map(|s| std::iter::repeat(*s).take(flags.len()))
                .collect();
            prop_assert_eq!(firsts, expected);
        }
    }
}
