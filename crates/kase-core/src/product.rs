//! Cartesian generation of Kases from per-dimension value sources.
//!
//! # Enumeration order
//!
//! Dimensions are enumerated as nested loops with the first dimension
//! outermost: for fixed values of dimensions `1..N-1`, every value of
//! dimension `N` is produced before dimension `N-1` advances. Test names
//! derived from generated Kases rely on this order staying stable.
//!
//! # Cardinality
//!
//! `|D1| * |D2| * ... * |DN|`. Any empty dimension yields zero Kases.

use crate::format::NameFormat;
use crate::kase::{apply_own_labels, Kase, NameSource};
use crate::label::{positional_labels, LabelStrategy, Labels};
use crate::tuple::{AnyTuple, DisplayTuple, KaseTuple};
use std::fmt;
use std::sync::Arc;

/// A tuple of per-dimension value sources.
///
/// Implemented for tuples of arity 1..=22 whose elements are
/// `IntoIterator` with `Clone` iterators and `Clone` items (`Vec<T>`,
/// slices, arrays, ranges, ...).
pub trait Dimensions {
    /// One value from each dimension.
    type Values: KaseTuple;

    /// Every combination, first dimension slowest.
    fn combinations(self) -> impl Iterator<Item = Self::Values>;
}

/// Product of two iterators, `outer` slowest.
///
/// `inner` restarts from `restart` for every outer item. Nested products
/// name each dimension's iterator type once.
struct Pairs<O: Iterator, I> {
    outer: O,
    current: Option<O::Item>,
    inner: I,
    restart: I,
}

fn pairs<O, I>(outer: O, inner: I) -> Pairs<O, I>
where
    O: Iterator,
    I: Clone,
{
    Pairs {
        outer,
        current: None,
        inner: inner.clone(),
        restart: inner,
    }
}

impl<O, I> Clone for Pairs<O, I>
where
    O: Iterator + Clone,
    O::Item: Clone,
    I: Clone,
{
    fn clone(&self) -> Self {
        Self {
            outer: self.outer.clone(),
            current: self.current.clone(),
            inner: self.inner.clone(),
            restart: self.restart.clone(),
        }
    }
}

impl<O, I> Iterator for Pairs<O, I>
where
    O: Iterator,
    O::Item: Clone,
    I: Iterator + Clone,
{
    type Item = (O::Item, I::Item);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(a) = &self.current else {
                self.current = Some(self.outer.next()?);
                self.inner = self.restart.clone();
                continue;
            };
            if let Some(b) = self.inner.next() {
                return Some((a.clone(), b));
            }
            self.current = None;
        }
    }
}

macro_rules! nest_pairs {
    ($last:expr) => { $last };
    ($first:expr, $($rest:expr),+) => { pairs($first, nest_pairs!($($rest),+)) };
}

macro_rules! nest_pattern {
    ($last:ident) => { $last };
    ($first:ident, $($rest:ident),+) => { ($first, nest_pattern!($($rest),+)) };
}

macro_rules! impl_dimensions {
    ($($t:ident),+) => {
        impl<$($t),+> Dimensions for ($($t,)+)
        where
            $(
                $t: IntoIterator,
                <$t as IntoIterator>::IntoIter: Clone,
                <$t as IntoIterator>::Item: Clone,
            )+
        {
            type Values = ($(<$t as IntoIterator>::Item,)+);

            #[allow(non_snake_case)]
            fn combinations(self) -> impl Iterator<Item = Self::Values> {
                let ($($t,)+) = self;
                nest_pairs!($($t.into_iter()),+).map(|nested| {
                    let nest_pattern!($($t),+) = nested;
                    ($($t,)+)
                })
            }
        }
    };
}

impl_dimensions!(I1);
impl_dimensions!(I1, I2);
impl_dimensions!(I1, I2, I3);
impl_dimensions!(I1, I2, I3, I4);
impl_dimensions!(I1, I2, I3, I4, I5);
impl_dimensions!(I1, I2, I3, I4, I5, I6);
impl_dimensions!(I1, I2, I3, I4, I5, I6, I7);
impl_dimensions!(I1, I2, I3, I4, I5, I6, I7, I8);
impl_dimensions!(I1, I2, I3, I4, I5, I6, I7, I8, I9);
impl_dimensions!(I1, I2, I3, I4, I5, I6, I7, I8, I9, I10);
impl_dimensions!(I1, I2, I3, I4, I5, I6, I7, I8, I9, I10, I11);
impl_dimensions!(I1, I2, I3, I4, I5, I6, I7, I8, I9, I10, I11, I12);
impl_dimensions!(I1, I2, I3, I4, I5, I6, I7, I8, I9, I10, I11, I12, I13);
impl_dimensions!(I1, I2, I3, I4, I5, I6, I7, I8, I9, I10, I11, I12, I13, I14);
impl_dimensions!(I1, I2, I3, I4, I5, I6, I7, I8, I9, I10, I11, I12, I13, I14, I15);
impl_dimensions!(I1, I2, I3, I4, I5, I6, I7, I8, I9, I10, I11, I12, I13, I14, I15, I16);
impl_dimensions!(I1, I2, I3, I4, I5, I6, I7, I8, I9, I10, I11, I12, I13, I14, I15, I16, I17);
impl_dimensions!(I1, I2, I3, I4, I5, I6, I7, I8, I9, I10, I11, I12, I13, I14, I15, I16, I17, I18);
impl_dimensions!(
    I1, I2, I3, I4, I5, I6, I7, I8, I9, I10, I11, I12, I13, I14, I15, I16, I17, I18, I19
);
impl_dimensions!(
    I1, I2, I3, I4, I5, I6, I7, I8, I9, I10, I11, I12, I13, I14, I15, I16, I17, I18, I19, I20
);
impl_dimensions!(
    I1, I2, I3, I4, I5, I6, I7, I8, I9, I10, I11, I12, I13, I14, I15, I16, I17, I18, I19, I20,
    I21
);
impl_dimensions!(
    I1, I2, I3, I4, I5, I6, I7, I8, I9, I10, I11, I12, I13, I14, I15, I16, I17, I18, I19, I20,
    I21, I22
);

type Relabel<T> = Arc<dyn Fn(&T, &mut Labels) + Send + Sync>;

/// Turns one combination into a Kase.
struct Assembler<V, T> {
    assemble: fn(V) -> (T, Labels),
    naming: NameSource<T>,
    relabel: Option<Relabel<T>>,
}

impl<V, T: KaseTuple> Assembler<V, T> {
    fn build(&self, combination: V) -> Kase<T> {
        let (values, mut labels) = (self.assemble)(combination);
        if let Some(relabel) = &self.relabel {
            relabel(&values, &mut labels);
        }
        Kase::from_parts(values, labels, self.naming.clone())
    }
}

fn assemble_positional<T: KaseTuple>(values: T) -> (T, Labels) {
    (values, positional_labels(T::ARITY))
}

/// A lazy, restartable sequence of generated Kases.
///
/// Holds the dimension sources rather than an iterator: every call to
/// [`iter()`](Self::iter) clones the sources and restarts the enumeration.
/// If a source is single-use (its iterator yields different values on a
/// second pass), only the first pass is meaningful.
pub struct KaseSeq<D: Dimensions, T> {
    dimensions: D,
    assembler: Assembler<D::Values, T>,
}

/// Lazy counterpart of [`kases()`].
pub fn kase_seq<D>(dimensions: D) -> KaseSeq<D, D::Values>
where
    D: Dimensions,
    D::Values: DisplayTuple,
{
    KaseSeq::new(dimensions)
}

/// Every combination of `dimensions` as a Kase with positional labels.
///
/// ```
/// use kase_core::kases;
///
/// let all = kases((vec![1, 2], vec!["x", "y"]));
/// let names: Vec<&str> = all.iter().map(|k| k.display_name()).collect();
/// assert_eq!(
///     names,
///     ["a1: 1 | a2: x", "a1: 1 | a2: y", "a1: 2 | a2: x", "a1: 2 | a2: y"]
/// );
/// ```
pub fn kases<D>(dimensions: D) -> Vec<Kase<D::Values>>
where
    D: Dimensions,
    D::Values: DisplayTuple,
{
    KaseSeq::new(dimensions).into_vec()
}

/// Like [`kases()`], naming each Kase with `factory`.
pub fn kases_with<D, F>(dimensions: D, factory: F) -> Vec<Kase<D::Values>>
where
    D: Dimensions,
    F: Fn(&Kase<D::Values>) -> String + Send + Sync + 'static,
{
    KaseSeq::named(dimensions, factory).into_vec()
}

impl<D> KaseSeq<D, D::Values>
where
    D: Dimensions,
{
    /// Positional labels, default name format.
    pub fn new(dimensions: D) -> Self
    where
        D::Values: DisplayTuple,
    {
        Self {
            dimensions,
            assembler: Assembler {
                assemble: assemble_positional::<D::Values>,
                naming: NameSource::joined(NameFormat::default()),
                relabel: None,
            },
        }
    }

    /// Positional labels, names from `factory`. Values need not be `Display`.
    pub fn named<F>(dimensions: D, factory: F) -> Self
    where
        F: Fn(&Kase<D::Values>) -> String + Send + Sync + 'static,
    {
        Self {
            dimensions,
            assembler: Assembler {
                assemble: assemble_positional::<D::Values>,
                naming: NameSource::Factory(Arc::new(factory)),
                relabel: None,
            },
        }
    }
}

impl<D, T> KaseSeq<D, T>
where
    D: Dimensions<Values = T::Labeled>,
    T: DisplayTuple,
{
    /// Sources that already yield labeled slots; their labels are kept.
    pub fn from_labeled(dimensions: D) -> Self {
        Self {
            dimensions,
            assembler: Assembler {
                assemble: T::from_labeled,
                naming: NameSource::joined(NameFormat::default()),
                relabel: None,
            },
        }
    }
}

impl<D, T> KaseSeq<D, T>
where
    D: Dimensions<Values = T::Labeled>,
    T: KaseTuple,
{
    /// Labeled sources, names from `factory`. Values need not be `Display`.
    pub fn from_labeled_named<F>(dimensions: D, factory: F) -> Self
    where
        F: Fn(&Kase<T>) -> String + Send + Sync + 'static,
    {
        Self {
            dimensions,
            assembler: Assembler {
                assemble: T::from_labeled,
                naming: NameSource::Factory(Arc::new(factory)),
                relabel: None,
            },
        }
    }
}

impl<D, T> KaseSeq<D, T>
where
    D: Dimensions,
    T: KaseTuple,
{
    /// Join names with `format`.
    pub fn with_name_format(mut self, format: NameFormat) -> Self
    where
        T: DisplayTuple,
    {
        self.assembler.naming = NameSource::joined(format);
        self
    }

    /// Name every generated Kase with `factory`.
    pub fn with_display_name_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(&Kase<T>) -> String + Send + Sync + 'static,
    {
        self.assembler.naming = NameSource::Factory(Arc::new(factory));
        self
    }

    /// Resolve own labels of generated values through `strategy`.
    pub fn with_own_labels<S>(mut self, strategy: S) -> Self
    where
        T: AnyTuple,
        S: LabelStrategy + Send + Sync + 'static,
    {
        self.assembler.relabel = Some(Arc::new(move |values: &T, labels: &mut Labels| {
            apply_own_labels(values, labels, &strategy)
        }));
        self
    }

    /// Start a fresh pass over every combination.
    pub fn iter(&self) -> impl Iterator<Item = Kase<T>> + '_
    where
        D: Clone,
    {
        self.dimensions
            .clone()
            .combinations()
            .map(move |combination| self.assembler.build(combination))
    }

    /// Materialise every combination, consuming the sources.
    pub fn into_vec(self) -> Vec<Kase<T>> {
        let assembler = self.assembler;
        self.dimensions
            .combinations()
            .map(|combination| assembler.build(combination))
            .collect()
    }
}

impl<D: Dimensions, T: KaseTuple> fmt::Debug for KaseSeq<D, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KaseSeq")
            .field("arity", &T::ARITY)
            .field("own_labels", &self.assembler.relabel.is_some())
            .finish_non_exhaustive()
    }
}
