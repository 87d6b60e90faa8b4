//! Labeled values and per-slot label resolution.
//!
//! Every slot of a [`Kase`](crate::Kase) carries a label. Labels are
//! resolved in priority order:
//!
//! 1. an explicit label supplied by the caller,
//! 2. the value's own label, discovered through a [`LabelStrategy`],
//! 3. the positional default `"a<i>"` (1-based).

use smallvec::SmallVec;
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

/// A value paired with its display label.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LabeledValue<V> {
    /// Human-readable slot name used in display names.
    pub label: String,
    /// The wrapped value.
    pub value: V,
}

impl<V> LabeledValue<V> {
    /// Pair `value` with `label`.
    pub fn new(label: impl Into<String>, value: V) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }

    /// Map the value, keeping the label.
    pub fn map<U>(self, f: impl FnOnce(V) -> U) -> LabeledValue<U> {
        LabeledValue {
            label: self.label,
            value: f(self.value),
        }
    }
}

impl<V: fmt::Display> fmt::Display for LabeledValue<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// Where a slot's label came from.
///
/// Ordered by priority: a higher source is never overwritten by a lower one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LabelSource {
    /// Positional default (`a1`, `a2`, ...).
    Positional,
    /// Declared by the value itself.
    Own,
    /// Supplied by the caller or by a matrix element.
    Explicit,
}

/// One resolved slot label.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SlotLabel {
    /// The label text.
    pub text: String,
    /// How the text was resolved.
    pub source: LabelSource,
}

impl SlotLabel {
    /// The positional default for the 0-based `slot`.
    pub fn positional(slot: usize) -> Self {
        Self {
            text: positional_label(slot),
            source: LabelSource::Positional,
        }
    }

    /// A caller-supplied label.
    pub fn explicit(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: LabelSource::Explicit,
        }
    }

    /// A label declared by the value itself.
    pub fn own(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: LabelSource::Own,
        }
    }
}

/// Per-slot labels of a Kase, inline for the common small arities.
pub type Labels = SmallVec<[SlotLabel; 4]>;

/// The positional label for 0-based `slot`: `a1`, `a2`, ...
pub fn positional_label(slot: usize) -> String {
    format!("a{}", slot + 1)
}

/// Positional labels for every slot of an `arity`-sized tuple.
pub fn positional_labels(arity: usize) -> Labels {
    (0..arity).map(SlotLabel::positional).collect()
}

/// Implemented by value types that know their own display label.
///
/// The capability is discovered at runtime through a [`LabelStrategy`];
/// see [`own_label_of`].
pub trait HasOwnLabel {
    /// The label this value wants to be shown under.
    fn own_label(&self) -> String;
}

/// Pluggable "does this value declare its own label?" check.
///
/// Receives each slot value as `&dyn Any` and returns `Some(label)` when
/// it recognises the value. Closures of the right shape implement it.
pub trait LabelStrategy {
    /// The value's own label, if it declares one.
    fn own_label(&self, value: &dyn Any) -> Option<String>;
}

impl<F> LabelStrategy for F
where
    F: Fn(&dyn Any) -> Option<String>,
{
    fn own_label(&self, value: &dyn Any) -> Option<String> {
        self(value)
    }
}

/// A [`LabelStrategy`] that recognises values of type `V`.
pub struct OwnLabelOf<V> {
    _marker: PhantomData<fn(&V)>,
}

impl<V> Clone for OwnLabelOf<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for OwnLabelOf<V> {}

impl<V> fmt::Debug for OwnLabelOf<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnLabelOf")
            .field("type", &std::any::type_name::<V>())
            .finish()
    }
}

impl<V: HasOwnLabel + 'static> LabelStrategy for OwnLabelOf<V> {
    fn own_label(&self, value: &dyn Any) -> Option<String> {
        value.downcast_ref::<V>().map(HasOwnLabel::own_label)
    }
}

/// Build a strategy that asks values of type `V` for their own label.
pub fn own_label_of<V: HasOwnLabel + 'static>() -> OwnLabelOf<V> {
    OwnLabelOf {
        _marker: PhantomData,
    }
}

/// Strategy that never finds an own label.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOwnLabels;

impl LabelStrategy for NoOwnLabels {
    fn own_label(&self, _value: &dyn Any) -> Option<String> {
        None
    }
}

/// Overwrite `slot` in `labels` with `candidate` unless the existing label
/// has a higher-priority source.
pub(crate) fn resolve_slot(labels: &mut Labels, slot: usize, candidate: SlotLabel) {
    if let Some(current) = labels.get_mut(slot) {
        if candidate.source >= current.source {
            *current = candidate;
        }
    }
}
