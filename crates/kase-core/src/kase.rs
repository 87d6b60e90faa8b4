//! The [`Kase`] tuple: labeled test values with a memoized display name.

use crate::format::NameFormat;
use crate::label::{
    positional_labels, resolve_slot, LabelSource, LabelStrategy, LabeledValue, Labels, SlotLabel,
};
use crate::tuple::{render_values, AnyTuple, DisplayTuple, KaseTuple};
use std::cell::OnceCell;
use std::fmt;
use std::sync::Arc;

/// Computes a Kase's whole display name.
///
/// Must be deterministic: the result is cached on first read.
pub type DisplayNameFactory<T> = Arc<dyn Fn(&Kase<T>) -> String + Send + Sync>;

/// How a Kase's display name is produced.
pub(crate) enum NameSource<T> {
    /// `label + delimiter + value`, joined by the separator.
    Joined {
        format: NameFormat,
        render: fn(&T) -> Vec<String>,
    },
    /// A fixed string.
    Literal(String),
    /// A caller-supplied function of the whole Kase.
    Factory(DisplayNameFactory<T>),
}

impl<T: DisplayTuple> NameSource<T> {
    pub(crate) fn joined(format: NameFormat) -> Self {
        Self::Joined {
            format,
            render: render_values::<T>,
        }
    }
}

impl<T> NameSource<T> {
    pub(crate) fn format(&self) -> Option<&NameFormat> {
        match self {
            Self::Joined { format, .. } => Some(format),
            _ => None,
        }
    }
}

impl<T> Clone for NameSource<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Joined { format, render } => Self::Joined {
                format: format.clone(),
                render: *render,
            },
            Self::Literal(name) => Self::Literal(name.clone()),
            Self::Factory(factory) => Self::Factory(Arc::clone(factory)),
        }
    }
}

/// An ordered, fixed-arity tuple of labeled test values.
///
/// The arity is the arity of `T` (1..=22) and cannot change after
/// construction. Slot order is part of identity: `(1, 2)` and `(2, 1)` are
/// different Kases.
///
/// The display name is computed on first call to
/// [`display_name()`](Self::display_name) and cached; the cache is not
/// synchronised, so a Kase is `Send` (when its values are) but not `Sync`.
/// Builder methods consume the Kase and return a fresh one with an empty
/// cache.
///
/// ```
/// use kase_core::kase;
///
/// let k = kase((1, "x"));
/// assert_eq!(k.display_name(), "a1: 1 | a2: x");
/// assert_eq!(k.values().1, "x");
/// ```
#[derive(Clone)]
pub struct Kase<T> {
    values: T,
    labels: Labels,
    naming: NameSource<T>,
    display_name: OnceCell<String>,
}

/// Build a Kase with positional labels and the default name format.
pub fn kase<T: DisplayTuple>(values: T) -> Kase<T> {
    Kase::new(values)
}

impl<T: KaseTuple> Kase<T> {
    pub(crate) fn from_parts(values: T, labels: Labels, naming: NameSource<T>) -> Self {
        debug_assert_eq!(labels.len(), T::ARITY);
        Self {
            values,
            labels,
            naming,
            display_name: OnceCell::new(),
        }
    }

    /// Build a Kase with positional labels and the default name format.
    pub fn new(values: T) -> Self
    where
        T: DisplayTuple,
    {
        Self::from_parts(
            values,
            positional_labels(T::ARITY),
            NameSource::joined(NameFormat::default()),
        )
    }

    /// Build a Kase whose display name comes from `factory`.
    ///
    /// Unlike [`new()`](Self::new), the values need not implement `Display`.
    pub fn with_factory<F>(values: T, factory: F) -> Self
    where
        F: Fn(&Kase<T>) -> String + Send + Sync + 'static,
    {
        Self::from_parts(
            values,
            positional_labels(T::ARITY),
            NameSource::Factory(Arc::new(factory)),
        )
    }

    /// Build a Kase from already-labeled slots. Every label is explicit.
    pub fn from_labeled(labeled: T::Labeled) -> Self
    where
        T: DisplayTuple,
    {
        let (values, labels) = T::from_labeled(labeled);
        Self::from_parts(values, labels, NameSource::joined(NameFormat::default()))
    }

    // ── Accessors ───────────────────────────────────────────────

    /// Number of slots.
    pub fn arity(&self) -> usize {
        T::ARITY
    }

    /// The slot values, positionally typed.
    pub fn values(&self) -> &T {
        &self.values
    }

    /// Consume the Kase, returning its values.
    pub fn into_values(self) -> T {
        self.values
    }

    /// The label of 0-based `slot`.
    pub fn label(&self, slot: usize) -> Option<&str> {
        self.labels.get(slot).map(|l| l.text.as_str())
    }

    /// How the label of 0-based `slot` was resolved.
    pub fn label_source(&self, slot: usize) -> Option<LabelSource> {
        self.labels.get(slot).map(|l| l.source)
    }

    /// All labels in slot order.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.labels.iter().map(|l| l.text.as_str())
    }

    pub(crate) fn slot_labels(&self) -> &Labels {
        &self.labels
    }

    /// Every slot as a labeled `&dyn Display`, in slot order.
    pub fn elements(&self) -> Vec<LabeledValue<&dyn fmt::Display>>
    where
        T: DisplayTuple,
    {
        self.labels
            .iter()
            .enumerate()
            .filter_map(|(slot, label)| {
                self.values
                    .display_at(slot)
                    .map(|value| LabeledValue::new(label.text.clone(), value))
            })
            .collect()
    }

    /// Consume the Kase, returning each slot wrapped in [`LabeledValue`].
    pub fn into_labeled(self) -> T::Labeled {
        self.values
            .into_labeled(self.labels.into_iter().map(|l| l.text))
    }

    /// The display name, computed on first read and cached.
    pub fn display_name(&self) -> &str {
        self.display_name.get_or_init(|| match &self.naming {
            NameSource::Joined { format, render } => format.join(
                self.labels
                    .iter()
                    .map(|l| l.text.as_str())
                    .zip(render(&self.values)),
            ),
            NameSource::Literal(name) => name.clone(),
            NameSource::Factory(factory) => factory(self),
        })
    }

    pub(crate) fn name_format(&self) -> Option<&NameFormat> {
        self.naming.format()
    }

    // ── Builders ────────────────────────────────────────────────

    fn reset(mut self) -> Self {
        self.display_name = OnceCell::new();
        self
    }

    /// Set an explicit label on 0-based `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot >= self.arity()`.
    pub fn with_label(mut self, slot: usize, label: impl Into<String>) -> Self {
        assert!(
            slot < T::ARITY,
            "slot {slot} out of range for a Kase of arity {}",
            T::ARITY
        );
        resolve_slot(&mut self.labels, slot, SlotLabel::explicit(label));
        self.reset()
    }

    /// Set explicit labels slot by slot; `None` leaves a slot unchanged.
    ///
    /// # Panics
    ///
    /// Panics if more labels than slots are supplied.
    pub fn with_labels<I>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = Option<String>>,
    {
        for (slot, label) in labels.into_iter().enumerate() {
            assert!(
                slot < T::ARITY,
                "too many labels for a Kase of arity {}",
                T::ARITY
            );
            if let Some(label) = label {
                resolve_slot(&mut self.labels, slot, SlotLabel::explicit(label));
            }
        }
        self.reset()
    }

    /// Ask `strategy` for each value's own label.
    ///
    /// Only positional labels are replaced; explicit labels win.
    pub fn with_own_labels<S>(mut self, strategy: &S) -> Self
    where
        T: AnyTuple,
        S: LabelStrategy + ?Sized,
    {
        apply_own_labels(&self.values, &mut self.labels, strategy);
        self.reset()
    }

    /// Join labels and values with `format` instead of the default.
    pub fn with_name_format(self, format: NameFormat) -> Self
    where
        T: DisplayTuple,
    {
        self.with_naming(NameSource::joined(format))
    }

    /// Replace the whole display name with a literal.
    pub fn with_display_name(self, name: impl Into<String>) -> Self {
        self.with_naming(NameSource::Literal(name.into()))
    }

    /// Replace the whole display name with the result of `factory`.
    pub fn with_display_name_factory<F>(self, factory: F) -> Self
    where
        F: Fn(&Kase<T>) -> String + Send + Sync + 'static,
    {
        self.with_naming(NameSource::Factory(Arc::new(factory)))
    }

    pub(crate) fn with_naming(mut self, naming: NameSource<T>) -> Self {
        self.naming = naming;
        self.reset()
    }
}

/// Resolve own labels for every positional slot of `values`.
pub(crate) fn apply_own_labels<T, S>(values: &T, labels: &mut Labels, strategy: &S)
where
    T: AnyTuple,
    S: LabelStrategy + ?Sized,
{
    for slot in 0..T::ARITY {
        if labels.get(slot).map(|l| l.source) != Some(LabelSource::Positional) {
            continue;
        }
        if let Some(own) = values.any_at(slot).and_then(|v| strategy.own_label(v)) {
            resolve_slot(labels, slot, SlotLabel::own(own));
        }
    }
}

impl<T: KaseTuple> fmt::Display for Kase<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl<T: KaseTuple> fmt::Debug for Kase<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kase")
            .field("arity", &T::ARITY)
            .field("labels", &self.labels.iter().map(|l| &l.text).collect::<Vec<_>>())
            .field("display_name", &self.display_name.get())
            .finish_non_exhaustive()
    }
}

impl<T: PartialEq> PartialEq for Kase<T> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
            && self.labels.len() == other.labels.len()
            && self
                .labels
                .iter()
                .zip(&other.labels)
                .all(|(a, b)| a.text == b.text)
    }
}
