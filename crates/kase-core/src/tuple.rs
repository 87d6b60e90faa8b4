//! Fixed-arity tuple traits backing [`Kase`](crate::Kase).
//!
//! Arity is carried by the Rust tuple type itself: `(A1,)` through
//! `(A1, ..., A22)`. Every trait here is implemented for each arity by a
//! single macro template, so there is exactly one definition of the shape.

use crate::label::{LabelSource, LabeledValue, Labels, SlotLabel};
use std::any::Any;
use std::fmt;

/// Largest supported tuple arity.
///
/// Tuples and combinators are only implemented up to this size; composing
/// past it fails to compile.
pub const MAX_ARITY: usize = 22;

/// A fixed-length, positionally-typed tuple of test values.
pub trait KaseTuple: Sized {
    /// Number of slots.
    const ARITY: usize;

    /// The same tuple with every slot wrapped in [`LabeledValue`].
    type Labeled;

    /// Pair each slot with the label at the same position.
    ///
    /// Missing trailing labels fall back to positional defaults.
    fn into_labeled<L>(self, labels: L) -> Self::Labeled
    where
        L: IntoIterator<Item = String>;

    /// Split a labeled tuple into plain values and explicit labels.
    fn from_labeled(labeled: Self::Labeled) -> (Self, Labels);
}

/// A [`KaseTuple`] whose slots all implement [`fmt::Display`].
pub trait DisplayTuple: KaseTuple {
    /// The value at 0-based `slot`, or `None` past the arity.
    fn display_at(&self, slot: usize) -> Option<&dyn fmt::Display>;
}

/// A [`KaseTuple`] whose slots are all `'static`, so they can be inspected
/// as `&dyn Any` by a [`LabelStrategy`](crate::LabelStrategy).
pub trait AnyTuple: KaseTuple {
    /// The value at 0-based `slot`, or `None` past the arity.
    fn any_at(&self, slot: usize) -> Option<&dyn Any>;
}

/// Render every slot of `values` with its `Display` impl.
pub(crate) fn render_values<T: DisplayTuple>(values: &T) -> Vec<String> {
    (0..T::ARITY)
        .filter_map(|slot| values.display_at(slot))
        .map(|v| v.to_string())
        .collect()
}

macro_rules! impl_tuple {
    ($arity:literal => $($t:ident . $idx:tt),+) => {
        impl<$($t),+> KaseTuple for ($($t,)+) {
            const ARITY: usize = $arity;
            type Labeled = ($(LabeledValue<$t>,)+);

            fn into_labeled<L>(self, labels: L) -> Self::Labeled
            where
                L: IntoIterator<Item = String>,
            {
                let mut labels = labels.into_iter();
                ($(
                    LabeledValue {
                        label: labels
                            .next()
                            .unwrap_or_else(|| crate::label::positional_label($idx)),
                        value: self.$idx,
                    },
                )+)
            }

            fn from_labeled(labeled: Self::Labeled) -> (Self, Labels) {
                let mut labels = Labels::with_capacity($arity);
                let values = ($({
                    let element = labeled.$idx;
                    labels.push(SlotLabel {
                        text: element.label,
                        source: LabelSource::Explicit,
                    });
                    element.value
                },)+);
                (values, labels)
            }
        }

        impl<$($t: fmt::Display),+> DisplayTuple for ($($t,)+) {
            fn display_at(&self, slot: usize) -> Option<&dyn fmt::Display> {
                match slot {
                    $($idx => Some(&self.$idx),)+
                    _ => None,
                }
            }
        }

        impl<$($t: Any),+> AnyTuple for ($($t,)+) {
            fn any_at(&self, slot: usize) -> Option<&dyn Any> {
                match slot {
                    $($idx => Some(&self.$idx),)+
                    _ => None,
                }
            }
        }
    };
}

impl_tuple!(1 => A1.0);
impl_tuple!(2 => A1.0, A2.1);
impl_tuple!(3 => A1.0, A2.1, A3.2);
impl_tuple!(4 => A1.0, A2.1, A3.2, A4.3);
impl_tuple!(5 => A1.0, A2.1, A3.2, A4.3, A5.4);
impl_tuple!(6 => A1.0, A2.1, A3.2, A4.3, A5.4, A6.5);
impl_tuple!(7 => A1.0, A2.1, A3.2, A4.3, A5.4, A6.5, A7.6);
impl_tuple!(8 => A1.0, A2.1, A3.2, A4.3, A5.4, A6.5, A7.6, A8.7);
impl_tuple!(9 => A1.0, A2.1, A3.2, A4.3, A5.4, A6.5, A7.6, A8.7, A9.8);
impl_tuple!(10 => A1.0, A2.1, A3.2, A4.3, A5.4, A6.5, A7.6, A8.7, A9.8, A10.9);
impl_tuple!(11 => A1.0, A2.1, A3.2, A4.3, A5.4, A6.5, A7.6, A8.7, A9.8, A10.9, A11.10);
impl_tuple!(12 => A1.0, A2.1, A3.2, A4.3, A5.4, A6.5, A7.6, A8.7, A9.8, A10.9, A11.10, A12.11);
impl_tuple!(13 => A1.0, A2.1, A3.2, A4.3, A5.4, A6.5, A7.6, A8.7, A9.8, A10.9, A11.10, A12.11,
    A13.12);
impl_tuple!(14 => A1.0, A2.1, A3.2, A4.3, A5.4, A6.5, A7.6, A8.7, A9.8, A10.9, A11.10, A12.11,
    A13.12, A14.13);
impl_tuple!(15 => A1.0, A2.1, A3.2, A4.3, A5.4, A6.5, A7.6, A8.7, A9.8, A10.9, A11.10, A12.11,
    A13.12, A14.13, A15.14);
impl_tuple!(16 => A1.0, A2.1, A3.2, A4.3, A5.4, A6.5, A7.6, A8.7, A9.8, A10.9, A11.10, A12.11,
    A13.12, A14.13, A15.14, A16.15);
impl_tuple!(17 => A1.0, A2.1, A3.2, A4.3, A5.4, A6.5, A7.6, A8.7, A9.8, A10.9, A11.10, A12.11,
    A13.12, A14.13, A15.14, A16.15, A17.16);
impl_tuple!(18 => A1.0, A2.1, A3.2, A4.3, A5.4, A6.5, A7.6, A8.7, A9.8, A10.9, A11.10, A12.11,
    A13.12, A14.13, A15.14, A16.15, A17.16, A18.17);
impl_tuple!(19 => A1.0, A2.1, A3.2, A4.3, A5.4, A6.5, A7.6, A8.7, A9.8, A10.9, A11.10, A12.11,
    A13.12, A14.13, A15.14, A16.15, A17.16, A18.17, A19.18);
impl_tuple!(20 => A1.0, A2.1, A3.2, A4.3, A5.4, A6.5, A7.6, A8.7, A9.8, A10.9, A11.10, A12.11,
    A13.12, A14.13, A15.14, A16.15, A17.16, A18.17, A19.18, A20.19);
impl_tuple!(21 => A1.0, A2.1, A3.2, A4.3, A5.4, A6.5, A7.6, A8.7, A9.8, A10.9, A11.10, A12.11,
    A13.12, A14.13, A15.14, A16.15, A17.16, A18.17, A19.18, A20.19, A21.20);
impl_tuple!(22 => A1.0, A2.1, A3.2, A4.3, A5.4, A6.5, A7.6, A8.7, A9.8, A10.9, A11.10, A12.11,
    A13.12, A14.13, A15.14, A16.15, A17.16, A18.17, A19.18, A20.19, A21.20, A22.21);
