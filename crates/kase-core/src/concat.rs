//! Arity combinator: concatenating Kases into wider ones.
//!
//! [`Concat`] is implemented for every pair of tuples whose combined arity
//! is at most [`MAX_ARITY`](crate::MAX_ARITY). Past that limit no impl
//! exists, so over-wide compositions are rejected at compile time.

use crate::kase::{DisplayNameFactory, Kase, NameSource};
use crate::label::{LabelSource, Labels, SlotLabel};
use crate::tuple::{DisplayTuple, KaseTuple};
use std::sync::Arc;

/// Positional concatenation of two tuples: `self`'s slots, then `rhs`'s.
pub trait Concat<Rhs: KaseTuple>: KaseTuple {
    /// The combined tuple type.
    type Output: KaseTuple;

    /// Append `rhs` after `self`.
    fn concat(self, rhs: Rhs) -> Self::Output;
}

macro_rules! impl_concat {
    (@one [$($a:ident)+] [$($b:ident)+]) => {
        impl<$($a,)+ $($b,)+> Concat<($($b,)+)> for ($($a,)+) {
            type Output = ($($a,)+ $($b,)+);

            #[allow(non_snake_case)]
            fn concat(self, rhs: ($($b,)+)) -> Self::Output {
                let ($($a,)+) = self;
                let ($($b,)+) = rhs;
                ($($a,)+ $($b,)+)
            }
        }
    };
    ([$($a:ident)+] []) => {};
    ([$($a:ident)+] [$b0:ident $($b:ident)*]) => {
        impl_concat!(@one [$($a)+] [$b0 $($b)*]);
        impl_concat!([$($a)+] [$($b)*]);
    };
}

// Each line pairs a left arity `n` with every right arity `1..=22-n`.
impl_concat!([A1] [B1 B2 B3 B4 B5 B6 B7 B8 B9 B10 B11 B12 B13 B14 B15 B16 B17 B18 B19 B20 B21]);
impl_concat!([A1 A2] [B1 B2 B3 B4 B5 B6 B7 B8 B9 B10 B11 B12 B13 B14 B15 B16 B17 B18 B19 B20]);
impl_concat!([A1 A2 A3] [B1 B2 B3 B4 B5 B6 B7 B8 B9 B10 B11 B12 B13 B14 B15 B16 B17 B18 B19]);
impl_concat!([A1 A2 A3 A4] [B1 B2 B3 B4 B5 B6 B7 B8 B9 B10 B11 B12 B13 B14 B15 B16 B17 B18]);
impl_concat!([A1 A2 A3 A4 A5] [B1 B2 B3 B4 B5 B6 B7 B8 B9 B10 B11 B12 B13 B14 B15 B16 B17]);
impl_concat!([A1 A2 A3 A4 A5 A6] [B1 B2 B3 B4 B5 B6 B7 B8 B9 B10 B11 B12 B13 B14 B15 B16]);
impl_concat!([A1 A2 A3 A4 A5 A6 A7] [B1 B2 B3 B4 B5 B6 B7 B8 B9 B10 B11 B12 B13 B14 B15]);
impl_concat!([A1 A2 A3 A4 A5 A6 A7 A8] [B1 B2 B3 B4 B5 B6 B7 B8 B9 B10 B11 B12 B13 B14]);
impl_concat!([A1 A2 A3 A4 A5 A6 A7 A8 A9] [B1 B2 B3 B4 B5 B6 B7 B8 B9 B10 B11 B12 B13]);
impl_concat!([A1 A2 A3 A4 A5 A6 A7 A8 A9 A10] [B1 B2 B3 B4 B5 B6 B7 B8 B9 B10 B11 B12]);
impl_concat!([A1 A2 A3 A4 A5 A6 A7 A8 A9 A10 A11] [B1 B2 B3 B4 B5 B6 B7 B8 B9 B10 B11]);
impl_concat!([A1 A2 A3 A4 A5 A6 A7 A8 A9 A10 A11 A12] [B1 B2 B3 B4 B5 B6 B7 B8 B9 B10]);
impl_concat!([A1 A2 A3 A4 A5 A6 A7 A8 A9 A10 A11 A12 A13] [B1 B2 B3 B4 B5 B6 B7 B8 B9]);
impl_concat!([A1 A2 A3 A4 A5 A6 A7 A8 A9 A10 A11 A12 A13 A14] [B1 B2 B3 B4 B5 B6 B7 B8]);
impl_concat!([A1 A2 A3 A4 A5 A6 A7 A8 A9 A10 A11 A12 A13 A14 A15] [B1 B2 B3 B4 B5 B6 B7]);
impl_concat!([A1 A2 A3 A4 A5 A6 A7 A8 A9 A10 A11 A12 A13 A14 A15 A16] [B1 B2 B3 B4 B5 B6]);
impl_concat!([A1 A2 A3 A4 A5 A6 A7 A8 A9 A10 A11 A12 A13 A14 A15 A16 A17] [B1 B2 B3 B4 B5]);
impl_concat!([A1 A2 A3 A4 A5 A6 A7 A8 A9 A10 A11 A12 A13 A14 A15 A16 A17 A18] [B1 B2 B3 B4]);
impl_concat!([A1 A2 A3 A4 A5 A6 A7 A8 A9 A10 A11 A12 A13 A14 A15 A16 A17 A18 A19] [B1 B2 B3]);
impl_concat!([A1 A2 A3 A4 A5 A6 A7 A8 A9 A10 A11 A12 A13 A14 A15 A16 A17 A18 A19 A20] [B1 B2]);
impl_concat!([A1 A2 A3 A4 A5 A6 A7 A8 A9 A10 A11 A12 A13 A14 A15 A16 A17 A18 A19 A20 A21] [B1]);

/// Labels of `left` followed by `right`, with right-hand positional labels
/// renumbered to their new slot.
fn concat_labels(left: &Labels, right: &Labels) -> Labels {
    let offset = left.len();
    let mut labels = Labels::with_capacity(offset + right.len());
    labels.extend(left.iter().cloned());
    labels.extend(right.iter().enumerate().map(|(j, label)| {
        if label.source == LabelSource::Positional {
            SlotLabel::positional(offset + j)
        } else {
            label.clone()
        }
    }));
    labels
}

impl<A: KaseTuple> Kase<A> {
    /// Concatenate `other` after `self` into a Kase of arity `n + m`.
    ///
    /// Values and labels keep their order. Positional labels of `other`
    /// are renumbered (`a1` becomes `a<n+1>`); explicit and own labels are
    /// kept as-is. The result uses `self`'s name format, or the default if
    /// `self` had a literal or factory-made name.
    pub fn concat<B>(self, other: Kase<B>) -> Kase<A::Output>
    where
        B: KaseTuple,
        A: Concat<B>,
        A::Output: DisplayTuple,
    {
        let labels = concat_labels(self.slot_labels(), other.slot_labels());
        let format = self.name_format().cloned().unwrap_or_default();
        let values = self.into_values().concat(other.into_values());
        Kase::from_parts(values, labels, NameSource::joined(format))
    }

    /// Like [`concat()`](Self::concat), naming the result with `factory`.
    ///
    /// Labels are combined the same way; the values need not implement
    /// `Display`.
    pub fn concat_named<B, F>(self, other: Kase<B>, factory: F) -> Kase<A::Output>
    where
        B: KaseTuple,
        A: Concat<B>,
        F: Fn(&Kase<A::Output>) -> String + Send + Sync + 'static,
    {
        let labels = concat_labels(self.slot_labels(), other.slot_labels());
        let values = self.into_values().concat(other.into_values());
        Kase::from_parts(values, labels, NameSource::Factory(Arc::new(factory)))
    }
}

/// Cartesian combination of two Kase collections.
///
/// Implemented for every `IntoIterator<Item = Kase<A>>`. [`times()`](Self::times)
/// names results with the default format, so every combined slot must be
/// `Display`; [`times_named()`](Self::times_named) and
/// [`times_with()`](Self::times_with) have no such bound.
pub trait Times<A: KaseTuple>: IntoIterator<Item = Kase<A>> + Sized {
    /// Every `a ++ b` for `a` in `self` (outer) and `b` in `other` (inner).
    ///
    /// The result has `|self| * |other|` Kases of arity `n + m`.
    fn times<J, B>(self, other: J) -> Vec<Kase<A::Output>>
    where
        J: IntoIterator<Item = Kase<B>>,
        B: KaseTuple + Clone,
        A: Concat<B> + Clone,
        A::Output: DisplayTuple,
    {
        let right: Vec<Kase<B>> = other.into_iter().collect();
        let mut out = Vec::new();
        for a in self {
            for b in &right {
                out.push(a.clone().concat(b.clone()));
            }
        }
        out
    }

    /// Like [`times()`](Self::times), naming every result with `factory`.
    fn times_named<J, B, F>(self, other: J, factory: F) -> Vec<Kase<A::Output>>
    where
        J: IntoIterator<Item = Kase<B>>,
        B: KaseTuple + Clone,
        A: Concat<B> + Clone,
        F: Fn(&Kase<A::Output>) -> String + Send + Sync + 'static,
    {
        let factory: DisplayNameFactory<A::Output> = Arc::new(factory);
        let right: Vec<Kase<B>> = other.into_iter().collect();
        let mut out = Vec::new();
        for a in self {
            for b in &right {
                let labels = concat_labels(a.slot_labels(), b.slot_labels());
                let values = a.values().clone().concat(b.values().clone());
                let naming = NameSource::Factory(Arc::clone(&factory));
                out.push(Kase::from_parts(values, labels, naming));
            }
        }
        out
    }

    /// Like [`times()`](Self::times), but hands each concatenated value
    /// tuple to `factory` instead of building a Kase. No labels or display
    /// names are produced.
    fn times_with<J, B, R, F>(self, other: J, mut factory: F) -> Vec<R>
    where
        J: IntoIterator<Item = Kase<B>>,
        B: KaseTuple + Clone,
        A: Concat<B> + Clone,
        F: FnMut(A::Output) -> R,
    {
        let right: Vec<B> = other.into_iter().map(Kase::into_values).collect();
        let mut out = Vec::new();
        for a in self {
            let a = a.into_values();
            for b in &right {
                out.push(factory(a.clone().concat(b.clone())));
            }
        }
        out
    }
}

impl<I, A> Times<A> for I
where
    I: IntoIterator<Item = Kase<A>>,
    A: KaseTuple,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kase::kase;
    use crate::label::LabeledValue;
    use proptest::prelude::*;

    #[test]
    fn concat_values_in_order() {
        let k = kase((1, "x")).concat(kase((2.5, 'c')));
        assert_eq!(k.arity(), 4);
        assert_eq!(k.values(), &(1, "x", 2.5, 'c'));
        assert_eq!(k.display_name(), "a1: 1 | a2: x | a3: 2.5 | a4: c");
    }

    #[test]
    fn concat_keeps_explicit_labels() {
        let left = kase((1,)).with_label(0, "n");
        let right: Kase<(&str, char)> =
            Kase::from_labeled((LabeledValue::new("s", "y"), LabeledValue::new("t", 'z')));
        let k = left.concat(right);
        assert_eq!(k.labels().collect::<Vec<_>>(), ["n", "s", "t"]);
        assert_eq!(k.display_name(), "n: 1 | s: y | t: z");
    }

    #[test]
    fn concat_renumbers_right_positional_labels() {
        let k = kase((1, 2)).concat(kase((3,)).with_label(0, "three").concat(kase((4,))));
        assert_eq!(k.labels().collect::<Vec<_>>(), ["a1", "a2", "three", "a4"]);
    }

    #[test]
    fn concat_inherits_left_format() {
        let left = kase((1,)).with_name_format(crate::NameFormat::default().separator(", "));
        let k = left.concat(kase((2,)));
        assert_eq!(k.display_name(), "a1: 1, a2: 2");

        let literal = kase((1,)).with_display_name("lit");
        assert_eq!(literal.concat(kase((2,))).display_name(), "a1: 1 | a2: 2");
    }

    #[test]
    fn concat_reaches_max_arity() {
        let left = kase((1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11));
        let right = kase((12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22));
        let k = left.concat(right);
        assert_eq!(k.arity(), crate::MAX_ARITY);
        assert_eq!(k.label(21), Some("a22"));
        assert_eq!(k.values().21, 22);
    }

    #[test]
    fn times_is_left_outer_product() {
        let left = vec![kase((1,)), kase((2,))];
        let right = vec![kase(("x",)), kase(("y",))];
        let combined = left.times(right);
        let values: Vec<(i32, &str)> = combined.into_iter().map(Kase::into_values).collect();
        assert_eq!(values, [(1, "x"), (1, "y"), (2, "x"), (2, "y")]);
    }

    #[test]
    fn times_with_empty_side_is_empty() {
        let left = vec![kase((1,)), kase((2,))];
        let right: Vec<Kase<(u8,)>> = Vec::new();
        assert!(left.clone().times(right.clone()).is_empty());
        assert!(right.times(left).is_empty());
    }

    #[test]
    fn times_with_instance_factory() {
        #[derive(Debug, PartialEq)]
        struct Point {
            x: i32,
            y: i32,
            tag: &'static str,
        }

        let xs = vec![kase((1, 2))];
        let tags = vec![kase(("a",)), kase(("b",))];
        let points = xs.times_with(tags, |(x, y, tag)| Point { x, y, tag });
        assert_eq!(
            points,
            [
                Point { x: 1, y: 2, tag: "a" },
                Point { x: 1, y: 2, tag: "b" },
            ]
        );
    }

    #[derive(Clone, Debug, PartialEq)]
    struct Opaque(u8);

    #[test]
    fn concat_named_needs_no_display() {
        let left = Kase::with_factory((Opaque(1),), |_| String::from("left"));
        let right = Kase::with_factory((Opaque(2),), |_| String::from("right"));
        let k = left.concat_named(right, |k| {
            let (a, b) = k.values();
            format!("{}+{}", a.0, b.0)
        });
        assert_eq!(k.values(), &(Opaque(1), Opaque(2)));
        assert_eq!(k.labels().collect::<Vec<_>>(), ["a1", "a2"]);
        assert_eq!(k.display_name(), "1+2");
    }

    #[test]
    fn times_named_shares_one_factory() {
        let left = vec![Kase::with_factory((Opaque(1),), |_| String::new())];
        let right: Vec<Kase<(Opaque, u8)>> = vec![
            Kase::with_factory((Opaque(2), 7), |_| String::new()).with_label(1, "n"),
            Kase::with_factory((Opaque(3), 8), |_| String::new()),
        ];
        let combined = left.times_named(right, |k| {
            let (_, b, n) = k.values();
            format!("{}-{n}", b.0)
        });
        let names: Vec<&str> = combined.iter().map(|k| k.display_name()).collect();
        assert_eq!(names, ["2-7", "3-8"]);
        assert_eq!(combined[0].label(2), Some("n"));
        assert_eq!(combined[1].label(2), Some("a3"));
    }

    proptest! {
        #[test]
        fn times_cardinality(a in prop::collection::vec(any::<i16>(), 0..6),
                             b in prop::collection::vec(any::<u8>(), 0..6)) {
            let left: Vec<_> = a.iter().map(|v| kase((*v,))).collect();
            let right: Vec<_> = b.iter().map(|v| kase((*v, *v))).collect();
            let combined = left.times(right);
            prop_assert_eq!(combined.len(), a.len() * b.len());
            for k in &combined {
                prop_assert_eq!(k.arity(), 3);
            }
        }

        #[test]
        fn concat_is_pure_concatenation(x in any::<i32>(), y in any::<bool>(), z in "[a-z]{0,4}") {
            let k = kase((x,)).concat(kase((y, z.clone())));
            prop_assert_eq!(k.values(), &(x, y, z));
        }
    }
}
