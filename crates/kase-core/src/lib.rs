//! Core types for the Kase parameterized-test library.
//!
//! This is the leaf crate with zero internal dependencies. It defines:
//!
//! - [`LabeledValue`] and per-slot label resolution ([`label`]),
//! - the fixed-arity tuple traits ([`KaseTuple`], arity 1..=[`MAX_ARITY`]),
//! - the [`Kase`] tuple with its memoized display name,
//! - cartesian generation ([`kases()`], [`KaseSeq`]),
//! - the arity combinator ([`Kase::concat`], [`Times`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod concat;
pub mod format;
mod kase;
pub mod label;
pub mod product;
pub mod tuple;

pub use concat::{Concat, Times};
pub use format::NameFormat;
pub use kase::{kase, DisplayNameFactory, Kase};
pub use label::{
    own_label_of, HasOwnLabel, LabelSource, LabelStrategy, LabeledValue, Labels, NoOwnLabels,
    OwnLabelOf, SlotLabel,
};
pub use product::{kase_seq, kases, kases_with, Dimensions, KaseSeq};
pub use tuple::{AnyTuple, DisplayTuple, KaseTuple, MAX_ARITY};

/// Build a [`Kase`] from literal values, optionally labeling slots.
///
/// Each slot is `value` or `value => label`. Unlabeled slots get the
/// positional default.
///
/// ```
/// use kase_core::kase;
///
/// let k = kase!(3, "fast" => "mode", 0.5);
/// assert_eq!(k.display_name(), "a1: 3 | mode: fast | a3: 0.5");
/// ```
#[macro_export]
macro_rules! kase {
    (@munch [$($v:expr,)*] [$($l:expr,)*]) => {
        $crate::Kase::new(($($v,)*)).with_labels([$($l,)*])
    };
    (@munch [$($v:expr,)*] [$($l:expr,)*] $value:expr => $label:expr $(, $($rest:tt)*)?) => {
        $crate::kase!(
            @munch
            [$($v,)* $value,]
            [$($l,)* ::core::option::Option::Some(::std::string::String::from($label)),]
            $($($rest)*)?
        )
    };
    (@munch [$($v:expr,)*] [$($l:expr,)*] $value:expr $(, $($rest:tt)*)?) => {
        $crate::kase!(
            @munch
            [$($v,)* $value,]
            [$($l,)* ::core::option::Option::None::<::std::string::String>,]
            $($($rest)*)?
        )
    };
    ($($body:tt)+) => {
        $crate::kase!(@munch [] [] $($body)+)
    };
}
