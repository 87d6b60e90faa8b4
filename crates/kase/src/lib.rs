//! Kase: strongly labeled parameterized test cases.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Kase sub-crates. For most users, adding `kase` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use kase::prelude::*;
//!
//! // Literal cases, with an optional label per slot.
//! let one = kase!(3, "fast" => "mode");
//! assert_eq!(one.display_name(), "a1: 3 | mode: fast");
//!
//! // Every combination of two dimensions, first dimension slowest.
//! let all = kases((vec![1, 2], vec!["x", "y"]));
//! assert_eq!(all.len(), 4);
//! assert_eq!(all[1].display_name(), "a1: 1 | a2: y");
//!
//! // Grow the arity by combining two collections.
//! let wide = all.times(kases((vec![true],)));
//! assert_eq!(wide[0].display_name(), "a1: 1 | a2: x | a3: true");
//!
//! // Named, typed buckets.
//! const SIZE: KaseMatrixKey<u32> = KaseMatrixKey::new("size");
//! let mut matrix = KaseMatrix::new();
//! matrix.extend(SIZE, [8, 16]);
//! let sized = matrix.kases((SIZE,)).unwrap();
//! assert_eq!(sized[1].display_name(), "size: 16");
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `kase-core` | `Kase`, labels, name formats, generators, combinators |
//! | [`matrix`] | `kase-matrix` | `KaseMatrix`, keys, matrix-driven generation |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, generators and combinators (`kase-core`).
///
/// Contains [`types::Kase`], [`types::LabeledValue`], the tuple traits,
/// [`types::kases()`] and [`types::KaseSeq`], and [`types::Times`].
pub use kase_core as types;

/// Keyed value buckets (`kase-matrix`).
///
/// Provides [`matrix::KaseMatrix`] and [`matrix::KaseMatrixKey`].
pub use kase_matrix as matrix;

pub use kase_core::kase;

/// Common imports for typical Kase usage.
///
/// ```rust
/// use kase::prelude::*;
/// ```
pub mod prelude {
    // Cases and labels
    pub use kase_core::{kase, Kase, LabeledValue, NameFormat};

    // Generation
    pub use kase_core::{kase_seq, kases, kases_with, KaseSeq};

    // Combinators
    pub use kase_core::{Concat, Times};

    // Own labels
    pub use kase_core::{own_label_of, HasOwnLabel, LabelStrategy};

    // Matrix
    pub use kase_matrix::{KaseMatrix, KaseMatrixElement, KaseMatrixKey, MatrixError};
}
