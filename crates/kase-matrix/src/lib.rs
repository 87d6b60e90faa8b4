//! Typed, insertion-ordered value buckets for Kase generation.
//!
//! A [`KaseMatrix`] maps [`KaseMatrixKey`]s to ordered buckets of labeled
//! values. Selecting a tuple of keys generates every combination of their
//! buckets, exactly like [`kase_core::kases()`] over plain iterables but
//! with labels taken from the stored elements.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod key;
pub mod matrix;

pub use error::MatrixError;
pub use key::KaseMatrixKey;
pub use matrix::{KaseMatrix, KaseMatrixElement, MatrixKeys};
