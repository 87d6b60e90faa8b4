//! Benchmark profiles for the Kase generation library.
//!
//! - [`dimension_profile`]: three numeric dimensions of a given width
//! - [`reference_matrix`]: a populated [`KaseMatrix`] with three buckets

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use kase_matrix::{KaseMatrix, KaseMatrixKey};

/// Bucket of sizes in [`reference_matrix`].
pub const SIZE: KaseMatrixKey<u32> = KaseMatrixKey::new("size");
/// Bucket of modes in [`reference_matrix`].
pub const MODE: KaseMatrixKey<&'static str> = KaseMatrixKey::new("mode");
/// Bucket of flags in [`reference_matrix`].
pub const FLAG: KaseMatrixKey<bool> = KaseMatrixKey::new("flag");

/// Three dimensions of `width` values each: `width^3` combinations.
pub fn dimension_profile(width: u32) -> (Vec<u32>, Vec<String>, Vec<bool>) {
    let numbers = (0..width).collect();
    let words = (0..width).map(|i| format!("w{i}")).collect();
    let flags = (0..width).map(|i| i % 2 == 0).collect();
    (numbers, words, flags)
}

/// A matrix with `width` sizes, four labeled modes and both flags.
pub fn reference_matrix(width: u32) -> KaseMatrix {
    let mut matrix = KaseMatrix::new();
    matrix
        .extend(SIZE, 0..width)
        .insert_labeled(MODE, "fast", "f")
        .insert_labeled(MODE, "slow", "s")
        .insert_labeled(MODE, "lazy", "l")
        .insert_labeled(MODE, "eager", "e")
        .extend(FLAG, [true, false]);
    matrix
}
