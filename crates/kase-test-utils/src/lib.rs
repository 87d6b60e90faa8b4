//! Test utilities and mock collaborators for Kase development.
//!
//! Provides a [`MockTestRunner`] standing in for the test framework that
//! consumes generated Kases, assertion helpers over generated sequences,
//! and value fixtures carrying their own labels ([`fixtures`]).

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use indexmap::IndexSet;
use kase_core::{Kase, KaseTuple};

/// One registered test, as a test framework would see it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestNode {
    pub name: String,
    pub arity: usize,
}

/// Records Kases the way a dynamic-test framework registers them.
///
/// Each Kase becomes one [`TestNode`] named by its display name. The body
/// runs immediately; its outcome is recorded per node.
#[derive(Debug, Default)]
pub struct MockTestRunner {
    nodes: Vec<TestNode>,
    failures: Vec<String>,
}

impl MockTestRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register and run one test per Kase.
    pub fn run<T, I, F>(&mut self, kases: I, mut body: F) -> &mut Self
    where
        T: KaseTuple,
        I: IntoIterator<Item = Kase<T>>,
        F: FnMut(&Kase<T>) -> bool,
    {
        for kase in kases {
            let node = TestNode {
                name: kase.display_name().to_string(),
                arity: kase.arity(),
            };
            if !body(&kase) {
                self.failures.push(node.name.clone());
            }
            self.nodes.push(node);
        }
        self
    }

    pub fn nodes(&self) -> &[TestNode] {
        &self.nodes
    }

    pub fn names(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.name.as_str()).collect()
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

/// Assert that no two Kases share a display name.
///
/// # Panics
///
/// On the first duplicate, naming it.
pub fn assert_unique_display_names<'a, T, I>(kases: I)
where
    T: KaseTuple + 'a,
    I: IntoIterator<Item = &'a Kase<T>>,
{
    let mut seen = IndexSet::new();
    for kase in kases {
        let name = kase.display_name();
        assert!(seen.insert(name), "duplicate display name: {name:?}");
    }
}

/// Assert that `values` enumerates a two-dimension product in nested
/// order: the first coordinate only changes after the second has cycled.
///
/// # Panics
///
/// If `values` is not `firsts x seconds` in nested order.
pub fn assert_nested_order<A, B>(values: &[(A, B)], firsts: &[A], seconds: &[B])
where
    A: PartialEq + std::fmt::Debug,
    B: PartialEq + std::fmt::Debug,
{
    assert_eq!(
        values.len(),
        firsts.len() * seconds.len(),
        "cardinality must be the product of dimension sizes"
    );
    for (i, (a, b)) in values.iter().enumerate() {
        assert_eq!(a, &firsts[i / seconds.len()], "first dimension at index {i}");
        assert_eq!(b, &seconds[i % seconds.len()], "second dimension at index {i}");
    }
}
