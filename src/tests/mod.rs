//! Cross-module tests. Leaf modules keep their own inline `#[cfg(test)]`
//! tests; everything driving a real git repository end to end lives here.

pub mod support;

mod extractor_tests;
mod lock_tests;
