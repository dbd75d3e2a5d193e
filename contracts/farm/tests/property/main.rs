#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based test suite entry point.
//!
//! ```bash
//! cargo test -p farm --test property
//! ```
//!
//! To increase the number of generated cases:
//!
//! ```bash
//! PROPTEST_CASES=256 cargo test -p farm --test property
//! ```

#[path = "../common/mod.rs"]
mod common;

mod accrual;
mod state_machine;
