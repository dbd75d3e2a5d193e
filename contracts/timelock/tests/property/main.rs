#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based test suite entry point.
//!
//! ```bash
//! cargo test -p timelock --test property
//! ```

mod window;
