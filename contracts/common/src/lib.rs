//! Shared building blocks for the farm contract suite.
//!
//! This crate provides:
//! - [`authority`]: the single-holder capability that guards privileged
//!   calls (farm admin, vault owner, timelock admin).
//! - [`ttl`]: storage TTL bump helpers used after every persistent write.

#![no_std]

pub mod authority;
pub mod ttl;
