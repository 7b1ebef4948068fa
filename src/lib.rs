//! Cirrus — declarative cloud stack provisioning.
//!
//! Layered configuration, deterministic per-environment naming, and a
//! single-pass stack lifecycle with dry-run synthesis.

pub mod cli;
pub mod constructs;
pub mod core;
pub mod policy;
pub mod stacks;
pub mod synth;
