//! Configuration resolution and orchestration core.

pub mod error;
pub mod identity;
pub mod loader;
pub mod props;
pub mod template;
