//! # Line Item Identifiers
//!
//! Bill items need ids that stay stable while the user edits them and never
//! collide within a bill. Where they come from is the caller's choice, so
//! the bill engine takes an [`IdGenerator`] instead of minting ids itself.
//!
//! - [`UuidGenerator`]: UUID v4, globally unique without coordination
//! - [`SequentialIdGenerator`]: `1`, `2`, `3`… for deterministic hosts and tests

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Supplies unique, opaque string tokens.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// UUID v4 ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Counts up from 1.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        (self.next.fetch_add(1, Ordering::Relaxed) + 1).to_string()
    }
}
