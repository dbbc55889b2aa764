// src/store/id.rs

//! Recipe identifier generation
//!
//! Identifiers are random UUIDv4 tokens rendered without hyphens. They do
//! not depend on any in-process counter, so ids issued before a restart
//! cannot be reissued after it.

use uuid::Uuid;

/// Source of fresh recipe identifiers
pub trait IdGenerator: Send + Sync {
    /// Produce a new identifier
    fn next_id(&self) -> String;
}

/// Random UUIDv4 identifiers (32 lowercase hex characters)
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}
