//! Wire contracts shared between the NexusMind client and its backend.

pub mod domain;
pub mod shared;
