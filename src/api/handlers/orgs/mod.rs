//! Organisation and membership endpoints.
//!
//! Organisations are the tenant boundary. Every read is scoped through the
//! caller's memberships, and fetching an organisation the caller is not a
//! member of returns `404`, identical to one that does not exist, so resource
//! existence never leaks across tenants.
//!
//! The handler modules only parse inputs and map the high-level flow, while
//! `storage` owns database queries and response shaping.
//!
//! Flow Overview:
//! 1) Authenticate via bearer token.
//! 2) Resolve organisations through the caller's membership rows.
//! 3) Perform the scoped read or the membership write.

pub(crate) mod members;
pub(crate) mod organisations;
mod storage;
pub(crate) mod types;
