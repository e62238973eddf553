//! # Tessera (Identity & Organisation Membership)
//!
//! `tessera` is a multi-tenant identity service. It registers users, verifies
//! password credentials, issues stateless bearer tokens, and manages the
//! organisations those users belong to.
//!
//! ## Tenant Model (Organisations & Memberships)
//!
//! Organisations are the tenant boundary. Every user receives a personal
//! organisation at registration and can create or join further organisations
//! through memberships.
//!
//! - **Public identifiers:** users and organisations carry immutable UUID
//!   string identifiers (`userId`, `orgId`) distinct from the database keys.
//! - **Membership uniqueness:** a `(organisation, user)` pair is stored at
//!   most once; adding an existing member is a no-op.
//! - **Tenant isolation:** fetching an organisation the caller is not a
//!   member of returns `404 Not Found`, indistinguishable from an
//!   organisation that does not exist, to prevent cross-tenant enumeration.
//!
//! ## Authentication
//!
//! Passwords are bcrypt-hashed before persistence and never returned by any
//! endpoint. Login failures use a single uniform `401` body for both unknown
//! email and wrong password. Successful registration and login issue an
//! HS256-signed bearer token with a fixed lifetime; verification is stateless
//! and there is no revocation list.

pub mod api;
pub mod cli;

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
