//! Token handling.
//!
//! Token issuance (login, refresh) lives outside this service; only
//! verification happens here, because cached user lookups are keyed by the
//! token-derived user id.

pub mod jwt;
