//! Networking modules for the hosted session service.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` defines the capability the controller consumes, `appwrite`
//! implements it over REST, and `types` defines the wire schema.

pub mod appwrite;
pub mod session;
pub mod types;
