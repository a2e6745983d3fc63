//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `browser` wraps `window` behind small capability traits; `clock` and
//! `initials` are pure helpers with no DOM access.

pub mod browser;
pub mod clock;
pub mod initials;
