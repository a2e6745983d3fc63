//! Client-side state for the landing page.
//!
//! SYSTEM CONTEXT
//! ==============
//! `view` is the in-memory record the page renders from; `avatar_cache` is the
//! only state that survives a reload besides the remote session itself.

pub mod avatar_cache;
pub mod view;
