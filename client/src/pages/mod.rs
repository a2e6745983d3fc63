//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! The page owns event orchestration (spawning controller tasks, global
//! listeners) and delegates rendering details to `components`.

pub mod home;
