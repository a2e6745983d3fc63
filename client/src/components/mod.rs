//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render from the shared `ViewState` signal and report user
//! intent back through callbacks; they never call the session service.

pub mod login_panel;
pub mod user_menu;
