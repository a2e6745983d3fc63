//! View state for the landing page: session, avatar, loading flags, menu.
//!
//! DESIGN
//! ======
//! Every transition is a method on [`ViewState`] so the controller, the
//! components and the tests all move the record through the same code.
//! `session_epoch` increments whenever the view drops back to anonymous; an
//! avatar lookup that started under an older epoch must not apply its result.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use std::cell::RefCell;

use leptos::prelude::{GetUntracked, RwSignal, Update};

use crate::net::types::Session;
use crate::util::initials::initials;

/// Terminal observable states of the page, plus the bootstrap window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewPhase {
    Loading,
    Authenticated,
    Anonymous,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    pub user: Option<Session>,
    pub avatar_url: Option<String>,
    pub loading: bool,
    pub oauth_in_flight: bool,
    pub menu_open: bool,
    pub session_epoch: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            user: None,
            avatar_url: None,
            loading: true,
            oauth_in_flight: false,
            menu_open: false,
            session_epoch: 0,
        }
    }
}

impl ViewState {
    pub fn phase(&self) -> ViewPhase {
        if self.loading {
            ViewPhase::Loading
        } else if self.user.is_some() {
            ViewPhase::Authenticated
        } else {
            ViewPhase::Anonymous
        }
    }

    pub fn authenticate(&mut self, session: Session) {
        self.user = Some(session);
        self.loading = false;
    }

    /// Drop the user and everything derived from it.
    pub fn become_anonymous(&mut self) {
        self.user = None;
        self.avatar_url = None;
        self.menu_open = false;
        self.loading = false;
        self.session_epoch += 1;
    }

    /// Rendered image failed to load; fall back to initials, no retry.
    pub fn clear_avatar(&mut self) {
        self.avatar_url = None;
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// Close the menu for a click landing outside it. Returns whether it closed.
    pub fn dismiss_menu(&mut self, click_inside_menu: bool) -> bool {
        if !self.menu_open || click_inside_menu {
            return false;
        }
        self.menu_open = false;
        true
    }

    pub fn display_name(&self) -> Option<&str> {
        self.user.as_ref().map(Session::display_name)
    }

    pub fn initials(&self) -> String {
        self.display_name().map(initials).unwrap_or_default()
    }

    /// Whether `user_id` under `epoch` is still the signed-in user.
    pub fn is_current(&self, user_id: &str, epoch: u64) -> bool {
        self.session_epoch == epoch && self.user.as_ref().is_some_and(|u| u.user_id == user_id)
    }
}

/// Shared cell the controller reads and mutates between suspension points.
pub trait StateCell {
    fn snapshot(&self) -> ViewState;
    fn apply(&self, f: &mut dyn FnMut(&mut ViewState));
}

impl dyn StateCell {
    pub fn update(&self, f: impl FnOnce(&mut ViewState)) {
        let mut f = Some(f);
        self.apply(&mut |state| {
            if let Some(f) = f.take() {
                f(state);
            }
        });
    }
}

impl StateCell for RwSignal<ViewState> {
    fn snapshot(&self) -> ViewState {
        self.get_untracked()
    }

    fn apply(&self, f: &mut dyn FnMut(&mut ViewState)) {
        Update::update(self, |state| f(state));
    }
}

impl StateCell for RefCell<ViewState> {
    fn snapshot(&self) -> ViewState {
        self.borrow().clone()
    }

    fn apply(&self, f: &mut dyn FnMut(&mut ViewState)) {
        f(&mut self.borrow_mut());
    }
}
