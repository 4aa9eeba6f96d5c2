//! Guarded routes.
//!
//! A guarded route renders only for an authenticated session. Anyone else
//! is sent to the login path, and the location they asked for is kept so
//! the login view can send them back afterwards.

use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect { to: String, from: String },
}

pub fn check<S: Session + ?Sized>(session: &S, location: &str, login_path: &str) -> GuardDecision {
    if session.is_authenticated() {
        GuardDecision::Allow
    } else {
        GuardDecision::Redirect {
            to: login_path.to_string(),
            from: location.to_string(),
        }
    }
}
