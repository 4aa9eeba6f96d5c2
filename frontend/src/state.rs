//! Router state and the driver that owns history and session.

use std::collections::VecDeque;

use crate::config::RouterConfig;
use crate::history::History;
use crate::messages::{Command, Message};
use crate::routing::{RouteMatch, RouteTable};
use crate::session::Session;
use crate::update::{update, UpdateContext};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouterState {
    /// Location last processed, as it appears in history.
    pub location: String,
    /// What the outlet should show. `None` renders nothing.
    pub rendered: Option<RouteMatch>,
    /// Location a guard refused, kept for the login view.
    pub redirect_from: Option<String>,
    /// Redirects followed during the current dispatch.
    pub redirects: u8,
}

pub struct Router<H: History, S: Session> {
    table: RouteTable,
    config: RouterConfig,
    history: H,
    session: S,
    state: RouterState,
}

impl<H: History, S: Session> Router<H, S> {
    pub fn new(table: RouteTable, config: RouterConfig, history: H, session: S) -> Self {
        Self {
            table,
            config,
            history,
            session,
            state: RouterState::default(),
        }
    }

    pub fn state(&self) -> &RouterState {
        &self.state
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: RouterConfig) {
        self.config = config;
    }

    /// Swap the session, e.g. after the storage keys changed.
    pub fn set_session(&mut self, session: S) {
        self.session = session;
    }

    /// Render whatever history currently points at.
    pub fn start(&mut self) -> RouterState {
        let location = self.history.location();
        self.dispatch(Message::LocationChanged(location))
    }

    /// Process a message and every message it chains, then return the
    /// resulting state. Side effects run in the order they were emitted.
    pub fn dispatch(&mut self, msg: Message) -> RouterState {
        self.state.redirects = 0;
        let mut queue = VecDeque::from([msg]);

        while let Some(msg) = queue.pop_front() {
            let commands = {
                let ctx = UpdateContext {
                    table: &self.table,
                    config: &self.config,
                    session: &self.session,
                };
                update(&mut self.state, msg, &ctx)
            };

            for command in commands {
                match command {
                    Command::SendMessage(next) => queue.push_back(next),
                    Command::PushHistory(location) => {
                        if let Err(e) = self.history.push(&location) {
                            crate::warn_log!("history push to {} failed: {}", location, e);
                        }
                    }
                    Command::ReplaceHistory(location) => {
                        if let Err(e) = self.history.replace(&location) {
                            crate::warn_log!("history replace with {} failed: {}", location, e);
                        }
                    }
                    Command::InvokeLogout => {
                        if let Err(e) = self.session.logout() {
                            crate::warn_log!("logout failed: {}", e);
                        }
                    }
                }
            }
        }

        self.state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::history::MemoryHistory;
    use crate::routing::Route;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct FakeSession {
        authenticated: Rc<Cell<bool>>,
        logouts: Rc<Cell<u32>>,
    }

    impl FakeSession {
        fn logged_in() -> Self {
            let s = Self::default();
            s.authenticated.set(true);
            s
        }
    }

    impl Session for FakeSession {
        fn is_authenticated(&self) -> bool {
            self.authenticated.get()
        }

        fn logout(&mut self) -> Result<(), AppError> {
            self.logouts.set(self.logouts.get() + 1);
            self.authenticated.set(false);
            Ok(())
        }
    }

    struct BrokenHistory;

    impl History for BrokenHistory {
        fn location(&self) -> String {
            "/".into()
        }

        fn push(&mut self, _: &str) -> Result<(), AppError> {
            Err(AppError::Dom("SecurityError".into()))
        }

        fn replace(&mut self, _: &str) -> Result<(), AppError> {
            Err(AppError::Dom("SecurityError".into()))
        }
    }

    fn router(initial: &str, session: FakeSession) -> Router<MemoryHistory, FakeSession> {
        Router::new(
            RouteTable::default(),
            RouterConfig::default(),
            MemoryHistory::new(initial),
            session,
        )
    }

    fn rendered(state: &RouterState) -> Option<Route> {
        state.rendered.as_ref().map(|m| m.route)
    }

    #[test]
    fn home_renders_on_start() {
        let mut r = router("/", FakeSession::default());
        assert_eq!(rendered(&r.start()), Some(Route::Home));
    }

    #[test]
    fn login_and_signup_render() {
        let mut r = router("/", FakeSession::default());
        assert_eq!(
            rendered(&r.dispatch(Message::Navigate("/login".into()))),
            Some(Route::Login)
        );
        assert_eq!(
            rendered(&r.dispatch(Message::Navigate("/signup".into()))),
            Some(Route::SignUp)
        );
        assert_eq!(r.history().entries(), &["/", "/login", "/signup"]);
    }

    #[test]
    fn logout_runs_once_and_lands_home() {
        let session = FakeSession::logged_in();
        let mut r = router("/", session.clone());
        let state = r.dispatch(Message::Navigate("/logout".into()));

        assert_eq!(session.logouts.get(), 1);
        assert!(!session.authenticated.get());
        assert_eq!(r.history().location(), "/");
        assert_eq!(r.history().entries(), &["/", "/logout", "/"]);
        assert_eq!(rendered(&state), Some(Route::Home));
        assert_eq!(state.location, "/");
    }

    #[test]
    fn logout_on_initial_load() {
        let session = FakeSession::logged_in();
        let mut r = router("/logout", session.clone());
        let state = r.start();
        assert_eq!(session.logouts.get(), 1);
        assert_eq!(r.history().location(), "/");
        assert_eq!(rendered(&state), Some(Route::Home));
    }

    #[test]
    fn logout_message_behaves_like_visiting_logout() {
        let session = FakeSession::logged_in();
        let mut r = router("/protected", session.clone());
        r.start();
        let state = r.dispatch(Message::Logout);
        assert_eq!(session.logouts.get(), 1);
        assert_eq!(r.history().location(), "/");
        assert_eq!(rendered(&state), Some(Route::Home));
    }

    #[test]
    fn admin_sub_paths_render_admin() {
        let mut r = router("/", FakeSession::default());
        for path in ["/admin", "/admin/", "/admin/users", "/admin/users/42/edit"] {
            let state = r.dispatch(Message::Navigate(path.into()));
            assert_eq!(rendered(&state), Some(Route::Admin), "{}", path);
        }
        let state = r.dispatch(Message::Navigate("/admin/users/42".into()));
        assert_eq!(state.rendered.unwrap().rest, "/users/42");
    }

    #[test]
    fn protected_renders_when_authenticated() {
        let mut r = router("/", FakeSession::logged_in());
        let state = r.dispatch(Message::Navigate("/protected".into()));
        assert_eq!(rendered(&state), Some(Route::Protected));
        assert_eq!(r.history().location(), "/protected");
    }

    #[test]
    fn protected_redirects_to_login_when_anonymous() {
        let mut r = router("/", FakeSession::default());
        let state = r.dispatch(Message::Navigate("/protected".into()));

        assert_ne!(rendered(&state), Some(Route::Protected));
        assert_eq!(rendered(&state), Some(Route::Login));
        assert_eq!(state.redirect_from.as_deref(), Some("/protected"));
        // The refused entry is replaced, not kept.
        assert_eq!(r.history().entries(), &["/", "/login"]);
    }

    #[test]
    fn unmatched_paths_render_nothing() {
        let mut r = router("/", FakeSession::default());
        let state = r.dispatch(Message::Navigate("/does-not-exist".into()));
        assert_eq!(state.rendered, None);
        assert_eq!(r.history().location(), "/does-not-exist");
    }

    #[test]
    fn back_navigation_re_resolves() {
        let mut r = router("/", FakeSession::default());
        r.dispatch(Message::Navigate("/login".into()));
        r.dispatch(Message::Navigate("/signup".into()));

        let previous = r.history.back().map(str::to_string).unwrap();
        let state = r.dispatch(Message::LocationChanged(previous));
        assert_eq!(rendered(&state), Some(Route::Login));
    }

    #[test]
    fn custom_login_path_is_used_by_guard() {
        let config = RouterConfig {
            login_path: "/signup".into(),
            ..RouterConfig::default()
        };
        let mut r = Router::new(
            RouteTable::default(),
            config,
            MemoryHistory::default(),
            FakeSession::default(),
        );
        let state = r.dispatch(Message::Navigate("/protected/x".into()));
        assert_eq!(rendered(&state), Some(Route::SignUp));
        assert_eq!(state.redirect_from.as_deref(), Some("/protected/x"));
    }

    #[test]
    fn history_failures_do_not_abort_navigation() {
        let session = FakeSession::logged_in();
        let mut r = Router::new(
            RouteTable::default(),
            RouterConfig::default(),
            BrokenHistory,
            session.clone(),
        );
        let state = r.dispatch(Message::Navigate("/logout".into()));
        assert_eq!(session.logouts.get(), 1);
        assert_eq!(rendered(&state), Some(Route::Home));
    }

    #[test]
    fn replaced_session_decides_the_guard() {
        let mut r = router("/", FakeSession::default());
        let state = r.dispatch(Message::Navigate("/protected".into()));
        assert_eq!(rendered(&state), Some(Route::Login));

        r.set_session(FakeSession::logged_in());
        let state = r.dispatch(Message::Navigate("/protected".into()));
        assert_eq!(rendered(&state), Some(Route::Protected));
    }

    #[test]
    fn redirect_counter_resets_between_dispatches() {
        let mut r = router("/", FakeSession::default());
        for _ in 0..20 {
            let state = r.dispatch(Message::Navigate("/protected".into()));
            assert_eq!(rendered(&state), Some(Route::Login));
        }
    }
}
