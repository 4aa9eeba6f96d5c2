//! The top-level `Routes` component.
//!
//! Builds `div.app > header.header > div#route-outlet` inside the mount
//! element, owns the browser router, and re-renders the outlet after every
//! dispatch. Link clicks and `popstate` are funnelled into the same
//! dispatch path.

use std::cell::{Cell, RefCell};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, MouseEvent};

use crate::config::RouterConfig;
use crate::dom_utils::ensure_child;
use crate::error::AppError;
use crate::history::BrowserHistory;
use crate::messages::Message;
use crate::routing::RouteTable;
use crate::session::LocalStorageSession;
use crate::state::{Router, RouterState};
use crate::views::{self, View, ViewKind, ViewRegistry, LINK_ATTRIBUTE};

pub const APP_ID: &str = "app";
pub const HEADER_ID: &str = "app-header";
pub const OUTLET_ID: &str = "route-outlet";

/// Set on the app container once its click handler is attached.
const BOUND_ATTRIBUTE: &str = "data-router-bound";

pub type BrowserRouter = Router<BrowserHistory, LocalStorageSession>;

thread_local! {
    pub static APP_ROUTER: RefCell<Option<BrowserRouter>> = const { RefCell::new(None) };
    pub static VIEW_REGISTRY: RefCell<ViewRegistry> = RefCell::new(ViewRegistry::default());
    static OUTLET: RefCell<Option<Element>> = const { RefCell::new(None) };
    static POPSTATE_INSTALLED: Cell<bool> = const { Cell::new(false) };
}

/// Mount the routes into `#{config.mount_id}` and render the current
/// location. Calling it again re-renders without installing listeners twice.
pub fn mount_routes(document: &Document, config: &RouterConfig) -> Result<(), JsValue> {
    let mount = document
        .get_element_by_id(&config.mount_id)
        .ok_or_else(|| AppError::MissingMountPoint(config.mount_id.clone()))?;

    // Only the mount's own children count; the host page may reuse our ids.
    let app = ensure_child(document, &mount, APP_ID, "div", "app")?;
    let header = ensure_child(document, &app, HEADER_ID, "header", "header")?;
    let outlet = ensure_child(document, &header, OUTLET_ID, "div", "route-outlet")?;
    OUTLET.with(|o| *o.borrow_mut() = Some(outlet));

    let router = Router::new(
        RouteTable::default(),
        config.clone(),
        BrowserHistory::new()?,
        session_for(config),
    );
    APP_ROUTER.with(|r| *r.borrow_mut() = Some(router));

    if !app.has_attribute(BOUND_ATTRIBUTE) {
        install_link_handler(&app)?;
        app.set_attribute(BOUND_ATTRIBUTE, "")?;
    }
    if !POPSTATE_INSTALLED.with(Cell::get) {
        install_popstate_handler()?;
        POPSTATE_INSTALLED.with(|p| p.set(true));
    }

    let state = APP_ROUTER.with(|r| r.borrow_mut().as_mut().map(|router| router.start()));
    if let Some(state) = state {
        render(document, &state)?;
    }
    Ok(())
}

/// Run a message through the global router and re-render.
pub fn dispatch_global_message(msg: Message) {
    // The router borrow must end before rendering: views may install
    // handlers that dispatch again.
    let state = APP_ROUTER.with(|r| r.borrow_mut().as_mut().map(|router| router.dispatch(msg)));

    let Some(state) = state else {
        crate::warn_log!("router not mounted, dropping navigation");
        return;
    };

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if let Err(e) = render(&document, &state) {
        web_sys::console::error_1(&format!("Failed to render route: {:?}", e).into());
    }
}

pub fn navigate(location: &str) {
    dispatch_global_message(Message::Navigate(location.to_string()));
}

/// Swap in an application view for one of the routes.
pub fn register_view(kind: ViewKind, view: impl View + 'static) {
    VIEW_REGISTRY.with(|v| v.borrow_mut().register(kind, view));
}

/// Apply a new config to the live router (if mounted). The session is
/// rebuilt so changed storage keys take effect too.
pub fn reconfigure(config: RouterConfig) {
    APP_ROUTER.with(|r| {
        if let Some(router) = r.borrow_mut().as_mut() {
            router.set_session(session_for(&config));
            router.set_config(config);
        }
    });
}

fn session_for(config: &RouterConfig) -> LocalStorageSession {
    LocalStorageSession::new(config.token_key.clone(), config.permissions_key.clone())
}

fn render(document: &Document, state: &RouterState) -> Result<(), JsValue> {
    let outlet = OUTLET
        .with(|o| o.borrow().clone())
        .ok_or_else(|| JsValue::from_str("route outlet missing"))?;
    VIEW_REGISTRY.with(|v| views::render_outlet(document, &outlet, &v.borrow(), state))
}

// Single delegated listener instead of one closure per link.
fn install_link_handler(app: &Element) -> Result<(), JsValue> {
    let on_click = Closure::wrap(Box::new(move |evt: MouseEvent| {
        if evt.default_prevented()
            || evt.button() != 0
            || evt.meta_key()
            || evt.ctrl_key()
            || evt.shift_key()
            || evt.alt_key()
        {
            return;
        }

        let anchor = evt
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(&format!("a[{}]", LINK_ATTRIBUTE)).ok().flatten());

        if let Some(anchor) = anchor {
            if let Some(href) = anchor.get_attribute("href") {
                evt.prevent_default();
                navigate(&href);
            }
        }
    }) as Box<dyn FnMut(_)>);

    app.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}

fn install_popstate_handler() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global `window` exists"))?;

    let on_popstate = Closure::wrap(Box::new(move |_evt: web_sys::PopStateEvent| {
        let location = APP_ROUTER.with(|r| {
            r.borrow()
                .as_ref()
                .map(|router| crate::history::History::location(router.history()))
        });
        if let Some(location) = location {
            dispatch_global_message(Message::LocationChanged(location));
        }
    }) as Box<dyn FnMut(_)>);

    window.add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref())?;
    on_popstate.forget();
    Ok(())
}
