// frontend/src/views.rs
//
// Views the router can put into the outlet, and the function that does it.
//
// The real login, sign-up, protected and admin screens live outside this
// crate; the placeholders below keep the app usable until an application
// registers its own views through `ViewRegistry::register`.
//
use std::collections::HashMap;

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::dom_utils::{clear_children, text_element};
use crate::routing::{Route, RouteMatch};
use crate::state::RouterState;

/// Attribute on the outlet naming the view currently shown.
pub const VIEW_ATTRIBUTE: &str = "data-view";

/// Marks anchors whose clicks the router handles itself.
pub const LINK_ATTRIBUTE: &str = "data-link";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Home,
    Login,
    SignUp,
    Protected,
    Admin,
}

impl ViewKind {
    pub const ALL: [ViewKind; 5] = [
        ViewKind::Home,
        ViewKind::Login,
        ViewKind::SignUp,
        ViewKind::Protected,
        ViewKind::Admin,
    ];

    /// `/logout` has no view; it only redirects.
    pub fn for_route(route: Route) -> Option<Self> {
        match route {
            Route::Home => Some(ViewKind::Home),
            Route::Login => Some(ViewKind::Login),
            Route::SignUp => Some(ViewKind::SignUp),
            Route::Protected => Some(ViewKind::Protected),
            Route::Admin => Some(ViewKind::Admin),
            Route::Logout => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewKind::Home => "home",
            ViewKind::Login => "login",
            ViewKind::SignUp => "signup",
            ViewKind::Protected => "protected",
            ViewKind::Admin => "admin",
        }
    }
}

/// What a view gets to look at while rendering.
pub struct ViewContext<'a> {
    pub route_match: &'a RouteMatch,
    /// Set when a guard sent the visitor here.
    pub redirect_from: Option<&'a str>,
}

pub trait View {
    fn render(&self, document: &Document, ctx: &ViewContext<'_>) -> Result<Element, JsValue>;
}

pub struct ViewRegistry {
    views: HashMap<ViewKind, Box<dyn View>>,
}

impl Default for ViewRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(ViewKind::Home, HomeView);
        registry.register(ViewKind::Login, LoginView);
        registry.register(ViewKind::SignUp, SignUpView);
        registry.register(ViewKind::Protected, ProtectedView);
        registry.register(ViewKind::Admin, AdminView);
        registry
    }
}

impl ViewRegistry {
    pub fn empty() -> Self {
        Self {
            views: HashMap::new(),
        }
    }

    /// Install `view` for `kind`, replacing what was there.
    pub fn register(&mut self, kind: ViewKind, view: impl View + 'static) {
        self.views.insert(kind, Box::new(view));
    }

    pub fn get(&self, kind: ViewKind) -> Option<&dyn View> {
        self.views.get(&kind).map(|v| v.as_ref())
    }

    pub fn contains(&self, kind: ViewKind) -> bool {
        self.views.contains_key(&kind)
    }
}

/// Replace the outlet's content with the view for `state.rendered`, or
/// leave it empty when nothing matched.
pub fn render_outlet(
    document: &Document,
    outlet: &Element,
    registry: &ViewRegistry,
    state: &RouterState,
) -> Result<(), JsValue> {
    clear_children(outlet);

    let Some(route_match) = state.rendered.as_ref() else {
        outlet.remove_attribute(VIEW_ATTRIBUTE)?;
        return Ok(());
    };
    let Some(kind) = ViewKind::for_route(route_match.route) else {
        outlet.remove_attribute(VIEW_ATTRIBUTE)?;
        return Ok(());
    };
    let Some(view) = registry.get(kind) else {
        crate::warn_log!("no view registered for {}", kind.as_str());
        outlet.remove_attribute(VIEW_ATTRIBUTE)?;
        return Ok(());
    };

    let ctx = ViewContext {
        route_match,
        redirect_from: state.redirect_from.as_deref(),
    };
    let el = view.render(document, &ctx)?;
    outlet.append_child(&el)?;
    outlet.set_attribute(VIEW_ATTRIBUTE, kind.as_str())?;
    Ok(())
}

/// An anchor the router navigates to without a page load.
pub fn link(document: &Document, to: &str, label: &str) -> Result<Element, JsValue> {
    let a = text_element(document, "a", label)?;
    a.set_attribute("href", to)?;
    a.set_attribute(LINK_ATTRIBUTE, "")?;
    Ok(a)
}

// ---------------------------------------------------------------------------
// Placeholder views
// ---------------------------------------------------------------------------

fn page(document: &Document, kind: ViewKind, title: &str) -> Result<Element, JsValue> {
    let section = document.create_element("section")?;
    section.set_class_name(&format!("view view-{}", kind.as_str()));
    let heading = text_element(document, "h1", title)?;
    section.append_child(&heading)?;
    Ok(section)
}

fn nav(document: &Document, routes: &[(Route, &str)]) -> Result<Element, JsValue> {
    let nav = document.create_element("nav")?;
    for (route, label) in routes {
        let a = link(document, route.path(), label)?;
        nav.append_child(&a)?;
    }
    Ok(nav)
}

pub struct HomeView;

impl View for HomeView {
    fn render(&self, document: &Document, _ctx: &ViewContext<'_>) -> Result<Element, JsValue> {
        let el = page(document, ViewKind::Home, "Home")?;
        let links = nav(
            document,
            &[
                (Route::Login, "Login"),
                (Route::SignUp, "Sign Up"),
                (Route::Protected, "Protected"),
                (Route::Admin, "Admin"),
                (Route::Logout, "Logout"),
            ],
        )?;
        el.append_child(&links)?;
        Ok(el)
    }
}

pub struct LoginView;

impl View for LoginView {
    fn render(&self, document: &Document, ctx: &ViewContext<'_>) -> Result<Element, JsValue> {
        let el = page(document, ViewKind::Login, "Login")?;
        if let Some(from) = ctx.redirect_from {
            let note = text_element(document, "p", &format!("Log in to continue to {}", from))?;
            note.set_class_name("redirect-note");
            el.append_child(&note)?;
        }
        let links = nav(document, &[(Route::SignUp, "Sign Up"), (Route::Home, "Home")])?;
        el.append_child(&links)?;
        Ok(el)
    }
}

pub struct SignUpView;

impl View for SignUpView {
    fn render(&self, document: &Document, _ctx: &ViewContext<'_>) -> Result<Element, JsValue> {
        let el = page(document, ViewKind::SignUp, "Sign Up")?;
        let links = nav(document, &[(Route::Login, "Login"), (Route::Home, "Home")])?;
        el.append_child(&links)?;
        Ok(el)
    }
}

pub struct ProtectedView;

impl View for ProtectedView {
    fn render(&self, document: &Document, _ctx: &ViewContext<'_>) -> Result<Element, JsValue> {
        let el = page(document, ViewKind::Protected, "Protected")?;
        let links = nav(document, &[(Route::Logout, "Logout"), (Route::Home, "Home")])?;
        el.append_child(&links)?;
        Ok(el)
    }
}

/// Stand-in for the admin sub-application. It is handed the sub-path below
/// `/admin` so a real admin app can run its own routing from there.
pub struct AdminView;

impl View for AdminView {
    fn render(&self, document: &Document, ctx: &ViewContext<'_>) -> Result<Element, JsValue> {
        let el = page(document, ViewKind::Admin, "Admin")?;
        el.set_attribute("data-base", &ctx.route_match.matched)?;
        el.set_attribute("data-sub-path", &ctx.route_match.rest)?;
        Ok(el)
    }
}
