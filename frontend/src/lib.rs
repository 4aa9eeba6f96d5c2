use wasm_bindgen::prelude::*;

#[macro_use]
mod macros;

pub mod app;
pub mod config;
pub mod dom_utils;
pub mod error;
pub mod guard;
pub mod history;
pub mod messages;
pub mod routing;
pub mod session;
pub mod state;
pub mod update;
pub mod views;

pub use config::RouterConfig;
pub use error::AppError;
pub use history::{BrowserHistory, History, MemoryHistory};
pub use messages::{Command, Message};
pub use routing::{Route, RouteMatch, RouteTable};
pub use session::{LocalStorageSession, Session};
pub use state::{Router, RouterState};
pub use views::{View, ViewContext, ViewKind, ViewRegistry};

// Main entry point for the WASM application
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Initialize better panic messages
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| AppError::Dom("no global `window` exists".into()))?;
    let document = window
        .document()
        .ok_or_else(|| AppError::Dom("should have a document on window".into()))?;

    // A broken inline config should not take the whole app down.
    if let Err(e) = config::load_from_document(&document) {
        web_sys::console::error_1(&format!("Ignoring inline config: {}", e).into());
    }

    let config = config::current();
    debug_log!("mounting routes into #{}", config.mount_id);
    app::mount_routes(&document, &config)
}

/// Navigate from JavaScript, e.g. after a successful login.
#[wasm_bindgen]
pub fn navigate_js(location: String) {
    app::navigate(&location);
}

#[wasm_bindgen]
pub fn logout_js() {
    app::dispatch_global_message(Message::Logout);
}

/// Location a guard refused most recently, if the visitor was redirected.
#[wasm_bindgen]
pub fn redirect_from_js() -> Option<String> {
    app::APP_ROUTER.with(|r| {
        r.borrow()
            .as_ref()
            .and_then(|router| router.state().redirect_from.clone())
    })
}

/// Runtime configuration from the bootstrap script. Paths and storage keys
/// apply immediately; a different `mount_id` takes effect on the next mount.
#[wasm_bindgen]
pub fn init_router_config_js(value: JsValue) -> Result<(), JsValue> {
    let config = RouterConfig::from_js(value)?;
    config::set(config.clone());
    app::reconfigure(config);
    Ok(())
}
