//! Router configuration.
//!
//! Sources, later ones winning:
//! 1. `RouterConfig::default()`
//! 2. `APP_LOGIN_PATH` captured at compile time
//! 3. `<script type="application/json" id="app-config">` in the page
//! 4. `init_router_config_js()` called from the bootstrap script
//!
//! Whatever ends up in `ROUTER_CONFIG` has passed `validate()`.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::error::AppError;
use crate::routing::{Route, RouteTable};

/// Id of the optional inline JSON config element.
pub const CONFIG_ELEMENT_ID: &str = "app-config";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Element the `Routes` component mounts into.
    pub mount_id: String,
    /// Where unauthenticated visitors of a guarded route are sent.
    pub login_path: String,
    /// Where `/logout` lands.
    pub home_path: String,
    pub token_key: String,
    pub permissions_key: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            mount_id: "root".to_string(),
            login_path: "/login".to_string(),
            home_path: "/".to_string(),
            token_key: "token".to_string(),
            permissions_key: "permissions".to_string(),
        }
    }
}

impl RouterConfig {
    /// Defaults plus whatever was baked in at compile time.
    pub fn from_env() -> Self {
        Self::with_login_override(option_env!("APP_LOGIN_PATH"))
    }

    /// Defaults with `login_path` replaced, if the result still validates.
    fn with_login_override(login_path: Option<&str>) -> Self {
        let Some(path) = login_path else {
            return Self::default();
        };
        let config = Self {
            login_path: path.to_string(),
            ..Self::default()
        };
        match config.validate() {
            Ok(()) => config,
            Err(e) => {
                crate::warn_log!("ignoring APP_LOGIN_PATH: {}", e);
                Self::default()
            }
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_js(value: JsValue) -> Result<Self, AppError> {
        let config: Self = serde_wasm_bindgen::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        for (name, path) in [("login_path", &self.login_path), ("home_path", &self.home_path)] {
            if !path.starts_with('/') {
                return Err(AppError::InvalidConfig(format!(
                    "{} must start with '/', got {:?}",
                    name, path
                )));
            }
        }

        for (name, value) in [
            ("mount_id", &self.mount_id),
            ("token_key", &self.token_key),
            ("permissions_key", &self.permissions_key),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::InvalidConfig(format!("{} must not be empty", name)));
            }
        }

        // The guard and logout both redirect; landing on either again loops.
        let table = RouteTable::default();
        for (name, path) in [("login_path", &self.login_path), ("home_path", &self.home_path)] {
            if let Some(m) = table.resolve(path) {
                if m.route.is_guarded() || m.route == Route::Logout {
                    return Err(AppError::InvalidConfig(format!(
                        "{} {:?} would redirect again",
                        name, path
                    )));
                }
            }
        }

        Ok(())
    }
}

thread_local! {
    pub static ROUTER_CONFIG: RefCell<RouterConfig> = RefCell::new(RouterConfig::from_env());
}

pub fn current() -> RouterConfig {
    ROUTER_CONFIG.with(|c| c.borrow().clone())
}

pub fn set(config: RouterConfig) {
    ROUTER_CONFIG.with(|c| *c.borrow_mut() = config);
}

/// Pick up the inline JSON config element if the page has one.
pub fn load_from_document(document: &web_sys::Document) -> Result<(), AppError> {
    let Some(el) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        return Ok(());
    };
    let raw = el.text_content().unwrap_or_default();
    if raw.trim().is_empty() {
        return Ok(());
    }
    let config = RouterConfig::from_json(&raw)?;
    crate::debug_log!("router config loaded from #{}", CONFIG_ELEMENT_ID);
    set(config);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        RouterConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = RouterConfig::from_json(r#"{"mount_id": "app"}"#).unwrap();
        assert_eq!(config.mount_id, "app");
        assert_eq!(config.login_path, "/login");
        assert_eq!(config.token_key, "token");
    }

    #[test]
    fn compile_time_login_path_is_validated() {
        assert_eq!(RouterConfig::with_login_override(None), RouterConfig::default());

        let config = RouterConfig::with_login_override(Some("/signup"));
        assert_eq!(config.login_path, "/signup");

        // A looping override falls back to the defaults.
        let config = RouterConfig::with_login_override(Some("/protected/login"));
        assert_eq!(config, RouterConfig::default());
        config.validate().unwrap();

        let config = RouterConfig::with_login_override(Some("login"));
        assert_eq!(config.login_path, "/login");
    }

    #[test]
    fn env_config_is_always_valid() {
        RouterConfig::from_env().validate().unwrap();
    }

    #[test]
    fn relative_paths_rejected() {
        let err = RouterConfig::from_json(r#"{"login_path": "login"}"#).unwrap_err();
        assert!(matches!(err, AppError::InvalidConfig(_)));
    }

    #[test]
    fn looping_login_path_rejected() {
        let err = RouterConfig::from_json(r#"{"login_path": "/protected/login"}"#).unwrap_err();
        assert!(err.to_string().contains("redirect again"));

        let err = RouterConfig::from_json(r#"{"home_path": "/logout"}"#).unwrap_err();
        assert!(err.to_string().contains("home_path"));
    }

    #[test]
    fn empty_keys_rejected() {
        let err = RouterConfig::from_json(r#"{"token_key": " "}"#).unwrap_err();
        assert!(err.to_string().contains("token_key"));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = RouterConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn global_config_round_trips() {
        let mut config = RouterConfig::default();
        config.mount_id = "app".into();
        set(config.clone());
        assert_eq!(current(), config);
        set(RouterConfig::default());
    }
}
