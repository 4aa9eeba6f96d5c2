//! Authentication state as seen by the router.
//!
//! Logging in and issuing tokens happens elsewhere; the router only asks
//! "is somebody logged in?" and, on `/logout`, clears whatever marks the
//! session as logged in.

use crate::error::AppError;

pub trait Session {
    fn is_authenticated(&self) -> bool;

    fn logout(&mut self) -> Result<(), AppError>;
}

/// Permission level stored next to the token after login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    User,
    Admin,
}

impl Permission {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "user" => Some(Permission::User),
            "admin" => Some(Permission::Admin),
            _ => None,
        }
    }
}

/// Session backed by `window.localStorage`.
///
/// A session counts as authenticated when a token is stored and the
/// permissions entry holds a known level.
#[derive(Debug, Clone)]
pub struct LocalStorageSession {
    token_key: String,
    permissions_key: String,
}

impl LocalStorageSession {
    pub fn new(token_key: impl Into<String>, permissions_key: impl Into<String>) -> Self {
        Self {
            token_key: token_key.into(),
            permissions_key: permissions_key.into(),
        }
    }

    fn storage(&self) -> Result<web_sys::Storage, AppError> {
        let window =
            web_sys::window().ok_or_else(|| AppError::Dom("no global `window` exists".into()))?;
        window
            .local_storage()
            .map_err(|e| AppError::from_js(&e))?
            .ok_or_else(|| AppError::Dom("localStorage unavailable".into()))
    }

    fn get(&self, key: &str) -> Option<String> {
        self.storage().ok()?.get_item(key).ok().flatten()
    }

    pub fn token(&self) -> Option<String> {
        self.get(&self.token_key).filter(|t| !t.is_empty())
    }

    pub fn permission(&self) -> Option<Permission> {
        self.get(&self.permissions_key)
            .as_deref()
            .and_then(Permission::parse)
    }
}

impl Session for LocalStorageSession {
    fn is_authenticated(&self) -> bool {
        self.token().is_some() && self.permission().is_some()
    }

    fn logout(&mut self) -> Result<(), AppError> {
        let storage = self.storage()?;
        storage
            .remove_item(&self.token_key)
            .map_err(|e| AppError::from_js(&e))?;
        storage
            .remove_item(&self.permissions_key)
            .map_err(|e| AppError::from_js(&e))?;
        crate::debug_log!("session cleared");
        Ok(())
    }
}
