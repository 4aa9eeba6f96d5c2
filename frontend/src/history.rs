//! Navigation history.
//!
//! The router only needs three things from history: the current location,
//! a way to push a new entry and a way to replace the current one. The
//! browser implementation talks to `window.history`; `MemoryHistory` keeps
//! the stack in a `Vec` and backs native tests and non-browser hosts.

use crate::error::AppError;

pub trait History {
    /// Current location, including any query string or fragment.
    fn location(&self) -> String;

    fn push(&mut self, location: &str) -> Result<(), AppError>;

    fn replace(&mut self, location: &str) -> Result<(), AppError>;
}

/// In-memory history stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryHistory {
    entries: Vec<String>,
    index: usize,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl MemoryHistory {
    pub fn new(initial: &str) -> Self {
        Self {
            entries: vec![initial.to_string()],
            index: 0,
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Step back one entry. Returns the new location, or `None` at the start.
    pub fn back(&mut self) -> Option<&str> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.entries[self.index].as_str())
    }

    pub fn forward(&mut self) -> Option<&str> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.entries[self.index].as_str())
    }
}

impl History for MemoryHistory {
    fn location(&self) -> String {
        self.entries[self.index].clone()
    }

    fn push(&mut self, location: &str) -> Result<(), AppError> {
        // Pushing drops anything ahead of the cursor, as browsers do.
        self.entries.truncate(self.index + 1);
        self.entries.push(location.to_string());
        self.index += 1;
        Ok(())
    }

    fn replace(&mut self, location: &str) -> Result<(), AppError> {
        self.entries[self.index] = location.to_string();
        Ok(())
    }
}

/// `window.history` backed implementation.
#[derive(Debug, Clone)]
pub struct BrowserHistory {
    window: web_sys::Window,
}

impl BrowserHistory {
    pub fn new() -> Result<Self, AppError> {
        let window =
            web_sys::window().ok_or_else(|| AppError::Dom("no global `window` exists".into()))?;
        Ok(Self { window })
    }

    fn history(&self) -> Result<web_sys::History, AppError> {
        self.window.history().map_err(|e| AppError::from_js(&e))
    }
}

impl History for BrowserHistory {
    fn location(&self) -> String {
        let location = self.window.location();
        let path = location.pathname().unwrap_or_else(|_| "/".to_string());
        let search = location.search().unwrap_or_default();
        let hash = location.hash().unwrap_or_default();
        format!("{}{}{}", path, search, hash)
    }

    fn push(&mut self, location: &str) -> Result<(), AppError> {
        self.history()?
            .push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(location))
            .map_err(|e| AppError::from_js(&e))
    }

    fn replace(&mut self, location: &str) -> Result<(), AppError> {
        self.history()?
            .replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(location))
            .map_err(|e| AppError::from_js(&e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_moves_cursor() {
        let mut h = MemoryHistory::default();
        h.push("/login").unwrap();
        h.push("/signup").unwrap();
        assert_eq!(h.location(), "/signup");
        assert_eq!(h.entries(), &["/", "/login", "/signup"]);
    }

    #[test]
    fn replace_keeps_length() {
        let mut h = MemoryHistory::new("/protected");
        h.replace("/login").unwrap();
        assert_eq!(h.entries(), &["/login"]);
    }

    #[test]
    fn back_then_push_drops_forward_entries() {
        let mut h = MemoryHistory::default();
        h.push("/a").unwrap();
        h.push("/b").unwrap();
        assert_eq!(h.back(), Some("/a"));
        h.push("/c").unwrap();
        assert_eq!(h.entries(), &["/", "/a", "/c"]);
        assert_eq!(h.forward(), None);
    }

    #[test]
    fn back_at_start_is_none() {
        let mut h = MemoryHistory::default();
        assert_eq!(h.back(), None);
        assert_eq!(h.location(), "/");
    }
}
