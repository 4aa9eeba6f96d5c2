//! Small crate-wide logging macros.
//!
//! Both macros go through `web_sys::console` when compiled for the browser.
//! On native targets (unit tests) there is no console to talk to, so
//! `debug_log!` is a no-op and `warn_log!` falls back to stderr.

/// Log to the browser console in debug builds only.
///
/// ```rust,ignore
/// debug_log!("resolved {} -> {:?}", path, route);
/// ```
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        #[cfg(all(target_arch = "wasm32", debug_assertions))]
        {
            web_sys::console::log_1(&format!($($arg)*).into());
        }
        #[cfg(not(all(target_arch = "wasm32", debug_assertions)))]
        {
            if false {
                let _ = format!($($arg)*);
            }
        }
    }};
}

/// Emit a warning. Used for failures that must not abort navigation.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::warn_1(&format!($($arg)*).into());
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            eprintln!("warning: {}", format!($($arg)*));
        }
    }};
}
