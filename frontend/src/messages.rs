// frontend/src/messages.rs
//
// Navigation events and the side effects they ask for.
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// User-initiated navigation: adds a history entry.
    Navigate(String),

    /// History already points at this location (initial load, back/forward).
    LocationChanged(String),

    /// History was rewritten by a redirect; `from` is the location that was
    /// refused, if the redirect came from a guard.
    Redirected { to: String, from: Option<String> },

    /// Log out from code rather than by visiting `/logout`.
    Logout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Chain another message to be processed
    SendMessage(Message),

    PushHistory(String),

    ReplaceHistory(String),

    /// Run the session's logout procedure
    InvokeLogout,
}
