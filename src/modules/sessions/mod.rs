//! Browser identity: cookie helpers and the in-memory view-session store.

mod cookies;
mod store;

pub use cookies::{clear_token_cookie, parse_cookie, session_cookie, token_cookie};
pub use store::{SessionHandle, SessionStore};
